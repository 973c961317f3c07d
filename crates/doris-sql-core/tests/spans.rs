//! Span invariants over a corpus of statements.

mod common;
use common::*;

use doris_sql_core::ast::{Node, NodeKind, NodeRef};
use doris_sql_core::Span;
use pretty_assertions::assert_eq;

const CORPUS: &[&str] = &[
    "SELECT a, b FROM t WHERE a > 1",
    "SELECT t.*, COUNT(*) AS n FROM db.t AS t GROUP BY t.k HAVING COUNT(*) > 1 ORDER BY n DESC LIMIT 5, 10",
    "WITH x AS (SELECT 1 AS a) SELECT a FROM x UNION ALL SELECT 2",
    "SELECT e FROM t LATERAL VIEW explode(arr) tmp AS e, f",
    "SELECT * FROM a LEFT JOIN b ON a.id = b.id JOIN c USING (id)",
    "SELECT CASE WHEN a THEN 1 ELSE 2 END, CAST(b AS VARCHAR(10)), c::INT FROM t",
    "SELECT array_map(x -> x * 2, arr), arr[1:2], s.f, {'k': 1}, [1, 2] FROM t",
    "SELECT SUM(v) OVER (PARTITION BY k ORDER BY dt ROWS 3 PRECEDING) FROM t",
    "SELECT a FROM t WHERE b BETWEEN 1 AND 2 AND c NOT IN (SELECT d FROM u) AND e LIKE 'x%'",
    "INSERT INTO t PARTITION (p1) (a, b) VALUES (1, 2), (3, ?)",
    "UPDATE t SET a = 1 WHERE b = 2",
    "DELETE FROM t USING u WHERE t.id = u.id",
    "CREATE TABLE t (a INT NOT NULL, b STRING) DUPLICATE KEY (a) DISTRIBUTED BY HASH (a) BUCKETS AUTO",
    "CREATE VIEW v AS SELECT 1",
    "ALTER TABLE t ADD COLUMN c INT, SET ('k' = 'v')",
    "SHOW FULL COLUMNS FROM t FROM db WHERE Field = 'a'",
    "DESC t",
    "SET GLOBAL x = 1, @y = 'z'",
    "GRANT SELECT_PRIV ON db.* TO 'u'@'%'",
    "START TRANSACTION WITH LABEL l",
    "EXPLAIN VERBOSE SELECT 1",
    "KILL QUERY 7",
    "LOAD LABEL db.l (DATA INFILE('hdfs://x') INTO TABLE t)",
];

#[test]
fn children_nest_inside_parents() {
    for sql in CORPUS {
        assert_spans_nest(&parse(sql));
    }
}

#[test]
fn statement_spans_cover_the_text() {
    for sql in CORPUS {
        let statement = parse(sql);
        assert_eq!(statement.span(), Span::new(0, sql.len()), "{sql}");
    }
}

#[test]
fn spans_slice_to_source_text() {
    let sql = "SELECT price * qty AS total FROM orders";
    let select = parse_select(sql);
    let item = &select.projection().items()[0];
    assert_eq!(item.expr().span().slice(sql), Some("price * qty"));
    assert_eq!(item.span().slice(sql), Some("price * qty AS total"));
}

#[test]
fn batch_spans_are_absolute() {
    let sql = "SELECT 1;\nSELECT b FROM t";
    let results = doris_sql_core::parse_batch(sql);
    let second = results[1].as_ref().unwrap();
    assert_eq!(second.span().slice(sql), Some("SELECT b FROM t"));
    let column = NodeRef::from(second)
        .descendants()
        .into_iter()
        .find(|node| node.kind() == NodeKind::ColumnRef)
        .unwrap();
    assert_eq!(column.span().slice(sql), Some("b"));
}

#[test]
fn line_and_column_of_a_span() {
    let sql = "SELECT a,\n       b\nFROM t";
    let select = parse_select(sql);
    let position = select.projection().items()[1].span().start_position(sql);
    assert_eq!((position.line, position.column), (2, 8));
}
