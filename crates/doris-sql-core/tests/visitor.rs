//! Visitor framework: exhaustive dispatch, structural default and
//! result combination.

mod common;
use common::*;

use std::collections::HashSet;

use doris_sql_core::ast::{
    ColumnRef, Expr, Family, FunctionCall, IntegerLiteral, Literal, Node, NodeKind, NodeRef, Query,
    WhereClause,
};
use doris_sql_core::visit::{combine, dispatch, walk, Visitor};
use pretty_assertions::assert_eq;

/// Records the kind of every node it is dispatched on.
#[derive(Default)]
struct KindRecorder {
    seen: Vec<NodeKind>,
}

impl Visitor for KindRecorder {
    type Output = ();

    fn empty(&mut self) {}

    fn combine(&mut self, (): (), (): ()) {}

    fn visit_node(&mut self, node: NodeRef<'_>) {
        self.seen.push(node.kind());
        walk(self, node);
    }
}

const CORPUS: &[&str] = &[
    "WITH c AS (SELECT 1 AS x) SELECT DISTINCT x, t.*, ? FROM c, db.t PARTITION (p) AS t \
     LATERAL VIEW explode(arr) v AS e \
     LEFT JOIN (SELECT 1) d ON TRUE \
     WHERE x IS NULL AND x BETWEEN 1 AND 2 AND x IN (1) AND x IN (SELECT 1) \
     AND x LIKE 'a' AND x MATCH_ANY 'b' AND EXISTS (SELECT 1) AND NOT (SELECT 1) = 1 \
     GROUP BY x HAVING COUNT(*) > 0 ORDER BY x LIMIT 1",
    "SELECT ROW_NUMBER() OVER (PARTITION BY a ORDER BY b ROWS BETWEEN 1 PRECEDING AND CURRENT ROW), \
     CAST(a AS INT), CASE WHEN a THEN 1 END, INTERVAL 1 DAY, [1], {'k': 2}, {3}, \
     x -> x, arr[1], arr[1:2], s.f, 1.5, 'str', FALSE, NULL, DATE '2024-01-01', `quoted`, `select` \
     FROM t UNION SELECT 1",
    "INSERT INTO t VALUES (1)",
    "UPDATE t SET a = 1",
    "DELETE FROM t",
    "CREATE TABLE t (a INT) DUPLICATE KEY (a) DISTRIBUTED BY RANDOM PROPERTIES ('k' = 'v')",
    "CREATE VIEW v AS SELECT 1",
    "CREATE DATABASE d",
    "ALTER TABLE t DROP COLUMN a",
    "DROP VIEW v",
    "TRUNCATE TABLE t",
    "SHOW TABLES",
    "DESCRIBE t",
    "USE d",
    "SET a = 1",
    "GRANT ALL ON *.* TO 'u'",
    "REVOKE ALL ON *.* FROM 'u'",
    "COMMIT",
    "EXPLAIN SELECT 1",
    "KILL 1",
    "DESC t",
    "LOAD LABEL l (x)",
];

#[test]
fn structural_default_reaches_every_node() {
    for sql in CORPUS {
        let statement = parse(sql);
        let mut recorder = KindRecorder::default();
        dispatch(&mut recorder, NodeRef::from(&statement));
        let expected: Vec<NodeKind> = NodeRef::from(&statement)
            .descendants()
            .iter()
            .map(NodeRef::kind)
            .collect();
        assert_eq!(recorder.seen, expected, "{sql}");
    }
}

#[test]
fn corpus_exercises_every_statement_kind() {
    let mut seen = HashSet::new();
    for sql in CORPUS {
        let statement = parse(sql);
        let mut recorder = KindRecorder::default();
        dispatch(&mut recorder, NodeRef::from(&statement));
        seen.extend(recorder.seen);
    }
    for kind in NodeKind::ALL {
        if kind.is_statement() {
            assert!(seen.contains(kind), "no statement of kind {kind} in corpus");
        }
    }
}

/// Counts nodes per family through `visit_node` only.
#[derive(Default)]
struct FamilyCounter {
    statements: usize,
    literals: usize,
}

impl Visitor for FamilyCounter {
    type Output = ();

    fn empty(&mut self) {}

    fn combine(&mut self, (): (), (): ()) {}

    fn visit_node(&mut self, node: NodeRef<'_>) {
        match node.family() {
            Family::Statement | Family::Unsupported => self.statements += 1,
            Family::Literal => self.literals += 1,
            _ => {}
        }
        walk(self, node);
    }
}

#[test]
fn explain_counts_its_inner_statement() {
    let mut counter = FamilyCounter::default();
    let statement = parse("EXPLAIN SELECT 1, 'a'");
    dispatch(&mut counter, NodeRef::from(&statement));
    assert_eq!(counter.statements, 2);
    assert_eq!(counter.literals, 2);
}

/// Collects qualified column names, skipping everything under WHERE.
struct ProjectedColumns;

impl Visitor for ProjectedColumns {
    type Output = Vec<String>;

    fn empty(&mut self) -> Self::Output {
        Vec::new()
    }

    fn combine(&mut self, acc: Self::Output, next: Self::Output) -> Self::Output {
        combine::concat(acc, next)
    }

    fn visit_column_ref(&mut self, column: &ColumnRef) -> Self::Output {
        vec![column.name().to_dotted()]
    }

    fn visit_where(&mut self, _clause: &WhereClause) -> Self::Output {
        Vec::new()
    }
}

#[test]
fn overriding_a_kind_prunes_its_subtree() {
    let statement = parse("SELECT a, t.b FROM t WHERE c = 1 ORDER BY d");
    let columns = dispatch(&mut ProjectedColumns, NodeRef::from(&statement));
    assert_eq!(columns, ["a", "t.b", "d"]);
}

/// Returns the name of the last function call seen.
struct LastFunction;

impl Visitor for LastFunction {
    type Output = Option<String>;

    fn empty(&mut self) -> Self::Output {
        None
    }

    fn combine(&mut self, acc: Self::Output, next: Self::Output) -> Self::Output {
        combine::last_non_empty(acc, next)
    }

    fn visit_function_call(&mut self, call: &FunctionCall) -> Self::Output {
        let inner = walk(self, NodeRef::from(call));
        inner.or_else(|| Some(call.name().to_string()))
    }
}

#[test]
fn last_non_empty_keeps_latest_result() {
    let statement = parse("SELECT upper(a), lower(trim(b)) FROM t");
    let last = dispatch(&mut LastFunction, NodeRef::from(&statement));
    assert_eq!(last.as_deref(), Some("trim"));
}

/// Sums integer literals, stopping at nested queries.
struct IntegerSum;

impl Visitor for IntegerSum {
    type Output = i64;

    fn empty(&mut self) -> i64 {
        0
    }

    fn combine(&mut self, acc: i64, next: i64) -> i64 {
        acc + next
    }

    fn visit_integer_literal(&mut self, literal: &IntegerLiteral) -> i64 {
        literal.value()
    }

    fn visit_query(&mut self, query: &Query) -> i64 {
        if query.span().start == 0 {
            walk(self, NodeRef::from(query))
        } else {
            0
        }
    }
}

#[test]
fn visit_query_can_stop_at_subqueries() {
    let statement = parse("SELECT 1 + 2 FROM t WHERE a IN (SELECT 40)");
    assert_eq!(dispatch(&mut IntegerSum, NodeRef::from(&statement)), 3);
}

#[test]
fn literal_helpers_dispatch_by_variant() {
    let literal = match parse_expr("42") {
        Expr::Literal(literal) => literal,
        other => panic!("expected literal, got {other}"),
    };
    let node = NodeRef::from(&literal);
    assert_eq!(node.kind(), NodeKind::Integer);
    assert!(matches!(literal, Literal::Integer(_)));
}
