//! Reference extraction across queries and DML.

mod common;
use common::*;

use pretty_assertions::assert_eq;

#[test]
fn simple_filtered_query() {
    let refs = references("SELECT a, b FROM t WHERE a > 1 AND b < 2 ORDER BY a LIMIT 10");
    assert_eq!(refs.tables(), ["t"]);
    assert_eq!(refs.columns(), ["a", "b"]);
}

#[test]
fn subqueries_are_searched() {
    let refs = references("SELECT a FROM t WHERE b IN (SELECT c FROM u) AND EXISTS (SELECT 1 FROM v)");
    assert_eq!(refs.tables(), ["t", "u", "v"]);
    assert_eq!(refs.columns(), ["a", "b", "c"]);
}

#[test]
fn derived_tables_and_joins() {
    let refs = references(
        "SELECT x.a, y.b FROM (SELECT a FROM t) x LEFT JOIN db.u AS y ON x.a = y.a JOIN w USING (id)",
    );
    assert_eq!(refs.tables(), ["t", "db.u", "w"]);
    assert_eq!(refs.columns(), ["x.a", "y.b", "a", "y.a", "id"]);
}

#[test]
fn cte_names_are_not_tables() {
    let refs = references("WITH recent AS (SELECT a FROM logs WHERE ts > 5) SELECT a FROM recent");
    assert_eq!(refs.tables(), ["logs"]);
    assert_eq!(refs.columns(), ["a", "ts"]);
}

#[test]
fn cte_body_reads_the_table_it_shadows() {
    let refs = references("WITH t AS (SELECT a FROM t WHERE a > 1) SELECT a FROM t");
    assert_eq!(refs.tables(), ["t"]);
    assert_eq!(refs.columns(), ["a"]);
}

#[test]
fn cte_bodies_see_only_earlier_ctes() {
    let refs = references("WITH x AS (SELECT a FROM y), y AS (SELECT a FROM x) SELECT a FROM x, y");
    assert_eq!(refs.tables(), ["y"]);
}

#[test]
fn recursive_cte_sees_itself() {
    let refs = references(
        "WITH RECURSIVE n AS (SELECT 1 AS v UNION ALL SELECT v + 1 FROM n WHERE v < 5) SELECT v FROM n",
    );
    assert!(refs.tables().is_empty(), "{:?}", refs.tables());
    assert_eq!(refs.columns(), ["v"]);
}

#[test]
fn lateral_views_are_searched() {
    let refs = references("SELECT e FROM t LATERAL VIEW explode(tags) tmp AS e");
    assert_eq!(refs.tables(), ["t"]);
    assert_eq!(refs.columns(), ["e", "tags"]);
}

#[test]
fn lambda_parameters_are_not_columns() {
    let refs = references("SELECT array_map(x -> x + offset_col, arr) FROM t");
    assert_eq!(refs.columns(), ["offset_col", "arr"]);
    assert!(!refs.contains_column("x"));
}

#[test]
fn lambda_parameter_names_outside_the_lambda_are_columns() {
    let refs = references("SELECT array_map(x -> x, arr), x FROM t");
    assert_eq!(refs.columns(), ["arr", "x"]);
}

#[test]
fn literals_are_skipped() {
    let refs = references("SELECT 'a', 1 FROM t WHERE s = 'b' AND d > DATE '2024-01-01'");
    assert_eq!(refs.columns(), ["s", "d"]);
}

#[test]
fn columns_are_deduplicated_in_first_mention_order() {
    let refs = references("SELECT b, a, b FROM t GROUP BY a, b HAVING COUNT(a) > 1");
    assert_eq!(refs.columns(), ["b", "a"]);
}

#[test]
fn insert_update_and_delete_targets() {
    let refs = references("INSERT INTO t (a, b) SELECT c, d FROM u");
    assert_eq!(refs.tables(), ["t", "u"]);
    assert_eq!(refs.columns(), ["a", "b", "c", "d"]);

    let refs = references("UPDATE t SET a = b + 1 WHERE c = 1");
    assert_eq!(refs.tables(), ["t"]);
    assert_eq!(refs.columns(), ["a", "b", "c"]);

    let refs = references("DELETE FROM t USING u WHERE t.id = u.id");
    assert_eq!(refs.tables(), ["t", "u"]);
    assert_eq!(refs.columns(), ["t.id", "u.id"]);
}

#[test]
fn statements_without_references() {
    assert!(references("SHOW TABLES").is_empty());
    assert!(references("LOAD LABEL l (x)").is_empty());
}

#[test]
fn references_serialize() {
    let refs = references("SELECT a FROM t");
    let json = serde_json::to_value(&refs).unwrap();
    assert_eq!(json, serde_json::json!({ "tables": ["t"], "columns": ["a"] }));
}
