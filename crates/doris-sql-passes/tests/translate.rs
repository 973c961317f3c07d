//! Translation of simple SELECTs into the query model.

mod common;
use common::*;

use doris_sql_passes::{Field, OrderField, PassErrorKind, QueryModel};
use indoc::indoc;
use pretty_assertions::assert_eq;

fn field(expr: &str, alias: Option<&str>) -> Field {
    Field {
        expr: expr.to_owned(),
        alias: alias.map(str::to_owned),
    }
}

#[test]
fn filtered_query() {
    let model = translate("SELECT a, b FROM t WHERE a > 1 AND b < 2 ORDER BY a LIMIT 10").unwrap();
    assert_eq!(
        model,
        QueryModel {
            table: Some("t".to_owned()),
            fields: vec![field("a", None), field("b", None)],
            condition: Some("a > 1 AND b < 2".to_owned()),
            order_by: vec![OrderField {
                expr: "a".to_owned(),
                ascending: true,
            }],
            limit: Some(10),
            ..QueryModel::default()
        }
    );
}

#[test]
fn aggregate_query() {
    let sql = indoc! {"
        SELECT
          serverIp,
          COUNT(*) AS log_count
        FROM logs
        WHERE
          log MATCH_PHRASE 'Error' OR log MATCH_PHRASE 'Fatal'
        GROUP BY
          serverIp
        HAVING COUNT(*) > 10
        ORDER BY log_count DESC
        LIMIT
          1000
    "};
    let model = translate(sql).unwrap();
    assert_eq!(model.table.as_deref(), Some("logs"));
    assert_eq!(
        model.fields,
        [field("serverIp", None), field("COUNT(*)", Some("log_count"))]
    );
    assert_eq!(
        model.condition.as_deref(),
        Some("log MATCH_PHRASE 'Error' OR log MATCH_PHRASE 'Fatal'")
    );
    assert_eq!(model.group_by, ["serverIp"]);
    assert_eq!(model.having.as_deref(), Some("COUNT(*) > 10"));
    assert!(!model.order_by[0].ascending);
    assert_eq!(model.limit, Some(1000));
    assert!(model.is_aggregate());
}

#[test]
fn query_without_from() {
    let model = translate("SELECT split_part(log, '|', 3) AS ct, count(*) WHERE log MATCH_ALL 'x'").unwrap();
    assert_eq!(model.table, None);
    assert_eq!(model.fields[0], field("split_part(log, '|', 3)", Some("ct")));
}

#[test]
fn distinct_is_kept() {
    let model = translate("SELECT DISTINCT a FROM t").unwrap();
    assert!(model.distinct);
    assert_eq!(model.fields, [field("a", None)]);
    assert!(!translate("SELECT a FROM t").unwrap().distinct);
    assert_ne!(model, translate("SELECT a FROM t").unwrap());
}

#[test]
fn both_offset_spellings() {
    for sql in ["SELECT a FROM t LIMIT 5, 10", "SELECT a FROM t LIMIT 10 OFFSET 5"] {
        let model = translate(sql).unwrap();
        assert_eq!((model.limit, model.offset), (Some(10), Some(5)), "{sql}");
    }
}

#[test]
fn scalar_functions_casts_and_predicates() {
    let model = translate(
        "SELECT CAST(a AS BIGINT) + 1, upper(b) FROM db.t \
         WHERE c IS NOT NULL AND d BETWEEN 1 AND 5 AND e IN ('x', 'y') AND NOT f LIKE 'z%'",
    )
    .unwrap();
    assert_eq!(model.table.as_deref(), Some("db.t"));
    assert_eq!(model.fields.len(), 2);
}

#[test]
fn rejected_constructs() {
    let cases = [
        ("SELECT a FROM t JOIN u ON t.id = u.id", "joins cannot be translated"),
        ("SELECT a FROM t, u", "only one table can be read"),
        ("SELECT a FROM t UNION SELECT a FROM u", "set operations cannot be translated"),
        ("WITH c AS (SELECT 1) SELECT * FROM c", "common table expressions cannot be translated"),
        ("SELECT a FROM t WHERE b IN (SELECT b FROM u)", "subqueries cannot be translated"),
        ("SELECT a FROM (SELECT a FROM t) x", "subqueries cannot be translated"),
        ("SELECT e FROM t LATERAL VIEW explode(arr) v AS e", "lateral views cannot be translated"),
        ("SELECT SUM(a) OVER (PARTITION BY b) FROM t", "window functions cannot be translated"),
        ("SELECT CASE WHEN a THEN 1 END FROM t", "CASE expressions cannot be translated"),
        ("SELECT a FROM t WHERE b = ?", "parameters must be bound before translation"),
        ("SELECT a FROM t LIMIT b", "LIMIT must be a non-negative integer literal"),
        ("INSERT INTO t VALUES (1)", "only SELECT queries can be translated"),
        ("SHOW TABLES", "only SELECT queries can be translated"),
    ];
    for (sql, message) in cases {
        let err = translate_err(sql);
        assert_eq!(err.kind, PassErrorKind::Translation, "{sql}");
        assert!(err.message.contains(message), "{sql}: {err}");
    }
}

#[test]
fn rejection_points_at_the_node() {
    let sql = "SELECT a FROM t JOIN u ON t.id = u.id";
    let err = translate_err(sql);
    assert_eq!(err.span.slice(sql), Some("JOIN u ON t.id = u.id"));
    assert_eq!(err.message, "Join: joins cannot be translated");
}

#[test]
fn first_rejection_wins() {
    let sql = "SELECT CASE WHEN a THEN 1 END FROM t WHERE b = ?";
    let err = translate_err(sql);
    assert!(err.message.contains("CASE"), "{err}");
}

#[test]
fn model_serializes_to_json() {
    let model = translate("SELECT a AS x FROM t ORDER BY a DESC LIMIT 3").unwrap();
    let json: serde_json::Value = serde_json::from_str(&model.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "table": "t",
            "distinct": false,
            "fields": [{ "expr": "a", "alias": "x" }],
            "condition": null,
            "group_by": [],
            "having": null,
            "order_by": [{ "expr": "a", "ascending": false }],
            "limit": 3,
            "offset": null,
        })
    );
}
