//! Query recognition: SELECT structure, joins, set operations, CTEs.

mod common;
use common::*;

use doris_sql_core::ast::{
    Expr, JoinCriteria, JoinType, LimitStyle, QueryBody, SetOperator, SetQuantifier, SortDirection,
    TableFactor,
};
use pretty_assertions::assert_eq;

// ===================================================================
// SELECT structure
// ===================================================================

#[test]
fn select_all_clauses() {
    let select = parse_select(
        "SELECT DISTINCT k, SUM(v) AS total FROM t WHERE k > 0 GROUP BY k HAVING SUM(v) > 10",
    );
    assert!(select.distinct());
    assert_eq!(select.projection().items().len(), 2);
    assert_eq!(
        select.projection().items()[1].alias().map(ToString::to_string),
        Some("total".to_string())
    );
    assert!(select.from().is_some());
    assert!(select.selection().is_some());
    assert_eq!(select.group_by().map(|g| g.exprs().len()), Some(1));
    assert!(select.having().is_some());
}

#[test]
fn select_without_from() {
    let select = parse_select("SELECT 1 + 1");
    assert!(select.from().is_none());
}

#[test]
fn select_bare_alias() {
    let select = parse_select("SELECT a total FROM t");
    assert_eq!(
        select.projection().items()[0].alias().map(ToString::to_string),
        Some("total".to_string())
    );
}

#[test]
fn select_qualified_wildcard() {
    let select = parse_select("SELECT t.* FROM db.t AS t");
    assert!(matches!(select.projection().items()[0].expr(), Expr::Wildcard(_)));
    let Some(from) = select.from() else {
        panic!("missing FROM");
    };
    let TableFactor::Named(table) = from.relations()[0].factor() else {
        panic!("expected named table");
    };
    assert_eq!(table.name().to_dotted(), "db.t");
    assert_eq!(table.alias().map(ToString::to_string), Some("t".to_string()));
}

#[test]
fn select_partition_on_table() {
    let select = parse_select("SELECT * FROM t PARTITION (p1, p2) WHERE a = 1");
    let from = select.from().unwrap();
    let TableFactor::Named(table) = from.relations()[0].factor() else {
        panic!("expected named table");
    };
    assert!(table.partition().is_some());
    assert_eq!(round_trip("SELECT * FROM t PARTITION (p1, p2)"), "SELECT * FROM t PARTITION (p1, p2)");
}

// ===================================================================
// Joins
// ===================================================================

#[test]
fn join_types() {
    let cases = [
        ("JOIN", JoinType::Inner),
        ("INNER JOIN", JoinType::Inner),
        ("LEFT JOIN", JoinType::LeftOuter),
        ("LEFT OUTER JOIN", JoinType::LeftOuter),
        ("RIGHT JOIN", JoinType::RightOuter),
        ("FULL OUTER JOIN", JoinType::FullOuter),
        ("LEFT SEMI JOIN", JoinType::LeftSemi),
        ("LEFT ANTI JOIN", JoinType::LeftAnti),
    ];
    for (keywords, expected) in cases {
        let sql = format!("SELECT * FROM a {keywords} b ON a.id = b.id");
        let select = parse_select(&sql);
        let joins = select.from().unwrap().relations()[0].joins();
        assert_eq!(joins.len(), 1, "{sql}");
        assert_eq!(joins[0].join_type(), expected, "{sql}");
    }
}

#[test]
fn join_using_columns() {
    let select = parse_select("SELECT * FROM a JOIN b USING (id, dt)");
    let join = &select.from().unwrap().relations()[0].joins()[0];
    match join.criteria() {
        Some(JoinCriteria::Using(columns)) => assert_eq!(columns.len(), 2),
        other => panic!("expected USING, got {other:?}"),
    }
}

#[test]
fn cross_join_without_criteria() {
    let select = parse_select("SELECT * FROM a CROSS JOIN b");
    let join = &select.from().unwrap().relations()[0].joins()[0];
    assert_eq!(join.join_type(), JoinType::Cross);
    assert!(join.criteria().is_none());
}

#[test]
fn outer_join_requires_criteria() {
    let err = parse_err("SELECT * FROM a LEFT JOIN b");
    assert!(err.is_syntax(), "{err:?}");
}

#[test]
fn comma_separated_relations() {
    let select = parse_select("SELECT * FROM a, b AS x, (SELECT 1) d");
    let relations = select.from().unwrap().relations();
    assert_eq!(relations.len(), 3);
    assert!(matches!(relations[2].factor(), TableFactor::Derived(_)));
}

#[test]
fn derived_table_round_trip() {
    assert_eq!(
        round_trip("SELECT s.a FROM (SELECT a FROM t) s"),
        "SELECT s.a FROM (SELECT a FROM t) AS s"
    );
}

#[test]
fn lateral_view_outer() {
    let select =
        parse_select("SELECT e FROM t LATERAL VIEW OUTER explode_split(tags, ',') tmp AS e");
    let from = select.from().unwrap();
    let TableFactor::Named(table) = from.relations()[0].factor() else {
        panic!("expected named table");
    };
    let view = &table.lateral_views()[0];
    assert!(view.outer());
    assert_eq!(view.table_alias().to_string(), "tmp");
    assert_eq!(view.column_aliases().len(), 1);
}

// ===================================================================
// Set operations
// ===================================================================

#[test]
fn union_all() {
    let query = parse_query("SELECT a FROM t UNION ALL SELECT a FROM u");
    let QueryBody::SetOperation(op) = query.body() else {
        panic!("expected set operation");
    };
    assert_eq!(op.op(), SetOperator::Union);
    assert_eq!(op.quantifier(), SetQuantifier::All);
}

#[test]
fn minus_is_except() {
    let query = parse_query("SELECT a FROM t MINUS SELECT a FROM u");
    let QueryBody::SetOperation(op) = query.body() else {
        panic!("expected set operation");
    };
    assert_eq!(op.op(), SetOperator::Except);
}

#[test]
fn set_operation_order_by_applies_to_whole() {
    let query = parse_query("SELECT a FROM t UNION SELECT a FROM u ORDER BY a LIMIT 5");
    assert!(matches!(query.body(), QueryBody::SetOperation(_)));
    assert!(query.order_by().is_some());
    assert!(query.limit().is_some());
}

#[test]
fn nested_query_body() {
    assert_eq!(
        round_trip("(SELECT 1) UNION (SELECT 2)"),
        "(SELECT 1) UNION (SELECT 2)"
    );
}

// ===================================================================
// WITH, ORDER BY, LIMIT
// ===================================================================

#[test]
fn with_multiple_ctes() {
    let query = parse_query("WITH a AS (SELECT 1 AS x), b (y) AS (SELECT x FROM a) SELECT y FROM b");
    let with = query.with().unwrap();
    assert_eq!(with.ctes().len(), 2);
    assert!(with.defines("a"));
    assert!(with.defines("b"));
    assert_eq!(with.ctes()[1].columns().len(), 1);
}

#[test]
fn order_by_direction_and_nulls() {
    let query = parse_query("SELECT a FROM t ORDER BY a DESC NULLS LAST, b");
    let items = query.order_by().unwrap().items();
    assert_eq!(items[0].direction(), Some(SortDirection::Desc));
    assert!(!items[0].ascending());
    assert!(items[1].ascending());
    assert_eq!(
        query.to_string(),
        "SELECT a FROM t ORDER BY a DESC NULLS LAST, b"
    );
}

#[test]
fn limit_styles() {
    let query = parse_query("SELECT a FROM t LIMIT 10 OFFSET 20");
    let limit = query.limit().unwrap();
    assert_eq!(limit.style(), LimitStyle::LimitOffset);
    assert_eq!(limit.limit().to_string(), "10");
    assert_eq!(limit.offset().map(ToString::to_string), Some("20".to_string()));

    let query = parse_query("SELECT a FROM t LIMIT 20, 10");
    let limit = query.limit().unwrap();
    assert_eq!(limit.style(), LimitStyle::Comma);
    assert_eq!(limit.limit().to_string(), "10");
    assert_eq!(limit.offset().map(ToString::to_string), Some("20".to_string()));
}

// ===================================================================
// Round trips
// ===================================================================

#[test]
fn round_trip_complex_query() {
    let sql = indoc::indoc! {"
        WITH recent AS (SELECT * FROM events WHERE dt >= DATE '2024-01-01')
        SELECT user_id, COUNT(*) AS n
        FROM recent r
        LEFT JOIN users u ON r.user_id = u.id
        WHERE u.active = TRUE
        GROUP BY user_id
        HAVING COUNT(*) > 3
        ORDER BY n DESC
        LIMIT 100
    "};
    assert_eq!(
        round_trip(sql),
        "WITH recent AS (SELECT * FROM events WHERE dt >= DATE '2024-01-01') \
         SELECT user_id, COUNT(*) AS n FROM recent AS r \
         LEFT OUTER JOIN users AS u ON r.user_id = u.id \
         WHERE u.active = TRUE GROUP BY user_id HAVING COUNT(*) > 3 \
         ORDER BY n DESC LIMIT 100"
    );
}
