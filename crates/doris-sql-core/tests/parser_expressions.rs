//! Expression parsing: operator precedence, associativity and the
//! Doris-specific expression forms.

mod common;
use common::*;

use doris_sql_core::ast::{BinaryExpr, BinaryOp, Expr, LikeOp, UnaryOp};
use pretty_assertions::assert_eq;

fn binary(expr: &Expr) -> &BinaryExpr {
    match expr {
        Expr::Binary(binary) => binary,
        other => panic!("Expected binary expression, got {other}"),
    }
}

// ===================================================================
// Precedence
// ===================================================================

#[test]
fn mul_binds_tighter_than_add() {
    let expr = parse_expr("1 + 2 * 3");
    let add = binary(&expr);
    assert_eq!(add.op(), BinaryOp::Add);
    assert_eq!(binary(add.right()).op(), BinaryOp::Mul);
}

#[test]
fn and_binds_tighter_than_or() {
    let expr = parse_expr("a = 1 AND b = 2 OR c = 3");
    let or = binary(&expr);
    assert_eq!(or.op(), BinaryOp::Or);
    assert_eq!(binary(or.left()).op(), BinaryOp::And);
}

#[test]
fn xor_shares_or_level() {
    let expr = parse_expr("a XOR b AND c");
    let xor = binary(&expr);
    assert_eq!(xor.op(), BinaryOp::Xor);
    assert_eq!(binary(xor.right()).op(), BinaryOp::And);
}

#[test]
fn not_binds_looser_than_comparison() {
    let expr = parse_expr("NOT a = 1");
    let Expr::Unary(not) = &expr else {
        panic!("expected NOT, got {expr}");
    };
    assert_eq!(not.op(), UnaryOp::Not);
    assert_eq!(binary(not.operand()).op(), BinaryOp::Eq);
}

#[test]
fn unary_minus_binds_tighter_than_mul() {
    let expr = parse_expr("-a * b");
    let mul = binary(&expr);
    assert_eq!(mul.op(), BinaryOp::Mul);
    assert!(matches!(mul.left(), Expr::Unary(neg) if neg.op() == UnaryOp::Neg));
}

#[test]
fn concat_binds_tighter_than_comparison() {
    let expr = parse_expr("a || b = c");
    let eq = binary(&expr);
    assert_eq!(eq.op(), BinaryOp::Eq);
    assert_eq!(binary(eq.left()).op(), BinaryOp::Concat);
}

#[test]
fn bitwise_between_comparison_and_additive() {
    let expr = parse_expr("a & b + 1 > 0");
    let gt = binary(&expr);
    assert_eq!(gt.op(), BinaryOp::Gt);
    let and = binary(gt.left());
    assert_eq!(and.op(), BinaryOp::BitAnd);
    assert_eq!(binary(and.right()).op(), BinaryOp::Add);
}

#[test]
fn subtraction_is_left_associative() {
    let expr = parse_expr("a - b - c");
    let outer = binary(&expr);
    assert_eq!(outer.op(), BinaryOp::Sub);
    assert_eq!(outer.left().to_string(), "a - b");
    assert_eq!(outer.right().to_string(), "c");
}

#[test]
fn parentheses_override_precedence() {
    let expr = parse_expr("(a + b) * c");
    let mul = binary(&expr);
    assert_eq!(mul.op(), BinaryOp::Mul);
    assert!(matches!(mul.left(), Expr::Nested(_)));
    assert_eq!(expr.to_string(), "(a + b) * c");
}

#[test]
fn int_div_and_null_safe_eq() {
    assert_eq!(binary(&parse_expr("10 DIV 3")).op(), BinaryOp::IntDiv);
    assert_eq!(binary(&parse_expr("a <=> NULL")).op(), BinaryOp::NullSafeEq);
}

// ===================================================================
// Predicates
// ===================================================================

#[test]
fn is_not_null_under_and() {
    let expr = parse_expr("x IS NOT NULL AND y");
    let and = binary(&expr);
    assert_eq!(and.op(), BinaryOp::And);
    assert!(matches!(and.left(), Expr::IsNull(is_null) if is_null.negated()));
}

#[test]
fn between_then_and() {
    let expr = parse_expr("a BETWEEN 1 AND 10 AND b");
    let and = binary(&expr);
    assert!(matches!(and.left(), Expr::Between(_)));
    assert_eq!(expr.to_string(), "a BETWEEN 1 AND 10 AND b");
}

#[test]
fn not_in_list() {
    let expr = parse_expr("a NOT IN (1, 2, 3)");
    let Expr::InList(in_list) = &expr else {
        panic!("expected IN list, got {expr}");
    };
    assert!(in_list.negated());
    assert_eq!(in_list.list().len(), 3);
}

#[test]
fn in_subquery() {
    let expr = parse_expr("a IN (SELECT b FROM t)");
    assert!(matches!(expr, Expr::InSubquery(_)));
}

#[test]
fn not_like_and_regexp() {
    let expr = parse_expr("name NOT LIKE 'a%'");
    let Expr::Like(like) = &expr else {
        panic!("expected LIKE, got {expr}");
    };
    assert!(like.negated());
    assert_eq!(like.op(), LikeOp::Like);

    let expr = parse_expr("name REGEXP '^a' OR name RLIKE 'b$'");
    assert_eq!(binary(&expr).op(), BinaryOp::Or);
}

#[test]
fn match_predicate() {
    let expr = parse_expr("body MATCH_ANY 'doris'");
    assert!(matches!(expr, Expr::Match(_)));
    assert_eq!(expr.to_string(), "body MATCH_ANY 'doris'");
}

#[test]
fn exists_subquery() {
    let select = parse_select("SELECT a FROM t WHERE NOT EXISTS (SELECT 1 FROM u WHERE u.id = t.id)");
    let condition = select.selection().unwrap().condition();
    let Expr::Unary(not) = condition else {
        panic!("expected NOT");
    };
    assert!(matches!(not.operand(), Expr::Exists(_)));
}

// ===================================================================
// Doris expression forms
// ===================================================================

#[test]
fn expression_round_trips() {
    let cases = [
        "CAST(a AS DECIMAL(10, 2))",
        "a::BIGINT",
        "CASE WHEN a > 0 THEN 'pos' WHEN a < 0 THEN 'neg' ELSE 'zero' END",
        "CASE status WHEN 1 THEN 'on' END",
        "dt + INTERVAL 1 DAY",
        "[1, 2, 3]",
        "arr[1]",
        "arr[1:3]",
        "s.f.g",
        "{'a': 1, 'b': 2}",
        "{1, 'x'}",
        "array_map(x -> x + 1, arr)",
        "array_filter((x, y) -> x > y, a, b)",
        "COUNT(DISTINCT user_id)",
        "ROW_NUMBER() OVER (PARTITION BY k ORDER BY v DESC)",
        "SUM(v) OVER (ORDER BY dt ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)",
        "DATE '2024-01-01'",
        "DATETIME '2024-01-01 00:00:00'",
        "~a",
        "- -a",
        "LEFT('abc', 1)",
    ];
    for case in cases {
        let sql = format!("SELECT {case}");
        assert_eq!(round_trip(&sql), sql, "{case}");
    }
}

#[test]
fn parameters_are_numbered_in_order() {
    let select = parse_select("SELECT ? + ? FROM t WHERE a = ?");
    let sum = binary(select.projection().items()[0].expr());
    let Expr::Parameter(first) = sum.left() else {
        panic!("expected parameter");
    };
    let Expr::Parameter(second) = sum.right() else {
        panic!("expected parameter");
    };
    assert_eq!(first.position(), 1);
    assert_eq!(second.position(), 2);
}

#[test]
fn double_colon_cast_binds_to_operand() {
    let expr = parse_expr("a + b::INT");
    let add = binary(&expr);
    assert!(matches!(add.right(), Expr::Cast(_)));
}

#[test]
fn struct_call_renders_as_braces() {
    assert_eq!(parse_expr("STRUCT(1, 'x')").to_string(), "{1, 'x'}");
}

#[test]
fn empty_braces_are_an_empty_map() {
    let expr = parse_expr("{}");
    let Expr::Map(map) = &expr else {
        panic!("expected map, got {expr}");
    };
    assert!(map.entries().is_empty());
}
