//! Shared helpers for parser integration tests.

#![allow(dead_code)]

use doris_sql_core::ast::{Expr, NodeRef, Query, Select, Statement};
use doris_sql_core::{ParseError, Parser, ParserConfig};

/// Parses a single statement, panicking on failure.
pub fn parse(sql: &str) -> Statement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

/// Parses with the given configuration, panicking on failure.
pub fn parse_with(sql: &str, config: ParserConfig) -> Statement {
    Parser::with_config(sql, config)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

/// Asserts that parsing fails and returns the error.
pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

/// Parses a query statement.
pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Query(query) => query,
        other => panic!("Expected query, got {:?}", other.kind()),
    }
}

/// Parses a query whose body is a plain SELECT.
pub fn parse_select(sql: &str) -> Select {
    let query = parse_query(sql);
    query
        .as_select()
        .cloned()
        .unwrap_or_else(|| panic!("Expected SELECT body: {sql}"))
}

/// Parses `SELECT <expr>` and returns the single projected expression.
pub fn parse_expr(expr: &str) -> Expr {
    let sql = format!("SELECT {expr}");
    let select = parse_select(&sql);
    let items = select.projection().items();
    assert_eq!(items.len(), 1, "Expected one select item in: {sql}");
    items[0].expr().clone()
}

/// Renders the statement and checks that the rendering is a fixed point.
pub fn round_trip(sql: &str) -> String {
    let first = parse(sql).to_string();
    let second = parse(&first).to_string();
    assert_eq!(first, second, "Rendering is not stable for: {sql}");
    first
}

/// Asserts the span invariant over every node of `statement`.
pub fn assert_spans_nest(statement: &Statement) {
    for node in NodeRef::from(statement).descendants() {
        let span = node.span();
        let mut previous_end = span.start;
        for child in node.children() {
            let child_span = child.span();
            assert!(
                span.contains(child_span),
                "{} at {child_span} escapes {} at {span}",
                child.kind(),
                node.kind()
            );
            assert!(
                child_span.start >= previous_end,
                "{} at {child_span} overlaps an earlier sibling",
                child.kind()
            );
            previous_end = child_span.end;
        }
    }
}
