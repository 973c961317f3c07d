//! Error reporting: categories, positions and configuration limits.

mod common;
use common::*;

use doris_sql_core::ast::{ExplainLevel, ExplainStatement, Statement};
use doris_sql_core::lexer::{Keyword, Span, TokenKind};
use doris_sql_core::{ErrorKind, Parser, ParserConfig};
use pretty_assertions::assert_eq;

// ===================================================================
// Syntax errors
// ===================================================================

#[test]
fn error_empty_input() {
    let err = parse_err("");
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.found, Some(TokenKind::Eof));
}

#[test]
fn error_select_without_projection() {
    let err = parse_err("SELECT FROM t");
    assert!(err.is_syntax());
    assert_eq!(err.span, Span::new(6, 7));
}

#[test]
fn error_unknown_leading_word() {
    let err = parse_err("FROBNICATE t");
    assert!(err.is_syntax());
    assert_eq!(err.span.start, 0);
    assert_eq!(err.expected.as_deref(), Some("statement"));
}

#[test]
fn error_unclosed_paren() {
    let err = parse_err("SELECT (a + b FROM t");
    assert!(err.is_syntax());
    assert_eq!(err.found, Some(TokenKind::Keyword(Keyword::From)));
}

#[test]
fn error_trailing_tokens() {
    let err = parse_err("SELECT a FROM t t2 t3");
    assert!(err.is_syntax());
    assert_eq!(err.span, Span::new(19, 21));
}

#[test]
fn error_message_format() {
    let err = parse_err("SELECT a FROM");
    let message = err.to_string();
    assert!(message.starts_with("syntax error at position 13..13"), "{message}");
}

#[test]
fn error_case_without_when() {
    assert!(parse_err("SELECT CASE a END").is_syntax());
}

#[test]
fn error_dangling_operator() {
    let err = parse_err("SELECT a + FROM t");
    assert!(err.is_syntax());
}

#[test]
fn error_duplicate_lambda_parameter() {
    let err = parse_err("SELECT array_map((x, x) -> x, arr)");
    assert!(err.is_syntax(), "{err:?}");
    assert_eq!(err.span, Span::new(21, 22));
}

#[test]
fn error_outer_join_without_criteria() {
    let err = parse_err("SELECT * FROM a LEFT JOIN b");
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.expected.as_deref(), Some("ON or USING"));
}

#[test]
fn error_cross_join_with_criteria() {
    assert!(parse_err("SELECT * FROM a CROSS JOIN b ON a.x = b.x").is_syntax());
}

#[test]
fn error_values_rows_differ_in_width() {
    let sql = "INSERT INTO t VALUES (1, 2), (3)";
    let err = parse_err(sql);
    assert!(err.is_syntax(), "{err:?}");
    assert_eq!(err.span.slice(sql), Some("(3)"));
}

#[test]
fn error_empty_values_row() {
    assert!(parse_err("INSERT INTO t VALUES ()").is_syntax());
}

#[test]
fn explain_of_unmodelled_command_is_unsupported() {
    let sql = "EXPLAIN LOAD LABEL x (DATA INFILE('a'))";
    let Statement::Unsupported(statement) = parse(sql) else {
        panic!("expected an unsupported statement");
    };
    assert_eq!(statement.statement_type(), "EXPLAIN LOAD");
    assert_eq!(parse(sql).span(), Span::new(0, sql.len()));
}

#[test]
fn nested_explain_is_unsupported() {
    let Statement::Unsupported(statement) = parse("EXPLAIN EXPLAIN SELECT 1") else {
        panic!("expected an unsupported statement");
    };
    assert_eq!(statement.statement_type(), "EXPLAIN EXPLAIN");
}

// ===================================================================
// Malformed nodes
// ===================================================================

#[test]
fn malformed_explain_body() {
    let body = parse("LOAD LABEL l (x)");
    let err = ExplainStatement::new(ExplainLevel::Normal, body, Span::new(0, 24)).unwrap_err();
    assert!(err.is_malformed(), "{err:?}");
}

// ===================================================================
// Configuration limits
// ===================================================================

#[test]
fn strict_identifiers_reject_reserved_words() {
    let err = Parser::with_config("SELECT a AS select FROM t", ParserConfig::strict())
        .parse_statement()
        .expect_err("reserved alias should be rejected");
    assert_eq!(err.found, Some(TokenKind::Keyword(Keyword::Select)));
}

#[test]
fn lenient_identifiers_capture_reserved_words() {
    let statement = parse("SELECT a AS select FROM t");
    assert_eq!(statement.to_string(), "SELECT a AS `select` FROM t");
}

#[test]
fn depth_limit_is_enforced() {
    let config = ParserConfig {
        max_depth: 8,
        ..ParserConfig::default()
    };
    let sql = format!("SELECT {}1{}", "(".repeat(20), ")".repeat(20));
    let err = Parser::with_config(&sql, config)
        .parse_statement()
        .expect_err("nesting should exceed the limit");
    assert!(err.message.contains("nesting exceeds 8 levels"), "{err}");
}

#[test]
fn default_depth_accepts_reasonable_nesting() {
    let sql = format!("SELECT {}1{}", "(".repeat(20), ")".repeat(20));
    parse(&sql);
}

#[test]
fn config_from_json() {
    let config = ParserConfig::from_json(r#"{"max_depth": 16}"#).unwrap();
    assert_eq!(config.max_depth, 16);
    assert_eq!(config.max_statements, ParserConfig::DEFAULT_MAX_STATEMENTS);
}
