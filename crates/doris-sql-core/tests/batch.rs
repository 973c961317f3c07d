//! Batch parsing: statement isolation and resynchronization.

use doris_sql_core::ast::NodeKind;
use doris_sql_core::{parse_batch, Parser, ParserConfig};
use pretty_assertions::assert_eq;

#[test]
fn one_result_per_statement() {
    let results = parse_batch("SELECT 1; SHOW TABLES; USE db");
    let kinds: Vec<NodeKind> = results
        .iter()
        .map(|result| result.as_ref().unwrap().kind())
        .collect();
    assert_eq!(kinds, [NodeKind::Query, NodeKind::Show, NodeKind::Use]);
}

#[test]
fn failure_does_not_hide_neighbours() {
    let results = parse_batch("SELECT a FROM t; SELECT FROM; SELECT b FROM u");
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert_eq!(err.span.start, "SELECT a FROM t; SELECT".len());
    assert_eq!(results[2].as_ref().unwrap().to_string(), "SELECT b FROM u");
}

#[test]
fn resync_skips_semicolons_inside_parentheses() {
    let results = parse_batch("SELECT a b c (1; 2); SELECT 3");
    assert_eq!(results.len(), 2);
    assert!(results[0].is_err());
    assert!(results[1].is_ok());
}

#[test]
fn resync_ignores_semicolons_in_strings() {
    let results = parse_batch("SELECT 'a;b' FROM; SELECT 'c;d'");
    assert_eq!(results.len(), 2);
    assert!(results[0].is_err());
    assert_eq!(results[1].as_ref().unwrap().to_string(), "SELECT 'c;d'");
}

#[test]
fn empty_statements_are_skipped() {
    let results = parse_batch(";; SELECT 1 ;; ; SELECT 2;");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(Result::is_ok));
}

#[test]
fn empty_batch() {
    assert!(parse_batch("").is_empty());
    assert!(parse_batch("  -- only a comment\n").is_empty());
}

#[test]
fn unmodelled_statements_in_a_batch() {
    let results = parse_batch("LOAD LABEL l1 (DATA INFILE('a;b')); SELECT 1");
    assert_eq!(results.len(), 2);
    let first = results[0].as_ref().unwrap();
    assert!(first.is_unsupported());
    assert_eq!(first.to_string(), "LOAD LABEL l1 (DATA INFILE('a;b'))");
}

#[test]
fn statement_limit_stops_the_batch() {
    let config = ParserConfig {
        max_statements: 1,
        ..ParserConfig::default()
    };
    let results = Parser::with_config("SELECT 1; SELECT 2; SELECT 3", config).parse_statements();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    let err = results[1].as_ref().unwrap_err();
    assert!(err.message.contains("batch exceeds 1 statements"), "{err}");
}
