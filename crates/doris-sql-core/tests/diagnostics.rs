//! Rendering parse errors against their source text.

mod common;
use common::*;

use doris_sql_core::diagnostic::{render_parse_error, Diagnostic, DiagnosticsPrinter, Severity};
use doris_sql_core::Span;
use indoc::indoc;

#[test]
fn parse_error_renders_with_excerpt() {
    let sql = "SELECT FROM t";
    let err = parse_err(sql);
    let rendered = render_parse_error(sql, &err);
    assert!(rendered.contains("SELECT FROM t"), "{rendered}");
    assert!(rendered.contains("syntax error"), "{rendered}");
}

#[test]
fn diagnostic_from_parse_error() {
    let err = parse_err("SELECT a FROM t WHERE");
    let diagnostic = Diagnostic::from(&err);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.span, err.span);
    assert!(diagnostic.message.starts_with("syntax error: "));
}

#[test]
fn printer_points_at_the_right_line() {
    let sql = indoc! {"
        SELECT a,
               b
        FROM t
        WHERE
    "};
    let err = parse_err(sql);
    let rendered = DiagnosticsPrinter::new(sql)
        .path("query.sql")
        .render(&[Diagnostic::from(&err)]);
    assert!(rendered.contains("query.sql"), "{rendered}");
    assert!(rendered.contains("WHERE"), "{rendered}");
}

#[test]
fn printer_renders_several_diagnostics() {
    let sql = "SELECT a FROM t";
    let rendered = DiagnosticsPrinter::new(sql).render(&[
        Diagnostic::warning("column is unused", Span::new(7, 8)),
        Diagnostic::error("table is missing", Span::new(14, 15)),
    ]);
    assert!(rendered.contains("warning: column is unused"), "{rendered}");
    assert!(rendered.contains("error: table is missing"), "{rendered}");
}

#[test]
fn empty_span_at_end_of_input() {
    let sql = "SELECT a FROM";
    let err = parse_err(sql);
    assert_eq!(err.span, Span::new(13, 13));
    let rendered = render_parse_error(sql, &err);
    assert!(rendered.contains("SELECT a FROM"), "{rendered}");
}
