//! # doris-sql-core
//!
//! A parse tree and traversal framework for the Apache Doris SQL dialect.
//!
//! This crate provides:
//! - A hand-written lexer and recursive descent recognizer
//! - An immutable, span-carrying node model with validating constructors
//! - A precedence-climbing engine for expression productions
//! - A visitor framework with one visit method per node kind
//!
//! ## Parsing
//!
//! ```rust
//! use doris_sql_core::ast::{NodeKind, Statement};
//!
//! let statement = doris_sql_core::parse("SELECT a, b FROM t WHERE a > 1").unwrap();
//! assert_eq!(statement.kind(), NodeKind::Query);
//! assert_eq!(statement.to_string(), "SELECT a, b FROM t WHERE a > 1");
//! ```
//!
//! ## Batches
//!
//! Every statement of a batch gets its own result, so one bad statement does
//! not hide the others:
//!
//! ```rust
//! let results = doris_sql_core::parse_batch("SELECT 1; SELECT FROM; SHOW TABLES");
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! assert!(results[2].is_ok());
//! ```

pub mod ast;
pub mod config;
pub mod diagnostic;
pub mod dialect;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod visit;

use tracing::debug;

pub use ast::{Expr, NodeKind, NodeRef, Statement};
pub use config::ParserConfig;
pub use error::{ErrorKind, ParseError};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::Parser;
pub use visit::{dispatch, walk, Visitor};

/// Parses a single statement with the default configuration.
///
/// # Errors
///
/// Returns a syntax error if the text is not one Doris statement, or a
/// malformed-node error if a node violates its structural rules.
pub fn parse(sql: &str) -> Result<Statement, ParseError> {
    let result = Parser::new(sql).parse_statement();
    if let Err(err) = &result {
        debug!(error = %err, "parse failed");
    }
    result
}

/// Parses a `;`-separated batch with the default configuration.
#[must_use]
pub fn parse_batch(sql: &str) -> Vec<Result<Statement, ParseError>> {
    let results = Parser::new(sql).parse_statements();
    debug!(
        statements = results.len(),
        failed = results.iter().filter(|result| result.is_err()).count(),
        "parsed batch"
    );
    results
}
