//! Shared helpers for pass integration tests.

#![allow(dead_code)]

use doris_sql_core::ast::Statement;
use doris_sql_passes::{
    Classifier, ClassifierConfig, ModelTranslator, PassError, QueryModel, ReferenceExtractor,
    References, Verdict,
};

/// Parses a single statement, panicking on failure.
pub fn parse(sql: &str) -> Statement {
    doris_sql_core::parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn classify(sql: &str) -> Verdict {
    Classifier::new().classify(&parse(sql))
}

pub fn classify_read_only(sql: &str) -> Verdict {
    Classifier::with_config(ClassifierConfig { read_only: true }).classify(&parse(sql))
}

pub fn references(sql: &str) -> References {
    ReferenceExtractor::new().extract(&parse(sql))
}

pub fn translate(sql: &str) -> Result<QueryModel, PassError> {
    ModelTranslator::new().translate(&parse(sql))
}

/// Asserts that translation fails and returns the error.
pub fn translate_err(sql: &str) -> PassError {
    translate(sql).expect_err(&format!("Expected translation error for: {sql}"))
}

/// A coarse label for comparing verdicts without their messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Supported,
    Caveat,
    Unsupported,
}

pub fn label(verdict: &Verdict) -> Label {
    match verdict {
        Verdict::Supported => Label::Supported,
        Verdict::SupportedWithCaveat(_) => Label::Caveat,
        Verdict::Unsupported(_) => Label::Unsupported,
    }
}
