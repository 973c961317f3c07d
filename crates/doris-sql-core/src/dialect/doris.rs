//! The Apache Doris dialect.

use super::Dialect;

/// Doris: backtick identifiers, `'...'` and `"..."` strings, backslash escapes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DorisDialect;

impl DorisDialect {
    /// Creates the Doris dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for DorisDialect {
    fn name(&self) -> &'static str {
        "doris"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doris_dialect() {
        let dialect = DorisDialect::new();
        assert_eq!(dialect.name(), "doris");
        assert_eq!(dialect.identifier_quote(), '`');
        assert!(dialect.double_quoted_strings());
        assert_eq!(dialect.quote_identifier("a`b"), "`a``b`");
    }
}
