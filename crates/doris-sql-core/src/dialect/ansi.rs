//! ANSI quoting rules.

use super::Dialect;

/// Standard SQL quoting: `"..."` identifiers and no backslash escapes.
///
/// Useful when statements are produced by tools that emit ANSI quoting.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiDialect;

impl AnsiDialect {
    /// Creates the ANSI dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn identifier_quote(&self) -> char {
        '"'
    }

    fn double_quoted_strings(&self) -> bool {
        false
    }

    fn backslash_escapes(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_dialect() {
        let dialect = AnsiDialect::new();
        assert_eq!(dialect.name(), "ansi");
        assert_eq!(dialect.identifier_quote(), '"');
        assert!(!dialect.double_quoted_strings());
        assert_eq!(dialect.quote_identifier("order"), "\"order\"");
    }
}
