//! SQL dialect support.
//!
//! Doris follows MySQL conventions for quoting. The [`Dialect`] trait carries
//! the lexical choices that differ between dialects so the lexer and the SQL
//! renderer agree on them.

mod ansi;
mod doris;

pub use ansi::AnsiDialect;
pub use doris::DorisDialect;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '`'
    }

    /// Returns true if `"..."` is a string literal rather than a quoted identifier.
    fn double_quoted_strings(&self) -> bool {
        true
    }

    /// Returns true if a backslash escapes the next character inside strings.
    fn backslash_escapes(&self) -> bool {
        true
    }

    /// Quotes an identifier, doubling any embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}
