//! Recognizer configuration.

use serde::Deserialize;

/// Options that control how the recognizer treats its input.
///
/// Configurations are usually built in code, but they deserialize from JSON
/// so a host service can keep them next to its other settings:
///
/// ```
/// use doris_sql_core::ParserConfig;
///
/// let config = ParserConfig::from_json(r#"{ "max_depth": 32 }"#).unwrap();
/// assert_eq!(config.max_depth, 32);
/// assert!(config.lenient_identifiers);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Accept reserved words where a name is required, producing
    /// error-capturing identifiers instead of failing.
    pub lenient_identifiers: bool,
    /// Maximum nesting depth of expressions and subqueries.
    pub max_depth: usize,
    /// Maximum number of statements accepted in one batch.
    pub max_statements: usize,
}

impl ParserConfig {
    /// Default nesting bound.
    pub const DEFAULT_MAX_DEPTH: usize = 128;
    /// Default batch bound.
    pub const DEFAULT_MAX_STATEMENTS: usize = 1024;

    /// Loads a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns a configuration that rejects reserved words used as names.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            lenient_identifiers: false,
            ..Self::default()
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            lenient_identifiers: true,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_statements: Self::DEFAULT_MAX_STATEMENTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert!(config.lenient_identifiers);
        assert_eq!(config.max_depth, 128);
        assert_eq!(config.max_statements, 1024);
        assert!(!ParserConfig::strict().lenient_identifiers);
    }

    #[test]
    fn test_from_json() {
        let config =
            ParserConfig::from_json(r#"{"lenient_identifiers": false, "max_statements": 4}"#)
                .unwrap();
        assert!(!config.lenient_identifiers);
        assert_eq!(config.max_statements, 4);
        assert_eq!(config.max_depth, ParserConfig::DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ParserConfig::from_json(r#"{"dialect": "mysql"}"#).is_err());
    }
}
