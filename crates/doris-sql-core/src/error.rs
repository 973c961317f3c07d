//! Parse error types.

use serde::Serialize;

use crate::lexer::{Span, TokenKind};

/// The category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The token stream does not match the grammar at some point.
    Syntax,
    /// A node was constructed in violation of its kind's structural rules.
    MalformedNode,
}

impl ErrorKind {
    /// Returns the stable name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax => "syntax error",
            Self::MalformedNode => "malformed node",
        }
    }
}

/// An error raised while recognizing a statement or building its tree.
///
/// Both categories abort the statement being parsed, and only that statement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} at position {}..{}: {message}", .kind.as_str(), .span.start, .span.end)]
pub struct ParseError {
    /// The category of the error.
    pub kind: ErrorKind,
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" syntax error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            kind: ErrorKind::Syntax,
            message: format!("expected {expected}, found {found}"),
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }

    /// Creates an "unexpected end of input" syntax error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            kind: ErrorKind::Syntax,
            message: format!("unexpected end of input, expected {expected}"),
            span,
            expected: Some(expected),
            found: Some(TokenKind::Eof),
        }
    }

    /// Creates a malformed-node error.
    #[must_use]
    pub fn malformed(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::MalformedNode,
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Returns true for syntax errors.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::Syntax)
    }

    /// Returns true for malformed-node errors.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedNode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;

    #[test]
    fn test_unexpected_message() {
        let err = ParseError::unexpected(
            "expression",
            TokenKind::Keyword(Keyword::From),
            Span::new(6, 7),
        );
        assert!(err.is_syntax());
        assert_eq!(err.expected.as_deref(), Some("expression"));
        assert_eq!(
            err.to_string(),
            "syntax error at position 6..7: expected expression, found keyword FROM"
        );
    }

    #[test]
    fn test_malformed() {
        let err = ParseError::malformed("IN list is empty", Span::new(0, 4));
        assert!(err.is_malformed());
        assert!(err.found.is_none());
    }
}
