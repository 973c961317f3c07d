//! Errors returned by semantic passes.

use doris_sql_core::diagnostic::Diagnostic;
use doris_sql_core::Span;
use serde::Serialize;

/// The category of a [`PassError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PassErrorKind {
    /// The statement parsed, but the pass does not accept it.
    UnsupportedConstruct,
    /// The statement cannot be expressed in the target model.
    Translation,
}

impl PassErrorKind {
    /// Returns the stable name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedConstruct => "unsupported construct",
            Self::Translation => "translation error",
        }
    }
}

/// A rejection produced by a pass, pointing at the node responsible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} at position {}..{}: {message}", .kind.as_str(), .span.start, .span.end)]
pub struct PassError {
    /// The category of the error.
    pub kind: PassErrorKind,
    /// The error message.
    pub message: String,
    /// The node the error is about.
    pub span: Span,
}

impl PassError {
    /// Creates an unsupported-construct error.
    #[must_use]
    pub fn unsupported(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: PassErrorKind::UnsupportedConstruct,
            message: message.into(),
            span,
        }
    }

    /// Creates a translation error.
    #[must_use]
    pub fn translation(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: PassErrorKind::Translation,
            message: message.into(),
            span,
        }
    }

    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self.kind, PassErrorKind::UnsupportedConstruct)
    }

    #[must_use]
    pub const fn is_translation(&self) -> bool {
        matches!(self.kind, PassErrorKind::Translation)
    }
}

impl From<&PassError> for Diagnostic {
    fn from(err: &PassError) -> Self {
        Self::error(format!("{}: {}", err.kind.as_str(), err.message), err.span)
    }
}

/// Result type for pass operations.
pub type Result<T> = std::result::Result<T, PassError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PassError::translation("joins are not supported", Span::new(16, 30));
        assert!(err.is_translation());
        assert_eq!(
            err.to_string(),
            "translation error at position 16..30: joins are not supported"
        );
    }

    #[test]
    fn test_diagnostic() {
        let err = PassError::unsupported("LOAD statements are not supported", Span::new(0, 4));
        let diagnostic = Diagnostic::from(&err);
        assert_eq!(diagnostic.span, err.span);
        assert!(diagnostic.message.starts_with("unsupported construct: "));
    }
}
