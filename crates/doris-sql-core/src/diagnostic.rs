//! Rendering spanned messages against the statement text.

use core::fmt;
use core::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::error::ParseError;
use crate::lexer::Span;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The statement was rejected.
    Error,
    /// The statement was accepted with a caveat.
    Warning,
}

/// A message attached to a span of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// What went wrong.
    pub message: String,
    /// Where it went wrong.
    pub span: Span,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        Self::error(format!("{}: {}", err.kind.as_str(), err.message), err.span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{severity} at {}: {}", self.span, self.message)
    }
}

/// Builder for rendering diagnostics with source excerpts.
pub struct DiagnosticsPrinter<'s> {
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'s> DiagnosticsPrinter<'s> {
    #[must_use]
    pub const fn new(source: &'s str) -> Self {
        Self {
            source,
            path: None,
            colored: false,
        }
    }

    #[must_use]
    pub const fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    #[must_use]
    pub const fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Renders every diagnostic, separated by blank lines.
    #[must_use]
    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let mut out = String::new();
        for (i, diagnostic) in diagnostics.iter().enumerate() {
            let mut snippet = Snippet::source(self.source).line_start(1).annotation(
                AnnotationKind::Primary
                    .span(adjust_range(diagnostic.span, self.source.len()))
                    .label(&diagnostic.message),
            );
            if let Some(path) = self.path {
                snippet = snippet.path(path);
            }

            let level = match diagnostic.severity {
                Severity::Error => Level::ERROR,
                Severity::Warning => Level::WARNING,
            };
            let report = vec![level.primary_title(&diagnostic.message).element(snippet)];

            if i > 0 {
                out.push('\n');
            }
            out.push_str(&renderer.render(&report));
        }
        out
    }
}

/// Renders a single error message pointing at `span` of `source`.
#[must_use]
pub fn render(source: &str, message: &str, span: Span) -> String {
    DiagnosticsPrinter::new(source).render(&[Diagnostic::error(message, span)])
}

/// Renders a parse error against the text it came from.
#[must_use]
pub fn render_parse_error(source: &str, err: &ParseError) -> String {
    DiagnosticsPrinter::new(source).render(&[Diagnostic::from(err)])
}

/// Widens empty spans to one character so the caret has something to mark.
fn adjust_range(span: Span, limit: usize) -> Range<usize> {
    let start = span.start.min(limit);
    let end = span.end.min(limit);
    if start == end {
        return start..(start + 1).min(limit);
    }
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_range() {
        assert_eq!(adjust_range(Span::new(2, 2), 10), 2..3);
        assert_eq!(adjust_range(Span::new(10, 10), 10), 10..10);
        assert_eq!(adjust_range(Span::new(3, 40), 10), 3..10);
    }

    #[test]
    fn test_render_points_at_span() {
        let rendered = render("SELECT FROM t", "expected expression", Span::new(6, 7));
        assert!(rendered.contains("error: expected expression"));
        assert!(rendered.contains("SELECT FROM t"));
    }

    #[test]
    fn test_plain_display() {
        let diagnostic = Diagnostic::warning("deprecated spelling", Span::new(0, 4));
        assert_eq!(diagnostic.to_string(), "warning at 0..4: deprecated spelling");
    }
}
