//! Identifier nodes.

use core::fmt;

use super::node::{malformed, validated, Child, Children, Node, NodeKind, NodeRef};
use crate::error::ParseError;
use crate::lexer::{Keyword, Span};

/// A bare identifier, such as `users` or `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    value: String,
    span: Span,
}

impl Ident {
    /// Creates a bare identifier.
    ///
    /// # Errors
    ///
    /// Fails if `value` is empty.
    pub fn new(value: impl Into<String>, span: Span) -> Result<Self, ParseError> {
        let value = value.into();
        if value.is_empty() {
            return malformed(NodeKind::Identifier, "identifier is empty", span);
        }
        validated(Self { value, span })
    }

    /// Returns the identifier text as written.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A backtick-quoted identifier. The value excludes the quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedIdent {
    value: String,
    span: Span,
}

impl QuotedIdent {
    /// Creates a quoted identifier.
    ///
    /// # Errors
    ///
    /// Fails if `value` is empty.
    pub fn new(value: impl Into<String>, span: Span) -> Result<Self, ParseError> {
        let value = value.into();
        if value.is_empty() {
            return malformed(NodeKind::QuotedIdentifier, "quoted identifier is empty", span);
        }
        validated(Self { value, span })
    }

    /// Returns the identifier text without quotes.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A reserved word accepted where a name was required.
///
/// The recognizer only produces these when lenient identifiers are enabled.
/// Passes may treat them as ordinary names or report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCapturingIdent {
    value: String,
    span: Span,
}

impl ErrorCapturingIdent {
    /// Creates an error-capturing identifier.
    ///
    /// # Errors
    ///
    /// Fails if `value` is not a reserved keyword.
    pub fn new(value: impl Into<String>, span: Span) -> Result<Self, ParseError> {
        let value = value.into();
        if !Keyword::from_str(&value).is_some_and(|keyword| keyword.is_reserved()) {
            return malformed(
                NodeKind::ErrorCapturingIdentifier,
                format!("'{value}' is not a reserved word"),
                span,
            );
        }
        validated(Self { value, span })
    }

    /// Returns the word as written.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Any single-part name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// `name`
    Simple(Ident),
    /// `` `name` ``
    Quoted(QuotedIdent),
    /// A reserved word used as a name.
    ErrorCapturing(ErrorCapturingIdent),
}

impl Identifier {
    /// Returns the name without quotes.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Simple(ident) => ident.value(),
            Self::Quoted(ident) => ident.value(),
            Self::ErrorCapturing(ident) => ident.value(),
        }
    }

    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        NodeRef::from(self).span()
    }

    /// Returns true if the name was quoted in the source.
    #[must_use]
    pub const fn is_quoted(&self) -> bool {
        matches!(self, Self::Quoted(_))
    }

    /// Returns true if the name is a reserved word accepted leniently.
    #[must_use]
    pub const fn is_error_capturing(&self) -> bool {
        matches!(self, Self::ErrorCapturing(_))
    }
}

impl<'a> From<&'a Identifier> for NodeRef<'a> {
    fn from(ident: &'a Identifier) -> Self {
        match ident {
            Identifier::Simple(node) => node.into(),
            Identifier::Quoted(node) => node.into(),
            Identifier::ErrorCapturing(node) => node.into(),
        }
    }
}

/// A dotted, possibly qualified name such as `catalog.db.table` or `t.col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    parts: Vec<Identifier>,
    span: Span,
}

impl ObjectName {
    /// Creates a multi-part name.
    ///
    /// # Errors
    ///
    /// Fails if `parts` is empty or a part lies outside `span`.
    pub fn new(parts: Vec<Identifier>, span: Span) -> Result<Self, ParseError> {
        if parts.is_empty() {
            return malformed(NodeKind::MultipartIdentifier, "name has no parts", span);
        }
        validated(Self { parts, span })
    }

    /// Creates a single-part name spanning the identifier.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed identifier; kept fallible for uniformity.
    pub fn single(ident: Identifier) -> Result<Self, ParseError> {
        let span = ident.span();
        Self::new(vec![ident], span)
    }

    /// Returns the parts in source order.
    #[must_use]
    pub fn parts(&self) -> &[Identifier] {
        &self.parts
    }

    /// Returns the last part, the object itself.
    #[must_use]
    pub fn last(&self) -> &Identifier {
        // parts is never empty
        &self.parts[self.parts.len() - 1]
    }

    /// Returns the qualifying parts before the last one.
    #[must_use]
    pub fn qualifier(&self) -> &[Identifier] {
        &self.parts[..self.parts.len() - 1]
    }

    /// Returns the unquoted parts joined by dots.
    #[must_use]
    pub fn to_dotted(&self) -> String {
        self.parts
            .iter()
            .map(Identifier::value)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Node for Ident {
    const KIND: NodeKind = NodeKind::Identifier;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Vec::new()
    }
}

impl Node for QuotedIdent {
    const KIND: NodeKind = NodeKind::QuotedIdentifier;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Vec::new()
    }
}

impl Node for ErrorCapturingIdent {
    const KIND: NodeKind = NodeKind::ErrorCapturingIdentifier;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Vec::new()
    }
}

impl Node for ObjectName {
    const KIND: NodeKind = NodeKind::MultipartIdentifier;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("part", &self.parts).finish()
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "`{}`", value.replace('`', "``"))
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for QuotedIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.value)
    }
}

impl fmt::Display for ErrorCapturingIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, &self.value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(ident) => ident.fmt(f),
            Self::Quoted(ident) => ident.fmt(f),
            Self::ErrorCapturing(ident) => ident.fmt(f),
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            part.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(value: &str, start: usize) -> Identifier {
        Identifier::Simple(Ident::new(value, Span::new(start, start + value.len())).unwrap())
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let err = Ident::new("", Span::point(0)).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_error_capturing_requires_reserved_word() {
        assert!(ErrorCapturingIdent::new("select", Span::new(0, 6)).is_ok());
        assert!(ErrorCapturingIdent::new("comment", Span::new(0, 7)).is_err());
    }

    #[test]
    fn test_object_name() {
        let name = ObjectName::new(vec![simple("db", 0), simple("t", 3)], Span::new(0, 4)).unwrap();
        assert_eq!(name.to_dotted(), "db.t");
        assert_eq!(name.last().value(), "t");
        assert_eq!(name.qualifier().len(), 1);
        assert_eq!(name.to_string(), "db.t");
    }

    #[test]
    fn test_object_name_rejects_escaping_part() {
        let err = ObjectName::new(vec![simple("db", 0), simple("t", 3)], Span::new(0, 3))
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_quoted_display() {
        let ident = QuotedIdent::new("a`b", Span::new(0, 6)).unwrap();
        assert_eq!(ident.to_string(), "`a``b`");
    }
}
