//! Literal nodes.

use core::fmt;

use super::node::{malformed, validated, Child, Node, NodeKind, NodeRef};
use super::DataType;
use crate::error::ParseError;
use crate::lexer::Span;

/// An integer literal that fits in an `i64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    value: i64,
    span: Span,
}

impl IntegerLiteral {
    /// Creates an integer literal.
    ///
    /// # Errors
    ///
    /// Fails only if the span is inverted.
    pub fn new(value: i64, span: Span) -> Result<Self, ParseError> {
        validated(Self { value, span })
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }
}

/// A decimal, exponent or out-of-range integer literal, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalLiteral {
    text: String,
    span: Span,
}

impl DecimalLiteral {
    /// Creates a decimal literal.
    ///
    /// # Errors
    ///
    /// Fails if `text` is not an unsigned decimal number.
    pub fn new(text: impl Into<String>, span: Span) -> Result<Self, ParseError> {
        let text = text.into();
        if !is_decimal_text(&text) {
            return malformed(NodeKind::Decimal, format!("'{text}' is not a number"), span);
        }
        validated(Self { text, span })
    }

    /// Returns the literal text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn is_decimal_text(text: &str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };
    let mut pieces = mantissa.splitn(2, '.');
    let integral = pieces.next().unwrap_or_default();
    let fraction = pieces.next();
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let mantissa_ok = digits(integral) && fraction.map_or(true, digits);
    let exponent_ok = exponent.map_or(true, |e| {
        digits(e.strip_prefix(['+', '-']).unwrap_or(e))
    });
    mantissa_ok && exponent_ok
}

/// A string literal. The value has quotes and escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    value: String,
    span: Span,
}

impl StringLiteral {
    /// Creates a string literal.
    ///
    /// # Errors
    ///
    /// Fails only if the span is inverted.
    pub fn new(value: impl Into<String>, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            value: value.into(),
            span,
        })
    }

    /// Returns the unescaped value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// `TRUE` or `FALSE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanLiteral {
    value: bool,
    span: Span,
}

impl BooleanLiteral {
    /// Creates a boolean literal.
    ///
    /// # Errors
    ///
    /// Fails only if the span is inverted.
    pub fn new(value: bool, span: Span) -> Result<Self, ParseError> {
        validated(Self { value, span })
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> bool {
        self.value
    }
}

/// `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullLiteral {
    span: Span,
}

impl NullLiteral {
    /// Creates a NULL literal.
    ///
    /// # Errors
    ///
    /// Fails only if the span is inverted.
    pub fn new(span: Span) -> Result<Self, ParseError> {
        validated(Self { span })
    }
}

/// A literal prefixed by its type: `DATE '2024-01-01'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedLiteral {
    data_type: DataType,
    value: String,
    span: Span,
}

impl TypedLiteral {
    /// Creates a typed literal.
    ///
    /// # Errors
    ///
    /// Fails if `data_type` is not DATE or DATETIME.
    pub fn new(data_type: DataType, value: impl Into<String>, span: Span) -> Result<Self, ParseError> {
        if !data_type.is_temporal() {
            return malformed(
                NodeKind::Typed,
                format!("{data_type} cannot prefix a literal"),
                span,
            );
        }
        validated(Self {
            data_type,
            value: value.into(),
            span,
        })
    }

    /// Returns the literal's type.
    #[must_use]
    pub const fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Returns the literal text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Any literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Integer literal.
    Integer(IntegerLiteral),
    /// Decimal literal.
    Decimal(DecimalLiteral),
    /// String literal.
    String(StringLiteral),
    /// Boolean literal.
    Boolean(BooleanLiteral),
    /// NULL literal.
    Null(NullLiteral),
    /// Typed literal.
    Typed(TypedLiteral),
}

impl Literal {
    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        NodeRef::from(self).span()
    }
}

impl<'a> From<&'a Literal> for NodeRef<'a> {
    fn from(literal: &'a Literal) -> Self {
        match literal {
            Literal::Integer(node) => node.into(),
            Literal::Decimal(node) => node.into(),
            Literal::String(node) => node.into(),
            Literal::Boolean(node) => node.into(),
            Literal::Null(node) => node.into(),
            Literal::Typed(node) => node.into(),
        }
    }
}

macro_rules! impl_leaf_node {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Node for $ty {
                const KIND: NodeKind = NodeKind::$kind;

                fn span(&self) -> Span {
                    self.span
                }

                fn children(&self) -> Vec<Child<'_>> {
                    Vec::new()
                }
            }
        )*
    };
}

impl_leaf_node! {
    IntegerLiteral => Integer,
    DecimalLiteral => Decimal,
    StringLiteral => String,
    BooleanLiteral => Boolean,
    NullLiteral => Null,
    TypedLiteral => Typed,
}

/// Writes `value` as a single-quoted Doris string.
pub(crate) fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in value.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\0' => f.write_str("\\0")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("'")
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for DecimalLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_string(f, &self.value)
    }
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.value { "TRUE" } else { "FALSE" })
    }
}

impl fmt::Display for NullLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NULL")
    }
}

impl fmt::Display for TypedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.data_type)?;
        write_string(f, &self.value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(lit) => lit.fmt(f),
            Self::Decimal(lit) => lit.fmt(f),
            Self::String(lit) => lit.fmt(f),
            Self::Boolean(lit) => lit.fmt(f),
            Self::Null(lit) => lit.fmt(f),
            Self::Typed(lit) => lit.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_validation() {
        assert!(DecimalLiteral::new("3.14", Span::new(0, 4)).is_ok());
        assert!(DecimalLiteral::new("1e-3", Span::new(0, 4)).is_ok());
        assert!(DecimalLiteral::new("12345678901234567890", Span::new(0, 20)).is_ok());
        assert!(DecimalLiteral::new("1.2.3", Span::new(0, 5)).is_err());
        assert!(DecimalLiteral::new("abc", Span::new(0, 3)).is_err());
    }

    #[test]
    fn test_typed_literal_requires_temporal_type() {
        assert!(TypedLiteral::new(DataType::Date, "2024-01-01", Span::new(0, 17)).is_ok());
        let err = TypedLiteral::new(DataType::Int, "1", Span::new(0, 7)).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_string_display_escapes() {
        let lit = StringLiteral::new("it's a\\b", Span::new(0, 12)).unwrap();
        assert_eq!(lit.to_string(), r"'it\'s a\\b'");
    }
}
