//! Precedence climbing over a flat operand/operator sequence.
//!
//! The recognizer collects one expression production as a list of
//! [`ExprItem`]s and hands it to [`climb`], which builds the tree using the
//! binding powers derived from [`Precedence`].

use core::iter::Peekable;
use std::vec::IntoIter;

use crate::ast::{
    ArraySliceExpr, BetweenExpr, BinaryExpr, BinaryOp, CastExpr, CastStyle, DataType,
    DereferenceExpr, ElementAtExpr, Expr, Identifier, InListExpr, InSubqueryExpr, IsNullExpr,
    LikeExpr, LikeOp, MatchExpr, MatchOp, Precedence, Query, UnaryExpr, UnaryOp,
};
use crate::error::ParseError;
use crate::lexer::Span;

/// One element of a collected expression production.
#[derive(Debug, Clone)]
pub enum ExprItem {
    /// A complete primary expression.
    Operand(Expr),
    /// A prefix operator and the span of its token.
    Prefix(UnaryOp, Span),
    /// An infix operator and the span of its tokens.
    Infix(InfixOp, Span),
    /// A postfix operator and the span from its first token to its end.
    Postfix(PostfixOp, Span),
}

/// Operators written between two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    /// Arithmetic, comparison, bitwise and logical operators.
    Binary(BinaryOp),
    /// `[NOT] LIKE`, `[NOT] REGEXP`
    Like {
        /// Operator.
        op: LikeOp,
        /// True for the NOT form.
        negated: bool,
    },
    /// `MATCH_*`
    Match(MatchOp),
}

impl InfixOp {
    /// Returns the precedence class of the operator.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        match self {
            Self::Binary(op) => op.precedence(),
            Self::Like { .. } | Self::Match(_) => Precedence::Comparison,
        }
    }
}

/// Operators written after their operand, with any operands of their own.
#[derive(Debug, Clone)]
pub enum PostfixOp {
    /// `IS [NOT] NULL`
    IsNull {
        /// True for IS NOT NULL.
        negated: bool,
    },
    /// `[NOT] BETWEEN low AND high`
    Between {
        /// Lower bound.
        low: Expr,
        /// Upper bound.
        high: Expr,
        /// True for NOT BETWEEN.
        negated: bool,
    },
    /// `[NOT] IN (list)`
    InList {
        /// The list items.
        list: Vec<Expr>,
        /// True for NOT IN.
        negated: bool,
    },
    /// `[NOT] IN (query)`
    InSubquery {
        /// The subquery.
        query: Query,
        /// True for NOT IN.
        negated: bool,
    },
    /// `::type`
    Cast(DataType),
    /// `[index]`
    ElementAt(Expr),
    /// `[start:end]`
    Slice(Option<Expr>, Option<Expr>),
    /// `.field`
    Dereference(Identifier),
}

impl PostfixOp {
    /// Returns the precedence class of the operator.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        match self {
            Self::IsNull { .. }
            | Self::Between { .. }
            | Self::InList { .. }
            | Self::InSubquery { .. } => Precedence::Comparison,
            Self::Cast(_) | Self::ElementAt(_) | Self::Slice(..) | Self::Dereference(_) => {
                Precedence::Postfix
            }
        }
    }
}

/// Returns the `(left, right)` binding power of an infix class.
///
/// Every infix class is left associative.
#[must_use]
pub const fn infix_binding_power(precedence: Precedence) -> (u8, u8) {
    let left = precedence.level() * 2;
    (left, left + 1)
}

/// Returns the binding power a prefix operator applies to its operand.
#[must_use]
pub const fn prefix_binding_power(precedence: Precedence) -> u8 {
    precedence.level() * 2
}

/// Returns the binding power with which a postfix operator claims its operand.
#[must_use]
pub const fn postfix_binding_power(precedence: Precedence) -> u8 {
    precedence.level() * 2
}

/// Builds the expression tree for one collected production.
///
/// # Errors
///
/// Returns a syntax error for an empty sequence, an operator without an
/// operand, or two operands without an operator between them. The error span
/// points at the offending item.
pub fn climb(items: Vec<ExprItem>) -> Result<Expr, ParseError> {
    let start = items.first().map_or_else(Span::default, item_span);
    let mut climber = Climber {
        items: items.into_iter().peekable(),
        last_operator: Span::point(start.start),
    };
    let expr = climber.expr_bp(0)?;
    match climber.items.next() {
        None => Ok(expr),
        // expr_bp only stops early on an operand-like item
        Some(item) => Err(missing_operator(&item)),
    }
}

fn item_span(item: &ExprItem) -> Span {
    match item {
        ExprItem::Operand(expr) => expr.span(),
        ExprItem::Prefix(_, span) | ExprItem::Infix(_, span) | ExprItem::Postfix(_, span) => *span,
    }
}

fn missing_operator(item: &ExprItem) -> ParseError {
    ParseError::new("missing operator between operands", item_span(item))
}

struct Climber {
    items: Peekable<IntoIter<ExprItem>>,
    last_operator: Span,
}

impl Climber {
    fn expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = match self.items.next() {
            Some(ExprItem::Operand(expr)) => expr,
            Some(ExprItem::Prefix(op, span)) => {
                self.last_operator = span;
                let operand = self.expr_bp(prefix_binding_power(op.precedence()))?;
                let span = span.merge(operand.span());
                Expr::Unary(UnaryExpr::new(op, operand, span)?)
            }
            Some(ExprItem::Infix(_, span) | ExprItem::Postfix(_, span)) => {
                return Err(ParseError::new("operator has no left operand", span));
            }
            None => {
                return Err(ParseError::new(
                    "operator has no right operand",
                    self.last_operator,
                ));
            }
        };

        loop {
            match self.items.peek() {
                None | Some(ExprItem::Operand(_) | ExprItem::Prefix(..)) => break,
                Some(ExprItem::Postfix(op, _)) => {
                    if postfix_binding_power(op.precedence()) < min_bp {
                        break;
                    }
                    let Some(ExprItem::Postfix(op, span)) = self.items.next() else {
                        break;
                    };
                    lhs = apply_postfix(lhs, op, span)?;
                }
                Some(ExprItem::Infix(op, _)) => {
                    let (left_bp, right_bp) = infix_binding_power(op.precedence());
                    if left_bp < min_bp {
                        break;
                    }
                    let Some(ExprItem::Infix(op, span)) = self.items.next() else {
                        break;
                    };
                    self.last_operator = span;
                    let rhs = self.expr_bp(right_bp)?;
                    lhs = apply_infix(lhs, op, rhs)?;
                }
            }
        }

        Ok(lhs)
    }
}

fn apply_infix(lhs: Expr, op: InfixOp, rhs: Expr) -> Result<Expr, ParseError> {
    Ok(match op {
        InfixOp::Binary(op) => Expr::Binary(BinaryExpr::new(lhs, op, rhs)?),
        InfixOp::Like { op, negated } => Expr::Like(LikeExpr::new(lhs, negated, op, rhs)?),
        InfixOp::Match(op) => Expr::Match(MatchExpr::new(lhs, op, rhs)?),
    })
}

fn apply_postfix(lhs: Expr, op: PostfixOp, span: Span) -> Result<Expr, ParseError> {
    let span = lhs.span().merge(span);
    Ok(match op {
        PostfixOp::IsNull { negated } => Expr::IsNull(IsNullExpr::new(lhs, negated, span)?),
        PostfixOp::Between { low, high, negated } => {
            Expr::Between(BetweenExpr::new(lhs, negated, low, high, span)?)
        }
        PostfixOp::InList { list, negated } => {
            Expr::InList(InListExpr::new(lhs, negated, list, span)?)
        }
        PostfixOp::InSubquery { query, negated } => {
            Expr::InSubquery(InSubqueryExpr::new(lhs, negated, query, span)?)
        }
        PostfixOp::Cast(data_type) => {
            Expr::Cast(CastExpr::new(lhs, data_type, CastStyle::DoubleColon, span)?)
        }
        PostfixOp::ElementAt(index) => Expr::ElementAt(ElementAtExpr::new(lhs, index, span)?),
        PostfixOp::Slice(start, end) => {
            Expr::ArraySlice(ArraySliceExpr::new(lhs, start, end, span)?)
        }
        PostfixOp::Dereference(field) => Expr::Dereference(DereferenceExpr::new(lhs, field)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnRef, Ident, IntegerLiteral, Literal, Node, ObjectName};

    fn column(name: &str, start: usize) -> ExprItem {
        let span = Span::new(start, start + name.len());
        let ident = Identifier::Simple(Ident::new(name, span).unwrap());
        ExprItem::Operand(Expr::Column(ColumnRef::new(ObjectName::single(ident).unwrap()).unwrap()))
    }

    fn int(value: i64, start: usize) -> ExprItem {
        let span = Span::new(start, start + value.to_string().len());
        ExprItem::Operand(Expr::Literal(Literal::Integer(IntegerLiteral::new(value, span).unwrap())))
    }

    fn infix(op: BinaryOp, start: usize, len: usize) -> ExprItem {
        ExprItem::Infix(InfixOp::Binary(op), Span::new(start, start + len))
    }

    #[test]
    fn test_precedence_ordering() {
        let (or_bp, _) = infix_binding_power(Precedence::Or);
        let (and_bp, _) = infix_binding_power(Precedence::And);
        let not_bp = prefix_binding_power(Precedence::Not);
        let (cmp_bp, _) = infix_binding_power(Precedence::Comparison);
        let (add_bp, _) = infix_binding_power(Precedence::Additive);
        let (mul_bp, _) = infix_binding_power(Precedence::Multiplicative);
        assert!(or_bp < and_bp);
        assert!(and_bp < not_bp);
        assert!(not_bp < cmp_bp);
        assert!(cmp_bp < add_bp);
        assert!(add_bp < mul_bp);
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        // 1 + 2 * 3
        let expr = climb(vec![
            int(1, 0),
            infix(BinaryOp::Add, 2, 1),
            int(2, 4),
            infix(BinaryOp::Mul, 6, 1),
            int(3, 8),
        ])
        .unwrap();
        let Expr::Binary(add) = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(add.op(), BinaryOp::Add);
        assert!(matches!(add.right(), Expr::Binary(mul) if mul.op() == BinaryOp::Mul));
        assert_eq!(add.span(), Span::new(0, 9));
    }

    #[test]
    fn test_not_covers_comparison() {
        // NOT a = b
        let expr = climb(vec![
            ExprItem::Prefix(UnaryOp::Not, Span::new(0, 3)),
            column("a", 4),
            infix(BinaryOp::Eq, 6, 1),
            column("b", 8),
        ])
        .unwrap();
        let Expr::Unary(not) = expr else {
            panic!("expected unary expression");
        };
        assert_eq!(not.op(), UnaryOp::Not);
        assert!(matches!(not.operand(), Expr::Binary(eq) if eq.op() == BinaryOp::Eq));
    }

    #[test]
    fn test_left_associative_concat() {
        // a || b || c
        let expr = climb(vec![
            column("a", 0),
            infix(BinaryOp::Concat, 2, 2),
            column("b", 5),
            infix(BinaryOp::Concat, 7, 2),
            column("c", 10),
        ])
        .unwrap();
        let Expr::Binary(outer) = expr else {
            panic!("expected binary expression");
        };
        assert!(matches!(outer.left(), Expr::Binary(_)));
        assert!(matches!(outer.right(), Expr::Column(_)));
    }

    #[test]
    fn test_postfix_applies_to_whole_comparison_operand() {
        // a + 1 IS NULL
        let expr = climb(vec![
            column("a", 0),
            infix(BinaryOp::Add, 2, 1),
            int(1, 4),
            ExprItem::Postfix(PostfixOp::IsNull { negated: false }, Span::new(6, 13)),
        ])
        .unwrap();
        let Expr::IsNull(is_null) = expr else {
            panic!("expected IS NULL");
        };
        assert!(matches!(is_null.expr(), Expr::Binary(_)));
        assert_eq!(is_null.span(), Span::new(0, 13));
    }

    #[test]
    fn test_trailing_operator() {
        let err = climb(vec![column("a", 0), infix(BinaryOp::Add, 2, 1)]).unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.span, Span::new(2, 3));
    }

    #[test]
    fn test_leading_infix() {
        let err = climb(vec![infix(BinaryOp::Mul, 0, 1), column("a", 2)]).unwrap_err();
        assert_eq!(err.span, Span::new(0, 1));
    }

    #[test]
    fn test_adjacent_operands() {
        let err = climb(vec![column("a", 0), column("b", 2)]).unwrap_err();
        assert!(err.message.contains("missing operator"));
        assert_eq!(err.span, Span::new(2, 3));
    }

    #[test]
    fn test_empty_sequence() {
        assert!(climb(Vec::new()).unwrap_err().is_syntax());
    }
}
