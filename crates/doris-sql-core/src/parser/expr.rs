//! Expression recognition.
//!
//! Expressions are collected as a flat sequence of operands and operators and
//! handed to [`climb`] for grouping. The `floor` passed down is the weakest
//! precedence the caller accepts: BETWEEN bounds, interval values and frame
//! offsets stop at operators weaker than bitwise so `AND` is left to them.

use std::collections::HashSet;

use crate::ast::{
    ArrayExpr, BinaryOp, BooleanLiteral, CaseExpr, CastExpr, CastStyle, ColumnRef, DataType,
    DecimalLiteral, ExistsExpr, Expr, FrameBound, FrameUnits, FunctionCall, Ident, Identifier,
    IntegerLiteral, IntervalExpr, IntervalUnit, LambdaExpr, LikeOp, Literal, MapExpr, MatchOp,
    NestedExpr, Node, NullLiteral, ObjectName, Parameter, Precedence, StringLiteral, StructExpr,
    StructField, SubqueryExpr, TypedLiteral, UnaryOp, WhenClause, Wildcard, WindowExpr,
    WindowFrame, WindowSpec,
};
use crate::error::ParseError;
use crate::lexer::{Keyword, Span, Token, TokenKind};

use super::pratt::{climb, ExprItem, InfixOp, PostfixOp};
use super::Parser;

/// Reserved words that double as function names when followed by `(`.
const KEYWORD_FUNCTIONS: &[Keyword] = &[
    Keyword::Left,
    Keyword::Right,
    Keyword::Truncate,
    Keyword::Database,
    Keyword::Schema,
];

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Keyword(Keyword::Or) => BinaryOp::Or,
        TokenKind::Keyword(Keyword::Xor) => BinaryOp::Xor,
        TokenKind::Keyword(Keyword::And) => BinaryOp::And,
        TokenKind::Keyword(Keyword::Div) => BinaryOp::IntDiv,
        TokenKind::Eq => BinaryOp::Eq,
        TokenKind::NullSafeEq => BinaryOp::NullSafeEq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::Concat => BinaryOp::Concat,
        TokenKind::BitOr => BinaryOp::BitOr,
        TokenKind::BitAnd => BinaryOp::BitAnd,
        TokenKind::BitXor => BinaryOp::BitXor,
        TokenKind::LeftShift => BinaryOp::LeftShift,
        TokenKind::RightShift => BinaryOp::RightShift,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        _ => return None,
    })
}

fn match_op(keyword: Keyword) -> Option<MatchOp> {
    Some(match keyword {
        Keyword::MatchAny => MatchOp::Any,
        Keyword::MatchAll => MatchOp::All,
        Keyword::MatchPhrase => MatchOp::Phrase,
        Keyword::MatchPhrasePrefix => MatchOp::PhrasePrefix,
        Keyword::MatchPhraseEdge => MatchOp::PhraseEdge,
        Keyword::MatchRegexp => MatchOp::Regexp,
        _ => return None,
    })
}

impl Parser<'_> {
    /// Parses a full expression.
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_above(Precedence::Or)
    }

    /// Parses `expr [, expr]*`.
    pub(super) fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    /// Parses an expression using only operators at least as strong as `floor`.
    fn parse_expr_above(&mut self, floor: Precedence) -> Result<Expr, ParseError> {
        self.nested(|parser| {
            let items = parser.collect_items(floor)?;
            climb(items)
        })
    }

    fn collect_items(&mut self, floor: Precedence) -> Result<Vec<ExprItem>, ParseError> {
        let mut items = Vec::new();
        let mut prefixes = 0usize;
        loop {
            if let Some(op) = self.prefix_op(floor) {
                let span = self.advance().span;
                items.push(ExprItem::Prefix(op, span));
                prefixes += 1;
                if self.depth + prefixes > self.config.max_depth {
                    return Err(ParseError::new(
                        format!("nesting exceeds {} levels", self.config.max_depth),
                        span,
                    ));
                }
                continue;
            }
            items.push(ExprItem::Operand(self.parse_primary()?));

            loop {
                if let Some(item) = self.parse_postfix(floor)? {
                    let infix = matches!(item, ExprItem::Infix(..));
                    items.push(item);
                    if infix {
                        break;
                    }
                    continue;
                }
                if let Some(infix) = self.parse_infix(floor) {
                    items.push(infix);
                    break;
                }
                return Ok(items);
            }
        }
    }

    fn prefix_op(&self, floor: Precedence) -> Option<UnaryOp> {
        match self.current().kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::BitNot => Some(UnaryOp::BitNot),
            TokenKind::Keyword(Keyword::Not) if floor <= Precedence::Not => Some(UnaryOp::Not),
            _ => None,
        }
    }

    /// Parses an infix operator token if it binds at least as tightly as `floor`.
    fn parse_infix(&mut self, floor: Precedence) -> Option<ExprItem> {
        let token = self.current().clone();
        let op = if let Some(op) = binary_op(&token.kind) {
            InfixOp::Binary(op)
        } else if floor <= Precedence::Comparison {
            match token.kind {
                TokenKind::Keyword(Keyword::Like) => InfixOp::Like {
                    op: LikeOp::Like,
                    negated: false,
                },
                TokenKind::Keyword(Keyword::Regexp | Keyword::Rlike) => InfixOp::Like {
                    op: LikeOp::Regexp,
                    negated: false,
                },
                TokenKind::Keyword(keyword) => InfixOp::Match(match_op(keyword)?),
                _ => return None,
            }
        } else {
            return None;
        };
        if op.precedence() < floor {
            return None;
        }
        self.advance();
        Some(ExprItem::Infix(op, token.span))
    }

    /// Parses a postfix operator: casts, subscripts, field access and, when
    /// comparisons are allowed, the IS/IN/BETWEEN predicates. `NOT LIKE` and
    /// its REGEXP forms come back as infix items.
    fn parse_postfix(&mut self, floor: Precedence) -> Result<Option<ExprItem>, ParseError> {
        let start = self.current().span.start;
        match self.current().kind {
            TokenKind::DoubleColon => {
                self.advance();
                let data_type = self.parse_data_type()?;
                return Ok(Some(ExprItem::Postfix(
                    PostfixOp::Cast(data_type),
                    self.span_from(start),
                )));
            }
            TokenKind::LeftBracket => return self.parse_subscript().map(Some),
            TokenKind::Dot if self.is_name_at(1) => {
                self.advance();
                let field = self.parse_identifier()?;
                return Ok(Some(ExprItem::Postfix(
                    PostfixOp::Dereference(field),
                    self.span_from(start),
                )));
            }
            _ => {}
        }
        if floor > Precedence::Comparison {
            return Ok(None);
        }

        if self.check_keyword(Keyword::Is) {
            self.advance();
            let negated = self.eat_keyword(Keyword::Not);
            self.expect_keyword(Keyword::Null)?;
            return Ok(Some(ExprItem::Postfix(
                PostfixOp::IsNull { negated },
                self.span_from(start),
            )));
        }

        let negated = self.check_keyword(Keyword::Not)
            && matches!(
                self.peek_kind(1),
                TokenKind::Keyword(
                    Keyword::In | Keyword::Between | Keyword::Like | Keyword::Regexp | Keyword::Rlike
                )
            );
        if negated {
            self.advance();
        }

        let op = match self.current().kind {
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let op = if matches!(
                    self.current().kind,
                    TokenKind::Keyword(Keyword::Select | Keyword::With)
                ) {
                    PostfixOp::InSubquery {
                        query: self.parse_query()?,
                        negated,
                    }
                } else {
                    PostfixOp::InList {
                        list: self.parse_expr_list()?,
                        negated,
                    }
                };
                self.expect(&TokenKind::RightParen)?;
                op
            }
            TokenKind::Keyword(Keyword::Between) => {
                self.advance();
                let low = self.parse_expr_above(Precedence::Bitwise)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expr_above(Precedence::Bitwise)?;
                PostfixOp::Between { low, high, negated }
            }
            TokenKind::Keyword(keyword @ (Keyword::Like | Keyword::Regexp | Keyword::Rlike))
                if negated =>
            {
                let span = self.advance().span;
                let op = if keyword == Keyword::Like {
                    LikeOp::Like
                } else {
                    LikeOp::Regexp
                };
                return Ok(Some(ExprItem::Infix(
                    InfixOp::Like { op, negated: true },
                    Span::new(start, span.end),
                )));
            }
            _ => return Ok(None),
        };
        Ok(Some(ExprItem::Postfix(op, self.span_from(start))))
    }

    /// Parses `[index]` or `[start:end]`.
    fn parse_subscript(&mut self) -> Result<ExprItem, ParseError> {
        let start = self.expect(&TokenKind::LeftBracket)?.start;
        let first = if self.check(&TokenKind::Colon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let op = if self.eat(&TokenKind::Colon) {
            let end = if self.check(&TokenKind::RightBracket) {
                None
            } else {
                Some(self.parse_expr()?)
            };
            PostfixOp::Slice(first, end)
        } else {
            match first {
                Some(index) => PostfixOp::ElementAt(index),
                None => return Err(self.error_expected_operand("subscript")),
            }
        };
        self.expect(&TokenKind::RightBracket)?;
        Ok(ExprItem::Postfix(op, self.span_from(start)))
    }

    // ------------------------------------------------------------------
    // Primaries
    // ------------------------------------------------------------------

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();
        let span = token.span;
        match &token.kind {
            TokenKind::Integer(value) => {
                self.advance();
                Ok(Expr::Literal(Literal::Integer(IntegerLiteral::new(*value, span)?)))
            }
            TokenKind::Decimal(text) => {
                self.advance();
                Ok(Expr::Literal(Literal::Decimal(DecimalLiteral::new(text.clone(), span)?)))
            }
            TokenKind::String(value) => {
                self.advance();
                Ok(Expr::Literal(Literal::String(StringLiteral::new(value.clone(), span)?)))
            }
            TokenKind::Keyword(Keyword::True | Keyword::False) => {
                self.advance();
                let value = token.as_keyword() == Some(Keyword::True);
                Ok(Expr::Literal(Literal::Boolean(BooleanLiteral::new(value, span)?)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::Literal(Literal::Null(NullLiteral::new(span)?)))
            }
            TokenKind::Keyword(keyword @ (Keyword::Date | Keyword::Datetime | Keyword::Timestamp))
                if matches!(self.peek_kind(1), TokenKind::String(_)) =>
            {
                self.advance();
                let literal = self.parse_string_literal()?;
                let typed = TypedLiteral::new(
                    DataType::from_name(keyword.as_str()),
                    literal.value(),
                    self.span_from(span.start),
                )?;
                Ok(Expr::Literal(Literal::Typed(typed)))
            }
            TokenKind::Question => {
                self.advance();
                self.param_counter += 1;
                Ok(Expr::Parameter(Parameter::new(self.param_counter, span)?))
            }
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Wildcard(Wildcard::new(None, span)?))
            }
            TokenKind::LeftParen => self.parse_parenthesized(),
            TokenKind::LeftBracket => self.parse_array(),
            TokenKind::LeftBrace => self.parse_map_or_struct(),
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast(),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Exists(ExistsExpr::new(query, self.span_from(span.start))?))
            }
            TokenKind::Keyword(Keyword::Interval) => self.parse_interval(),
            TokenKind::Keyword(keyword)
                if KEYWORD_FUNCTIONS.contains(keyword)
                    && matches!(self.peek_kind(1), TokenKind::LeftParen) =>
            {
                self.advance();
                let name = ObjectName::single(Identifier::Simple(Ident::new(
                    self.token_text(&token),
                    span,
                )?))?;
                self.parse_call_after_name(name)
            }
            TokenKind::Identifier(_) if matches!(self.peek_kind(1), TokenKind::Arrow) => {
                let param = self.parse_identifier()?;
                self.parse_lambda_body(vec![param], span.start)
            }
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => self.parse_name_expr(),
            TokenKind::Keyword(keyword) if !keyword.is_reserved() => self.parse_name_expr(),
            _ => Err(self.error_expected_operand("expression")),
        }
    }

    /// Parses a column reference, qualified wildcard or function call.
    fn parse_name_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        let mut parts = vec![self.parse_identifier()?];
        while self.check(&TokenKind::Dot) {
            match self.peek_kind(1) {
                TokenKind::Star => {
                    let qualifier = ObjectName::new(parts, self.span_from(start))?;
                    self.advance();
                    self.advance();
                    return Ok(Expr::Wildcard(Wildcard::new(
                        Some(qualifier),
                        self.span_from(start),
                    )?));
                }
                _ if self.is_name_at(1) => {
                    self.advance();
                    parts.push(self.parse_identifier()?);
                }
                _ => break,
            }
        }
        let name = ObjectName::new(parts, self.span_from(start))?;

        if self.check(&TokenKind::LeftParen) {
            if name.parts().len() == 1 && name.last().value().eq_ignore_ascii_case("STRUCT") {
                return self.parse_struct_call(start);
            }
            return self.parse_call_after_name(name);
        }
        Ok(Expr::Column(ColumnRef::new(name)?))
    }

    /// Parses a function call for LATERAL VIEW generators.
    pub(super) fn parse_function_call(&mut self) -> Result<FunctionCall, ParseError> {
        let name = self.parse_object_name()?;
        self.parse_call_arguments(name)
    }

    /// Parses `(args) [OVER (window)]` after a function name.
    fn parse_call_after_name(&mut self, name: ObjectName) -> Result<Expr, ParseError> {
        let start = name.span().start;
        let function = self.parse_call_arguments(name)?;
        if !self.check_keyword(Keyword::Over) {
            return Ok(Expr::Function(function));
        }
        self.advance();
        let window = self.parse_window_spec()?;
        Ok(Expr::Window(WindowExpr::new(function, window, self.span_from(start))?))
    }

    fn parse_call_arguments(&mut self, name: ObjectName) -> Result<FunctionCall, ParseError> {
        let start = name.span().start;
        self.expect(&TokenKind::LeftParen)?;
        let distinct = if self.eat_keyword(Keyword::Distinct) {
            true
        } else {
            self.eat_keyword(Keyword::All);
            false
        };
        let args = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else if self.check(&TokenKind::Star) && matches!(self.peek_kind(1), TokenKind::RightParen) {
            let span = self.advance().span;
            vec![Expr::Wildcard(Wildcard::new(None, span)?)]
        } else {
            self.parse_expr_list()?
        };
        self.expect(&TokenKind::RightParen)?;
        FunctionCall::new(name, distinct, args, self.span_from(start))
    }

    fn parse_struct_call(&mut self, start: usize) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let fields = self.parse_expr_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Struct(StructExpr::new(fields, self.span_from(start))?))
    }

    /// Parses `OVER`'s `(PARTITION BY ... ORDER BY ... frame)`.
    fn parse_window_spec(&mut self) -> Result<WindowSpec, ParseError> {
        let start = self.expect(&TokenKind::LeftParen)?.start;
        let partition_by = if self.check_keyword(Keyword::Partition) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_expr_list()?
        } else {
            Vec::new()
        };
        let order_by = if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_order_items()?
        } else {
            Vec::new()
        };
        let frame = match self.current().kind {
            TokenKind::Keyword(Keyword::Rows | Keyword::Range) => Some(self.parse_window_frame()?),
            _ => None,
        };
        self.expect(&TokenKind::RightParen)?;
        WindowSpec::new(partition_by, order_by, frame, self.span_from(start))
    }

    fn parse_window_frame(&mut self) -> Result<WindowFrame, ParseError> {
        let token = self.advance();
        let units = if token.as_keyword() == Some(Keyword::Rows) {
            FrameUnits::Rows
        } else {
            FrameUnits::Range
        };
        let (start, end) = if self.eat_keyword(Keyword::Between) {
            let start = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            (start, Some(self.parse_frame_bound()?))
        } else {
            (self.parse_frame_bound()?, None)
        };
        WindowFrame::new(units, start, end, self.span_from(token.span.start))
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound, ParseError> {
        if self.eat_keyword(Keyword::Unbounded) {
            if self.eat_keyword(Keyword::Preceding) {
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_keyword(Keyword::Following)?;
            return Ok(FrameBound::UnboundedFollowing);
        }
        if self.eat_keyword(Keyword::Current) {
            self.expect_keyword(Keyword::Row)?;
            return Ok(FrameBound::CurrentRow);
        }
        let offset = Box::new(self.parse_expr_above(Precedence::Bitwise)?);
        if self.eat_keyword(Keyword::Preceding) {
            Ok(FrameBound::Preceding(offset))
        } else {
            self.expect_keyword(Keyword::Following)?;
            Ok(FrameBound::Following(offset))
        }
    }

    /// Parses a parenthesized subquery, lambda parameter list or expression.
    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        if matches!(
            self.peek_kind(1),
            TokenKind::Keyword(Keyword::Select | Keyword::With)
        ) {
            self.advance();
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::Subquery(SubqueryExpr::new(query, self.span_from(start))?));
        }
        if self.is_lambda_parameter_list() {
            let params = self.parse_parenthesized_identifiers()?;
            return self.parse_lambda_body(params, start);
        }
        self.advance();
        let expr = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Nested(NestedExpr::new(expr, self.span_from(start))?))
    }

    /// Looks ahead for `(a, b, ...) ->`.
    fn is_lambda_parameter_list(&self) -> bool {
        let mut n = 1;
        loop {
            if !matches!(self.peek_kind(n), TokenKind::Identifier(_)) {
                return false;
            }
            match self.peek_kind(n + 1) {
                TokenKind::Comma => n += 2,
                TokenKind::RightParen => return matches!(self.peek_kind(n + 2), TokenKind::Arrow),
                _ => return false,
            }
        }
    }

    fn parse_lambda_body(&mut self, params: Vec<Identifier>, start: usize) -> Result<Expr, ParseError> {
        let mut seen = HashSet::new();
        if let Some(repeat) = params
            .iter()
            .find(|param| !seen.insert(param.value().to_ascii_lowercase()))
        {
            return Err(ParseError::new(
                format!("lambda parameter '{}' is declared twice", repeat.value()),
                repeat.span(),
            ));
        }
        self.expect(&TokenKind::Arrow)?;
        let body = self.parse_expr()?;
        Ok(Expr::Lambda(LambdaExpr::new(params, body, self.span_from(start))?))
    }

    fn parse_array(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LeftBracket)?.start;
        let elements = if self.check(&TokenKind::RightBracket) {
            Vec::new()
        } else {
            self.parse_expr_list()?
        };
        self.expect(&TokenKind::RightBracket)?;
        Ok(Expr::Array(ArrayExpr::new(elements, self.span_from(start))?))
    }

    /// Parses `{k: v, ...}` as a map or `{a, b, ...}` as a struct.
    fn parse_map_or_struct(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LeftBrace)?.start;
        if self.eat(&TokenKind::RightBrace) {
            return Ok(Expr::Map(MapExpr::new(Vec::new(), self.span_from(start))?));
        }
        let first = self.parse_expr()?;
        if !self.eat(&TokenKind::Colon) {
            let mut fields = vec![first];
            while self.eat(&TokenKind::Comma) {
                fields.push(self.parse_expr()?);
            }
            self.expect(&TokenKind::RightBrace)?;
            return Ok(Expr::Struct(StructExpr::new(fields, self.span_from(start))?));
        }
        let mut entries = vec![(first, self.parse_expr()?)];
        while self.eat(&TokenKind::Comma) {
            let key = self.parse_expr()?;
            self.expect(&TokenKind::Colon)?;
            entries.push((key, self.parse_expr()?));
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(Expr::Map(MapExpr::new(entries, self.span_from(start))?))
    }

    fn parse_case(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect_keyword(Keyword::Case)?.start;
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let mut branches = Vec::new();
        while self.check_keyword(Keyword::When) {
            let branch_start = self.advance().span.start;
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expr()?;
            branches.push(WhenClause::new(condition, result, self.span_from(branch_start))?);
        }
        if branches.is_empty() {
            return Err(self.error_expected("WHEN"));
        }
        let else_result = if self.eat_keyword(Keyword::Else) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;
        Ok(Expr::Case(CaseExpr::new(operand, branches, else_result, self.span_from(start))?))
    }

    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect_keyword(Keyword::Cast)?.start;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Cast(CastExpr::new(
            expr,
            data_type,
            CastStyle::Function,
            self.span_from(start),
        )?))
    }

    fn parse_interval(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect_keyword(Keyword::Interval)?.start;
        let value = self.parse_expr_above(Precedence::Bitwise)?;
        let token = self.current().clone();
        let unit = match &token.kind {
            TokenKind::Identifier(word) => IntervalUnit::from_str(word),
            _ => None,
        };
        let Some(unit) = unit else {
            return Err(self.error_expected("interval unit"));
        };
        self.advance();
        Ok(Expr::Interval(IntervalExpr::new(value, unit, self.span_from(start))?))
    }

    // ------------------------------------------------------------------
    // Data types
    // ------------------------------------------------------------------

    /// Parses a column or cast target type.
    pub(super) fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let token = self.current().clone();
        let name = match &token.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(_) => self.token_text(&token),
            _ => return Err(self.error_expected("data type")),
        };
        self.advance();

        let data_type = match name.to_ascii_uppercase().as_str() {
            "DECIMAL" | "DECIMALV2" | "DECIMALV3" if self.eat(&TokenKind::LeftParen) => {
                let precision = self.parse_unsigned("decimal precision")?;
                let scale = if self.eat(&TokenKind::Comma) {
                    Some(self.parse_unsigned("decimal scale")?)
                } else {
                    None
                };
                self.expect(&TokenKind::RightParen)?;
                DataType::Decimal {
                    precision: Some(precision),
                    scale,
                }
            }
            "DATETIME" | "DATETIMEV2" | "TIMESTAMP" if self.eat(&TokenKind::LeftParen) => {
                let precision = self.parse_unsigned("datetime precision")?;
                self.expect(&TokenKind::RightParen)?;
                DataType::DateTime(Some(precision))
            }
            "CHAR" if self.eat(&TokenKind::LeftParen) => {
                let length = self.parse_unsigned("length")?;
                self.expect(&TokenKind::RightParen)?;
                DataType::Char(Some(length))
            }
            "VARCHAR" if self.eat(&TokenKind::LeftParen) => {
                let length = self.parse_unsigned("length")?;
                self.expect(&TokenKind::RightParen)?;
                DataType::Varchar(Some(length))
            }
            "ARRAY" => {
                self.expect(&TokenKind::Lt)?;
                let element = self.parse_data_type()?;
                self.expect_closing_angle()?;
                DataType::Array(Box::new(element))
            }
            "MAP" => {
                self.expect(&TokenKind::Lt)?;
                let key = self.parse_data_type()?;
                self.expect(&TokenKind::Comma)?;
                let value = self.parse_data_type()?;
                self.expect_closing_angle()?;
                DataType::Map(Box::new(key), Box::new(value))
            }
            "STRUCT" => {
                self.expect(&TokenKind::Lt)?;
                let mut fields = Vec::new();
                loop {
                    let name = self.parse_identifier()?.value().to_string();
                    self.expect(&TokenKind::Colon)?;
                    let data_type = self.parse_data_type()?;
                    fields.push(StructField { name, data_type });
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect_closing_angle()?;
                DataType::Struct(fields)
            }
            _ => DataType::from_name(&name),
        };
        Ok(data_type)
    }

    /// Consumes `>`, splitting a `>>` token so nested types close one level
    /// at a time.
    fn expect_closing_angle(&mut self) -> Result<(), ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Gt => {
                self.advance();
                Ok(())
            }
            TokenKind::RightShift => {
                let split = token.span.start + 1;
                self.tokens[self.pos] = Token::new(TokenKind::Gt, Span::new(split, token.span.end));
                self.prev_end = split;
                Ok(())
            }
            _ => Err(self.error_expected("'>'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{DataType, Expr, Statement};
    use crate::parser::Parser;
    use crate::ParserConfig;

    fn expr(sql: &str) -> Expr {
        let statement = Parser::new(&format!("SELECT {sql}")).parse_statement().unwrap();
        let Statement::Query(query) = statement else {
            panic!("expected query");
        };
        let select = query.as_select().unwrap();
        select.projection().items()[0].expr().clone()
    }

    #[test]
    fn test_nested_generic_types() {
        let Expr::Cast(cast) = expr("CAST(a AS ARRAY<ARRAY<INT>>)") else {
            panic!("expected cast");
        };
        assert_eq!(
            cast.data_type(),
            &DataType::Array(Box::new(DataType::Array(Box::new(DataType::Int))))
        );
    }

    #[test]
    fn test_double_colon_cast() {
        let e = expr("a::BIGINT + 1");
        assert_eq!(e.to_string(), "a::BIGINT + 1");
    }

    #[test]
    fn test_between_bounds_stop_at_and() {
        let e = expr("a BETWEEN 1 AND 2 AND b");
        let Expr::Binary(binary) = e else {
            panic!("expected AND at the root");
        };
        assert!(matches!(binary.left(), Expr::Between(_)));
    }

    #[test]
    fn test_lambda_argument() {
        let e = expr("array_map((x, y) -> x + y, a, b)");
        let Expr::Function(call) = e else {
            panic!("expected function call");
        };
        assert!(matches!(call.args()[0], Expr::Lambda(_)));
    }

    #[test]
    fn test_window_function() {
        let e = expr("row_number() OVER (PARTITION BY a ORDER BY b ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)");
        assert!(matches!(e, Expr::Window(_)));
        assert_eq!(e.span().start, "SELECT ".len());
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig {
            max_depth: 8,
            ..ParserConfig::default()
        };
        let sql = format!("SELECT {}1{}", "(".repeat(20), ")".repeat(20));
        let err = Parser::with_config(&sql, config).parse_statement().unwrap_err();
        assert!(err.message.contains("nesting"));
    }
}
