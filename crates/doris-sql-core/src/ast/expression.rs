//! Expression nodes.

use core::fmt;
use std::collections::HashSet;

use super::node::{malformed, validated, Child, Children, Node, NodeKind, NodeRef};
use super::{write_separated, DataType, Identifier, Literal, ObjectName, Query, WhenClause, WindowSpec};
use crate::error::ParseError;
use crate::lexer::Span;

/// Operator precedence classes, lowest binding first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// `OR`, `XOR`
    Or,
    /// `AND`
    And,
    /// Prefix `NOT`
    Not,
    /// Comparisons and predicates (`=`, `IS NULL`, `IN`, `BETWEEN`, `LIKE`, `MATCH_*`)
    Comparison,
    /// String concatenation and bitwise operators
    Bitwise,
    /// `+`, `-`
    Additive,
    /// `*`, `/`, `%`, `DIV`
    Multiplicative,
    /// Prefix sign and bitwise NOT
    Sign,
    /// Casts, subscripts, slices and field access
    Postfix,
}

impl Precedence {
    /// Returns the numeric level, 1 for the loosest class.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Not => 3,
            Self::Comparison => 4,
            Self::Bitwise => 5,
            Self::Additive => 6,
            Self::Multiplicative => 7,
            Self::Sign => 8,
            Self::Postfix => 9,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Logical
    Or,
    Xor,
    And,

    // Comparison
    Eq,
    NullSafeEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // String and bitwise
    Concat,
    BitOr,
    BitAnd,
    BitXor,
    LeftShift,
    RightShift,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::NullSafeEq => "<=>",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Concat => "||",
            Self::BitOr => "|",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "%",
        }
    }

    /// Returns the precedence class of the operator.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        match self {
            Self::Or | Self::Xor => Precedence::Or,
            Self::And => Precedence::And,
            Self::Eq
            | Self::NullSafeEq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq => Precedence::Comparison,
            Self::Concat
            | Self::BitOr
            | Self::BitAnd
            | Self::BitXor
            | Self::LeftShift
            | Self::RightShift => Precedence::Bitwise,
            Self::Add | Self::Sub => Precedence::Additive,
            Self::Mul | Self::Div | Self::IntDiv | Self::Mod => Precedence::Multiplicative,
        }
    }

    /// Returns true for `AND`, `OR` and `XOR`.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        matches!(self.precedence(), Precedence::Or | Precedence::And)
    }

    /// Returns true for comparison operators.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(self.precedence(), Precedence::Comparison)
    }

    /// Returns true for `+ - * / DIV %`.
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self.precedence(),
            Precedence::Additive | Precedence::Multiplicative
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical NOT
    Not,
    /// Negation (-)
    Neg,
    /// Unary plus (+)
    Plus,
    /// Bitwise NOT (~)
    BitNot,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Neg => "-",
            Self::Plus => "+",
            Self::BitNot => "~",
        }
    }

    /// Returns the precedence class of the operator.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        match self {
            Self::Not => Precedence::Not,
            Self::Neg | Self::Plus | Self::BitNot => Precedence::Sign,
        }
    }
}

/// Pattern-matching operators. `RLIKE` is a spelling of `REGEXP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeOp {
    /// LIKE
    Like,
    /// REGEXP / RLIKE
    Regexp,
}

impl LikeOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Regexp => "REGEXP",
        }
    }
}

/// Inverted-index full-text predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOp {
    /// MATCH_ANY
    Any,
    /// MATCH_ALL
    All,
    /// MATCH_PHRASE
    Phrase,
    /// MATCH_PHRASE_PREFIX
    PhrasePrefix,
    /// MATCH_PHRASE_EDGE
    PhraseEdge,
    /// MATCH_REGEXP
    Regexp,
}

impl MatchOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "MATCH_ANY",
            Self::All => "MATCH_ALL",
            Self::Phrase => "MATCH_PHRASE",
            Self::PhrasePrefix => "MATCH_PHRASE_PREFIX",
            Self::PhraseEdge => "MATCH_PHRASE_EDGE",
            Self::Regexp => "MATCH_REGEXP",
        }
    }
}

/// How a cast was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastStyle {
    /// `CAST(expr AS type)`
    Function,
    /// `expr::type`
    DoubleColon,
}

/// Units accepted by `INTERVAL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
}

impl IntervalUnit {
    /// Parses a unit name (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "YEAR" => Some(Self::Year),
            "QUARTER" => Some(Self::Quarter),
            "MONTH" => Some(Self::Month),
            "WEEK" => Some(Self::Week),
            "DAY" => Some(Self::Day),
            "HOUR" => Some(Self::Hour),
            "MINUTE" => Some(Self::Minute),
            "SECOND" => Some(Self::Second),
            "MILLISECOND" => Some(Self::Millisecond),
            "MICROSECOND" => Some(Self::Microsecond),
            _ => None,
        }
    }

    /// Returns the SQL representation of the unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Quarter => "QUARTER",
            Self::Month => "MONTH",
            Self::Week => "WEEK",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Millisecond => "MILLISECOND",
            Self::Microsecond => "MICROSECOND",
        }
    }
}

/// A reference to a column, optionally qualified: `t.col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    name: ObjectName,
    span: Span,
}

impl ColumnRef {
    /// Creates a column reference spanning its name.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed name; kept fallible for uniformity.
    pub fn new(name: ObjectName) -> Result<Self, ParseError> {
        let span = name.span();
        validated(Self { name, span })
    }

    /// Returns the (possibly qualified) name.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        &self.name
    }
}

/// `*` or `t.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wildcard {
    qualifier: Option<ObjectName>,
    span: Span,
}

impl Wildcard {
    /// Creates a wildcard.
    ///
    /// # Errors
    ///
    /// Fails if the qualifier lies outside `span`.
    pub fn new(qualifier: Option<ObjectName>, span: Span) -> Result<Self, ParseError> {
        validated(Self { qualifier, span })
    }

    /// Returns the table qualifier, if any.
    #[must_use]
    pub const fn qualifier(&self) -> Option<&ObjectName> {
        self.qualifier.as_ref()
    }
}

/// A positional `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    position: usize,
    span: Span,
}

impl Parameter {
    /// Creates a placeholder.
    ///
    /// # Errors
    ///
    /// Fails if `position` is zero; positions are 1-based.
    pub fn new(position: usize, span: Span) -> Result<Self, ParseError> {
        if position == 0 {
            return malformed(NodeKind::Parameter, "positions start at 1", span);
        }
        validated(Self { position, span })
    }

    /// Returns the 1-based position in the statement.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// `left op right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr {
    left: Box<Expr>,
    op: BinaryOp,
    right: Box<Expr>,
    span: Span,
}

impl BinaryExpr {
    /// Creates a binary expression spanning both operands.
    ///
    /// # Errors
    ///
    /// Fails if the operands are out of source order.
    pub fn new(left: Expr, op: BinaryOp, right: Expr) -> Result<Self, ParseError> {
        let span = left.span().merge(right.span());
        validated(Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
            span,
        })
    }

    /// Returns the left operand.
    #[must_use]
    pub fn left(&self) -> &Expr {
        &self.left
    }

    /// Returns the operator.
    #[must_use]
    pub const fn op(&self) -> BinaryOp {
        self.op
    }

    /// Returns the right operand.
    #[must_use]
    pub fn right(&self) -> &Expr {
        &self.right
    }
}

/// `op operand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryExpr {
    op: UnaryOp,
    operand: Box<Expr>,
    span: Span,
}

impl UnaryExpr {
    /// Creates a unary expression.
    ///
    /// # Errors
    ///
    /// Fails if the operand lies outside `span`.
    pub fn new(op: UnaryOp, operand: Expr, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            op,
            operand: Box::new(operand),
            span,
        })
    }

    /// Returns the operator.
    #[must_use]
    pub const fn op(&self) -> UnaryOp {
        self.op
    }

    /// Returns the operand.
    #[must_use]
    pub fn operand(&self) -> &Expr {
        &self.operand
    }
}

/// `expr IS [NOT] NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsNullExpr {
    expr: Box<Expr>,
    negated: bool,
    span: Span,
}

impl IsNullExpr {
    /// Creates an IS NULL test.
    ///
    /// # Errors
    ///
    /// Fails if the operand lies outside `span`.
    pub fn new(expr: Expr, negated: bool, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            expr: Box::new(expr),
            negated,
            span,
        })
    }

    /// Returns the tested expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns true for `IS NOT NULL`.
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.negated
    }
}

/// `expr [NOT] BETWEEN low AND high`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetweenExpr {
    expr: Box<Expr>,
    negated: bool,
    low: Box<Expr>,
    high: Box<Expr>,
    span: Span,
}

impl BetweenExpr {
    /// Creates a BETWEEN test.
    ///
    /// # Errors
    ///
    /// Fails if the operands are out of order or outside `span`.
    pub fn new(expr: Expr, negated: bool, low: Expr, high: Expr, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            expr: Box::new(expr),
            negated,
            low: Box::new(low),
            high: Box::new(high),
            span,
        })
    }

    /// Returns the tested expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns true for `NOT BETWEEN`.
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.negated
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn low(&self) -> &Expr {
        &self.low
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn high(&self) -> &Expr {
        &self.high
    }
}

/// `expr [NOT] IN (a, b, ...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InListExpr {
    expr: Box<Expr>,
    negated: bool,
    list: Vec<Expr>,
    span: Span,
}

impl InListExpr {
    /// Creates an IN-list test.
    ///
    /// # Errors
    ///
    /// Fails if `list` is empty.
    pub fn new(expr: Expr, negated: bool, list: Vec<Expr>, span: Span) -> Result<Self, ParseError> {
        if list.is_empty() {
            return malformed(NodeKind::InList, "IN list is empty", span);
        }
        validated(Self {
            expr: Box::new(expr),
            negated,
            list,
            span,
        })
    }

    /// Returns the tested expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns true for `NOT IN`.
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.negated
    }

    /// Returns the candidate values.
    #[must_use]
    pub fn list(&self) -> &[Expr] {
        &self.list
    }
}

/// `expr [NOT] IN (SELECT ...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InSubqueryExpr {
    expr: Box<Expr>,
    negated: bool,
    query: Box<Query>,
    span: Span,
}

impl InSubqueryExpr {
    /// Creates an IN-subquery test.
    ///
    /// # Errors
    ///
    /// Fails if the operands are out of order or outside `span`.
    pub fn new(expr: Expr, negated: bool, query: Query, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            expr: Box::new(expr),
            negated,
            query: Box::new(query),
            span,
        })
    }

    /// Returns the tested expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns true for `NOT IN`.
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.negated
    }

    /// Returns the subquery.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }
}

/// `expr [NOT] LIKE|REGEXP pattern`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeExpr {
    expr: Box<Expr>,
    negated: bool,
    op: LikeOp,
    pattern: Box<Expr>,
    span: Span,
}

impl LikeExpr {
    /// Creates a pattern match spanning both operands.
    ///
    /// # Errors
    ///
    /// Fails if the operands are out of source order.
    pub fn new(expr: Expr, negated: bool, op: LikeOp, pattern: Expr) -> Result<Self, ParseError> {
        let span = expr.span().merge(pattern.span());
        validated(Self {
            expr: Box::new(expr),
            negated,
            op,
            pattern: Box::new(pattern),
            span,
        })
    }

    /// Returns the matched expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns true for `NOT LIKE` / `NOT REGEXP`.
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.negated
    }

    /// Returns the operator.
    #[must_use]
    pub const fn op(&self) -> LikeOp {
        self.op
    }

    /// Returns the pattern.
    #[must_use]
    pub fn pattern(&self) -> &Expr {
        &self.pattern
    }
}

/// `column MATCH_* 'terms'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchExpr {
    expr: Box<Expr>,
    op: MatchOp,
    pattern: Box<Expr>,
    span: Span,
}

impl MatchExpr {
    /// Creates a full-text predicate spanning both operands.
    ///
    /// # Errors
    ///
    /// Fails if the operands are out of source order.
    pub fn new(expr: Expr, op: MatchOp, pattern: Expr) -> Result<Self, ParseError> {
        let span = expr.span().merge(pattern.span());
        validated(Self {
            expr: Box::new(expr),
            op,
            pattern: Box::new(pattern),
            span,
        })
    }

    /// Returns the searched expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the operator.
    #[must_use]
    pub const fn op(&self) -> MatchOp {
        self.op
    }

    /// Returns the search terms.
    #[must_use]
    pub fn pattern(&self) -> &Expr {
        &self.pattern
    }
}

/// `EXISTS (SELECT ...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsExpr {
    query: Box<Query>,
    span: Span,
}

impl ExistsExpr {
    /// Creates an EXISTS test.
    ///
    /// # Errors
    ///
    /// Fails if the subquery lies outside `span`.
    pub fn new(query: Query, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            query: Box::new(query),
            span,
        })
    }

    /// Returns the subquery.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }
}

/// A parenthesized scalar subquery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubqueryExpr {
    query: Box<Query>,
    span: Span,
}

impl SubqueryExpr {
    /// Creates a scalar subquery.
    ///
    /// # Errors
    ///
    /// Fails if the subquery lies outside `span`.
    pub fn new(query: Query, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            query: Box::new(query),
            span,
        })
    }

    /// Returns the subquery.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }
}

/// `name([DISTINCT] args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    name: ObjectName,
    distinct: bool,
    args: Vec<Expr>,
    span: Span,
}

impl FunctionCall {
    /// Creates a function call.
    ///
    /// # Errors
    ///
    /// Fails if `DISTINCT` has no argument to apply to.
    pub fn new(name: ObjectName, distinct: bool, args: Vec<Expr>, span: Span) -> Result<Self, ParseError> {
        if distinct && args.is_empty() {
            return malformed(NodeKind::FunctionCall, "DISTINCT without arguments", span);
        }
        validated(Self {
            name,
            distinct,
            args,
            span,
        })
    }

    /// Returns the function name.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        &self.name
    }

    /// Returns true for `f(DISTINCT ...)`.
    #[must_use]
    pub const fn distinct(&self) -> bool {
        self.distinct
    }

    /// Returns the arguments.
    #[must_use]
    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

/// `function(...) OVER (window)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowExpr {
    function: FunctionCall,
    window: WindowSpec,
    span: Span,
}

impl WindowExpr {
    /// Creates a window function application.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(function: FunctionCall, window: WindowSpec, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            function,
            window,
            span,
        })
    }

    /// Returns the applied function.
    #[must_use]
    pub const fn function(&self) -> &FunctionCall {
        &self.function
    }

    /// Returns the window specification.
    #[must_use]
    pub const fn window(&self) -> &WindowSpec {
        &self.window
    }
}

/// `CAST(expr AS type)` or `expr::type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastExpr {
    expr: Box<Expr>,
    data_type: DataType,
    style: CastStyle,
    span: Span,
}

impl CastExpr {
    /// Creates a cast.
    ///
    /// # Errors
    ///
    /// Fails if the operand lies outside `span`.
    pub fn new(expr: Expr, data_type: DataType, style: CastStyle, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            expr: Box::new(expr),
            data_type,
            style,
            span,
        })
    }

    /// Returns the cast operand.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the target type.
    #[must_use]
    pub const fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Returns how the cast was spelled.
    #[must_use]
    pub const fn style(&self) -> CastStyle {
        self.style
    }
}

/// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseExpr {
    operand: Option<Box<Expr>>,
    branches: Vec<WhenClause>,
    else_result: Option<Box<Expr>>,
    span: Span,
}

impl CaseExpr {
    /// Creates a CASE expression.
    ///
    /// # Errors
    ///
    /// Fails if there is no WHEN branch.
    pub fn new(
        operand: Option<Expr>,
        branches: Vec<WhenClause>,
        else_result: Option<Expr>,
        span: Span,
    ) -> Result<Self, ParseError> {
        if branches.is_empty() {
            return malformed(NodeKind::Case, "CASE needs at least one WHEN branch", span);
        }
        validated(Self {
            operand: operand.map(Box::new),
            branches,
            else_result: else_result.map(Box::new),
            span,
        })
    }

    /// Returns the operand of a simple CASE.
    #[must_use]
    pub fn operand(&self) -> Option<&Expr> {
        self.operand.as_deref()
    }

    /// Returns the WHEN branches.
    #[must_use]
    pub fn branches(&self) -> &[WhenClause] {
        &self.branches
    }

    /// Returns the ELSE result.
    #[must_use]
    pub fn else_result(&self) -> Option<&Expr> {
        self.else_result.as_deref()
    }
}

/// `INTERVAL value unit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalExpr {
    value: Box<Expr>,
    unit: IntervalUnit,
    span: Span,
}

impl IntervalExpr {
    /// Creates an interval.
    ///
    /// # Errors
    ///
    /// Fails if the value lies outside `span`.
    pub fn new(value: Expr, unit: IntervalUnit, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            value: Box::new(value),
            unit,
            span,
        })
    }

    /// Returns the interval length.
    #[must_use]
    pub fn value(&self) -> &Expr {
        &self.value
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(&self) -> IntervalUnit {
        self.unit
    }
}

/// `[a, b, c]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayExpr {
    elements: Vec<Expr>,
    span: Span,
}

impl ArrayExpr {
    /// Creates an array literal.
    ///
    /// # Errors
    ///
    /// Fails if the elements are out of order or outside `span`.
    pub fn new(elements: Vec<Expr>, span: Span) -> Result<Self, ParseError> {
        validated(Self { elements, span })
    }

    /// Returns the elements.
    #[must_use]
    pub fn elements(&self) -> &[Expr] {
        &self.elements
    }
}

/// `{k1: v1, k2: v2}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapExpr {
    entries: Vec<(Expr, Expr)>,
    span: Span,
}

impl MapExpr {
    /// Creates a map literal.
    ///
    /// # Errors
    ///
    /// Fails if the entries are out of order or outside `span`.
    pub fn new(entries: Vec<(Expr, Expr)>, span: Span) -> Result<Self, ParseError> {
        validated(Self { entries, span })
    }

    /// Returns the key/value pairs.
    #[must_use]
    pub fn entries(&self) -> &[(Expr, Expr)] {
        &self.entries
    }
}

/// `{a, b, c}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructExpr {
    fields: Vec<Expr>,
    span: Span,
}

impl StructExpr {
    /// Creates a struct literal.
    ///
    /// # Errors
    ///
    /// Fails if there are no fields.
    pub fn new(fields: Vec<Expr>, span: Span) -> Result<Self, ParseError> {
        if fields.is_empty() {
            return malformed(NodeKind::Struct, "struct literal has no fields", span);
        }
        validated(Self { fields, span })
    }

    /// Returns the field values.
    #[must_use]
    pub fn fields(&self) -> &[Expr] {
        &self.fields
    }
}

/// `x -> body` or `(x, y) -> body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaExpr {
    params: Vec<Identifier>,
    body: Box<Expr>,
    span: Span,
}

impl LambdaExpr {
    /// Creates a lambda.
    ///
    /// # Errors
    ///
    /// Fails if there are no parameters or a parameter name repeats.
    pub fn new(params: Vec<Identifier>, body: Expr, span: Span) -> Result<Self, ParseError> {
        if params.is_empty() {
            return malformed(NodeKind::Lambda, "lambda has no parameters", span);
        }
        let mut seen = HashSet::new();
        for param in &params {
            if !seen.insert(param.value().to_ascii_lowercase()) {
                return malformed(
                    NodeKind::Lambda,
                    format!("parameter '{}' is declared twice", param.value()),
                    param.span(),
                );
            }
        }
        validated(Self {
            params,
            body: Box::new(body),
            span,
        })
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &[Identifier] {
        &self.params
    }

    /// Returns the body.
    #[must_use]
    pub fn body(&self) -> &Expr {
        &self.body
    }

    /// Returns true if `name` is bound by this lambda.
    #[must_use]
    pub fn binds(&self, name: &str) -> bool {
        self.params
            .iter()
            .any(|param| param.value().eq_ignore_ascii_case(name))
    }
}

/// `expr[index]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementAtExpr {
    expr: Box<Expr>,
    index: Box<Expr>,
    span: Span,
}

impl ElementAtExpr {
    /// Creates a subscript.
    ///
    /// # Errors
    ///
    /// Fails if the operands are out of order or outside `span`.
    pub fn new(expr: Expr, index: Expr, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            expr: Box::new(expr),
            index: Box::new(index),
            span,
        })
    }

    /// Returns the subscripted expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the subscript.
    #[must_use]
    pub fn index(&self) -> &Expr {
        &self.index
    }
}

/// `expr[start:end]`, either bound optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySliceExpr {
    expr: Box<Expr>,
    start: Option<Box<Expr>>,
    end: Option<Box<Expr>>,
    span: Span,
}

impl ArraySliceExpr {
    /// Creates a slice.
    ///
    /// # Errors
    ///
    /// Fails if the operands are out of order or outside `span`.
    pub fn new(expr: Expr, start: Option<Expr>, end: Option<Expr>, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            expr: Box::new(expr),
            start: start.map(Box::new),
            end: end.map(Box::new),
            span,
        })
    }

    /// Returns the sliced expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the start bound.
    #[must_use]
    pub fn start(&self) -> Option<&Expr> {
        self.start.as_deref()
    }

    /// Returns the end bound.
    #[must_use]
    pub fn end(&self) -> Option<&Expr> {
        self.end.as_deref()
    }
}

/// `expr.field` on a struct-valued expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DereferenceExpr {
    expr: Box<Expr>,
    field: Identifier,
    span: Span,
}

impl DereferenceExpr {
    /// Creates a field access spanning the expression and the field.
    ///
    /// # Errors
    ///
    /// Fails if the field precedes the expression.
    pub fn new(expr: Expr, field: Identifier) -> Result<Self, ParseError> {
        let span = expr.span().merge(field.span());
        validated(Self {
            expr: Box::new(expr),
            field,
            span,
        })
    }

    /// Returns the struct-valued expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the field name.
    #[must_use]
    pub const fn field(&self) -> &Identifier {
        &self.field
    }
}

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedExpr {
    expr: Box<Expr>,
    span: Span,
}

impl NestedExpr {
    /// Creates a parenthesized expression; `span` includes the parentheses.
    ///
    /// # Errors
    ///
    /// Fails if the inner expression lies outside `span`.
    pub fn new(expr: Expr, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            expr: Box::new(expr),
            span,
        })
    }

    /// Returns the inner expression.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

/// Any value expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Column reference.
    Column(ColumnRef),
    /// `*` or `t.*`.
    Wildcard(Wildcard),
    /// `?` placeholder.
    Parameter(Parameter),
    /// Literal value.
    Literal(Literal),
    /// Binary operation.
    Binary(BinaryExpr),
    /// Unary operation.
    Unary(UnaryExpr),
    /// IS [NOT] NULL.
    IsNull(IsNullExpr),
    /// [NOT] BETWEEN.
    Between(BetweenExpr),
    /// [NOT] IN (list).
    InList(InListExpr),
    /// [NOT] IN (subquery).
    InSubquery(InSubqueryExpr),
    /// [NOT] LIKE / REGEXP.
    Like(LikeExpr),
    /// MATCH_* predicate.
    Match(MatchExpr),
    /// EXISTS (subquery).
    Exists(ExistsExpr),
    /// Scalar subquery.
    Subquery(SubqueryExpr),
    /// Function call.
    Function(FunctionCall),
    /// Window function application.
    Window(WindowExpr),
    /// Cast.
    Cast(CastExpr),
    /// CASE expression.
    Case(CaseExpr),
    /// INTERVAL.
    Interval(IntervalExpr),
    /// Array literal.
    Array(ArrayExpr),
    /// Map literal.
    Map(MapExpr),
    /// Struct literal.
    Struct(StructExpr),
    /// Lambda.
    Lambda(LambdaExpr),
    /// Subscript.
    ElementAt(ElementAtExpr),
    /// Slice.
    ArraySlice(ArraySliceExpr),
    /// Struct field access.
    Dereference(DereferenceExpr),
    /// Parenthesized expression.
    Nested(NestedExpr),
}

impl Expr {
    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        NodeRef::from(self).span()
    }

    /// Returns the kind of the underlying node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        NodeRef::from(self).kind()
    }

    /// Returns the column reference if this is one.
    #[must_use]
    pub const fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }

    /// Strips any number of enclosing parentheses.
    #[must_use]
    pub fn unnested(&self) -> &Self {
        let mut expr = self;
        while let Self::Nested(nested) = expr {
            expr = nested.expr();
        }
        expr
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Column(node) => node.into(),
            Expr::Wildcard(node) => node.into(),
            Expr::Parameter(node) => node.into(),
            Expr::Literal(node) => node.into(),
            Expr::Binary(node) => node.into(),
            Expr::Unary(node) => node.into(),
            Expr::IsNull(node) => node.into(),
            Expr::Between(node) => node.into(),
            Expr::InList(node) => node.into(),
            Expr::InSubquery(node) => node.into(),
            Expr::Like(node) => node.into(),
            Expr::Match(node) => node.into(),
            Expr::Exists(node) => node.into(),
            Expr::Subquery(node) => node.into(),
            Expr::Function(node) => node.into(),
            Expr::Window(node) => node.into(),
            Expr::Cast(node) => node.into(),
            Expr::Case(node) => node.into(),
            Expr::Interval(node) => node.into(),
            Expr::Array(node) => node.into(),
            Expr::Map(node) => node.into(),
            Expr::Struct(node) => node.into(),
            Expr::Lambda(node) => node.into(),
            Expr::ElementAt(node) => node.into(),
            Expr::ArraySlice(node) => node.into(),
            Expr::Dereference(node) => node.into(),
            Expr::Nested(node) => node.into(),
        }
    }
}

impl Node for ColumnRef {
    const KIND: NodeKind = NodeKind::ColumnRef;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("name", &self.name).finish()
    }
}

impl Node for Wildcard {
    const KIND: NodeKind = NodeKind::Wildcard;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .opt("qualifier", self.qualifier.as_ref())
            .finish()
    }
}

impl Node for Parameter {
    const KIND: NodeKind = NodeKind::Parameter;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Vec::new()
    }
}

impl Node for BinaryExpr {
    const KIND: NodeKind = NodeKind::Binary;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("left", &*self.left)
            .one("right", &*self.right)
            .finish()
    }
}

impl Node for UnaryExpr {
    const KIND: NodeKind = NodeKind::Unary;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("operand", &*self.operand).finish()
    }
}

impl Node for IsNullExpr {
    const KIND: NodeKind = NodeKind::IsNull;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("operand", &*self.expr).finish()
    }
}

impl Node for BetweenExpr {
    const KIND: NodeKind = NodeKind::Between;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("operand", &*self.expr)
            .one("low", &*self.low)
            .one("high", &*self.high)
            .finish()
    }
}

impl Node for InListExpr {
    const KIND: NodeKind = NodeKind::InList;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("operand", &*self.expr)
            .many("item", &self.list)
            .finish()
    }
}

impl Node for InSubqueryExpr {
    const KIND: NodeKind = NodeKind::InSubquery;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("operand", &*self.expr)
            .one("query", &*self.query)
            .finish()
    }
}

impl Node for LikeExpr {
    const KIND: NodeKind = NodeKind::Like;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("operand", &*self.expr)
            .one("pattern", &*self.pattern)
            .finish()
    }
}

impl Node for MatchExpr {
    const KIND: NodeKind = NodeKind::Match;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("operand", &*self.expr)
            .one("pattern", &*self.pattern)
            .finish()
    }
}

impl Node for ExistsExpr {
    const KIND: NodeKind = NodeKind::Exists;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("query", &*self.query).finish()
    }
}

impl Node for SubqueryExpr {
    const KIND: NodeKind = NodeKind::Subquery;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("query", &*self.query).finish()
    }
}

impl Node for FunctionCall {
    const KIND: NodeKind = NodeKind::FunctionCall;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .many("argument", &self.args)
            .finish()
    }
}

impl Node for WindowExpr {
    const KIND: NodeKind = NodeKind::Window;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("function", &self.function)
            .one("window", &self.window)
            .finish()
    }
}

impl Node for CastExpr {
    const KIND: NodeKind = NodeKind::Cast;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("operand", &*self.expr).finish()
    }
}

impl Node for CaseExpr {
    const KIND: NodeKind = NodeKind::Case;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .opt("operand", self.operand.as_deref())
            .many("branch", &self.branches)
            .opt("else", self.else_result.as_deref())
            .finish()
    }
}

impl Node for IntervalExpr {
    const KIND: NodeKind = NodeKind::Interval;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("value", &*self.value).finish()
    }
}

impl Node for ArrayExpr {
    const KIND: NodeKind = NodeKind::Array;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("element", &self.elements).finish()
    }
}

impl Node for MapExpr {
    const KIND: NodeKind = NodeKind::Map;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        let mut children = Children::new();
        for (key, value) in &self.entries {
            children = children.one("key", key).one("value", value);
        }
        children.finish()
    }
}

impl Node for StructExpr {
    const KIND: NodeKind = NodeKind::Struct;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("field", &self.fields).finish()
    }
}

impl Node for LambdaExpr {
    const KIND: NodeKind = NodeKind::Lambda;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .many("parameter", &self.params)
            .one("body", &*self.body)
            .finish()
    }
}

impl Node for ElementAtExpr {
    const KIND: NodeKind = NodeKind::ElementAt;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("operand", &*self.expr)
            .one("index", &*self.index)
            .finish()
    }
}

impl Node for ArraySliceExpr {
    const KIND: NodeKind = NodeKind::ArraySlice;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("operand", &*self.expr)
            .opt("start", self.start.as_deref())
            .opt("end", self.end.as_deref())
            .finish()
    }
}

impl Node for DereferenceExpr {
    const KIND: NodeKind = NodeKind::Dereference;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("operand", &*self.expr)
            .one("field", &self.field)
            .finish()
    }
}

impl Node for NestedExpr {
    const KIND: NodeKind = NodeKind::Nested;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("inner", &*self.expr).finish()
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{qualifier}.*"),
            None => f.write_str("*"),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("?")
    }
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

impl fmt::Display for UnaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            UnaryOp::Not => write!(f, "NOT {}", self.operand),
            op => {
                let operand = self.operand.to_string();
                // keep "- -x" from turning into a line comment
                let separator = if operand.starts_with(['-', '+']) { " " } else { "" };
                write!(f, "{op}{separator}{operand}")
            }
        }
    }
}

const fn not_prefix(negated: bool) -> &'static str {
    if negated {
        "NOT "
    } else {
        ""
    }
}

impl fmt::Display for IsNullExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IS {}NULL", self.expr, not_prefix(self.negated))
    }
}

impl fmt::Display for BetweenExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}BETWEEN {} AND {}",
            self.expr,
            not_prefix(self.negated),
            self.low,
            self.high
        )
    }
}

impl fmt::Display for InListExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}IN (", self.expr, not_prefix(self.negated))?;
        write_separated(f, &self.list, ", ")?;
        f.write_str(")")
    }
}

impl fmt::Display for InSubqueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}IN ({})", self.expr, not_prefix(self.negated), self.query)
    }
}

impl fmt::Display for LikeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} {}",
            self.expr,
            not_prefix(self.negated),
            self.op.as_str(),
            self.pattern
        )
    }
}

impl fmt::Display for MatchExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.expr, self.op.as_str(), self.pattern)
    }
}

impl fmt::Display for ExistsExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EXISTS ({})", self.query)
    }
}

impl fmt::Display for SubqueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.query)
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write_separated(f, &self.args, ", ")?;
        f.write_str(")")
    }
}

impl fmt::Display for WindowExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} OVER {}", self.function, self.window)
    }
}

impl fmt::Display for CastExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            CastStyle::Function => write!(f, "CAST({} AS {})", self.expr, self.data_type),
            CastStyle::DoubleColon => write!(f, "{}::{}", self.expr, self.data_type),
        }
    }
}

impl fmt::Display for CaseExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(operand) = &self.operand {
            write!(f, " {operand}")?;
        }
        for branch in &self.branches {
            write!(f, " {branch}")?;
        }
        if let Some(else_result) = &self.else_result {
            write!(f, " ELSE {else_result}")?;
        }
        f.write_str(" END")
    }
}

impl fmt::Display for IntervalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INTERVAL {} {}", self.value, self.unit.as_str())
    }
}

impl fmt::Display for ArrayExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_separated(f, &self.elements, ", ")?;
        f.write_str("]")
    }
}

impl fmt::Display for MapExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for StructExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_separated(f, &self.fields, ", ")?;
        f.write_str("}")
    }
}

impl fmt::Display for LambdaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [param] = self.params.as_slice() {
            write!(f, "{param} -> {}", self.body)
        } else {
            f.write_str("(")?;
            write_separated(f, &self.params, ", ")?;
            write!(f, ") -> {}", self.body)
        }
    }
}

impl fmt::Display for ElementAtExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.expr, self.index)
    }
}

impl fmt::Display for ArraySliceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.expr)?;
        if let Some(start) = &self.start {
            write!(f, "{start}")?;
        }
        f.write_str(":")?;
        if let Some(end) = &self.end {
            write!(f, "{end}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for DereferenceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.expr, self.field)
    }
}

impl fmt::Display for NestedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(e) => e.fmt(f),
            Self::Wildcard(e) => e.fmt(f),
            Self::Parameter(e) => e.fmt(f),
            Self::Literal(e) => e.fmt(f),
            Self::Binary(e) => e.fmt(f),
            Self::Unary(e) => e.fmt(f),
            Self::IsNull(e) => e.fmt(f),
            Self::Between(e) => e.fmt(f),
            Self::InList(e) => e.fmt(f),
            Self::InSubquery(e) => e.fmt(f),
            Self::Like(e) => e.fmt(f),
            Self::Match(e) => e.fmt(f),
            Self::Exists(e) => e.fmt(f),
            Self::Subquery(e) => e.fmt(f),
            Self::Function(e) => e.fmt(f),
            Self::Window(e) => e.fmt(f),
            Self::Cast(e) => e.fmt(f),
            Self::Case(e) => e.fmt(f),
            Self::Interval(e) => e.fmt(f),
            Self::Array(e) => e.fmt(f),
            Self::Map(e) => e.fmt(f),
            Self::Struct(e) => e.fmt(f),
            Self::Lambda(e) => e.fmt(f),
            Self::ElementAt(e) => e.fmt(f),
            Self::ArraySlice(e) => e.fmt(f),
            Self::Dereference(e) => e.fmt(f),
            Self::Nested(e) => e.fmt(f),
        }
    }
}
