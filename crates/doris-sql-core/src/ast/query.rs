//! Query nodes: SELECT, set operations, CTEs and the FROM tree.

use core::fmt;
use std::collections::HashSet;

use super::node::{malformed, validated, Child, Children, Node, NodeKind, NodeRef};
use super::{write_separated, Expr, FunctionCall, Identifier, ObjectName, PartitionSpec};
use crate::error::ParseError;
use crate::lexer::Span;

/// A complete query: `[WITH ...] body [ORDER BY ...] [LIMIT ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    with: Option<With>,
    body: QueryBody,
    order_by: Option<OrderByClause>,
    limit: Option<LimitClause>,
    span: Span,
}

impl Query {
    /// Creates a query.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        with: Option<With>,
        body: QueryBody,
        order_by: Option<OrderByClause>,
        limit: Option<LimitClause>,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            with,
            body,
            order_by,
            limit,
            span,
        })
    }

    /// Returns the WITH clause.
    #[must_use]
    pub const fn with(&self) -> Option<&With> {
        self.with.as_ref()
    }

    /// Returns the query body.
    #[must_use]
    pub const fn body(&self) -> &QueryBody {
        &self.body
    }

    /// Returns the ORDER BY clause.
    #[must_use]
    pub const fn order_by(&self) -> Option<&OrderByClause> {
        self.order_by.as_ref()
    }

    /// Returns the LIMIT clause.
    #[must_use]
    pub const fn limit(&self) -> Option<&LimitClause> {
        self.limit.as_ref()
    }

    /// Returns the SELECT if the body is a single, unparenthesized one.
    #[must_use]
    pub fn as_select(&self) -> Option<&Select> {
        match &self.body {
            QueryBody::Select(select) => Some(select),
            _ => None,
        }
    }
}

/// The body of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryBody {
    /// A single SELECT.
    Select(Box<Select>),
    /// `left UNION|INTERSECT|EXCEPT right`.
    SetOperation(Box<SetOperation>),
    /// A parenthesized query.
    Nested(Box<Query>),
}

impl QueryBody {
    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        NodeRef::from(self).span()
    }
}

impl<'a> From<&'a QueryBody> for NodeRef<'a> {
    fn from(body: &'a QueryBody) -> Self {
        match body {
            QueryBody::Select(node) => (&**node).into(),
            QueryBody::SetOperation(node) => (&**node).into(),
            QueryBody::Nested(node) => (&**node).into(),
        }
    }
}

/// `SELECT [DISTINCT] items [FROM ...] [WHERE ...] [GROUP BY ...] [HAVING ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    distinct: bool,
    projection: SelectList,
    from: Option<FromClause>,
    selection: Option<WhereClause>,
    group_by: Option<GroupByClause>,
    having: Option<HavingClause>,
    span: Span,
}

impl Select {
    /// Creates a SELECT.
    ///
    /// # Errors
    ///
    /// Fails if the clauses are out of order or outside `span`.
    pub fn new(
        distinct: bool,
        projection: SelectList,
        from: Option<FromClause>,
        selection: Option<WhereClause>,
        group_by: Option<GroupByClause>,
        having: Option<HavingClause>,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            distinct,
            projection,
            from,
            selection,
            group_by,
            having,
            span,
        })
    }

    /// Returns true for `SELECT DISTINCT`.
    #[must_use]
    pub const fn distinct(&self) -> bool {
        self.distinct
    }

    /// Returns the select list.
    #[must_use]
    pub const fn projection(&self) -> &SelectList {
        &self.projection
    }

    /// Returns the FROM clause.
    #[must_use]
    pub const fn from(&self) -> Option<&FromClause> {
        self.from.as_ref()
    }

    /// Returns the WHERE clause.
    #[must_use]
    pub const fn selection(&self) -> Option<&WhereClause> {
        self.selection.as_ref()
    }

    /// Returns the GROUP BY clause.
    #[must_use]
    pub const fn group_by(&self) -> Option<&GroupByClause> {
        self.group_by.as_ref()
    }

    /// Returns the HAVING clause.
    #[must_use]
    pub const fn having(&self) -> Option<&HavingClause> {
        self.having.as_ref()
    }
}

/// Set operators. `MINUS` is a spelling of `EXCEPT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl SetOperator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// `ALL` or `DISTINCT` after a set operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetQuantifier {
    /// No quantifier written.
    None,
    All,
    Distinct,
}

/// `left op [ALL|DISTINCT] right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOperation {
    op: SetOperator,
    quantifier: SetQuantifier,
    left: QueryBody,
    right: QueryBody,
    span: Span,
}

impl SetOperation {
    /// Creates a set operation spanning both operands.
    ///
    /// # Errors
    ///
    /// Fails if the operands are out of source order.
    pub fn new(
        op: SetOperator,
        quantifier: SetQuantifier,
        left: QueryBody,
        right: QueryBody,
    ) -> Result<Self, ParseError> {
        let span = left.span().merge(right.span());
        validated(Self {
            op,
            quantifier,
            left,
            right,
            span,
        })
    }

    /// Returns the operator.
    #[must_use]
    pub const fn op(&self) -> SetOperator {
        self.op
    }

    /// Returns the quantifier.
    #[must_use]
    pub const fn quantifier(&self) -> SetQuantifier {
        self.quantifier
    }

    /// Returns the left operand.
    #[must_use]
    pub const fn left(&self) -> &QueryBody {
        &self.left
    }

    /// Returns the right operand.
    #[must_use]
    pub const fn right(&self) -> &QueryBody {
        &self.right
    }
}

/// `WITH [RECURSIVE] name AS (...), ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct With {
    recursive: bool,
    ctes: Vec<Cte>,
    span: Span,
}

impl With {
    /// Creates a WITH clause.
    ///
    /// # Errors
    ///
    /// Fails if there are no CTEs or two share a name.
    pub fn new(recursive: bool, ctes: Vec<Cte>, span: Span) -> Result<Self, ParseError> {
        if ctes.is_empty() {
            return malformed(NodeKind::With, "WITH has no common table expressions", span);
        }
        let mut names = HashSet::new();
        for cte in &ctes {
            if !names.insert(cte.name.value().to_ascii_lowercase()) {
                return malformed(
                    NodeKind::With,
                    format!("'{}' is defined twice", cte.name.value()),
                    cte.name.span(),
                );
            }
        }
        validated(Self {
            recursive,
            ctes,
            span,
        })
    }

    /// Returns true for `WITH RECURSIVE`.
    #[must_use]
    pub const fn recursive(&self) -> bool {
        self.recursive
    }

    /// Returns the CTEs in declaration order.
    #[must_use]
    pub fn ctes(&self) -> &[Cte] {
        &self.ctes
    }

    /// Returns true if `name` is one of the CTE names.
    #[must_use]
    pub fn defines(&self, name: &str) -> bool {
        self.ctes
            .iter()
            .any(|cte| cte.name.value().eq_ignore_ascii_case(name))
    }
}

/// `name [(columns)] AS (query)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cte {
    name: Identifier,
    columns: Vec<Identifier>,
    query: Query,
    span: Span,
}

impl Cte {
    /// Creates a CTE.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        name: Identifier,
        columns: Vec<Identifier>,
        query: Query,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            name,
            columns,
            query,
            span,
        })
    }

    /// Returns the CTE name.
    #[must_use]
    pub const fn name(&self) -> &Identifier {
        &self.name
    }

    /// Returns the declared column names.
    #[must_use]
    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }

    /// Returns the defining query.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }
}

/// The items between SELECT and FROM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectList {
    items: Vec<SelectItem>,
    span: Span,
}

impl SelectList {
    /// Creates a select list spanning its items.
    ///
    /// # Errors
    ///
    /// Fails if `items` is empty.
    pub fn new(items: Vec<SelectItem>) -> Result<Self, ParseError> {
        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            return malformed(NodeKind::SelectList, "select list is empty", Span::default());
        };
        let span = first.span.merge(last.span);
        validated(Self { items, span })
    }

    /// Returns the items.
    #[must_use]
    pub fn items(&self) -> &[SelectItem] {
        &self.items
    }
}

/// `expr [[AS] alias]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    expr: Expr,
    alias: Option<Identifier>,
    span: Span,
}

impl SelectItem {
    /// Creates a select item spanning the expression and alias.
    ///
    /// # Errors
    ///
    /// Fails if the alias precedes the expression, or aliases a wildcard.
    pub fn new(expr: Expr, alias: Option<Identifier>) -> Result<Self, ParseError> {
        let span = alias
            .as_ref()
            .map_or(expr.span(), |alias| expr.span().merge(alias.span()));
        if alias.is_some() && matches!(expr, Expr::Wildcard(_)) {
            return malformed(NodeKind::SelectItem, "a wildcard cannot be aliased", span);
        }
        validated(Self { expr, alias, span })
    }

    /// Returns the expression.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the alias.
    #[must_use]
    pub const fn alias(&self) -> Option<&Identifier> {
        self.alias.as_ref()
    }
}

/// `FROM relation, relation, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromClause {
    relations: Vec<Relation>,
    span: Span,
}

impl FromClause {
    /// Creates a FROM clause.
    ///
    /// # Errors
    ///
    /// Fails if `relations` is empty.
    pub fn new(relations: Vec<Relation>, span: Span) -> Result<Self, ParseError> {
        if relations.is_empty() {
            return malformed(NodeKind::From, "FROM has no relations", span);
        }
        validated(Self { relations, span })
    }

    /// Returns the comma-separated relations.
    #[must_use]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }
}

/// A table factor followed by its joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    factor: TableFactor,
    joins: Vec<Join>,
    span: Span,
}

impl Relation {
    /// Creates a relation spanning the factor and its joins.
    ///
    /// # Errors
    ///
    /// Fails if the joins are out of order.
    pub fn new(factor: TableFactor, joins: Vec<Join>) -> Result<Self, ParseError> {
        let span = joins
            .last()
            .map_or(factor.span(), |join| factor.span().merge(join.span));
        validated(Self {
            factor,
            joins,
            span,
        })
    }

    /// Returns the leading table factor.
    #[must_use]
    pub const fn factor(&self) -> &TableFactor {
        &self.factor
    }

    /// Returns the joins in source order.
    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }
}

/// A named table or a derived table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableFactor {
    /// `db.table [PARTITION ...] [alias]`.
    Named(NamedTable),
    /// `(query) alias`.
    Derived(DerivedTable),
}

impl TableFactor {
    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        NodeRef::from(self).span()
    }

    /// Returns the alias, if any.
    #[must_use]
    pub const fn alias(&self) -> Option<&Identifier> {
        match self {
            Self::Named(table) => table.alias.as_ref(),
            Self::Derived(table) => table.alias.as_ref(),
        }
    }
}

impl<'a> From<&'a TableFactor> for NodeRef<'a> {
    fn from(factor: &'a TableFactor) -> Self {
        match factor {
            TableFactor::Named(node) => node.into(),
            TableFactor::Derived(node) => node.into(),
        }
    }
}

/// A table named in FROM or JOIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTable {
    name: ObjectName,
    partition: Option<PartitionSpec>,
    alias: Option<Identifier>,
    lateral_views: Vec<LateralView>,
    span: Span,
}

impl NamedTable {
    /// Creates a table reference.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        name: ObjectName,
        partition: Option<PartitionSpec>,
        alias: Option<Identifier>,
        lateral_views: Vec<LateralView>,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            name,
            partition,
            alias,
            lateral_views,
            span,
        })
    }

    /// Returns the table name.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        &self.name
    }

    /// Returns the partition selection.
    #[must_use]
    pub const fn partition(&self) -> Option<&PartitionSpec> {
        self.partition.as_ref()
    }

    /// Returns the alias.
    #[must_use]
    pub const fn alias(&self) -> Option<&Identifier> {
        self.alias.as_ref()
    }

    /// Returns the attached lateral views.
    #[must_use]
    pub fn lateral_views(&self) -> &[LateralView] {
        &self.lateral_views
    }
}

/// A parenthesized query used as a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedTable {
    query: Query,
    alias: Option<Identifier>,
    lateral_views: Vec<LateralView>,
    span: Span,
}

impl DerivedTable {
    /// Creates a derived table.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        query: Query,
        alias: Option<Identifier>,
        lateral_views: Vec<LateralView>,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            query,
            alias,
            lateral_views,
            span,
        })
    }

    /// Returns the subquery.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the alias.
    #[must_use]
    pub const fn alias(&self) -> Option<&Identifier> {
        self.alias.as_ref()
    }

    /// Returns the attached lateral views.
    #[must_use]
    pub fn lateral_views(&self) -> &[LateralView] {
        &self.lateral_views
    }
}

/// Join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
    LeftSemi,
    RightSemi,
    LeftAnti,
    RightAnti,
}

impl JoinType {
    /// Returns the SQL keywords.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
            Self::RightOuter => "RIGHT OUTER JOIN",
            Self::FullOuter => "FULL OUTER JOIN",
            Self::Cross => "CROSS JOIN",
            Self::LeftSemi => "LEFT SEMI JOIN",
            Self::RightSemi => "RIGHT SEMI JOIN",
            Self::LeftAnti => "LEFT ANTI JOIN",
            Self::RightAnti => "RIGHT ANTI JOIN",
        }
    }

    /// Returns true if the join type needs ON or USING.
    #[must_use]
    pub const fn requires_criteria(&self) -> bool {
        !matches!(self, Self::Inner | Self::Cross)
    }
}

/// How joined rows are matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinCriteria {
    /// `ON condition`
    On(Expr),
    /// `USING (a, b)`
    Using(Vec<Identifier>),
}

/// `join_type factor [ON ... | USING (...)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    join_type: JoinType,
    factor: TableFactor,
    criteria: Option<JoinCriteria>,
    span: Span,
}

impl Join {
    /// Creates a join.
    ///
    /// # Errors
    ///
    /// Fails if a CROSS join has criteria, an outer, semi or anti join lacks
    /// them, or USING names no column.
    pub fn new(
        join_type: JoinType,
        factor: TableFactor,
        criteria: Option<JoinCriteria>,
        span: Span,
    ) -> Result<Self, ParseError> {
        match (&criteria, join_type) {
            (Some(_), JoinType::Cross) => {
                return malformed(NodeKind::Join, "CROSS JOIN cannot have ON or USING", span);
            }
            (None, join_type) if join_type.requires_criteria() => {
                return malformed(
                    NodeKind::Join,
                    format!("{} requires ON or USING", join_type.as_str()),
                    span,
                );
            }
            (Some(JoinCriteria::Using(columns)), _) if columns.is_empty() => {
                return malformed(NodeKind::Join, "USING names no columns", span);
            }
            _ => {}
        }
        validated(Self {
            join_type,
            factor,
            criteria,
            span,
        })
    }

    /// Returns the join type.
    #[must_use]
    pub const fn join_type(&self) -> JoinType {
        self.join_type
    }

    /// Returns the joined factor.
    #[must_use]
    pub const fn factor(&self) -> &TableFactor {
        &self.factor
    }

    /// Returns the join criteria.
    #[must_use]
    pub const fn criteria(&self) -> Option<&JoinCriteria> {
        self.criteria.as_ref()
    }
}

/// `LATERAL VIEW [OUTER] generator(...) table AS col, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LateralView {
    outer: bool,
    function: FunctionCall,
    table_alias: Identifier,
    column_aliases: Vec<Identifier>,
    span: Span,
}

impl LateralView {
    /// Creates a lateral view.
    ///
    /// # Errors
    ///
    /// Fails if no column alias is given.
    pub fn new(
        outer: bool,
        function: FunctionCall,
        table_alias: Identifier,
        column_aliases: Vec<Identifier>,
        span: Span,
    ) -> Result<Self, ParseError> {
        if column_aliases.is_empty() {
            return malformed(NodeKind::LateralView, "LATERAL VIEW needs a column alias", span);
        }
        validated(Self {
            outer,
            function,
            table_alias,
            column_aliases,
            span,
        })
    }

    /// Returns true for `LATERAL VIEW OUTER`.
    #[must_use]
    pub const fn outer(&self) -> bool {
        self.outer
    }

    /// Returns the generator function.
    #[must_use]
    pub const fn function(&self) -> &FunctionCall {
        &self.function
    }

    /// Returns the generated table's alias.
    #[must_use]
    pub const fn table_alias(&self) -> &Identifier {
        &self.table_alias
    }

    /// Returns the generated column aliases.
    #[must_use]
    pub fn column_aliases(&self) -> &[Identifier] {
        &self.column_aliases
    }
}

/// `WHERE condition`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    condition: Expr,
    span: Span,
}

impl WhereClause {
    /// Creates a WHERE clause.
    ///
    /// # Errors
    ///
    /// Fails if the condition lies outside `span`.
    pub fn new(condition: Expr, span: Span) -> Result<Self, ParseError> {
        validated(Self { condition, span })
    }

    /// Returns the condition.
    #[must_use]
    pub const fn condition(&self) -> &Expr {
        &self.condition
    }
}

/// `GROUP BY expr, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupByClause {
    exprs: Vec<Expr>,
    span: Span,
}

impl GroupByClause {
    /// Creates a GROUP BY clause.
    ///
    /// # Errors
    ///
    /// Fails if `exprs` is empty.
    pub fn new(exprs: Vec<Expr>, span: Span) -> Result<Self, ParseError> {
        if exprs.is_empty() {
            return malformed(NodeKind::GroupBy, "GROUP BY has no expressions", span);
        }
        validated(Self { exprs, span })
    }

    /// Returns the grouping expressions.
    #[must_use]
    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }
}

/// `HAVING condition`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HavingClause {
    condition: Expr,
    span: Span,
}

impl HavingClause {
    /// Creates a HAVING clause.
    ///
    /// # Errors
    ///
    /// Fails if the condition lies outside `span`.
    pub fn new(condition: Expr, span: Span) -> Result<Self, ParseError> {
        validated(Self { condition, span })
    }

    /// Returns the condition.
    #[must_use]
    pub const fn condition(&self) -> &Expr {
        &self.condition
    }
}

/// `ORDER BY item, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByClause {
    items: Vec<OrderItem>,
    span: Span,
}

impl OrderByClause {
    /// Creates an ORDER BY clause.
    ///
    /// # Errors
    ///
    /// Fails if `items` is empty.
    pub fn new(items: Vec<OrderItem>, span: Span) -> Result<Self, ParseError> {
        if items.is_empty() {
            return malformed(NodeKind::OrderBy, "ORDER BY has no items", span);
        }
        validated(Self { items, span })
    }

    /// Returns the sort keys.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Placement of NULLs in a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullsOrder {
    First,
    Last,
}

/// `expr [ASC|DESC] [NULLS FIRST|LAST]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    expr: Expr,
    direction: Option<SortDirection>,
    nulls: Option<NullsOrder>,
    span: Span,
}

impl OrderItem {
    /// Creates a sort key.
    ///
    /// # Errors
    ///
    /// Fails if the expression lies outside `span`.
    pub fn new(
        expr: Expr,
        direction: Option<SortDirection>,
        nulls: Option<NullsOrder>,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            expr,
            direction,
            nulls,
            span,
        })
    }

    /// Returns the sort expression.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Returns the written direction.
    #[must_use]
    pub const fn direction(&self) -> Option<SortDirection> {
        self.direction
    }

    /// Returns true unless DESC was written.
    #[must_use]
    pub const fn ascending(&self) -> bool {
        !matches!(self.direction, Some(SortDirection::Desc))
    }

    /// Returns the NULLS placement.
    #[must_use]
    pub const fn nulls(&self) -> Option<NullsOrder> {
        self.nulls
    }
}

/// How a LIMIT clause was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitStyle {
    /// `LIMIT n [OFFSET m]`
    LimitOffset,
    /// `LIMIT m, n`
    Comma,
}

/// `LIMIT n [OFFSET m]` or `LIMIT m, n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitClause {
    limit: Expr,
    offset: Option<Expr>,
    style: LimitStyle,
    span: Span,
}

impl LimitClause {
    /// Creates a LIMIT clause.
    ///
    /// # Errors
    ///
    /// Fails if the comma form has no offset, or the parts are out of
    /// source order for the given style.
    pub fn new(
        limit: Expr,
        offset: Option<Expr>,
        style: LimitStyle,
        span: Span,
    ) -> Result<Self, ParseError> {
        if style == LimitStyle::Comma && offset.is_none() {
            return malformed(NodeKind::Limit, "LIMIT m, n needs both values", span);
        }
        validated(Self {
            limit,
            offset,
            style,
            span,
        })
    }

    /// Returns the row count.
    #[must_use]
    pub const fn limit(&self) -> &Expr {
        &self.limit
    }

    /// Returns the number of rows skipped.
    #[must_use]
    pub const fn offset(&self) -> Option<&Expr> {
        self.offset.as_ref()
    }

    /// Returns how the clause was spelled.
    #[must_use]
    pub const fn style(&self) -> LimitStyle {
        self.style
    }
}

impl Node for Query {
    const KIND: NodeKind = NodeKind::Query;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .opt("with", self.with.as_ref())
            .one("body", &self.body)
            .opt("order_by", self.order_by.as_ref())
            .opt("limit", self.limit.as_ref())
            .finish()
    }
}

impl Node for Select {
    const KIND: NodeKind = NodeKind::Select;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("projection", &self.projection)
            .opt("from", self.from.as_ref())
            .opt("where", self.selection.as_ref())
            .opt("group_by", self.group_by.as_ref())
            .opt("having", self.having.as_ref())
            .finish()
    }
}

impl Node for SetOperation {
    const KIND: NodeKind = NodeKind::SetOperation;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("left", &self.left)
            .one("right", &self.right)
            .finish()
    }
}

impl Node for With {
    const KIND: NodeKind = NodeKind::With;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("cte", &self.ctes).finish()
    }
}

impl Node for Cte {
    const KIND: NodeKind = NodeKind::Cte;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .many("column", &self.columns)
            .one("query", &self.query)
            .finish()
    }
}

impl Node for SelectList {
    const KIND: NodeKind = NodeKind::SelectList;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("item", &self.items).finish()
    }
}

impl Node for SelectItem {
    const KIND: NodeKind = NodeKind::SelectItem;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("expr", &self.expr)
            .opt("alias", self.alias.as_ref())
            .finish()
    }
}

impl Node for FromClause {
    const KIND: NodeKind = NodeKind::From;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("relation", &self.relations).finish()
    }
}

impl Node for Relation {
    const KIND: NodeKind = NodeKind::Relation;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("factor", &self.factor)
            .many("join", &self.joins)
            .finish()
    }
}

impl Node for NamedTable {
    const KIND: NodeKind = NodeKind::TableReference;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .opt("partition", self.partition.as_ref())
            .opt("alias", self.alias.as_ref())
            .many("lateral_view", &self.lateral_views)
            .finish()
    }
}

impl Node for DerivedTable {
    const KIND: NodeKind = NodeKind::DerivedTable;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("query", &self.query)
            .opt("alias", self.alias.as_ref())
            .many("lateral_view", &self.lateral_views)
            .finish()
    }
}

impl Node for Join {
    const KIND: NodeKind = NodeKind::Join;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        let children = Children::new().one("factor", &self.factor);
        let children = match &self.criteria {
            Some(JoinCriteria::On(condition)) => children.one("condition", condition),
            Some(JoinCriteria::Using(columns)) => children.many("using", columns),
            None => children,
        };
        children.finish()
    }
}

impl Node for LateralView {
    const KIND: NodeKind = NodeKind::LateralView;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("function", &self.function)
            .one("table_alias", &self.table_alias)
            .many("column_alias", &self.column_aliases)
            .finish()
    }
}

impl Node for WhereClause {
    const KIND: NodeKind = NodeKind::Where;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("condition", &self.condition).finish()
    }
}

impl Node for GroupByClause {
    const KIND: NodeKind = NodeKind::GroupBy;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("expr", &self.exprs).finish()
    }
}

impl Node for HavingClause {
    const KIND: NodeKind = NodeKind::Having;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("condition", &self.condition).finish()
    }
}

impl Node for OrderByClause {
    const KIND: NodeKind = NodeKind::OrderBy;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("item", &self.items).finish()
    }
}

impl Node for OrderItem {
    const KIND: NodeKind = NodeKind::OrderItem;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("expr", &self.expr).finish()
    }
}

impl Node for LimitClause {
    const KIND: NodeKind = NodeKind::Limit;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        match self.style {
            LimitStyle::Comma => Children::new()
                .opt("offset", self.offset.as_ref())
                .one("limit", &self.limit)
                .finish(),
            LimitStyle::LimitOffset => Children::new()
                .one("limit", &self.limit)
                .opt("offset", self.offset.as_ref())
                .finish(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        write!(f, "{}", self.body)?;
        if let Some(order_by) = &self.order_by {
            write!(f, " {order_by}")?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {limit}")?;
        }
        Ok(())
    }
}

impl fmt::Display for QueryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => select.fmt(f),
            Self::SetOperation(operation) => operation.fmt(f),
            Self::Nested(query) => write!(f, "({query})"),
        }
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{}", self.projection)?;
        if let Some(from) = &self.from {
            write!(f, " {from}")?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " {selection}")?;
        }
        if let Some(group_by) = &self.group_by {
            write!(f, " {group_by}")?;
        }
        if let Some(having) = &self.having {
            write!(f, " {having}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SetOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.left, self.op.as_str())?;
        match self.quantifier {
            SetQuantifier::None => {}
            SetQuantifier::All => f.write_str(" ALL")?,
            SetQuantifier::Distinct => f.write_str(" DISTINCT")?,
        }
        write!(f, " {}", self.right)
    }
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive {
            f.write_str("RECURSIVE ")?;
        }
        write_separated(f, &self.ctes, ", ")
    }
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            write_separated(f, &self.columns, ", ")?;
            f.write_str(")")?;
        }
        write!(f, " AS ({})", self.query)
    }
}

impl fmt::Display for SelectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_separated(f, &self.items, ", ")
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FROM ")?;
        write_separated(f, &self.relations, ", ")
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.factor)?;
        for join in &self.joins {
            write!(f, " {join}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(table) => table.fmt(f),
            Self::Derived(table) => table.fmt(f),
        }
    }
}

fn write_lateral_views(f: &mut fmt::Formatter<'_>, views: &[LateralView]) -> fmt::Result {
    for view in views {
        write!(f, " {view}")?;
    }
    Ok(())
}

impl fmt::Display for NamedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(partition) = &self.partition {
            write!(f, " {partition}")?;
        }
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        write_lateral_views(f, &self.lateral_views)
    }
}

impl fmt::Display for DerivedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.query)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        write_lateral_views(f, &self.lateral_views)
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.join_type.as_str(), self.factor)?;
        match &self.criteria {
            Some(JoinCriteria::On(condition)) => write!(f, " ON {condition}"),
            Some(JoinCriteria::Using(columns)) => {
                f.write_str(" USING (")?;
                write_separated(f, columns, ", ")?;
                f.write_str(")")
            }
            None => Ok(()),
        }
    }
}

impl fmt::Display for LateralView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LATERAL VIEW ")?;
        if self.outer {
            f.write_str("OUTER ")?;
        }
        write!(f, "{} {} AS ", self.function, self.table_alias)?;
        write_separated(f, &self.column_aliases, ", ")
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHERE {}", self.condition)
    }
}

impl fmt::Display for GroupByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GROUP BY ")?;
        write_separated(f, &self.exprs, ", ")
    }
}

impl fmt::Display for HavingClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HAVING {}", self.condition)
    }
}

impl fmt::Display for OrderByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ORDER BY ")?;
        write_separated(f, &self.items, ", ")
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.direction {
            Some(SortDirection::Asc) => f.write_str(" ASC")?,
            Some(SortDirection::Desc) => f.write_str(" DESC")?,
            None => {}
        }
        match self.nulls {
            Some(NullsOrder::First) => f.write_str(" NULLS FIRST"),
            Some(NullsOrder::Last) => f.write_str(" NULLS LAST"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for LimitClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.offset, self.style) {
            (Some(offset), LimitStyle::Comma) => write!(f, "LIMIT {offset}, {}", self.limit),
            (Some(offset), LimitStyle::LimitOffset) => {
                write!(f, "LIMIT {} OFFSET {offset}", self.limit)
            }
            (None, _) => write!(f, "LIMIT {}", self.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnRef, Ident, IntegerLiteral, Literal};

    fn ident(name: &str, start: usize) -> Identifier {
        Identifier::Simple(Ident::new(name, Span::new(start, start + name.len())).unwrap())
    }

    fn int(value: i64, start: usize) -> Expr {
        let len = value.to_string().len();
        Expr::Literal(Literal::Integer(
            IntegerLiteral::new(value, Span::new(start, start + len)).unwrap(),
        ))
    }

    fn table(name: &str, start: usize) -> TableFactor {
        let name = ObjectName::single(ident(name, start)).unwrap();
        let span = name.span();
        TableFactor::Named(NamedTable::new(name, None, None, vec![], span).unwrap())
    }

    #[test]
    fn test_limit_comma_children_follow_source_order() {
        // LIMIT 5, 10
        let clause = LimitClause::new(int(10, 9), Some(int(5, 6)), LimitStyle::Comma, Span::new(0, 11))
            .unwrap();
        let roles: Vec<&str> = NodeRef::from(&clause)
            .children_with_roles()
            .iter()
            .map(|child| child.role)
            .collect();
        assert_eq!(roles, ["offset", "limit"]);
        assert_eq!(clause.to_string(), "LIMIT 5, 10");
    }

    #[test]
    fn test_cross_join_rejects_criteria() {
        let condition = Expr::Column(ColumnRef::new(ObjectName::single(ident("x", 20)).unwrap()).unwrap());
        let err = Join::new(
            JoinType::Cross,
            table("b", 11),
            Some(JoinCriteria::On(condition)),
            Span::new(0, 21),
        )
        .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_left_join_requires_criteria() {
        let err = Join::new(JoinType::LeftOuter, table("b", 10), None, Span::new(0, 11)).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_with_rejects_duplicate_names() {
        let select_list = |start: usize| {
            SelectList::new(vec![SelectItem::new(int(1, start), None).unwrap()]).unwrap()
        };
        let query = |start: usize| {
            let select = Select::new(
                false,
                select_list(start + 7),
                None,
                None,
                None,
                None,
                Span::new(start, start + 8),
            )
            .unwrap();
            Query::new(
                None,
                QueryBody::Select(Box::new(select)),
                None,
                None,
                Span::new(start, start + 8),
            )
            .unwrap()
        };
        let first = Cte::new(ident("a", 5), vec![], query(11), Span::new(5, 20)).unwrap();
        let second = Cte::new(ident("A", 22), vec![], query(28), Span::new(22, 37)).unwrap();
        let err = With::new(false, vec![first, second], Span::new(0, 37)).unwrap_err();
        assert!(err.is_malformed());
    }
}
