//! Clause nodes shared by queries, DDL and DML.

use core::fmt;
use std::collections::HashSet;

use super::node::{malformed, validated, Child, Children, Node, NodeKind};
use super::{
    write_separated, DataType, Expr, Identifier, ObjectName, OrderItem, StringLiteral,
};
use crate::error::ParseError;
use crate::lexer::Span;

/// `(PARTITION BY ... ORDER BY ... frame)` after OVER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    partition_by: Vec<Expr>,
    order_by: Vec<OrderItem>,
    frame: Option<WindowFrame>,
    span: Span,
}

impl WindowSpec {
    /// Creates a window specification.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        partition_by: Vec<Expr>,
        order_by: Vec<OrderItem>,
        frame: Option<WindowFrame>,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            partition_by,
            order_by,
            frame,
            span,
        })
    }

    /// Returns the PARTITION BY expressions.
    #[must_use]
    pub fn partition_by(&self) -> &[Expr] {
        &self.partition_by
    }

    /// Returns the ORDER BY keys.
    #[must_use]
    pub fn order_by(&self) -> &[OrderItem] {
        &self.order_by
    }

    /// Returns the frame.
    #[must_use]
    pub const fn frame(&self) -> Option<&WindowFrame> {
        self.frame.as_ref()
    }
}

/// ROWS or RANGE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameUnits {
    Rows,
    Range,
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(Box<Expr>),
    CurrentRow,
    Following(Box<Expr>),
    UnboundedFollowing,
}

impl FrameBound {
    fn offset(&self) -> Option<&Expr> {
        match self {
            Self::Preceding(expr) | Self::Following(expr) => Some(&**expr),
            _ => None,
        }
    }

    // position on the row axis, for checking start <= end
    const fn rank(&self) -> u8 {
        match self {
            Self::UnboundedPreceding => 0,
            Self::Preceding(_) => 1,
            Self::CurrentRow => 2,
            Self::Following(_) => 3,
            Self::UnboundedFollowing => 4,
        }
    }
}

/// `ROWS|RANGE bound` or `ROWS|RANGE BETWEEN start AND end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFrame {
    units: FrameUnits,
    start: FrameBound,
    end: Option<FrameBound>,
    span: Span,
}

impl WindowFrame {
    /// Creates a frame.
    ///
    /// # Errors
    ///
    /// Fails if the frame starts at UNBOUNDED FOLLOWING, ends at UNBOUNDED
    /// PRECEDING, or its start lies after its end.
    pub fn new(
        units: FrameUnits,
        start: FrameBound,
        end: Option<FrameBound>,
        span: Span,
    ) -> Result<Self, ParseError> {
        if start == FrameBound::UnboundedFollowing {
            return malformed(
                NodeKind::WindowFrame,
                "frame cannot start at UNBOUNDED FOLLOWING",
                span,
            );
        }
        if let Some(end) = &end {
            if *end == FrameBound::UnboundedPreceding {
                return malformed(
                    NodeKind::WindowFrame,
                    "frame cannot end at UNBOUNDED PRECEDING",
                    span,
                );
            }
            if start.rank() > end.rank() {
                return malformed(NodeKind::WindowFrame, "frame starts after it ends", span);
            }
        }
        validated(Self {
            units,
            start,
            end,
            span,
        })
    }

    /// Returns ROWS or RANGE.
    #[must_use]
    pub const fn units(&self) -> FrameUnits {
        self.units
    }

    /// Returns the start bound.
    #[must_use]
    pub const fn start(&self) -> &FrameBound {
        &self.start
    }

    /// Returns the end bound of a BETWEEN frame.
    #[must_use]
    pub const fn end(&self) -> Option<&FrameBound> {
        self.end.as_ref()
    }
}

/// `WHEN condition THEN result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhenClause {
    condition: Expr,
    result: Expr,
    span: Span,
}

impl WhenClause {
    /// Creates a WHEN branch.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(condition: Expr, result: Expr, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            condition,
            result,
            span,
        })
    }

    /// Returns the condition (or the compared value of a simple CASE).
    #[must_use]
    pub const fn condition(&self) -> &Expr {
        &self.condition
    }

    /// Returns the result.
    #[must_use]
    pub const fn result(&self) -> &Expr {
        &self.result
    }
}

/// `PROPERTIES ("k" = "v", ...)` and similar key/value lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyList {
    properties: Vec<Property>,
    span: Span,
}

impl PropertyList {
    /// Creates a property list.
    ///
    /// Duplicate keys are accepted here; whether they are an error is a
    /// decision for semantic passes.
    ///
    /// # Errors
    ///
    /// Fails if the properties are out of order or outside `span`.
    pub fn new(properties: Vec<Property>, span: Span) -> Result<Self, ParseError> {
        validated(Self { properties, span })
    }

    /// Returns the properties in source order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns the value of the first property named `key`
    /// (case-insensitive).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|property| property.key().eq_ignore_ascii_case(key))
            .map(Property::value)
    }

    /// Returns the first property whose key repeats an earlier one.
    #[must_use]
    pub fn duplicate_key(&self) -> Option<&Property> {
        let mut seen = HashSet::new();
        self.properties
            .iter()
            .find(|property| !seen.insert(property.key().to_ascii_lowercase()))
    }
}

/// `"key" = "value"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    key: StringLiteral,
    value: StringLiteral,
    span: Span,
}

impl Property {
    /// Creates a property spanning key and value.
    ///
    /// # Errors
    ///
    /// Fails if the key is empty or follows the value.
    pub fn new(key: StringLiteral, value: StringLiteral) -> Result<Self, ParseError> {
        let span = key.span().merge(value.span());
        if key.value().is_empty() {
            return malformed(NodeKind::Property, "property key is empty", span);
        }
        validated(Self { key, value, span })
    }

    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.value()
    }

    /// Returns the value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.value()
    }
}

/// `[TEMPORARY] PARTITION (p1, p2)` or `PARTITION p1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSpec {
    temporary: bool,
    partitions: Vec<Identifier>,
    span: Span,
}

impl PartitionSpec {
    /// Creates a partition selection.
    ///
    /// # Errors
    ///
    /// Fails if no partition is named.
    pub fn new(temporary: bool, partitions: Vec<Identifier>, span: Span) -> Result<Self, ParseError> {
        if partitions.is_empty() {
            return malformed(NodeKind::PartitionSpec, "no partition named", span);
        }
        validated(Self {
            temporary,
            partitions,
            span,
        })
    }

    /// Returns true for TEMPORARY PARTITION.
    #[must_use]
    pub const fn temporary(&self) -> bool {
        self.temporary
    }

    /// Returns the partition names.
    #[must_use]
    pub fn partitions(&self) -> &[Identifier] {
        &self.partitions
    }
}

/// A column definition in CREATE TABLE or ALTER TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    name: Identifier,
    data_type: DataType,
    nullable: Option<bool>,
    default: Option<Expr>,
    comment: Option<StringLiteral>,
    span: Span,
}

impl ColumnDef {
    /// Creates a column definition.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        name: Identifier,
        data_type: DataType,
        nullable: Option<bool>,
        default: Option<Expr>,
        comment: Option<StringLiteral>,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            name,
            data_type,
            nullable,
            default,
            comment,
            span,
        })
    }

    /// Returns the column name.
    #[must_use]
    pub const fn name(&self) -> &Identifier {
        &self.name
    }

    /// Returns the column type.
    #[must_use]
    pub const fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Returns `Some(false)` for NOT NULL, `Some(true)` for an explicit NULL.
    #[must_use]
    pub const fn nullable(&self) -> Option<bool> {
        self.nullable
    }

    /// Returns the DEFAULT value.
    #[must_use]
    pub const fn default(&self) -> Option<&Expr> {
        self.default.as_ref()
    }

    /// Returns the COMMENT.
    #[must_use]
    pub const fn comment(&self) -> Option<&StringLiteral> {
        self.comment.as_ref()
    }
}

/// Doris table models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Duplicate,
    Unique,
    Aggregate,
    Primary,
}

impl KeyType {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "DUPLICATE",
            Self::Unique => "UNIQUE",
            Self::Aggregate => "AGGREGATE",
            Self::Primary => "PRIMARY",
        }
    }
}

/// `DUPLICATE KEY (a, b)` and the other key clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysClause {
    key_type: KeyType,
    columns: Vec<Identifier>,
    span: Span,
}

impl KeysClause {
    /// Creates a key clause.
    ///
    /// # Errors
    ///
    /// Fails if no column is named.
    pub fn new(key_type: KeyType, columns: Vec<Identifier>, span: Span) -> Result<Self, ParseError> {
        if columns.is_empty() {
            return malformed(NodeKind::Keys, "key clause names no columns", span);
        }
        validated(Self {
            key_type,
            columns,
            span,
        })
    }

    /// Returns the table model.
    #[must_use]
    pub const fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Returns the key columns.
    #[must_use]
    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }
}

/// How rows are spread over buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionMethod {
    /// `HASH(a, b)`
    Hash(Vec<Identifier>),
    /// `RANDOM`
    Random,
}

/// `BUCKETS n` or `BUCKETS AUTO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Buckets {
    Count(u32),
    Auto,
}

/// `DISTRIBUTED BY HASH(...) | RANDOM [BUCKETS n|AUTO]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionClause {
    method: DistributionMethod,
    buckets: Option<Buckets>,
    span: Span,
}

impl DistributionClause {
    /// Creates a distribution clause.
    ///
    /// # Errors
    ///
    /// Fails if HASH names no column or the bucket count is zero.
    pub fn new(
        method: DistributionMethod,
        buckets: Option<Buckets>,
        span: Span,
    ) -> Result<Self, ParseError> {
        if matches!(&method, DistributionMethod::Hash(columns) if columns.is_empty()) {
            return malformed(NodeKind::Distribution, "HASH names no columns", span);
        }
        if buckets == Some(Buckets::Count(0)) {
            return malformed(NodeKind::Distribution, "bucket count must be positive", span);
        }
        validated(Self {
            method,
            buckets,
            span,
        })
    }

    /// Returns the distribution method.
    #[must_use]
    pub const fn method(&self) -> &DistributionMethod {
        &self.method
    }

    /// Returns the bucket setting.
    #[must_use]
    pub const fn buckets(&self) -> Option<Buckets> {
        self.buckets
    }
}

/// `column = value` in UPDATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    column: ObjectName,
    value: Expr,
    span: Span,
}

impl Assignment {
    /// Creates an assignment spanning column and value.
    ///
    /// # Errors
    ///
    /// Fails if the value precedes the column.
    pub fn new(column: ObjectName, value: Expr) -> Result<Self, ParseError> {
        let span = column.span().merge(value.span());
        validated(Self {
            column,
            value,
            span,
        })
    }

    /// Returns the assigned column.
    #[must_use]
    pub const fn column(&self) -> &ObjectName {
        &self.column
    }

    /// Returns the new value.
    #[must_use]
    pub const fn value(&self) -> &Expr {
        &self.value
    }
}

/// `VALUES (a, b), (c, d)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesClause {
    rows: Vec<Vec<Expr>>,
    span: Span,
}

impl ValuesClause {
    /// Creates a VALUES clause.
    ///
    /// # Errors
    ///
    /// Fails if there are no rows, a row is empty, or rows differ in width.
    pub fn new(rows: Vec<Vec<Expr>>, span: Span) -> Result<Self, ParseError> {
        let Some(width) = rows.first().map(Vec::len) else {
            return malformed(NodeKind::Values, "VALUES has no rows", span);
        };
        if width == 0 {
            return malformed(NodeKind::Values, "VALUES row is empty", span);
        }
        if let Some(row) = rows.iter().position(|row| row.len() != width) {
            return malformed(
                NodeKind::Values,
                format!("row {} has {} values, expected {width}", row + 1, rows[row].len()),
                span,
            );
        }
        validated(Self { rows, span })
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Expr>] {
        &self.rows
    }

    /// Returns the number of values per row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Where a variable lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableScope {
    /// `SET [SESSION] x = ...`
    Session,
    /// `SET GLOBAL x = ...`
    Global,
    /// `SET @x = ...`
    User,
}

/// One `name = value` in SET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableAssignment {
    scope: VariableScope,
    name: Identifier,
    value: Expr,
    span: Span,
}

impl VariableAssignment {
    /// Creates a variable assignment.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        scope: VariableScope,
        name: Identifier,
        value: Expr,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            scope,
            name,
            value,
            span,
        })
    }

    /// Returns the scope.
    #[must_use]
    pub const fn scope(&self) -> VariableScope {
        self.scope
    }

    /// Returns the variable name.
    #[must_use]
    pub const fn name(&self) -> &Identifier {
        &self.name
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &Expr {
        &self.value
    }
}

/// One change in ALTER TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterOperation {
    AddColumn(ColumnDef),
    DropColumn(Identifier),
    ModifyColumn(ColumnDef),
    RenameColumn { from: Identifier, to: Identifier },
    RenameTable(Identifier),
    SetProperties(PropertyList),
}

/// An ALTER TABLE action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTableAction {
    op: AlterOperation,
    span: Span,
}

impl AlterTableAction {
    /// Creates an action.
    ///
    /// # Errors
    ///
    /// Fails if a column is renamed to its own name.
    pub fn new(op: AlterOperation, span: Span) -> Result<Self, ParseError> {
        if let AlterOperation::RenameColumn { from, to } = &op {
            if from.value().eq_ignore_ascii_case(to.value()) {
                return malformed(NodeKind::AlterAction, "column renamed to itself", span);
            }
        }
        validated(Self { op, span })
    }

    /// Returns the operation.
    #[must_use]
    pub const fn op(&self) -> &AlterOperation {
        &self.op
    }
}

impl Node for WindowSpec {
    const KIND: NodeKind = NodeKind::WindowSpec;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .many("partition", &self.partition_by)
            .many("order", &self.order_by)
            .opt("frame", self.frame.as_ref())
            .finish()
    }
}

impl Node for WindowFrame {
    const KIND: NodeKind = NodeKind::WindowFrame;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .opt("start", self.start.offset())
            .opt("end", self.end.as_ref().and_then(FrameBound::offset))
            .finish()
    }
}

impl Node for WhenClause {
    const KIND: NodeKind = NodeKind::When;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("condition", &self.condition)
            .one("result", &self.result)
            .finish()
    }
}

impl Node for PropertyList {
    const KIND: NodeKind = NodeKind::PropertyList;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("property", &self.properties).finish()
    }
}

impl Node for Property {
    const KIND: NodeKind = NodeKind::Property;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("key", &self.key)
            .one("value", &self.value)
            .finish()
    }
}

impl Node for PartitionSpec {
    const KIND: NodeKind = NodeKind::PartitionSpec;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("partition", &self.partitions).finish()
    }
}

impl Node for ColumnDef {
    const KIND: NodeKind = NodeKind::ColumnDef;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .opt("default", self.default.as_ref())
            .opt("comment", self.comment.as_ref())
            .finish()
    }
}

impl Node for KeysClause {
    const KIND: NodeKind = NodeKind::Keys;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("column", &self.columns).finish()
    }
}

impl Node for DistributionClause {
    const KIND: NodeKind = NodeKind::Distribution;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        match &self.method {
            DistributionMethod::Hash(columns) => Children::new().many("column", columns).finish(),
            DistributionMethod::Random => Vec::new(),
        }
    }
}

impl Node for Assignment {
    const KIND: NodeKind = NodeKind::Assignment;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("column", &self.column)
            .one("value", &self.value)
            .finish()
    }
}

impl Node for ValuesClause {
    const KIND: NodeKind = NodeKind::Values;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .many("value", self.rows.iter().flatten())
            .finish()
    }
}

impl Node for VariableAssignment {
    const KIND: NodeKind = NodeKind::VariableAssignment;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .one("value", &self.value)
            .finish()
    }
}

impl Node for AlterTableAction {
    const KIND: NodeKind = NodeKind::AlterAction;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        let children = Children::new();
        match &self.op {
            AlterOperation::AddColumn(column) | AlterOperation::ModifyColumn(column) => {
                children.one("column", column).finish()
            }
            AlterOperation::DropColumn(name) => children.one("column", name).finish(),
            AlterOperation::RenameColumn { from, to } => {
                children.one("from", from).one("to", to).finish()
            }
            AlterOperation::RenameTable(name) => children.one("to", name).finish(),
            AlterOperation::SetProperties(properties) => {
                children.one("properties", properties).finish()
            }
        }
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.partition_by.is_empty() {
            let exprs: Vec<String> = self.partition_by.iter().map(ToString::to_string).collect();
            parts.push(format!("PARTITION BY {}", exprs.join(", ")));
        }
        if !self.order_by.is_empty() {
            let items: Vec<String> = self.order_by.iter().map(ToString::to_string).collect();
            parts.push(format!("ORDER BY {}", items.join(", ")));
        }
        if let Some(frame) = &self.frame {
            parts.push(frame.to_string());
        }
        write!(f, "({})", parts.join(" "))
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(offset) => write!(f, "{offset} PRECEDING"),
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Following(offset) => write!(f, "{offset} FOLLOWING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = match self.units {
            FrameUnits::Rows => "ROWS",
            FrameUnits::Range => "RANGE",
        };
        match &self.end {
            Some(end) => write!(f, "{units} BETWEEN {} AND {end}", self.start),
            None => write!(f, "{units} {}", self.start),
        }
    }
}

impl fmt::Display for WhenClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHEN {} THEN {}", self.condition, self.result)
    }
}

impl fmt::Display for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_separated(f, &self.properties, ", ")?;
        f.write_str(")")
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

impl fmt::Display for PartitionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("PARTITION (")?;
        write_separated(f, &self.partitions, ", ")?;
        f.write_str(")")
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        match self.nullable {
            Some(false) => f.write_str(" NOT NULL")?,
            Some(true) => f.write_str(" NULL")?,
            None => {}
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT {comment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for KeysClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} KEY (", self.key_type.as_str())?;
        write_separated(f, &self.columns, ", ")?;
        f.write_str(")")
    }
}

impl fmt::Display for DistributionClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DISTRIBUTED BY ")?;
        match &self.method {
            DistributionMethod::Hash(columns) => {
                f.write_str("HASH (")?;
                write_separated(f, columns, ", ")?;
                f.write_str(")")?;
            }
            DistributionMethod::Random => f.write_str("RANDOM")?,
        }
        match self.buckets {
            Some(Buckets::Count(n)) => write!(f, " BUCKETS {n}"),
            Some(Buckets::Auto) => f.write_str(" BUCKETS AUTO"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

impl fmt::Display for ValuesClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VALUES ")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("(")?;
            write_separated(f, row, ", ")?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for VariableAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            VariableScope::Session => write!(f, "{} = {}", self.name, self.value),
            VariableScope::Global => write!(f, "GLOBAL {} = {}", self.name, self.value),
            VariableScope::User => write!(f, "@{} = {}", self.name, self.value),
        }
    }
}

impl fmt::Display for AlterTableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.op {
            AlterOperation::AddColumn(column) => write!(f, "ADD COLUMN {column}"),
            AlterOperation::DropColumn(name) => write!(f, "DROP COLUMN {name}"),
            AlterOperation::ModifyColumn(column) => write!(f, "MODIFY COLUMN {column}"),
            AlterOperation::RenameColumn { from, to } => write!(f, "RENAME COLUMN {from} {to}"),
            AlterOperation::RenameTable(name) => write!(f, "RENAME {name}"),
            AlterOperation::SetProperties(properties) => write!(f, "SET {properties}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Ident, IntegerLiteral, Literal};

    fn int(value: i64, start: usize) -> Expr {
        let len = value.to_string().len();
        Expr::Literal(Literal::Integer(
            IntegerLiteral::new(value, Span::new(start, start + len)).unwrap(),
        ))
    }

    fn string(value: &str, start: usize) -> StringLiteral {
        StringLiteral::new(value, Span::new(start, start + value.len() + 2)).unwrap()
    }

    #[test]
    fn test_values_rows_must_match() {
        let err = ValuesClause::new(vec![vec![int(1, 8)], vec![int(2, 13), int(3, 16)]], Span::new(0, 18))
            .unwrap_err();
        assert!(err.is_malformed());
        assert!(err.message.contains("row 2"));
    }

    #[test]
    fn test_frame_order() {
        let err = WindowFrame::new(
            FrameUnits::Rows,
            FrameBound::CurrentRow,
            Some(FrameBound::UnboundedPreceding),
            Span::new(0, 40),
        )
        .unwrap_err();
        assert!(err.is_malformed());

        let frame = WindowFrame::new(
            FrameUnits::Rows,
            FrameBound::Preceding(Box::new(int(1, 13))),
            Some(FrameBound::CurrentRow),
            Span::new(0, 42),
        )
        .unwrap();
        assert_eq!(frame.to_string(), "ROWS BETWEEN 1 PRECEDING AND CURRENT ROW");
    }

    #[test]
    fn test_property_lookup_and_duplicates() {
        let first = Property::new(string("replication_num", 1), string("1", 21)).unwrap();
        let second = Property::new(string("REPLICATION_NUM", 28), string("3", 48)).unwrap();
        let list = PropertyList::new(vec![first, second], Span::new(0, 52)).unwrap();
        assert_eq!(list.get("replication_num"), Some("1"));
        assert_eq!(list.duplicate_key().map(Property::value), Some("3"));
    }

    #[test]
    fn test_rename_to_same_name_rejected() {
        let ident = |start: usize| Identifier::Simple(Ident::new("a", Span::new(start, start + 1)).unwrap());
        let err = AlterTableAction::new(
            AlterOperation::RenameColumn {
                from: ident(14),
                to: ident(16),
            },
            Span::new(0, 17),
        )
        .unwrap_err();
        assert!(err.is_malformed());
    }
}
