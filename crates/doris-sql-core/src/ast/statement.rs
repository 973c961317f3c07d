//! Statement nodes.

use core::fmt;
use std::collections::HashSet;

use super::node::{malformed, validated, Child, Children, Node, NodeKind, NodeRef};
use super::{
    write_separated, AlterTableAction, Assignment, ColumnDef, DistributionClause, Expr,
    FromClause, Identifier, KeysClause, Literal, ObjectName, PartitionSpec, PropertyList, Query,
    StringLiteral, ValuesClause, VariableAssignment, VariableScope, WhereClause,
};
use crate::error::ParseError;
use crate::lexer::Span;

/// Any statement root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Query(Query),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    CreateTable(CreateTableStatement),
    CreateView(CreateViewStatement),
    CreateDatabase(CreateDatabaseStatement),
    AlterTable(AlterTableStatement),
    Drop(DropStatement),
    Truncate(TruncateStatement),
    Show(ShowStatement),
    Describe(DescribeStatement),
    Use(UseStatement),
    Set(SetStatement),
    Grant(GrantStatement),
    Revoke(RevokeStatement),
    Transaction(TransactionStatement),
    Explain(ExplainStatement),
    Kill(KillStatement),
    /// An alternate spelling wrapping its canonical statement.
    Alias(AliasStatement),
    /// A statement recognized only by its leading keywords.
    Unsupported(UnsupportedStatement),
}

impl Statement {
    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        NodeRef::from(self).span()
    }

    /// Returns the kind of the root node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        NodeRef::from(self).kind()
    }

    /// Returns true for statements recognized but not modelled.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// Strips one level of alias wrapping.
    #[must_use]
    pub fn canonical(&self) -> &Self {
        match self {
            Self::Alias(alias) => alias.statement(),
            statement => statement,
        }
    }
}

impl<'a> From<&'a Statement> for NodeRef<'a> {
    fn from(statement: &'a Statement) -> Self {
        match statement {
            Statement::Query(node) => node.into(),
            Statement::Insert(node) => node.into(),
            Statement::Update(node) => node.into(),
            Statement::Delete(node) => node.into(),
            Statement::CreateTable(node) => node.into(),
            Statement::CreateView(node) => node.into(),
            Statement::CreateDatabase(node) => node.into(),
            Statement::AlterTable(node) => node.into(),
            Statement::Drop(node) => node.into(),
            Statement::Truncate(node) => node.into(),
            Statement::Show(node) => node.into(),
            Statement::Describe(node) => node.into(),
            Statement::Use(node) => node.into(),
            Statement::Set(node) => node.into(),
            Statement::Grant(node) => node.into(),
            Statement::Revoke(node) => node.into(),
            Statement::Transaction(node) => node.into(),
            Statement::Explain(node) => node.into(),
            Statement::Kill(node) => node.into(),
            Statement::Alias(node) => node.into(),
            Statement::Unsupported(node) => node.into(),
        }
    }
}

/// Row source of an INSERT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertSource {
    Values(ValuesClause),
    Query(Query),
}

/// `INSERT INTO|OVERWRITE TABLE t [PARTITION ...] [WITH LABEL l] [(cols)] source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    overwrite: bool,
    table: ObjectName,
    partition: Option<PartitionSpec>,
    label: Option<Identifier>,
    columns: Vec<Identifier>,
    source: InsertSource,
    span: Span,
}

impl InsertStatement {
    /// Creates an INSERT.
    ///
    /// # Errors
    ///
    /// Fails if a column is listed twice, or the VALUES rows do not match the
    /// column list.
    pub fn new(
        overwrite: bool,
        table: ObjectName,
        partition: Option<PartitionSpec>,
        label: Option<Identifier>,
        columns: Vec<Identifier>,
        source: InsertSource,
        span: Span,
    ) -> Result<Self, ParseError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.value().to_ascii_lowercase()) {
                return malformed(
                    NodeKind::Insert,
                    format!("column '{}' listed twice", column.value()),
                    column.span(),
                );
            }
        }
        if let InsertSource::Values(values) = &source {
            if !columns.is_empty() && values.width() != columns.len() {
                return malformed(
                    NodeKind::Insert,
                    format!(
                        "{} columns listed but rows have {} values",
                        columns.len(),
                        values.width()
                    ),
                    values.span(),
                );
            }
        }
        validated(Self {
            overwrite,
            table,
            partition,
            label,
            columns,
            source,
            span,
        })
    }

    /// Returns true for INSERT OVERWRITE.
    #[must_use]
    pub const fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &ObjectName {
        &self.table
    }

    /// Returns the target partitions.
    #[must_use]
    pub const fn partition(&self) -> Option<&PartitionSpec> {
        self.partition.as_ref()
    }

    /// Returns the load label.
    #[must_use]
    pub const fn label(&self) -> Option<&Identifier> {
        self.label.as_ref()
    }

    /// Returns the target columns.
    #[must_use]
    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }

    /// Returns the row source.
    #[must_use]
    pub const fn source(&self) -> &InsertSource {
        &self.source
    }
}

/// `UPDATE t SET a = 1 [FROM ...] [WHERE ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatement {
    table: ObjectName,
    alias: Option<Identifier>,
    assignments: Vec<Assignment>,
    from: Option<FromClause>,
    selection: Option<WhereClause>,
    span: Span,
}

impl UpdateStatement {
    /// Creates an UPDATE.
    ///
    /// # Errors
    ///
    /// Fails if there is no assignment.
    pub fn new(
        table: ObjectName,
        alias: Option<Identifier>,
        assignments: Vec<Assignment>,
        from: Option<FromClause>,
        selection: Option<WhereClause>,
        span: Span,
    ) -> Result<Self, ParseError> {
        if assignments.is_empty() {
            return malformed(NodeKind::Update, "UPDATE has no assignments", span);
        }
        validated(Self {
            table,
            alias,
            assignments,
            from,
            selection,
            span,
        })
    }

    /// Returns the updated table.
    #[must_use]
    pub const fn table(&self) -> &ObjectName {
        &self.table
    }

    /// Returns the table alias.
    #[must_use]
    pub const fn alias(&self) -> Option<&Identifier> {
        self.alias.as_ref()
    }

    /// Returns the assignments.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
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
}

/// `DELETE FROM t [PARTITION ...] [USING ...] [WHERE ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteStatement {
    table: ObjectName,
    partition: Option<PartitionSpec>,
    using: Option<FromClause>,
    selection: Option<WhereClause>,
    span: Span,
}

impl DeleteStatement {
    /// Creates a DELETE.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        table: ObjectName,
        partition: Option<PartitionSpec>,
        using: Option<FromClause>,
        selection: Option<WhereClause>,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            table,
            partition,
            using,
            selection,
            span,
        })
    }

    /// Returns the table.
    #[must_use]
    pub const fn table(&self) -> &ObjectName {
        &self.table
    }

    /// Returns the partitions.
    #[must_use]
    pub const fn partition(&self) -> Option<&PartitionSpec> {
        self.partition.as_ref()
    }

    /// Returns the USING clause.
    #[must_use]
    pub const fn using(&self) -> Option<&FromClause> {
        self.using.as_ref()
    }

    /// Returns the WHERE clause.
    #[must_use]
    pub const fn selection(&self) -> Option<&WhereClause> {
        self.selection.as_ref()
    }
}

/// `CREATE [EXTERNAL] TABLE ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStatement {
    external: bool,
    if_not_exists: bool,
    name: ObjectName,
    columns: Vec<ColumnDef>,
    engine: Option<Identifier>,
    keys: Option<KeysClause>,
    comment: Option<StringLiteral>,
    distribution: Option<DistributionClause>,
    properties: Option<PropertyList>,
    as_query: Option<Query>,
    span: Span,
}

/// The optional tail of a CREATE TABLE, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// `ENGINE = name`
    pub engine: Option<Identifier>,
    /// `DUPLICATE|UNIQUE|AGGREGATE|PRIMARY KEY (...)`
    pub keys: Option<KeysClause>,
    /// `COMMENT '...'`
    pub comment: Option<StringLiteral>,
    /// `DISTRIBUTED BY ...`
    pub distribution: Option<DistributionClause>,
    /// `PROPERTIES (...)`
    pub properties: Option<PropertyList>,
}

impl CreateTableStatement {
    /// Creates a CREATE TABLE.
    ///
    /// # Errors
    ///
    /// Fails if there are neither columns nor a query, a column is declared
    /// twice, or a key column is not declared.
    pub fn new(
        external: bool,
        if_not_exists: bool,
        name: ObjectName,
        columns: Vec<ColumnDef>,
        options: TableOptions,
        as_query: Option<Query>,
        span: Span,
    ) -> Result<Self, ParseError> {
        if columns.is_empty() && as_query.is_none() {
            return malformed(
                NodeKind::CreateTable,
                "table needs column definitions or AS SELECT",
                span,
            );
        }
        let mut declared = HashSet::new();
        for column in &columns {
            if !declared.insert(column.name().value().to_ascii_lowercase()) {
                return malformed(
                    NodeKind::CreateTable,
                    format!("column '{}' declared twice", column.name().value()),
                    column.name().span(),
                );
            }
        }
        if let (Some(keys), false) = (&options.keys, columns.is_empty()) {
            for key in keys.columns() {
                if !declared.contains(&key.value().to_ascii_lowercase()) {
                    return malformed(
                        NodeKind::CreateTable,
                        format!("key column '{}' is not declared", key.value()),
                        key.span(),
                    );
                }
            }
        }
        let TableOptions {
            engine,
            keys,
            comment,
            distribution,
            properties,
        } = options;
        validated(Self {
            external,
            if_not_exists,
            name,
            columns,
            engine,
            keys,
            comment,
            distribution,
            properties,
            as_query,
            span,
        })
    }

    /// Returns true for CREATE EXTERNAL TABLE.
    #[must_use]
    pub const fn external(&self) -> bool {
        self.external
    }

    /// Returns true for IF NOT EXISTS.
    #[must_use]
    pub const fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    /// Returns the table name.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        &self.name
    }

    /// Returns the column definitions.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Returns the engine name.
    #[must_use]
    pub const fn engine(&self) -> Option<&Identifier> {
        self.engine.as_ref()
    }

    /// Returns the key clause.
    #[must_use]
    pub const fn keys(&self) -> Option<&KeysClause> {
        self.keys.as_ref()
    }

    /// Returns the table comment.
    #[must_use]
    pub const fn comment(&self) -> Option<&StringLiteral> {
        self.comment.as_ref()
    }

    /// Returns the distribution clause.
    #[must_use]
    pub const fn distribution(&self) -> Option<&DistributionClause> {
        self.distribution.as_ref()
    }

    /// Returns the PROPERTIES list.
    #[must_use]
    pub const fn properties(&self) -> Option<&PropertyList> {
        self.properties.as_ref()
    }

    /// Returns the AS SELECT query.
    #[must_use]
    pub const fn as_query(&self) -> Option<&Query> {
        self.as_query.as_ref()
    }
}

/// `CREATE VIEW [IF NOT EXISTS] v [(cols)] [COMMENT '...'] AS query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateViewStatement {
    if_not_exists: bool,
    name: ObjectName,
    columns: Vec<Identifier>,
    comment: Option<StringLiteral>,
    query: Query,
    span: Span,
}

impl CreateViewStatement {
    /// Creates a CREATE VIEW.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        if_not_exists: bool,
        name: ObjectName,
        columns: Vec<Identifier>,
        comment: Option<StringLiteral>,
        query: Query,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            if_not_exists,
            name,
            columns,
            comment,
            query,
            span,
        })
    }

    /// Returns true for IF NOT EXISTS.
    #[must_use]
    pub const fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    /// Returns the view name.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        &self.name
    }

    /// Returns the declared column names.
    #[must_use]
    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }

    /// Returns the view comment.
    #[must_use]
    pub const fn comment(&self) -> Option<&StringLiteral> {
        self.comment.as_ref()
    }

    /// Returns the defining query.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }
}

/// `CREATE DATABASE [IF NOT EXISTS] db [PROPERTIES (...)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabaseStatement {
    if_not_exists: bool,
    name: ObjectName,
    properties: Option<PropertyList>,
    span: Span,
}

impl CreateDatabaseStatement {
    /// Creates a CREATE DATABASE.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(
        if_not_exists: bool,
        name: ObjectName,
        properties: Option<PropertyList>,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            if_not_exists,
            name,
            properties,
            span,
        })
    }

    /// Returns true for IF NOT EXISTS.
    #[must_use]
    pub const fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    /// Returns the database name.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        &self.name
    }

    /// Returns the PROPERTIES list.
    #[must_use]
    pub const fn properties(&self) -> Option<&PropertyList> {
        self.properties.as_ref()
    }
}

/// `ALTER TABLE t action, action, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTableStatement {
    name: ObjectName,
    actions: Vec<AlterTableAction>,
    span: Span,
}

impl AlterTableStatement {
    /// Creates an ALTER TABLE.
    ///
    /// # Errors
    ///
    /// Fails if there is no action.
    pub fn new(name: ObjectName, actions: Vec<AlterTableAction>, span: Span) -> Result<Self, ParseError> {
        if actions.is_empty() {
            return malformed(NodeKind::AlterTable, "ALTER TABLE has no actions", span);
        }
        validated(Self {
            name,
            actions,
            span,
        })
    }

    /// Returns the table name.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        &self.name
    }

    /// Returns the actions.
    #[must_use]
    pub fn actions(&self) -> &[AlterTableAction] {
        &self.actions
    }
}

/// Objects DROP can remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Table,
    View,
    Database,
}

impl ObjectType {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Database => "DATABASE",
        }
    }
}

/// `DROP TABLE|VIEW|DATABASE [IF EXISTS] name [FORCE]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropStatement {
    object_type: ObjectType,
    if_exists: bool,
    name: ObjectName,
    force: bool,
    span: Span,
}

impl DropStatement {
    /// Creates a DROP.
    ///
    /// # Errors
    ///
    /// Fails if the name lies outside `span`.
    pub fn new(
        object_type: ObjectType,
        if_exists: bool,
        name: ObjectName,
        force: bool,
        span: Span,
    ) -> Result<Self, ParseError> {
        validated(Self {
            object_type,
            if_exists,
            name,
            force,
            span,
        })
    }

    /// Returns what is dropped.
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// Returns true for IF EXISTS.
    #[must_use]
    pub const fn if_exists(&self) -> bool {
        self.if_exists
    }

    /// Returns the object name.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        &self.name
    }

    /// Returns true for FORCE.
    #[must_use]
    pub const fn force(&self) -> bool {
        self.force
    }
}

/// `TRUNCATE TABLE t [PARTITION ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncateStatement {
    name: ObjectName,
    partition: Option<PartitionSpec>,
    span: Span,
}

impl TruncateStatement {
    /// Creates a TRUNCATE.
    ///
    /// # Errors
    ///
    /// Fails if the parts are out of order or outside `span`.
    pub fn new(name: ObjectName, partition: Option<PartitionSpec>, span: Span) -> Result<Self, ParseError> {
        validated(Self {
            name,
            partition,
            span,
        })
    }

    /// Returns the table name.
    #[must_use]
    pub const fn name(&self) -> &ObjectName {
        &self.name
    }

    /// Returns the partitions.
    #[must_use]
    pub const fn partition(&self) -> Option<&PartitionSpec> {
        self.partition.as_ref()
    }
}

/// `LIKE 'pattern'` or `WHERE expr` after SHOW.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowFilter {
    Like(StringLiteral),
    Where(Expr),
}

/// What SHOW lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowTarget {
    /// `SHOW [FULL] TABLES [FROM db] [filter]`
    Tables {
        full: bool,
        database: Option<ObjectName>,
        filter: Option<ShowFilter>,
    },
    /// `SHOW DATABASES [filter]`
    Databases { filter: Option<ShowFilter> },
    /// `SHOW [FULL] COLUMNS FROM t [FROM db] [filter]`
    Columns {
        full: bool,
        table: ObjectName,
        database: Option<ObjectName>,
        filter: Option<ShowFilter>,
    },
    /// `SHOW CREATE TABLE t`
    CreateTable { name: ObjectName },
    /// `SHOW [GLOBAL|SESSION] VARIABLES [filter]`
    Variables {
        scope: Option<VariableScope>,
        filter: Option<ShowFilter>,
    },
}

/// A modelled SHOW statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowStatement {
    target: ShowTarget,
    span: Span,
}

impl ShowStatement {
    /// Creates a SHOW.
    ///
    /// # Errors
    ///
    /// Fails if a variable scope other than GLOBAL or SESSION is given.
    pub fn new(target: ShowTarget, span: Span) -> Result<Self, ParseError> {
        if let ShowTarget::Variables {
            scope: Some(VariableScope::User),
            ..
        } = &target
        {
            return malformed(NodeKind::Show, "user variables cannot be listed", span);
        }
        validated(Self { target, span })
    }

    /// Returns what is listed.
    #[must_use]
    pub const fn target(&self) -> &ShowTarget {
        &self.target
    }
}

/// `DESCRIBE t`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeStatement {
    table: ObjectName,
    span: Span,
}

impl DescribeStatement {
    /// Creates a DESCRIBE.
    ///
    /// # Errors
    ///
    /// Fails if the name lies outside `span`.
    pub fn new(table: ObjectName, span: Span) -> Result<Self, ParseError> {
        validated(Self { table, span })
    }

    /// Returns the described table.
    #[must_use]
    pub const fn table(&self) -> &ObjectName {
        &self.table
    }
}

/// `USE [catalog.]db`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStatement {
    database: ObjectName,
    span: Span,
}

impl UseStatement {
    /// Creates a USE.
    ///
    /// # Errors
    ///
    /// Fails if the name has more than two parts.
    pub fn new(database: ObjectName, span: Span) -> Result<Self, ParseError> {
        if database.parts().len() > 2 {
            return malformed(NodeKind::Use, "USE takes [catalog.]database", span);
        }
        validated(Self { database, span })
    }

    /// Returns the database name.
    #[must_use]
    pub const fn database(&self) -> &ObjectName {
        &self.database
    }
}

/// `SET a = 1, GLOBAL b = 2, @c = 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetStatement {
    assignments: Vec<VariableAssignment>,
    span: Span,
}

impl SetStatement {
    /// Creates a SET.
    ///
    /// # Errors
    ///
    /// Fails if there is no assignment.
    pub fn new(assignments: Vec<VariableAssignment>, span: Span) -> Result<Self, ParseError> {
        if assignments.is_empty() {
            return malformed(NodeKind::SetVariable, "SET has no assignments", span);
        }
        validated(Self { assignments, span })
    }

    /// Returns the assignments.
    #[must_use]
    pub fn assignments(&self) -> &[VariableAssignment] {
        &self.assignments
    }
}

/// Who receives or loses privileges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grantee {
    /// `'user'@'host'`
    User {
        name: StringLiteral,
        host: Option<StringLiteral>,
    },
    /// `ROLE 'name'`
    Role(StringLiteral),
}

impl Grantee {
    fn children(&self) -> Children<'_> {
        match self {
            Self::User { name, host } => Children::new().one("user", name).opt("host", host.as_ref()),
            Self::Role(role) => Children::new().one("role", role),
        }
    }
}

/// The privilege target, such as `db.*` or `*.*.*`, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantObject {
    /// The dotted pattern.
    pub pattern: String,
    /// Where the pattern was written.
    pub span: Span,
}

fn check_privileges(kind: NodeKind, privileges: &[Identifier], span: Span) -> Result<(), ParseError> {
    if privileges.is_empty() {
        return malformed(kind, "no privilege named", span);
    }
    Ok(())
}

/// `GRANT privs ON object TO grantee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantStatement {
    privileges: Vec<Identifier>,
    object: GrantObject,
    grantee: Grantee,
    span: Span,
}

impl GrantStatement {
    /// Creates a GRANT.
    ///
    /// # Errors
    ///
    /// Fails if no privilege is named.
    pub fn new(
        privileges: Vec<Identifier>,
        object: GrantObject,
        grantee: Grantee,
        span: Span,
    ) -> Result<Self, ParseError> {
        check_privileges(NodeKind::Grant, &privileges, span)?;
        validated(Self {
            privileges,
            object,
            grantee,
            span,
        })
    }

    /// Returns the privileges.
    #[must_use]
    pub fn privileges(&self) -> &[Identifier] {
        &self.privileges
    }

    /// Returns the target object.
    #[must_use]
    pub const fn object(&self) -> &GrantObject {
        &self.object
    }

    /// Returns the grantee.
    #[must_use]
    pub const fn grantee(&self) -> &Grantee {
        &self.grantee
    }
}

/// `REVOKE privs ON object FROM grantee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeStatement {
    privileges: Vec<Identifier>,
    object: GrantObject,
    grantee: Grantee,
    span: Span,
}

impl RevokeStatement {
    /// Creates a REVOKE.
    ///
    /// # Errors
    ///
    /// Fails if no privilege is named.
    pub fn new(
        privileges: Vec<Identifier>,
        object: GrantObject,
        grantee: Grantee,
        span: Span,
    ) -> Result<Self, ParseError> {
        check_privileges(NodeKind::Revoke, &privileges, span)?;
        validated(Self {
            privileges,
            object,
            grantee,
            span,
        })
    }

    /// Returns the privileges.
    #[must_use]
    pub fn privileges(&self) -> &[Identifier] {
        &self.privileges
    }

    /// Returns the target object.
    #[must_use]
    pub const fn object(&self) -> &GrantObject {
        &self.object
    }

    /// Returns the grantee.
    #[must_use]
    pub const fn grantee(&self) -> &Grantee {
        &self.grantee
    }
}

/// Transaction control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionAction {
    /// `BEGIN [WITH LABEL l]`
    Begin { label: Option<Identifier> },
    Commit,
    Rollback,
}

/// BEGIN, COMMIT or ROLLBACK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStatement {
    action: TransactionAction,
    span: Span,
}

impl TransactionStatement {
    /// Creates a transaction statement.
    ///
    /// # Errors
    ///
    /// Fails if the label lies outside `span`.
    pub fn new(action: TransactionAction, span: Span) -> Result<Self, ParseError> {
        validated(Self { action, span })
    }

    /// Returns the action.
    #[must_use]
    pub const fn action(&self) -> &TransactionAction {
        &self.action
    }
}

/// EXPLAIN detail levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplainLevel {
    Normal,
    Verbose,
    Graph,
    Plan,
}

/// `EXPLAIN [VERBOSE|GRAPH|PLAN] statement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainStatement {
    level: ExplainLevel,
    statement: Box<Statement>,
    span: Span,
}

impl ExplainStatement {
    /// Creates an EXPLAIN.
    ///
    /// # Errors
    ///
    /// Fails if the explained statement is unsupported or itself an EXPLAIN.
    pub fn new(level: ExplainLevel, statement: Statement, span: Span) -> Result<Self, ParseError> {
        if matches!(statement.canonical(), Statement::Unsupported(_) | Statement::Explain(_)) {
            return malformed(
                NodeKind::Explain,
                format!("{} cannot be explained", statement.kind()),
                statement.span(),
            );
        }
        validated(Self {
            level,
            statement: Box::new(statement),
            span,
        })
    }

    /// Returns the detail level.
    #[must_use]
    pub const fn level(&self) -> ExplainLevel {
        self.level
    }

    /// Returns the explained statement.
    #[must_use]
    pub fn statement(&self) -> &Statement {
        &self.statement
    }
}

/// What KILL terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KillTarget {
    Connection,
    Query,
}

/// `KILL [CONNECTION|QUERY] id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillStatement {
    target: KillTarget,
    id: Literal,
    span: Span,
}

impl KillStatement {
    /// Creates a KILL.
    ///
    /// # Errors
    ///
    /// Fails unless `id` is an integer or string literal.
    pub fn new(target: KillTarget, id: Literal, span: Span) -> Result<Self, ParseError> {
        if !matches!(id, Literal::Integer(_) | Literal::String(_)) {
            return malformed(NodeKind::Kill, "KILL takes a connection or query id", id.span());
        }
        validated(Self { target, id, span })
    }

    /// Returns what is terminated.
    #[must_use]
    pub const fn target(&self) -> KillTarget {
        self.target
    }

    /// Returns the id.
    #[must_use]
    pub const fn id(&self) -> &Literal {
        &self.id
    }
}

/// Alternate spellings of canonical statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasSyntax {
    /// `DESC t` for `DESCRIBE t`
    Desc,
    /// `SHOW SCHEMAS` for `SHOW DATABASES`
    ShowSchemas,
    /// `SHOW [FULL] FIELDS` for `SHOW [FULL] COLUMNS`
    ShowFields,
    /// `CREATE SCHEMA` for `CREATE DATABASE`
    CreateSchema,
    /// `DROP SCHEMA` for `DROP DATABASE`
    DropSchema,
    /// `START TRANSACTION` for `BEGIN`
    StartTransaction,
}

impl AliasSyntax {
    /// Every alias, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::Desc,
        Self::ShowSchemas,
        Self::ShowFields,
        Self::CreateSchema,
        Self::DropSchema,
        Self::StartTransaction,
    ];

    /// Returns the kind of the statement this spelling stands for.
    #[must_use]
    pub const fn canonical_kind(&self) -> NodeKind {
        match self {
            Self::Desc => NodeKind::Describe,
            Self::ShowSchemas | Self::ShowFields => NodeKind::Show,
            Self::CreateSchema => NodeKind::CreateDatabase,
            Self::DropSchema => NodeKind::Drop,
            Self::StartTransaction => NodeKind::Transaction,
        }
    }

    /// Returns the alias keywords and the canonical keywords they replace.
    #[must_use]
    pub const fn spelling(&self) -> (&'static str, &'static str) {
        match self {
            Self::Desc => ("DESC", "DESCRIBE"),
            Self::ShowSchemas => ("SHOW SCHEMAS", "SHOW DATABASES"),
            Self::ShowFields => ("FIELDS", "COLUMNS"),
            Self::CreateSchema => ("CREATE SCHEMA", "CREATE DATABASE"),
            Self::DropSchema => ("DROP SCHEMA", "DROP DATABASE"),
            Self::StartTransaction => ("START TRANSACTION", "BEGIN"),
        }
    }

    /// Returns true if `statement` has exactly the shape this alias stands for.
    #[must_use]
    pub fn accepts(&self, statement: &Statement) -> bool {
        match (self, statement) {
            (Self::Desc, Statement::Describe(_)) | (Self::CreateSchema, Statement::CreateDatabase(_)) => {
                true
            }
            (Self::ShowSchemas, Statement::Show(show)) => {
                matches!(show.target, ShowTarget::Databases { .. })
            }
            (Self::ShowFields, Statement::Show(show)) => {
                matches!(show.target, ShowTarget::Columns { .. })
            }
            (Self::DropSchema, Statement::Drop(drop)) => drop.object_type == ObjectType::Database,
            (Self::StartTransaction, Statement::Transaction(transaction)) => {
                matches!(transaction.action, TransactionAction::Begin { .. })
            }
            _ => false,
        }
    }
}

/// An alternate spelling wrapping the canonical statement it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasStatement {
    syntax: AliasSyntax,
    statement: Box<Statement>,
    span: Span,
}

impl AliasStatement {
    /// Wraps `statement`, which shares the alias's span.
    ///
    /// # Errors
    ///
    /// Fails if `statement` is not the canonical form of `syntax`.
    pub fn new(syntax: AliasSyntax, statement: Statement) -> Result<Self, ParseError> {
        let span = statement.span();
        if !syntax.accepts(&statement) {
            return malformed(
                NodeKind::Alias,
                format!(
                    "{} cannot stand for {}, expected {}",
                    syntax.spelling().0,
                    statement.kind(),
                    syntax.canonical_kind()
                ),
                span,
            );
        }
        validated(Self {
            syntax,
            statement: Box::new(statement),
            span,
        })
    }

    /// Returns the spelling used.
    #[must_use]
    pub const fn syntax(&self) -> AliasSyntax {
        self.syntax
    }

    /// Returns the canonical statement.
    #[must_use]
    pub fn statement(&self) -> &Statement {
        &self.statement
    }
}

/// A statement recognized by its leading keywords but not modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedStatement {
    statement_type: String,
    text: String,
    span: Span,
}

impl UnsupportedStatement {
    /// Creates an unsupported statement.
    ///
    /// # Errors
    ///
    /// Fails if `statement_type` is empty.
    pub fn new(
        statement_type: impl Into<String>,
        text: impl Into<String>,
        span: Span,
    ) -> Result<Self, ParseError> {
        let statement_type = statement_type.into();
        if statement_type.is_empty() {
            return malformed(NodeKind::Unsupported, "statement type is empty", span);
        }
        validated(Self {
            statement_type,
            text: text.into(),
            span,
        })
    }

    /// Returns the leading keywords, such as `"LOAD"` or `"CREATE USER"`.
    #[must_use]
    pub fn statement_type(&self) -> &str {
        &self.statement_type
    }

    /// Returns the raw statement text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Node for InsertStatement {
    const KIND: NodeKind = NodeKind::Insert;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        let children = Children::new()
            .one("table", &self.table)
            .opt("partition", self.partition.as_ref())
            .opt("label", self.label.as_ref())
            .many("column", &self.columns);
        match &self.source {
            InsertSource::Values(values) => children.one("values", values),
            InsertSource::Query(query) => children.one("query", query),
        }
        .finish()
    }
}

impl Node for UpdateStatement {
    const KIND: NodeKind = NodeKind::Update;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("table", &self.table)
            .opt("alias", self.alias.as_ref())
            .many("assignment", &self.assignments)
            .opt("from", self.from.as_ref())
            .opt("where", self.selection.as_ref())
            .finish()
    }
}

impl Node for DeleteStatement {
    const KIND: NodeKind = NodeKind::Delete;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("table", &self.table)
            .opt("partition", self.partition.as_ref())
            .opt("using", self.using.as_ref())
            .opt("where", self.selection.as_ref())
            .finish()
    }
}

impl Node for CreateTableStatement {
    const KIND: NodeKind = NodeKind::CreateTable;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .many("column", &self.columns)
            .opt("engine", self.engine.as_ref())
            .opt("keys", self.keys.as_ref())
            .opt("comment", self.comment.as_ref())
            .opt("distribution", self.distribution.as_ref())
            .opt("properties", self.properties.as_ref())
            .opt("query", self.as_query.as_ref())
            .finish()
    }
}

impl Node for CreateViewStatement {
    const KIND: NodeKind = NodeKind::CreateView;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .many("column", &self.columns)
            .opt("comment", self.comment.as_ref())
            .one("query", &self.query)
            .finish()
    }
}

impl Node for CreateDatabaseStatement {
    const KIND: NodeKind = NodeKind::CreateDatabase;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .opt("properties", self.properties.as_ref())
            .finish()
    }
}

impl Node for AlterTableStatement {
    const KIND: NodeKind = NodeKind::AlterTable;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .many("action", &self.actions)
            .finish()
    }
}

impl Node for DropStatement {
    const KIND: NodeKind = NodeKind::Drop;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("name", &self.name).finish()
    }
}

impl Node for TruncateStatement {
    const KIND: NodeKind = NodeKind::Truncate;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new()
            .one("name", &self.name)
            .opt("partition", self.partition.as_ref())
            .finish()
    }
}

fn with_filter<'a>(children: Children<'a>, filter: Option<&'a ShowFilter>) -> Children<'a> {
    match filter {
        Some(ShowFilter::Like(pattern)) => children.one("like", pattern),
        Some(ShowFilter::Where(condition)) => children.one("where", condition),
        None => children,
    }
}

impl Node for ShowStatement {
    const KIND: NodeKind = NodeKind::Show;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        let children = Children::new();
        let children = match &self.target {
            ShowTarget::Tables {
                database, filter, ..
            } => with_filter(children.opt("database", database.as_ref()), filter.as_ref()),
            ShowTarget::Databases { filter } | ShowTarget::Variables { filter, .. } => {
                with_filter(children, filter.as_ref())
            }
            ShowTarget::Columns {
                table,
                database,
                filter,
                ..
            } => with_filter(
                children.one("table", table).opt("database", database.as_ref()),
                filter.as_ref(),
            ),
            ShowTarget::CreateTable { name } => children.one("table", name),
        };
        children.finish()
    }
}

impl Node for DescribeStatement {
    const KIND: NodeKind = NodeKind::Describe;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("table", &self.table).finish()
    }
}

impl Node for UseStatement {
    const KIND: NodeKind = NodeKind::Use;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("database", &self.database).finish()
    }
}

impl Node for SetStatement {
    const KIND: NodeKind = NodeKind::SetVariable;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().many("assignment", &self.assignments).finish()
    }
}

impl Node for GrantStatement {
    const KIND: NodeKind = NodeKind::Grant;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        let mut children = Children::new().many("privilege", &self.privileges).finish();
        children.extend(self.grantee.children().finish());
        children
    }
}

impl Node for RevokeStatement {
    const KIND: NodeKind = NodeKind::Revoke;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        let mut children = Children::new().many("privilege", &self.privileges).finish();
        children.extend(self.grantee.children().finish());
        children
    }
}

impl Node for TransactionStatement {
    const KIND: NodeKind = NodeKind::Transaction;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        match &self.action {
            TransactionAction::Begin { label } => {
                Children::new().opt("label", label.as_ref()).finish()
            }
            TransactionAction::Commit | TransactionAction::Rollback => Vec::new(),
        }
    }
}

impl Node for ExplainStatement {
    const KIND: NodeKind = NodeKind::Explain;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("statement", &*self.statement).finish()
    }
}

impl Node for KillStatement {
    const KIND: NodeKind = NodeKind::Kill;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("id", &self.id).finish()
    }
}

impl Node for AliasStatement {
    const KIND: NodeKind = NodeKind::Alias;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Children::new().one("canonical", &*self.statement).finish()
    }
}

impl Node for UnsupportedStatement {
    const KIND: NodeKind = NodeKind::Unsupported;

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<Child<'_>> {
        Vec::new()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(s) => s.fmt(f),
            Self::Insert(s) => s.fmt(f),
            Self::Update(s) => s.fmt(f),
            Self::Delete(s) => s.fmt(f),
            Self::CreateTable(s) => s.fmt(f),
            Self::CreateView(s) => s.fmt(f),
            Self::CreateDatabase(s) => s.fmt(f),
            Self::AlterTable(s) => s.fmt(f),
            Self::Drop(s) => s.fmt(f),
            Self::Truncate(s) => s.fmt(f),
            Self::Show(s) => s.fmt(f),
            Self::Describe(s) => s.fmt(f),
            Self::Use(s) => s.fmt(f),
            Self::Set(s) => s.fmt(f),
            Self::Grant(s) => s.fmt(f),
            Self::Revoke(s) => s.fmt(f),
            Self::Transaction(s) => s.fmt(f),
            Self::Explain(s) => s.fmt(f),
            Self::Kill(s) => s.fmt(f),
            Self::Alias(s) => s.fmt(f),
            Self::Unsupported(s) => s.fmt(f),
        }
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overwrite {
            write!(f, "INSERT OVERWRITE TABLE {}", self.table)?;
        } else {
            write!(f, "INSERT INTO {}", self.table)?;
        }
        if let Some(partition) = &self.partition {
            write!(f, " {partition}")?;
        }
        if let Some(label) = &self.label {
            write!(f, " WITH LABEL {label}")?;
        }
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            write_separated(f, &self.columns, ", ")?;
            f.write_str(")")?;
        }
        match &self.source {
            InsertSource::Values(values) => write!(f, " {values}"),
            InsertSource::Query(query) => write!(f, " {query}"),
        }
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {}", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        f.write_str(" SET ")?;
        write_separated(f, &self.assignments, ", ")?;
        if let Some(from) = &self.from {
            write!(f, " {from}")?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " {selection}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(partition) = &self.partition {
            write!(f, " {partition}")?;
        }
        if let Some(using) = &self.using {
            // FromClause renders with a FROM keyword
            let text = using.to_string();
            write!(f, " USING {}", text.strip_prefix("FROM ").unwrap_or(&text))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " {selection}")?;
        }
        Ok(())
    }
}

const fn if_not_exists(flag: bool) -> &'static str {
    if flag {
        "IF NOT EXISTS "
    } else {
        ""
    }
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.external {
            f.write_str("EXTERNAL ")?;
        }
        write!(f, "TABLE {}{}", if_not_exists(self.if_not_exists), self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            write_separated(f, &self.columns, ", ")?;
            f.write_str(")")?;
        }
        if let Some(engine) = &self.engine {
            write!(f, " ENGINE = {engine}")?;
        }
        if let Some(keys) = &self.keys {
            write!(f, " {keys}")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT {comment}")?;
        }
        if let Some(distribution) = &self.distribution {
            write!(f, " {distribution}")?;
        }
        if let Some(properties) = &self.properties {
            write!(f, " PROPERTIES {properties}")?;
        }
        if let Some(query) = &self.as_query {
            write!(f, " AS {query}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE VIEW {}{}", if_not_exists(self.if_not_exists), self.name)?;
        if !self.columns.is_empty() {
            f.write_str(" (")?;
            write_separated(f, &self.columns, ", ")?;
            f.write_str(")")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT {comment}")?;
        }
        write!(f, " AS {}", self.query)
    }
}

impl fmt::Display for CreateDatabaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE DATABASE {}{}", if_not_exists(self.if_not_exists), self.name)?;
        if let Some(properties) = &self.properties {
            write!(f, " PROPERTIES {properties}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} ", self.name)?;
        write_separated(f, &self.actions, ", ")
    }
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP {} ", self.object_type.as_str())?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        if self.force {
            f.write_str(" FORCE")?;
        }
        Ok(())
    }
}

impl fmt::Display for TruncateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRUNCATE TABLE {}", self.name)?;
        if let Some(partition) = &self.partition {
            write!(f, " {partition}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ShowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like(pattern) => write!(f, "LIKE {pattern}"),
            Self::Where(condition) => write!(f, "WHERE {condition}"),
        }
    }
}

fn write_filter(f: &mut fmt::Formatter<'_>, filter: Option<&ShowFilter>) -> fmt::Result {
    match filter {
        Some(filter) => write!(f, " {filter}"),
        None => Ok(()),
    }
}

const fn full(flag: bool) -> &'static str {
    if flag {
        "FULL "
    } else {
        ""
    }
}

impl fmt::Display for ShowStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SHOW ")?;
        match &self.target {
            ShowTarget::Tables {
                full: is_full,
                database,
                filter,
            } => {
                write!(f, "{}TABLES", full(*is_full))?;
                if let Some(database) = database {
                    write!(f, " FROM {database}")?;
                }
                write_filter(f, filter.as_ref())
            }
            ShowTarget::Databases { filter } => {
                f.write_str("DATABASES")?;
                write_filter(f, filter.as_ref())
            }
            ShowTarget::Columns {
                full: is_full,
                table,
                database,
                filter,
            } => {
                write!(f, "{}COLUMNS FROM {table}", full(*is_full))?;
                if let Some(database) = database {
                    write!(f, " FROM {database}")?;
                }
                write_filter(f, filter.as_ref())
            }
            ShowTarget::CreateTable { name } => write!(f, "CREATE TABLE {name}"),
            ShowTarget::Variables { scope, filter } => {
                match scope {
                    Some(VariableScope::Global) => f.write_str("GLOBAL ")?,
                    Some(VariableScope::Session) => f.write_str("SESSION ")?,
                    _ => {}
                }
                f.write_str("VARIABLES")?;
                write_filter(f, filter.as_ref())
            }
        }
    }
}

impl fmt::Display for DescribeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DESCRIBE {}", self.table)
    }
}

impl fmt::Display for UseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "USE {}", self.database)
    }
}

impl fmt::Display for SetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SET ")?;
        write_separated(f, &self.assignments, ", ")
    }
}

impl fmt::Display for Grantee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User { name, host } => {
                write!(f, "{name}")?;
                if let Some(host) = host {
                    write!(f, "@{host}")?;
                }
                Ok(())
            }
            Self::Role(role) => write!(f, "ROLE {role}"),
        }
    }
}

impl fmt::Display for GrantStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GRANT ")?;
        write_separated(f, &self.privileges, ", ")?;
        write!(f, " ON {} TO {}", self.object.pattern, self.grantee)
    }
}

impl fmt::Display for RevokeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("REVOKE ")?;
        write_separated(f, &self.privileges, ", ")?;
        write!(f, " ON {} FROM {}", self.object.pattern, self.grantee)
    }
}

impl fmt::Display for TransactionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            TransactionAction::Begin { label: Some(label) } => write!(f, "BEGIN WITH LABEL {label}"),
            TransactionAction::Begin { label: None } => f.write_str("BEGIN"),
            TransactionAction::Commit => f.write_str("COMMIT"),
            TransactionAction::Rollback => f.write_str("ROLLBACK"),
        }
    }
}

impl fmt::Display for ExplainStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EXPLAIN ")?;
        match self.level {
            ExplainLevel::Normal => {}
            ExplainLevel::Verbose => f.write_str("VERBOSE ")?,
            ExplainLevel::Graph => f.write_str("GRAPH ")?,
            ExplainLevel::Plan => f.write_str("PLAN ")?,
        }
        write!(f, "{}", self.statement)
    }
}

impl fmt::Display for KillStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            KillTarget::Connection => write!(f, "KILL {}", self.id),
            KillTarget::Query => write!(f, "KILL QUERY {}", self.id),
        }
    }
}

impl fmt::Display for AliasStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (alias, canonical) = self.syntax.spelling();
        f.write_str(&self.statement.to_string().replacen(canonical, alias, 1))
    }
}

impl fmt::Display for UnsupportedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
