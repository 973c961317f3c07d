//! The Doris SQL node model.
//!
//! Nodes are immutable once built. Every node type has a validating
//! constructor, read-only accessors, a [`Node`] implementation describing its
//! children in source order and a `Display` implementation that renders
//! normalized SQL.

mod clause;
mod expression;
mod identifier;
mod literal;
mod node;
mod query;
mod statement;
mod types;

use core::fmt;

pub use clause::{
    AlterOperation, AlterTableAction, Assignment, Buckets, ColumnDef, DistributionClause,
    DistributionMethod, FrameBound, FrameUnits, KeyType, KeysClause, PartitionSpec, Property,
    PropertyList, ValuesClause, VariableAssignment, VariableScope, WhenClause, WindowFrame,
    WindowSpec,
};
pub use expression::{
    ArrayExpr, ArraySliceExpr, BetweenExpr, BinaryExpr, BinaryOp, CaseExpr, CastExpr, CastStyle,
    ColumnRef, DereferenceExpr, ElementAtExpr, ExistsExpr, Expr, FunctionCall, InListExpr,
    InSubqueryExpr, IntervalExpr, IntervalUnit, IsNullExpr, LambdaExpr, LikeExpr, LikeOp,
    MapExpr, MatchExpr, MatchOp, NestedExpr, Parameter, Precedence, StructExpr, SubqueryExpr,
    UnaryExpr, UnaryOp, WindowExpr, Wildcard,
};
pub use identifier::{ErrorCapturingIdent, Ident, Identifier, ObjectName, QuotedIdent};
pub use literal::{
    BooleanLiteral, DecimalLiteral, IntegerLiteral, Literal, NullLiteral, StringLiteral,
    TypedLiteral,
};
pub(crate) use node::for_each_node_kind;
pub use node::{Child, Children, Family, Node, NodeKind, NodeRef};
pub use query::{
    Cte, DerivedTable, FromClause, GroupByClause, HavingClause, Join, JoinCriteria, JoinType,
    LateralView, LimitClause, LimitStyle, NamedTable, NullsOrder, OrderByClause, OrderItem, Query,
    QueryBody, Relation, Select, SelectItem, SelectList, SetOperation, SetOperator,
    SetQuantifier, SortDirection, TableFactor, WhereClause, With,
};
pub use statement::{
    AliasStatement, AliasSyntax, AlterTableStatement, CreateDatabaseStatement,
    CreateTableStatement, CreateViewStatement, DeleteStatement, DescribeStatement, DropStatement,
    ExplainLevel, ExplainStatement, GrantObject, GrantStatement, Grantee, InsertSource,
    InsertStatement, KillStatement, KillTarget, ObjectType, RevokeStatement, SetStatement,
    ShowFilter, ShowStatement, ShowTarget, Statement, TableOptions, TransactionAction,
    TransactionStatement, TruncateStatement, UnsupportedStatement, UpdateStatement,
    UseStatement,
};
pub use types::{DataType, StructField};

/// Writes `items` separated by `sep`.
pub(crate) fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        item.fmt(f)?;
    }
    Ok(())
}
