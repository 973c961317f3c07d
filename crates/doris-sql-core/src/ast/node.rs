//! The closed set of node kinds and the generic node view.
//!
//! Every node type is declared exactly once in [`for_each_node_kind`]. The
//! kind enum, the borrowed [`NodeRef`] view, the conversions into it and the
//! visitor surface in [`crate::visit`] are all generated from that one list,
//! so adding a kind without a visit method (or the reverse) does not compile.

use core::fmt;

use serde::Serialize;

use crate::error::ParseError;
use crate::lexer::Span;

/// Invokes `$callback!` with the full node-kind table, grouped by family.
///
/// Each entry is `Variant(Type) => visit_method`.
macro_rules! for_each_node_kind {
    ($callback:ident) => {
        $callback! {
            Statement {
                Query($crate::ast::Query) => visit_query,
                Insert($crate::ast::InsertStatement) => visit_insert,
                Update($crate::ast::UpdateStatement) => visit_update,
                Delete($crate::ast::DeleteStatement) => visit_delete,
                CreateTable($crate::ast::CreateTableStatement) => visit_create_table,
                CreateView($crate::ast::CreateViewStatement) => visit_create_view,
                CreateDatabase($crate::ast::CreateDatabaseStatement) => visit_create_database,
                AlterTable($crate::ast::AlterTableStatement) => visit_alter_table,
                Drop($crate::ast::DropStatement) => visit_drop,
                Truncate($crate::ast::TruncateStatement) => visit_truncate,
                Show($crate::ast::ShowStatement) => visit_show,
                Describe($crate::ast::DescribeStatement) => visit_describe,
                Use($crate::ast::UseStatement) => visit_use,
                SetVariable($crate::ast::SetStatement) => visit_set_variable,
                Grant($crate::ast::GrantStatement) => visit_grant,
                Revoke($crate::ast::RevokeStatement) => visit_revoke,
                Transaction($crate::ast::TransactionStatement) => visit_transaction,
                Explain($crate::ast::ExplainStatement) => visit_explain,
                Kill($crate::ast::KillStatement) => visit_kill,
                Alias($crate::ast::AliasStatement) => visit_alias,
            }
            Unsupported {
                Unsupported($crate::ast::UnsupportedStatement) => visit_unsupported,
            }
            Clause {
                Select($crate::ast::Select) => visit_select,
                SetOperation($crate::ast::SetOperation) => visit_set_operation,
                With($crate::ast::With) => visit_with,
                Cte($crate::ast::Cte) => visit_cte,
                SelectList($crate::ast::SelectList) => visit_select_list,
                SelectItem($crate::ast::SelectItem) => visit_select_item,
                From($crate::ast::FromClause) => visit_from,
                Relation($crate::ast::Relation) => visit_relation,
                TableReference($crate::ast::NamedTable) => visit_table_reference,
                DerivedTable($crate::ast::DerivedTable) => visit_derived_table,
                Join($crate::ast::Join) => visit_join,
                LateralView($crate::ast::LateralView) => visit_lateral_view,
                Where($crate::ast::WhereClause) => visit_where,
                GroupBy($crate::ast::GroupByClause) => visit_group_by,
                Having($crate::ast::HavingClause) => visit_having,
                OrderBy($crate::ast::OrderByClause) => visit_order_by,
                OrderItem($crate::ast::OrderItem) => visit_order_item,
                Limit($crate::ast::LimitClause) => visit_limit,
                WindowSpec($crate::ast::WindowSpec) => visit_window_spec,
                WindowFrame($crate::ast::WindowFrame) => visit_window_frame,
                When($crate::ast::WhenClause) => visit_when,
                PropertyList($crate::ast::PropertyList) => visit_property_list,
                Property($crate::ast::Property) => visit_property,
                PartitionSpec($crate::ast::PartitionSpec) => visit_partition_spec,
                ColumnDef($crate::ast::ColumnDef) => visit_column_def,
                Keys($crate::ast::KeysClause) => visit_keys,
                Distribution($crate::ast::DistributionClause) => visit_distribution,
                Assignment($crate::ast::Assignment) => visit_assignment,
                Values($crate::ast::ValuesClause) => visit_values,
                VariableAssignment($crate::ast::VariableAssignment) => visit_variable_assignment,
                AlterAction($crate::ast::AlterTableAction) => visit_alter_action,
            }
            Expression {
                ColumnRef($crate::ast::ColumnRef) => visit_column_ref,
                Wildcard($crate::ast::Wildcard) => visit_wildcard,
                Parameter($crate::ast::Parameter) => visit_parameter,
                Binary($crate::ast::BinaryExpr) => visit_binary,
                Unary($crate::ast::UnaryExpr) => visit_unary,
                IsNull($crate::ast::IsNullExpr) => visit_is_null,
                Between($crate::ast::BetweenExpr) => visit_between,
                InList($crate::ast::InListExpr) => visit_in_list,
                InSubquery($crate::ast::InSubqueryExpr) => visit_in_subquery,
                Like($crate::ast::LikeExpr) => visit_like,
                Match($crate::ast::MatchExpr) => visit_match,
                Exists($crate::ast::ExistsExpr) => visit_exists,
                Subquery($crate::ast::SubqueryExpr) => visit_subquery,
                FunctionCall($crate::ast::FunctionCall) => visit_function_call,
                Window($crate::ast::WindowExpr) => visit_window,
                Cast($crate::ast::CastExpr) => visit_cast,
                Case($crate::ast::CaseExpr) => visit_case,
                Interval($crate::ast::IntervalExpr) => visit_interval,
                Array($crate::ast::ArrayExpr) => visit_array,
                Map($crate::ast::MapExpr) => visit_map,
                Struct($crate::ast::StructExpr) => visit_struct,
                Lambda($crate::ast::LambdaExpr) => visit_lambda,
                ElementAt($crate::ast::ElementAtExpr) => visit_element_at,
                ArraySlice($crate::ast::ArraySliceExpr) => visit_array_slice,
                Dereference($crate::ast::DereferenceExpr) => visit_dereference,
                Nested($crate::ast::NestedExpr) => visit_nested,
            }
            Literal {
                Integer($crate::ast::IntegerLiteral) => visit_integer_literal,
                Decimal($crate::ast::DecimalLiteral) => visit_decimal_literal,
                String($crate::ast::StringLiteral) => visit_string_literal,
                Boolean($crate::ast::BooleanLiteral) => visit_boolean_literal,
                Null($crate::ast::NullLiteral) => visit_null_literal,
                Typed($crate::ast::TypedLiteral) => visit_typed_literal,
            }
            Identifier {
                Identifier($crate::ast::Ident) => visit_identifier,
                QuotedIdentifier($crate::ast::QuotedIdent) => visit_quoted_identifier,
                ErrorCapturingIdentifier($crate::ast::ErrorCapturingIdent) => visit_error_capturing_identifier,
                MultipartIdentifier($crate::ast::ObjectName) => visit_multipart_identifier,
            }
        }
    };
}

pub(crate) use for_each_node_kind;

/// The variant family a node kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    /// A complete statement.
    Statement,
    /// A statement recognized only by its leading keywords.
    Unsupported,
    /// A clause or other structural part of a statement.
    Clause,
    /// A value expression.
    Expression,
    /// A literal value.
    Literal,
    /// A name.
    Identifier,
}

macro_rules! define_node_kinds {
    ($($family:ident { $($variant:ident($ty:ty) => $visit:ident),* $(,)? })*) => {
        /// The closed set of node kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum NodeKind {
            $($(
                #[doc = concat!("A `", stringify!($variant), "` node.")]
                $variant,
            )*)*
        }

        impl NodeKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [Self] = &[$($(Self::$variant,)*)*];

            /// Returns the family this kind belongs to.
            #[must_use]
            pub const fn family(self) -> Family {
                match self {
                    $($(Self::$variant => Family::$family,)*)*
                }
            }

            /// Returns the kind name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $($(Self::$variant => stringify!($variant),)*)*
                }
            }

            /// Returns the name of the visitor method dispatched for this kind.
            #[must_use]
            pub const fn visit_method(self) -> &'static str {
                match self {
                    $($(Self::$variant => stringify!($visit),)*)*
                }
            }
        }

        /// A borrowed, kind-tagged view of any node in a tree.
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $($(
                #[doc = concat!("A borrowed `", stringify!($variant), "` node.")]
                $variant(&'a $ty),
            )*)*
        }

        impl<'a> NodeRef<'a> {
            /// Returns the kind of the node.
            #[must_use]
            pub const fn kind(&self) -> NodeKind {
                match self {
                    $($(Self::$variant(_) => NodeKind::$variant,)*)*
                }
            }

            /// Returns the source span of the node.
            #[must_use]
            pub fn span(&self) -> Span {
                match self {
                    $($(Self::$variant(node) => Node::span(*node),)*)*
                }
            }

            /// Returns the node's children with their roles, in source order.
            #[must_use]
            pub fn children_with_roles(&self) -> Vec<Child<'a>> {
                match self {
                    $($(Self::$variant(node) => Node::children(*node),)*)*
                }
            }
        }

        $($(
            impl<'a> From<&'a $ty> for NodeRef<'a> {
                fn from(node: &'a $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )*)*
    };
}

for_each_node_kind!(define_node_kinds);

impl NodeKind {
    /// Returns true for kinds that only occur as statement roots.
    #[must_use]
    pub const fn is_statement(self) -> bool {
        matches!(self.family(), Family::Statement | Family::Unsupported)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a> NodeRef<'a> {
    /// Returns the family of the node.
    #[must_use]
    pub const fn family(&self) -> Family {
        self.kind().family()
    }

    /// Returns the child nodes in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        self.children_with_roles()
            .into_iter()
            .map(|child| child.node)
            .collect()
    }

    /// Returns the first child playing `role`.
    #[must_use]
    pub fn child(&self, role: &str) -> Option<NodeRef<'a>> {
        self.children_with_roles()
            .into_iter()
            .find(|child| child.role == role)
            .map(|child| child.node)
    }

    /// Returns every child playing `role`, in source order.
    #[must_use]
    pub fn children_with_role(&self, role: &str) -> Vec<NodeRef<'a>> {
        self.children_with_roles()
            .into_iter()
            .filter(|child| child.role == role)
            .map(|child| child.node)
            .collect()
    }

    /// Returns every node of the subtree rooted here, in pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let mut stack = vec![*self];
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut children = node.children();
            children.reverse();
            stack.extend(children);
        }
        out
    }
}

/// A child node together with the role it plays in its parent.
#[derive(Debug, Clone, Copy)]
pub struct Child<'a> {
    /// The role name, such as `"left"` or `"condition"`.
    pub role: &'static str,
    /// The child node.
    pub node: NodeRef<'a>,
}

/// Structural access shared by every node type.
pub trait Node {
    /// The kind of this node type.
    const KIND: NodeKind;

    /// Returns the source span.
    fn span(&self) -> Span;

    /// Returns the children with their roles, in source order.
    fn children(&self) -> Vec<Child<'_>>;
}

/// Builder for a node's ordered child list.
#[derive(Debug, Default)]
pub struct Children<'a>(Vec<Child<'a>>);

impl<'a> Children<'a> {
    /// Starts an empty child list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends one child.
    #[must_use]
    pub fn one(mut self, role: &'static str, node: impl Into<NodeRef<'a>>) -> Self {
        self.0.push(Child {
            role,
            node: node.into(),
        });
        self
    }

    /// Appends a child if present.
    #[must_use]
    pub fn opt<T>(self, role: &'static str, node: Option<&'a T>) -> Self
    where
        &'a T: Into<NodeRef<'a>>,
    {
        match node {
            Some(node) => self.one(role, node),
            None => self,
        }
    }

    /// Appends every node of `nodes`.
    #[must_use]
    pub fn many<T: 'a>(mut self, role: &'static str, nodes: impl IntoIterator<Item = &'a T>) -> Self
    where
        &'a T: Into<NodeRef<'a>>,
    {
        self.0.extend(nodes.into_iter().map(|node| Child {
            role,
            node: node.into(),
        }));
        self
    }

    /// Returns the finished list.
    #[must_use]
    pub fn finish(self) -> Vec<Child<'a>> {
        self.0
    }
}

/// Checks the span invariant of a freshly built node and returns it.
///
/// Every child span must lie inside the parent span, and siblings must be in
/// source order without overlapping.
pub(crate) fn validated<T: Node>(node: T) -> Result<T, ParseError> {
    check_spans(&node)?;
    Ok(node)
}

fn check_spans<T: Node>(node: &T) -> Result<(), ParseError> {
    let span = node.span();
    if span.start > span.end {
        return Err(ParseError::malformed(
            format!("{} has an inverted span {span}", T::KIND),
            span,
        ));
    }
    let mut previous_end = span.start;
    for child in node.children() {
        let child_span = child.node.span();
        if !span.contains(child_span) {
            return Err(ParseError::malformed(
                format!(
                    "{} child '{}' at {child_span} lies outside its parent at {span}",
                    T::KIND,
                    child.role
                ),
                child_span,
            ));
        }
        if child_span.start < previous_end {
            return Err(ParseError::malformed(
                format!(
                    "{} child '{}' at {child_span} overlaps or precedes an earlier sibling",
                    T::KIND,
                    child.role
                ),
                child_span,
            ));
        }
        previous_end = child_span.end;
    }
    Ok(())
}

/// Shorthand for a kind-specific constraint violation.
pub(crate) fn malformed<T>(
    kind: NodeKind,
    message: impl fmt::Display,
    span: Span,
) -> Result<T, ParseError> {
    Err(ParseError::malformed(format!("{kind}: {message}"), span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_visit_methods_are_unique() {
        let methods: HashSet<&str> = NodeKind::ALL.iter().map(|k| k.visit_method()).collect();
        assert_eq!(methods.len(), NodeKind::ALL.len());
        for kind in NodeKind::ALL {
            assert!(kind.visit_method().starts_with("visit_"));
        }
    }

    #[test]
    fn test_families() {
        assert_eq!(NodeKind::Query.family(), Family::Statement);
        assert_eq!(NodeKind::Unsupported.family(), Family::Unsupported);
        assert_eq!(NodeKind::Select.family(), Family::Clause);
        assert_eq!(NodeKind::Binary.family(), Family::Expression);
        assert_eq!(NodeKind::Typed.family(), Family::Literal);
        assert_eq!(NodeKind::MultipartIdentifier.family(), Family::Identifier);
        assert!(NodeKind::Alias.is_statement());
        assert!(!NodeKind::Where.is_statement());
    }

    #[test]
    fn test_every_family_is_populated() {
        let families: HashSet<Family> = NodeKind::ALL.iter().map(|k| k.family()).collect();
        assert_eq!(families.len(), 6);
    }
}
