//! Translation of simple SELECT statements into a [`QueryModel`].
//!
//! Only a single SELECT over at most one named table translates. Every node
//! kind is checked in [`ModelTranslator::visit_node`] against the set the
//! model can express; anything outside it is a translation error pointing at
//! the offending node.

use doris_sql_core::ast::{
    Expr, FromClause, GroupByClause, HavingClause, LimitClause, Literal, NamedTable, NodeKind,
    NodeRef, OrderByClause, Query, Select, SelectList, Statement, WhereClause,
};
use doris_sql_core::visit::{combine, dispatch, walk, Visitor};
use tracing::debug;

use crate::error::{PassError, Result};
use crate::model::{Field, OrderField, QueryModel};

/// A translated piece of a query.
#[derive(Debug)]
pub enum Part {
    /// A whole query.
    Model(QueryModel),
    /// The FROM table.
    Table(String),
    /// The select list.
    Fields(Vec<Field>),
    /// The WHERE condition.
    Condition(String),
    /// The GROUP BY expressions.
    GroupBy(Vec<String>),
    /// The HAVING condition.
    Having(String),
    /// The ORDER BY keys.
    OrderBy(Vec<OrderField>),
    /// LIMIT and its optional OFFSET.
    Limit { limit: u64, offset: Option<u64> },
}

impl Part {
    fn apply_to(self, model: &mut QueryModel) {
        match self {
            Self::Model(inner) => *model = inner,
            Self::Table(table) => model.table = Some(table),
            Self::Fields(fields) => model.fields = fields,
            Self::Condition(condition) => model.condition = Some(condition),
            Self::GroupBy(exprs) => model.group_by = exprs,
            Self::Having(condition) => model.having = Some(condition),
            Self::OrderBy(fields) => model.order_by = fields,
            Self::Limit { limit, offset } => {
                model.limit = Some(limit);
                model.offset = offset;
            }
        }
    }
}

/// Why a node kind cannot be translated, or `None` if it can.
const fn rejection(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Query
        | NodeKind::Select
        | NodeKind::SelectList
        | NodeKind::SelectItem
        | NodeKind::From
        | NodeKind::Relation
        | NodeKind::TableReference
        | NodeKind::Where
        | NodeKind::GroupBy
        | NodeKind::Having
        | NodeKind::OrderBy
        | NodeKind::OrderItem
        | NodeKind::Limit
        | NodeKind::ColumnRef
        | NodeKind::Wildcard
        | NodeKind::Binary
        | NodeKind::Unary
        | NodeKind::IsNull
        | NodeKind::Between
        | NodeKind::InList
        | NodeKind::Like
        | NodeKind::Match
        | NodeKind::FunctionCall
        | NodeKind::Cast
        | NodeKind::Nested
        | NodeKind::Integer
        | NodeKind::Decimal
        | NodeKind::String
        | NodeKind::Boolean
        | NodeKind::Null
        | NodeKind::Typed
        | NodeKind::Identifier
        | NodeKind::QuotedIdentifier
        | NodeKind::ErrorCapturingIdentifier
        | NodeKind::MultipartIdentifier => None,

        NodeKind::Insert
        | NodeKind::Update
        | NodeKind::Delete
        | NodeKind::CreateTable
        | NodeKind::CreateView
        | NodeKind::CreateDatabase
        | NodeKind::AlterTable
        | NodeKind::Drop
        | NodeKind::Truncate
        | NodeKind::Show
        | NodeKind::Describe
        | NodeKind::Use
        | NodeKind::SetVariable
        | NodeKind::Grant
        | NodeKind::Revoke
        | NodeKind::Transaction
        | NodeKind::Explain
        | NodeKind::Kill
        | NodeKind::Alias
        | NodeKind::Unsupported
        | NodeKind::PropertyList
        | NodeKind::Property
        | NodeKind::ColumnDef
        | NodeKind::Keys
        | NodeKind::Distribution
        | NodeKind::Assignment
        | NodeKind::Values
        | NodeKind::VariableAssignment
        | NodeKind::AlterAction => Some("only SELECT queries can be translated"),

        NodeKind::SetOperation => Some("set operations cannot be translated"),
        NodeKind::With | NodeKind::Cte => Some("common table expressions cannot be translated"),
        NodeKind::Join => Some("joins cannot be translated"),
        NodeKind::DerivedTable
        | NodeKind::Subquery
        | NodeKind::InSubquery
        | NodeKind::Exists => Some("subqueries cannot be translated"),
        NodeKind::LateralView => Some("lateral views cannot be translated"),
        NodeKind::PartitionSpec => Some("partition selection cannot be translated"),
        NodeKind::Window | NodeKind::WindowSpec | NodeKind::WindowFrame => {
            Some("window functions cannot be translated")
        }
        NodeKind::Case | NodeKind::When => Some("CASE expressions cannot be translated"),
        NodeKind::Parameter => Some("parameters must be bound before translation"),
        NodeKind::Interval
        | NodeKind::Array
        | NodeKind::Map
        | NodeKind::Struct
        | NodeKind::Lambda
        | NodeKind::ElementAt
        | NodeKind::ArraySlice
        | NodeKind::Dereference => Some("this expression form cannot be translated"),
    }
}

fn non_negative(expr: &Expr, clause: &str) -> Result<u64> {
    if let Expr::Literal(Literal::Integer(literal)) = expr.unnested() {
        if let Ok(value) = u64::try_from(literal.value()) {
            return Ok(value);
        }
    }
    Err(PassError::translation(
        format!("{clause} must be a non-negative integer literal"),
        expr.span(),
    ))
}

/// Translates a simple SELECT into a [`QueryModel`].
#[derive(Debug, Default)]
pub struct ModelTranslator;

impl ModelTranslator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Translates one statement.
    ///
    /// # Errors
    ///
    /// Returns a translation error for any statement other than a single
    /// SELECT over at most one table, or for clauses the model cannot hold.
    pub fn translate(&mut self, statement: &Statement) -> Result<QueryModel> {
        match dispatch(self, NodeRef::from(statement))? {
            Some(Part::Model(model)) => {
                debug!(table = ?model.table, fields = model.fields.len(), "translated query");
                Ok(model)
            }
            _ => Err(PassError::translation(
                "statement does not describe a query",
                statement.span(),
            )),
        }
    }

    /// Dispatches every child of `node` and applies the parts to one model.
    fn assemble(&mut self, node: NodeRef<'_>) -> Result<Option<Part>> {
        let mut model = QueryModel::default();
        for child in node.children() {
            if let Some(part) = dispatch(self, child)? {
                part.apply_to(&mut model);
            }
        }
        Ok(Some(Part::Model(model)))
    }
}

impl Visitor for ModelTranslator {
    type Output = Result<Option<Part>>;

    fn empty(&mut self) -> Self::Output {
        Ok(None)
    }

    fn combine(&mut self, acc: Self::Output, next: Self::Output) -> Self::Output {
        Ok(combine::last_non_empty(acc?, next?))
    }

    fn visit_node(&mut self, node: NodeRef<'_>) -> Self::Output {
        if let Some(reason) = rejection(node.kind()) {
            debug!(kind = %node.kind(), span = ?node.span(), reason, "rejected node");
            return Err(PassError::translation(
                format!("{}: {reason}", node.kind()),
                node.span(),
            ));
        }
        walk(self, node)
    }

    fn visit_query(&mut self, query: &Query) -> Self::Output {
        self.assemble(NodeRef::from(query))
    }

    fn visit_select(&mut self, select: &Select) -> Self::Output {
        let part = self.assemble(NodeRef::from(select))?;
        Ok(part.map(|part| match part {
            Part::Model(model) => Part::Model(QueryModel {
                distinct: select.distinct(),
                ..model
            }),
            other => other,
        }))
    }

    fn visit_select_list(&mut self, list: &SelectList) -> Self::Output {
        walk(self, NodeRef::from(list))?;
        let fields = list
            .items()
            .iter()
            .map(|item| Field {
                expr: item.expr().to_string(),
                alias: item.alias().map(|alias| alias.value().to_owned()),
            })
            .collect();
        Ok(Some(Part::Fields(fields)))
    }

    fn visit_from(&mut self, from: &FromClause) -> Self::Output {
        if let [_, second, ..] = from.relations() {
            return Err(PassError::translation(
                "From: only one table can be read",
                NodeRef::from(second).span(),
            ));
        }
        walk(self, NodeRef::from(from))
    }

    fn visit_table_reference(&mut self, table: &NamedTable) -> Self::Output {
        walk(self, NodeRef::from(table))?;
        Ok(Some(Part::Table(table.name().to_dotted())))
    }

    fn visit_where(&mut self, clause: &WhereClause) -> Self::Output {
        walk(self, NodeRef::from(clause))?;
        Ok(Some(Part::Condition(clause.condition().to_string())))
    }

    fn visit_group_by(&mut self, clause: &GroupByClause) -> Self::Output {
        walk(self, NodeRef::from(clause))?;
        let exprs = clause.exprs().iter().map(ToString::to_string).collect();
        Ok(Some(Part::GroupBy(exprs)))
    }

    fn visit_having(&mut self, clause: &HavingClause) -> Self::Output {
        walk(self, NodeRef::from(clause))?;
        Ok(Some(Part::Having(clause.condition().to_string())))
    }

    fn visit_order_by(&mut self, clause: &OrderByClause) -> Self::Output {
        walk(self, NodeRef::from(clause))?;
        let fields = clause
            .items()
            .iter()
            .map(|item| OrderField {
                expr: item.expr().to_string(),
                ascending: item.ascending(),
            })
            .collect();
        Ok(Some(Part::OrderBy(fields)))
    }

    fn visit_limit(&mut self, clause: &LimitClause) -> Self::Output {
        walk(self, NodeRef::from(clause))?;
        let limit = non_negative(clause.limit(), "LIMIT")?;
        let offset = clause
            .offset()
            .map(|offset| non_negative(offset, "OFFSET"))
            .transpose()?;
        Ok(Some(Part::Limit { limit, offset }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(sql: &str) -> Result<QueryModel> {
        let statement = doris_sql_core::parse(sql).unwrap();
        ModelTranslator::new().translate(&statement)
    }

    #[test]
    fn test_every_statement_kind_but_query_is_rejected() {
        for kind in NodeKind::ALL {
            if kind.is_statement() {
                assert_eq!(rejection(*kind).is_none(), *kind == NodeKind::Query, "{kind}");
            }
        }
    }

    #[test]
    fn test_combine_keeps_first_error() {
        let mut translator = ModelTranslator::new();
        let first = PassError::translation("first", doris_sql_core::Span::new(0, 1));
        let second = PassError::translation("second", doris_sql_core::Span::new(2, 3));
        let combined = translator.combine(Err(first.clone()), Err(second));
        assert_eq!(combined.unwrap_err(), first);
    }

    #[test]
    fn test_negative_limit() {
        let err = translate("SELECT a FROM t LIMIT -1").unwrap_err();
        assert!(err.message.contains("LIMIT must be a non-negative integer literal"));
    }

    #[test]
    fn test_select_without_from() {
        let model = translate("SELECT 1 AS one").unwrap();
        assert_eq!(model.table, None);
        assert_eq!(model.fields[0].name(), "one");
    }
}
