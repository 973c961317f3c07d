//! Table and column reference extraction.

use std::collections::HashSet;

use doris_sql_core::ast::{
    Assignment, ColumnRef, DeleteStatement, Family, InsertStatement, Join, JoinCriteria,
    LambdaExpr, NamedTable, NodeRef, Query, Statement, UpdateStatement, With,
};
use doris_sql_core::visit::{dispatch, walk, Visitor};
use indexmap::IndexSet;
use serde::Serialize;

/// The tables and columns a statement mentions, in order of first mention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct References {
    tables: IndexSet<String>,
    columns: IndexSet<String>,
}

impl References {
    fn table(name: String) -> Self {
        let mut references = Self::default();
        references.tables.insert(name);
        references
    }

    fn columns_of(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            tables: IndexSet::new(),
            columns: names.into_iter().collect(),
        }
    }

    /// Appends `other`, keeping first-mention order.
    #[must_use]
    pub fn concat(mut self, other: Self) -> Self {
        self.tables.extend(other.tables);
        self.columns.extend(other.columns);
        self
    }

    /// Returns the referenced tables as written, qualifiers included.
    #[must_use]
    pub fn tables(&self) -> Vec<&str> {
        self.tables.iter().map(String::as_str).collect()
    }

    /// Returns the referenced columns as written, qualifiers included.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains(name)
    }

    #[must_use]
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.columns.is_empty()
    }
}

/// Collects table and column references.
///
/// Subqueries, CTE bodies and lateral views are searched. Names a statement
/// defines for itself are not reported: a table name matching a CTE in
/// scope, or a column name bound by an enclosing lambda.
#[derive(Debug, Default)]
pub struct ReferenceExtractor {
    ctes: Vec<HashSet<String>>,
    lambda_params: Vec<HashSet<String>>,
}

impl ReferenceExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the references of one statement.
    pub fn extract(&mut self, statement: &Statement) -> References {
        self.ctes.clear();
        self.lambda_params.clear();
        dispatch(self, NodeRef::from(statement))
    }

    fn declare_cte(&mut self, name: String) {
        if let Some(scope) = self.ctes.last_mut() {
            scope.insert(name);
        }
    }

    fn is_cte(&self, table: &NamedTable) -> bool {
        let name = table.name();
        name.parts().len() == 1
            && self
                .ctes
                .iter()
                .any(|scope| scope.contains(&name.last().value().to_ascii_lowercase()))
    }

    fn is_lambda_bound(&self, column: &ColumnRef) -> bool {
        let name = column.name();
        name.parts().len() == 1
            && self
                .lambda_params
                .iter()
                .any(|scope| scope.contains(&name.last().value().to_ascii_lowercase()))
    }
}

impl Visitor for ReferenceExtractor {
    type Output = References;

    fn empty(&mut self) -> References {
        References::default()
    }

    fn combine(&mut self, acc: References, next: References) -> References {
        acc.concat(next)
    }

    fn visit_node(&mut self, node: NodeRef<'_>) -> References {
        if node.family() == Family::Literal {
            return References::default();
        }
        walk(self, node)
    }

    fn visit_query(&mut self, query: &Query) -> References {
        if query.with().is_none() {
            return walk(self, NodeRef::from(query));
        }
        self.ctes.push(HashSet::new());
        let references = walk(self, NodeRef::from(query));
        self.ctes.pop();
        references
    }

    /// A CTE body sees the CTEs declared before it, and itself when the
    /// WITH is recursive.
    fn visit_with(&mut self, with: &With) -> References {
        let mut references = References::default();
        for cte in with.ctes() {
            let name = cte.name().value().to_ascii_lowercase();
            if with.recursive() {
                self.declare_cte(name.clone());
            }
            references = references.concat(dispatch(self, NodeRef::from(cte)));
            self.declare_cte(name);
        }
        references
    }

    fn visit_table_reference(&mut self, table: &NamedTable) -> References {
        let inner = walk(self, NodeRef::from(table));
        if self.is_cte(table) {
            return inner;
        }
        References::table(table.name().to_dotted()).concat(inner)
    }

    fn visit_column_ref(&mut self, column: &ColumnRef) -> References {
        if self.is_lambda_bound(column) {
            return References::default();
        }
        References::columns_of([column.name().to_dotted()])
    }

    fn visit_lambda(&mut self, lambda: &LambdaExpr) -> References {
        let params = lambda
            .params()
            .iter()
            .map(|param| param.value().to_ascii_lowercase())
            .collect();
        self.lambda_params.push(params);
        let references = walk(self, NodeRef::from(lambda));
        self.lambda_params.pop();
        references
    }

    fn visit_join(&mut self, join: &Join) -> References {
        let inner = walk(self, NodeRef::from(join));
        match join.criteria() {
            Some(JoinCriteria::Using(columns)) => inner.concat(References::columns_of(
                columns.iter().map(|column| column.value().to_owned()),
            )),
            _ => inner,
        }
    }

    fn visit_insert(&mut self, insert: &InsertStatement) -> References {
        References::table(insert.table().to_dotted())
            .concat(References::columns_of(
                insert.columns().iter().map(|column| column.value().to_owned()),
            ))
            .concat(walk(self, NodeRef::from(insert)))
    }

    fn visit_update(&mut self, update: &UpdateStatement) -> References {
        References::table(update.table().to_dotted()).concat(walk(self, NodeRef::from(update)))
    }

    fn visit_delete(&mut self, delete: &DeleteStatement) -> References {
        References::table(delete.table().to_dotted()).concat(walk(self, NodeRef::from(delete)))
    }

    fn visit_assignment(&mut self, assignment: &Assignment) -> References {
        References::columns_of([assignment.column().to_dotted()])
            .concat(walk(self, NodeRef::from(assignment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(sql: &str) -> References {
        let statement = doris_sql_core::parse(sql).unwrap();
        ReferenceExtractor::new().extract(&statement)
    }

    #[test]
    fn test_concat_keeps_first_mention() {
        let a = References::columns_of(["x".to_owned(), "y".to_owned()]);
        let b = References::columns_of(["y".to_owned(), "z".to_owned()]);
        let joined = a.concat(b);
        assert_eq!(joined.columns(), ["x", "y", "z"]);
    }

    #[test]
    fn test_qualified_names_are_kept() {
        let references = extract("SELECT t.a FROM db.t");
        assert_eq!(references.tables(), ["db.t"]);
        assert_eq!(references.columns(), ["t.a"]);
    }

    #[test]
    fn test_literals_are_not_searched() {
        assert!(extract("SELECT 'a', 1, DATE '2024-01-01'").is_empty());
    }

    #[test]
    fn test_scopes_are_reset_between_statements() {
        let mut extractor = ReferenceExtractor::new();
        let with = doris_sql_core::parse("WITH c AS (SELECT 1) SELECT * FROM c").unwrap();
        assert!(extractor.extract(&with).tables().is_empty());
        let plain = doris_sql_core::parse("SELECT * FROM c").unwrap();
        assert_eq!(extractor.extract(&plain).tables(), ["c"]);
    }
}
