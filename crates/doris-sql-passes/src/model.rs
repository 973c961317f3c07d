//! The query model produced by [`ModelTranslator`](crate::ModelTranslator).
//!
//! Expressions are kept as normalized SQL text, the form a storage backend
//! request is assembled from.

use serde::Serialize;

/// One projected expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// The expression as normalized SQL.
    pub expr: String,
    /// The `AS` name, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Field {
    /// Returns the name the field is visible under.
    #[must_use]
    pub fn name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.expr)
    }
}

/// One ORDER BY key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderField {
    /// The sort key as normalized SQL.
    pub expr: String,
    /// False for `DESC`.
    pub ascending: bool,
}

/// A single-table SELECT broken into its clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryModel {
    /// The table read from, absent for a SELECT without FROM.
    pub table: Option<String>,
    /// Set by `SELECT DISTINCT`.
    pub distinct: bool,
    /// The select list in order.
    pub fields: Vec<Field>,
    /// The WHERE condition.
    pub condition: Option<String>,
    /// GROUP BY expressions in order.
    pub group_by: Vec<String>,
    /// The HAVING condition.
    pub having: Option<String>,
    /// ORDER BY keys in order.
    pub order_by: Vec<OrderField>,
    /// Maximum number of rows.
    pub limit: Option<u64>,
    /// Rows skipped before the first returned one.
    pub offset: Option<u64>,
}

impl QueryModel {
    /// Serializes the model to JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns true if the query aggregates rows.
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        !self.group_by.is_empty() || self.having.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_prefers_alias() {
        let field = Field {
            expr: "COUNT(*)".to_owned(),
            alias: Some("n".to_owned()),
        };
        assert_eq!(field.name(), "n");
        let bare = Field {
            expr: "a".to_owned(),
            alias: None,
        };
        assert_eq!(bare.name(), "a");
    }

    #[test]
    fn test_json_skips_missing_alias() {
        let model = QueryModel {
            table: Some("t".to_owned()),
            fields: vec![Field {
                expr: "a".to_owned(),
                alias: None,
            }],
            limit: Some(5),
            ..QueryModel::default()
        };
        let json = model.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"table":"t","distinct":false,"fields":[{"expr":"a"}],"condition":null,"group_by":[],"having":null,"order_by":[],"limit":5,"offset":null}"#
        );
    }
}
