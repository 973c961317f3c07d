//! Renaming column references in the statement text.
//!
//! The [`DimensionRewriter`] asks a mapping function for a new name for every
//! column reference and edits the source text in place, so comments, casing
//! and layout outside the renamed references survive untouched.
//!
//! ```rust
//! use doris_sql_passes::DimensionRewriter;
//!
//! let sql = "SELECT ns, count(*) FROM logs GROUP BY ns";
//! let statement = doris_sql_core::parse(sql).unwrap();
//! let mut rewriter = DimensionRewriter::new(|name: &str| {
//!     (name == "ns").then(|| "pod_namespace".to_owned())
//! });
//! assert_eq!(
//!     rewriter.rewrite(sql, &statement).unwrap(),
//!     "SELECT pod_namespace AS ns, count(*) FROM logs GROUP BY pod_namespace"
//! );
//! ```

use std::collections::HashSet;

use doris_sql_core::ast::{ColumnRef, LambdaExpr, Node, NodeRef, SelectItem, Statement};
use doris_sql_core::visit::{combine, dispatch, walk, Visitor};
use doris_sql_core::Span;
use serde::Deserialize;
use tracing::info;

use crate::error::{PassError, Result};

/// A replacement of one span of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The replaced range, in bytes of the full source.
    pub span: Span,
    /// The text put in its place.
    pub replacement: String,
}

/// Options for the [`DimensionRewriter`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteOptions {
    /// Keep a renamed bare column in the select list visible under its old
    /// name by appending `AS <old name>`.
    pub alias_select_columns: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            alias_select_columns: true,
        }
    }
}

/// Renames column references through a mapping function.
///
/// The function receives the dotted name as written, without quotes, and
/// returns the replacement text or `None` to keep the reference. Names bound
/// by an enclosing lambda are never offered to it.
pub struct DimensionRewriter<F> {
    transform: F,
    options: RewriteOptions,
    lambda_params: Vec<HashSet<String>>,
}

impl<F> DimensionRewriter<F>
where
    F: FnMut(&str) -> Option<String>,
{
    pub fn new(transform: F) -> Self {
        Self::with_options(transform, RewriteOptions::default())
    }

    pub fn with_options(transform: F, options: RewriteOptions) -> Self {
        Self {
            transform,
            options,
            lambda_params: Vec::new(),
        }
    }

    /// Returns the edits for one statement, in source order.
    pub fn edits(&mut self, statement: &Statement) -> Vec<Edit> {
        self.lambda_params.clear();
        let mut edits = dispatch(self, NodeRef::from(statement));
        edits.sort_by_key(|edit| edit.span.start);
        edits
    }

    /// Returns the text of `statement` with its column references renamed.
    ///
    /// `statement` must have been parsed from `sql`. Spans from a batch are
    /// absolute, so a batch member is rewritten against the whole batch text.
    ///
    /// # Errors
    ///
    /// Fails if the statement or one of its edits does not fall on the text.
    pub fn rewrite(&mut self, sql: &str, statement: &Statement) -> Result<String> {
        let span = statement.span();
        let text = sql.get(span.start..span.end).ok_or_else(|| {
            PassError::translation("statement lies outside the source text", span)
        })?;
        let edits = self.edits(statement);
        apply_edits(text, span.start, &edits)
    }

    fn renamed(&mut self, column: &ColumnRef) -> Option<String> {
        let name = column.name();
        if name.parts().len() == 1 {
            let value = name.last().value().to_ascii_lowercase();
            if self.lambda_params.iter().any(|scope| scope.contains(&value)) {
                return None;
            }
        }
        let original = name.to_dotted();
        let renamed = (self.transform)(&original).filter(|renamed| *renamed != original)?;
        info!(from = %original, to = %renamed, span = ?column.span(), "renamed column reference");
        Some(renamed)
    }
}

/// Applies `edits` to `text`, which starts at byte `base` of the source.
fn apply_edits(text: &str, base: usize, edits: &[Edit]) -> Result<String> {
    let outside = |span: Span| PassError::translation("edit falls outside the statement text", span);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in edits {
        let start = edit.span.start.checked_sub(base).ok_or_else(|| outside(edit.span))?;
        let kept = text.get(cursor..start).ok_or_else(|| outside(edit.span))?;
        out.push_str(kept);
        out.push_str(&edit.replacement);
        cursor = edit.span.end - base;
    }
    let rest = text.get(cursor..).ok_or_else(|| outside(Span::point(base + cursor)))?;
    out.push_str(rest);
    Ok(out)
}

impl<F> Visitor for DimensionRewriter<F>
where
    F: FnMut(&str) -> Option<String>,
{
    type Output = Vec<Edit>;

    fn empty(&mut self) -> Vec<Edit> {
        Vec::new()
    }

    fn combine(&mut self, acc: Vec<Edit>, next: Vec<Edit>) -> Vec<Edit> {
        combine::concat(acc, next)
    }

    fn visit_column_ref(&mut self, column: &ColumnRef) -> Vec<Edit> {
        self.renamed(column)
            .map(|replacement| Edit {
                span: column.span(),
                replacement,
            })
            .into_iter()
            .collect()
    }

    fn visit_select_item(&mut self, item: &SelectItem) -> Vec<Edit> {
        let bare = match (item.expr().as_column(), item.alias()) {
            (Some(column), None) if self.options.alias_select_columns => column,
            _ => return walk(self, NodeRef::from(item)),
        };
        self.renamed(bare)
            .map(|renamed| Edit {
                span: bare.span(),
                replacement: format!("{renamed} AS {}", bare.name().last()),
            })
            .into_iter()
            .collect()
    }

    fn visit_lambda(&mut self, lambda: &LambdaExpr) -> Vec<Edit> {
        let params = lambda
            .params()
            .iter()
            .map(|param| param.value().to_ascii_lowercase())
            .collect();
        self.lambda_params.push(params);
        let edits = walk(self, NodeRef::from(lambda));
        self.lambda_params.pop();
        edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper(name: &str) -> Option<String> {
        Some(name.to_ascii_uppercase())
    }

    #[test]
    fn test_edits_are_in_source_order() {
        let statement = doris_sql_core::parse("SELECT a FROM t WHERE b = 1 ORDER BY c").unwrap();
        let edits = DimensionRewriter::new(upper).edits(&statement);
        let replacements: Vec<&str> = edits.iter().map(|e| e.replacement.as_str()).collect();
        assert_eq!(replacements, ["A AS a", "B", "C"]);
    }

    #[test]
    fn test_unchanged_names_produce_no_edit() {
        let statement = doris_sql_core::parse("SELECT a FROM t").unwrap();
        let edits = DimensionRewriter::new(|name: &str| Some(name.to_owned())).edits(&statement);
        assert!(edits.is_empty());
    }

    #[test]
    fn test_apply_edits_rejects_out_of_range() {
        let edits = [Edit {
            span: Span::new(20, 22),
            replacement: "x".to_owned(),
        }];
        assert!(apply_edits("SELECT a", 0, &edits).is_err());
    }

    #[test]
    fn test_options_from_defaults() {
        assert!(RewriteOptions::default().alias_select_columns);
    }
}
