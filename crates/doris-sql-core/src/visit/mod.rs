//! Visitor framework.
//!
//! Implement [`Visitor`] for a pass, choose its `Output`, and say how two
//! results combine. Every `visit_*` method defaults to [`Visitor::visit_node`],
//! which defaults to [`walk`]: each child is dispatched in source order and
//! the results are folded with [`Visitor::combine`], starting from
//! [`Visitor::empty`]. Override a `visit_*` method to handle one kind, or
//! `visit_node` to handle every kind the pass does not single out.
//!
//! ```
//! use doris_sql_core::ast::{ColumnRef, NodeRef};
//! use doris_sql_core::visit::{combine, dispatch, Visitor};
//!
//! struct Columns;
//!
//! impl Visitor for Columns {
//!     type Output = Vec<String>;
//!
//!     fn empty(&mut self) -> Self::Output {
//!         Vec::new()
//!     }
//!
//!     fn combine(&mut self, acc: Self::Output, next: Self::Output) -> Self::Output {
//!         combine::concat(acc, next)
//!     }
//!
//!     fn visit_column_ref(&mut self, column: &ColumnRef) -> Self::Output {
//!         vec![column.name().to_dotted()]
//!     }
//! }
//!
//! let statement = doris_sql_core::parse("SELECT a, t.b FROM t WHERE c > 1").unwrap();
//! let columns = dispatch(&mut Columns, NodeRef::from(&statement));
//! assert_eq!(columns, ["a", "t.b", "c"]);
//! ```

pub mod combine;

use tracing::trace;

use crate::ast::NodeRef;

macro_rules! define_visitor {
    ($($family:ident { $($variant:ident($ty:ty) => $visit:ident),* $(,)? })*) => {
        /// A pass over the node model producing one `Output` per node.
        ///
        /// There is exactly one `visit_*` method per [`NodeKind`](crate::ast::NodeKind).
        pub trait Visitor: Sized {
            /// The result type of the pass.
            type Output;

            /// The result for a node with no children.
            fn empty(&mut self) -> Self::Output;

            /// Folds the result of the next child into the accumulated result.
            fn combine(&mut self, acc: Self::Output, next: Self::Output) -> Self::Output;

            /// Handles any node whose `visit_*` method is not overridden.
            fn visit_node(&mut self, node: NodeRef<'_>) -> Self::Output {
                walk(self, node)
            }

            $($(
                #[doc = concat!("Visits a `", stringify!($variant), "` node.")]
                fn $visit(&mut self, node: &$ty) -> Self::Output {
                    self.visit_node(NodeRef::$variant(node))
                }
            )*)*
        }

        /// Calls the `visit_*` method matching `node`'s kind.
        pub fn dispatch<V: Visitor>(visitor: &mut V, node: NodeRef<'_>) -> V::Output {
            match node {
                $($(NodeRef::$variant(node) => visitor.$visit(node),)*)*
            }
        }
    };
}

crate::ast::for_each_node_kind!(define_visitor);

/// Dispatches every child of `node` in source order and folds the results.
pub fn walk<V: Visitor>(visitor: &mut V, node: NodeRef<'_>) -> V::Output {
    trace!(kind = %node.kind(), span = ?node.span(), "walk");
    let mut acc = visitor.empty();
    for child in node.children() {
        let next = dispatch(visitor, child);
        acc = visitor.combine(acc, next);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ColumnRef, NodeKind};
    use crate::parse;

    /// Records the kind of every node it enters.
    struct Kinds;

    impl Visitor for Kinds {
        type Output = Vec<NodeKind>;

        fn empty(&mut self) -> Self::Output {
            Vec::new()
        }

        fn combine(&mut self, acc: Self::Output, next: Self::Output) -> Self::Output {
            combine::concat(acc, next)
        }

        fn visit_node(&mut self, node: NodeRef<'_>) -> Self::Output {
            let mut kinds = vec![node.kind()];
            kinds.extend(walk(self, node));
            kinds
        }
    }

    #[test]
    fn test_walk_is_pre_order() {
        let statement = parse("SELECT a FROM t").unwrap();
        let kinds = dispatch(&mut Kinds, NodeRef::from(&statement));
        let expected: Vec<NodeKind> = NodeRef::from(&statement)
            .descendants()
            .iter()
            .map(NodeRef::kind)
            .collect();
        assert_eq!(kinds, expected);
        assert_eq!(kinds[0], NodeKind::Query);
    }

    struct CountColumns;

    impl Visitor for CountColumns {
        type Output = usize;

        fn empty(&mut self) -> usize {
            0
        }

        fn combine(&mut self, acc: usize, next: usize) -> usize {
            acc + next
        }

        fn visit_column_ref(&mut self, _column: &ColumnRef) -> usize {
            1
        }
    }

    #[test]
    fn test_override_replaces_default() {
        let statement = parse("SELECT a + b FROM t WHERE c IN (SELECT d FROM u)").unwrap();
        assert_eq!(dispatch(&mut CountColumns, NodeRef::from(&statement)), 4);
    }

    #[test]
    fn test_visit_methods_cover_every_kind() {
        assert_eq!(NodeKind::ALL.len(), {
            let mut names: Vec<&str> = NodeKind::ALL.iter().map(|kind| kind.visit_method()).collect();
            names.sort_unstable();
            names.dedup();
            names.len()
        });
    }
}
