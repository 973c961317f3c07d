//! # doris-sql-passes
//!
//! Semantic passes over the tree built by `doris-sql-core`. Each pass is a
//! [`Visitor`](doris_sql_core::Visitor) with its own result type:
//!
//! - [`Classifier`] decides whether a statement is supported, supported with
//!   a caveat, or rejected.
//! - [`ReferenceExtractor`] collects the tables and columns a statement reads
//!   or writes.
//! - [`ModelTranslator`] turns a simple SELECT into a [`QueryModel`].
//! - [`DimensionRewriter`] renames column references in the source text.
//!
//! ```rust
//! use doris_sql_passes::{Classifier, ReferenceExtractor, Verdict};
//!
//! let statement = doris_sql_core::parse("SELECT a, b FROM t WHERE a > 1").unwrap();
//! assert_eq!(Classifier::new().classify(&statement), Verdict::Supported);
//!
//! let references = ReferenceExtractor::new().extract(&statement);
//! assert_eq!(references.tables(), ["t"]);
//! assert_eq!(references.columns(), ["a", "b"]);
//! ```

pub mod classify;
pub mod error;
pub mod model;
pub mod references;
pub mod rewrite;
pub mod translate;

pub use classify::{Caveat, Classifier, ClassifierConfig, Verdict};
pub use error::{PassError, PassErrorKind, Result};
pub use model::{Field, OrderField, QueryModel};
pub use references::{ReferenceExtractor, References};
pub use rewrite::{DimensionRewriter, Edit, RewriteOptions};
pub use translate::ModelTranslator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Verdict>();
        assert_send_sync::<PassError>();
        assert_send_sync::<References>();
        assert_send_sync::<QueryModel>();
    }
}
