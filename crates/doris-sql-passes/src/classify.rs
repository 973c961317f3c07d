//! Statement classification.
//!
//! The [`Classifier`] walks a statement and returns a [`Verdict`]. Findings
//! from different nodes are combined so that the most severe one wins: a
//! rejection anywhere rejects the statement, otherwise the first caveat is
//! kept.

use doris_sql_core::ast::{
    AliasStatement, CreateTableStatement, DeleteStatement, NodeKind, NodeRef, PropertyList,
    Statement, UnsupportedStatement, UpdateStatement,
};
use doris_sql_core::diagnostic::Diagnostic;
use doris_sql_core::visit::{dispatch, walk, Visitor};
use doris_sql_core::Span;
use serde::Deserialize;
use tracing::debug;

use crate::error::PassError;

/// A reason to accept a statement with reservations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caveat {
    /// What the caller should know.
    pub message: String,
    /// The node the caveat is about.
    pub span: Span,
}

impl Caveat {
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl From<&Caveat> for Diagnostic {
    fn from(caveat: &Caveat) -> Self {
        Self::warning(caveat.message.clone(), caveat.span)
    }
}

/// The outcome of classifying a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Supported,
    SupportedWithCaveat(Caveat),
    Unsupported(PassError),
}

impl Verdict {
    const fn severity(&self) -> u8 {
        match self {
            Self::Supported => 0,
            Self::SupportedWithCaveat(_) => 1,
            Self::Unsupported(_) => 2,
        }
    }

    /// Returns whichever verdict is more severe, preferring `self` on a tie.
    #[must_use]
    pub fn most_severe(self, other: Self) -> Self {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    /// Returns true unless the statement was rejected.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Returns the finding as a diagnostic, if there is one.
    #[must_use]
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Self::Supported => None,
            Self::SupportedWithCaveat(caveat) => Some(caveat.into()),
            Self::Unsupported(err) => Some(err.into()),
        }
    }
}

/// Options for the [`Classifier`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Reject every statement that can modify data, schema or session
    /// privileges.
    pub read_only: bool,
}

impl ClassifierConfig {
    /// Loads a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Kinds a read-only classifier lets through.
const READ_ONLY_KINDS: &[NodeKind] = &[
    NodeKind::Query,
    NodeKind::Show,
    NodeKind::Describe,
    NodeKind::Explain,
    NodeKind::Use,
];

/// Classifies statements as supported, supported with a caveat, or not.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classifies one statement.
    pub fn classify(&mut self, statement: &Statement) -> Verdict {
        let verdict = self
            .read_only_verdict(statement)
            .most_severe(dispatch(self, NodeRef::from(statement)));
        debug!(kind = %statement.kind(), verdict = ?verdict, "classified statement");
        verdict
    }

    fn read_only_verdict(&self, statement: &Statement) -> Verdict {
        if !self.config.read_only {
            return Verdict::Supported;
        }
        let kind = statement.canonical().kind();
        if kind.is_statement() && !READ_ONLY_KINDS.contains(&kind) {
            return Verdict::Unsupported(PassError::unsupported(
                format!("{kind} statements are not allowed in read-only mode"),
                statement.span(),
            ));
        }
        Verdict::Supported
    }

    fn caveat_unless_filtered(&mut self, node: NodeRef<'_>, filtered: bool) -> Verdict {
        let inner = walk(self, node);
        if filtered {
            return inner;
        }
        let caveat = Caveat::new(
            format!(
                "{} without WHERE affects every row",
                node.kind().name().to_ascii_uppercase()
            ),
            node.span(),
        );
        debug!(kind = %node.kind(), "statement has no WHERE clause");
        Verdict::SupportedWithCaveat(caveat).most_severe(inner)
    }
}

impl Visitor for Classifier {
    type Output = Verdict;

    fn empty(&mut self) -> Verdict {
        Verdict::Supported
    }

    fn combine(&mut self, acc: Verdict, next: Verdict) -> Verdict {
        acc.most_severe(next)
    }

    fn visit_unsupported(&mut self, statement: &UnsupportedStatement) -> Verdict {
        debug!(statement_type = statement.statement_type(), "unmodelled statement");
        Verdict::Unsupported(PassError::unsupported(
            format!("{} statements are not supported", statement.statement_type()),
            NodeRef::from(statement).span(),
        ))
    }

    fn visit_alias(&mut self, alias: &AliasStatement) -> Verdict {
        let (spelling, canonical) = alias.syntax().spelling();
        let caveat = Caveat::new(
            format!("{spelling} is a deprecated spelling of {canonical}"),
            alias.statement().span(),
        );
        let inner = walk(self, NodeRef::from(alias));
        Verdict::SupportedWithCaveat(caveat).most_severe(inner)
    }

    fn visit_update(&mut self, update: &UpdateStatement) -> Verdict {
        self.caveat_unless_filtered(NodeRef::from(update), update.selection().is_some())
    }

    fn visit_delete(&mut self, delete: &DeleteStatement) -> Verdict {
        self.caveat_unless_filtered(NodeRef::from(delete), delete.selection().is_some())
    }

    fn visit_create_table(&mut self, create: &CreateTableStatement) -> Verdict {
        let node = NodeRef::from(create);
        if create.as_query().is_some() && !create.columns().is_empty() {
            debug!("CREATE TABLE AS SELECT with column definitions");
            return Verdict::Unsupported(PassError::unsupported(
                "CREATE TABLE ... AS SELECT cannot declare column types",
                node.span(),
            ));
        }
        walk(self, node)
    }

    fn visit_property_list(&mut self, properties: &PropertyList) -> Verdict {
        let node = NodeRef::from(properties);
        if let Some(duplicate) = properties.duplicate_key() {
            return Verdict::Unsupported(PassError::unsupported(
                format!("property '{}' is set more than once", duplicate.key()),
                NodeRef::from(duplicate).span(),
            ));
        }
        if properties.get("replication_num").is_some()
            && properties.get("replication_allocation").is_some()
        {
            return Verdict::Unsupported(PassError::unsupported(
                "replication_num and replication_allocation cannot be combined",
                node.span(),
            ));
        }
        walk(self, node)
    }
}
