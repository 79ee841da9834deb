//! bp core types: binding scope, normalized binding records and display rows.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

pub mod columns;

pub use columns::{render_json, render_table, HEADER};

/// Kind and name substituted when a binding has no subjects.
pub const NO_SUBJECT: &str = "none";

/// Which RBAC binding collection to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingScope {
    /// Cluster-scoped bindings across the whole cluster.
    ClusterWide,
    /// Bindings in a single namespace. The name is trimmed and never empty.
    Namespaced(String),
}

impl BindingScope {
    /// Resolve the scope from the raw `--namespace` value.
    ///
    /// Empty or whitespace-only input selects [`BindingScope::ClusterWide`].
    pub fn resolve(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some(ns) if !ns.is_empty() => BindingScope::Namespaced(ns.to_string()),
            _ => BindingScope::ClusterWide,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            BindingScope::ClusterWide => None,
            BindingScope::Namespaced(ns) => Some(ns.as_str()),
        }
    }
}

/// Identity a binding grants access to (user, group or service account).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub kind: String,
    pub name: String,
}

impl Subject {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self { kind: kind.into(), name: name.into() }
    }

    fn placeholder() -> Self {
        Self::new(NO_SUBJECT, NO_SUBJECT)
    }
}

/// A binding fetched from one of the two RBAC collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingRecord {
    /// From the cluster-scoped collection (`ClusterRoleBinding`).
    ClusterBinding { name: String, role_ref_name: String, subjects: Vec<Subject> },
    /// From a namespace-scoped collection (`RoleBinding`).
    NamespaceBinding { name: String, role_ref_name: String, subjects: Vec<Subject> },
}

impl BindingRecord {
    pub fn name(&self) -> &str {
        match self {
            BindingRecord::ClusterBinding { name, .. } | BindingRecord::NamespaceBinding { name, .. } => name,
        }
    }

    pub fn role_ref_name(&self) -> &str {
        match self {
            BindingRecord::ClusterBinding { role_ref_name, .. }
            | BindingRecord::NamespaceBinding { role_ref_name, .. } => role_ref_name,
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        match self {
            BindingRecord::ClusterBinding { subjects, .. } | BindingRecord::NamespaceBinding { subjects, .. } => subjects,
        }
    }

    /// First subject in listing order, or the `none/none` placeholder.
    pub fn primary_subject(&self) -> Subject {
        self.subjects().first().cloned().unwrap_or_else(Subject::placeholder)
    }
}

/// One rendered line: (binding name, role name, subject kind, subject name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub binding_name: String,
    pub role_name: String,
    pub subject_kind: String,
    pub subject_name: String,
}

impl DisplayRow {
    pub fn cells(&self) -> [&str; 4] {
        [&self.binding_name, &self.role_name, &self.subject_kind, &self.subject_name]
    }
}

impl From<&BindingRecord> for DisplayRow {
    fn from(record: &BindingRecord) -> Self {
        let subject = record.primary_subject();
        Self {
            binding_name: record.name().to_string(),
            role_name: record.role_ref_name().to_string(),
            subject_kind: subject.kind,
            subject_name: subject.name,
        }
    }
}

/// Turn fetched bindings into display rows, one row per record, in input order.
/// Subjects after the first are not shown.
pub fn normalize(records: &[BindingRecord]) -> Vec<DisplayRow> {
    records.iter().map(DisplayRow::from).collect()
}

pub mod prelude {
    pub use super::{normalize, BindingRecord, BindingScope, DisplayRow, Subject, NO_SUBJECT};
}
