//! Change records produced by the comparator.

use std::fmt;

use docdiff_types::{Path, Value};
use serde::Serialize;

/// What happened at a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present only in the new document.
    Added,
    /// Present on both sides with different values.
    Modified,
    /// Present only in the old document.
    Deleted,
}

impl ChangeKind {
    /// Single-character marker used by the semantic renderer.
    pub fn marker(self) -> char {
        match self {
            Self::Added => '+',
            Self::Modified => '~',
            Self::Deleted => '-',
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => f.write_str("added"),
            Self::Modified => f.write_str("modified"),
            Self::Deleted => f.write_str("deleted"),
        }
    }
}

/// A single edit at a specific path.
///
/// Values are owned copies so a change outlives the trees it was computed
/// from. Use the constructors to keep the kind and the optional values
/// consistent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Change {
    pub path: Path,
    pub kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

impl Change {
    pub fn added(path: Path, value: Value) -> Self {
        Self {
            path,
            kind: ChangeKind::Added,
            old_value: None,
            new_value: Some(value),
        }
    }

    pub fn deleted(path: Path, value: Value) -> Self {
        Self {
            path,
            kind: ChangeKind::Deleted,
            old_value: Some(value),
            new_value: None,
        }
    }

    pub fn modified(path: Path, old: Value, new: Value) -> Self {
        Self {
            path,
            kind: ChangeKind::Modified,
            old_value: Some(old),
            new_value: Some(new),
        }
    }
}

/// Aggregate counts of a change list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
}

impl DiffSummary {
    /// Count the changes per kind.
    pub fn from_changes(changes: &[Change]) -> Self {
        changes.iter().fold(Self::default(), |mut summary, change| {
            match change.kind {
                ChangeKind::Added => summary.added += 1,
                ChangeKind::Modified => summary.modified += 1,
                ChangeKind::Deleted => summary.deleted += 1,
            }
            summary
        })
    }

    /// Total number of changes.
    pub fn total(&self) -> usize {
        self.added + self.modified + self.deleted
    }

    /// Returns `true` if no changes were counted.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} modified, {} deleted",
            self.added, self.modified, self.deleted
        )
    }
}
