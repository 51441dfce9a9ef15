//! The differ facade: load, parse, compare, render, summarize.

use std::fs;
use std::path::Path as FsPath;

use docdiff_types::Value;
use serde::Serialize;
use tracing::debug;

use crate::change::{Change, DiffSummary};
use crate::compare::compare;
use crate::error::{DiffError, Result, Side};
use crate::options::{DiffFormat, DiffOptions};
use crate::render::{render_json_patch, render_semantic, unified_diff};

/// The outcome of one comparison. Built once and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    /// `true` iff `changes` is non-empty.
    pub has_changes: bool,
    /// Path-addressed changes in deterministic order.
    pub changes: Vec<Change>,
    /// The changes rendered in the requested format.
    pub patch: String,
    /// Counts per change kind.
    pub summary: DiffSummary,
}

/// Entry point for comparing documents with a fixed set of options.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    options: DiffOptions,
}

impl Differ {
    /// Create a differ with the given options.
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// The options every comparison runs with.
    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compare two already-parsed documents. Unified output is labelled
    /// `old` and `new`.
    pub fn compare_values(&self, old: &Value, new: &Value) -> Result<DiffResult> {
        self.compare_labelled(old, new, "old", "new")
    }

    /// Parse two JSON texts and compare them.
    pub fn compare_str(&self, old_text: &str, new_text: &str) -> Result<DiffResult> {
        let old = parse_document(Side::Old, old_text)?;
        let new = parse_document(Side::New, new_text)?;
        self.compare_values(&old, &new)
    }

    /// Read and parse two JSON files and compare them. Unified output is
    /// labelled with the file paths.
    pub fn compare_files(
        &self,
        old_path: impl AsRef<FsPath>,
        new_path: impl AsRef<FsPath>,
    ) -> Result<DiffResult> {
        let (old_path, new_path) = (old_path.as_ref(), new_path.as_ref());
        let old = read_document(Side::Old, old_path)?;
        let new = read_document(Side::New, new_path)?;
        self.compare_labelled(
            &old,
            &new,
            &old_path.display().to_string(),
            &new_path.display().to_string(),
        )
    }

    fn compare_labelled(
        &self,
        old: &Value,
        new: &Value,
        old_label: &str,
        new_label: &str,
    ) -> Result<DiffResult> {
        debug!(
            format = %self.options.format,
            ignore_order = self.options.ignore_order,
            ignore_metadata = self.options.ignore_metadata,
            "comparing documents"
        );

        let changes = compare(old, new, &self.options);
        let patch = match self.options.format {
            DiffFormat::Unified => {
                unified_diff(old, new, old_label, new_label, &self.options).to_string()
            }
            DiffFormat::JsonPatch => render_json_patch(&changes)?,
            DiffFormat::Semantic => render_semantic(&changes),
        };
        let summary = DiffSummary::from_changes(&changes);

        debug!(
            added = summary.added,
            modified = summary.modified,
            deleted = summary.deleted,
            "comparison complete"
        );

        Ok(DiffResult {
            has_changes: !changes.is_empty(),
            changes,
            patch,
            summary,
        })
    }
}

fn read_document(side: Side, path: &FsPath) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| DiffError::Io {
        side,
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(side, &text)
}

fn parse_document(side: Side, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|source| DiffError::Parse { side, source })
}
