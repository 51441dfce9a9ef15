//! Structural diff engine for docdiff.
//!
//! Compares two JSON-like documents into a path-addressed change list and
//! renders it as a unified diff, RFC 6902 JSON Patch operations, or a
//! semantic summary.
//!
//! # Key Types
//!
//! - [`Differ`] / [`DiffResult`] -- Facade: load, compare, render, summarize
//! - [`DiffOptions`] / [`DiffFormat`] -- Per-comparison configuration
//! - [`Change`] / [`ChangeKind`] / [`DiffSummary`] -- Change records and counts
//! - [`match_elements`] -- Order-insensitive array pairing
//! - [`PatchOperation`] / [`apply_patch`] -- JSON Patch model and application
//!
//! ```
//! use docdiff_engine::{DiffFormat, DiffOptions, Differ};
//!
//! let differ = Differ::new(DiffOptions::with_format(DiffFormat::JsonPatch));
//! let result = differ.compare_str(r#"{"name":"old"}"#, r#"{"name":"new"}"#).unwrap();
//! assert!(result.has_changes);
//! assert_eq!(result.changes[0].path.to_string(), "name");
//! ```

pub mod change;
pub mod compare;
pub mod differ;
pub mod error;
pub mod matcher;
pub mod options;
pub mod patch;
pub mod render;

#[cfg(test)]
mod testing;

pub use change::{Change, ChangeKind, DiffSummary};
pub use compare::compare;
pub use differ::{DiffResult, Differ};
pub use error::{DiffError, PatchError, Result, Side};
pub use matcher::{match_elements, ElementPair};
pub use options::{DiffFormat, DiffOptions, IDENTITY_KEY, METADATA_KEY};
pub use patch::{apply_patch, to_operations, PatchOperation};
pub use render::{render_json_patch, render_semantic, unified_diff, UnifiedDiff};
