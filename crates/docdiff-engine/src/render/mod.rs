//! Renderers turning a comparison into patch text.
//!
//! All renderers are pure; the [`Differ`](crate::Differ) picks one according
//! to [`DiffFormat`](crate::DiffFormat).

pub mod json_patch;
pub mod semantic;
pub mod unified;

pub use json_patch::render_json_patch;
pub use semantic::render_semantic;
pub use unified::{diff_lines, unified_diff, DiffHunk, DiffLine, UnifiedDiff};
