//! JSON Patch rendering of a change list.

use crate::change::Change;
use crate::error::{DiffError, Result};
use crate::patch::to_operations;

/// Render the changes as a pretty-printed JSON array of RFC 6902 operations,
/// one per change and in the same order. No changes renders as `[]`.
pub fn render_json_patch(changes: &[Change]) -> Result<String> {
    serde_json::to_string_pretty(&to_operations(changes))
        .map_err(|e| DiffError::Serialization(e.to_string()))
}
