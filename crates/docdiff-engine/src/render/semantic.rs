//! Human-readable summary of a change list.

use crate::change::{Change, ChangeKind, DiffSummary};

/// Render one line per change, grouped as added, modified, deleted, followed
/// by the aggregate counts:
///
/// ```text
/// + tiles[1]: {"id":"2"}
/// ~ title: "Dashboard" -> "Dashboard Updated"
/// - owner: "alice"
/// 1 added, 1 modified, 1 deleted
/// ```
///
/// No changes renders as the empty string.
pub fn render_semantic(changes: &[Change]) -> String {
    if changes.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = [ChangeKind::Added, ChangeKind::Modified, ChangeKind::Deleted]
        .into_iter()
        .flat_map(|kind| changes.iter().filter(move |c| c.kind == kind))
        .map(describe)
        .collect();
    lines.push(DiffSummary::from_changes(changes).to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn describe(change: &Change) -> String {
    let path = if change.path.is_root() {
        "(root)".to_string()
    } else {
        change.path.to_string()
    };
    let marker = change.kind.marker();
    match (&change.old_value, &change.new_value) {
        (Some(old), Some(new)) => format!("{marker} {path}: {old} -> {new}"),
        (None, Some(new)) => format!("{marker} {path}: {new}"),
        (Some(old), None) => format!("{marker} {path}: {old}"),
        (None, None) => format!("{marker} {path}"),
    }
}
