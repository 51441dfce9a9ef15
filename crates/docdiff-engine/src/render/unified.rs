//! Unified diff of the pretty-printed documents.
//!
//! Works on the textual rendering, independent of the change list, so it
//! shows every textual difference, including array motion that the
//! comparator may consider equivalent. Lines are aligned with the LCS
//! algorithm from `similar`.

use std::fmt;

use docdiff_types::Value;
use similar::{Algorithm, ChangeTag, TextDiff};

use crate::options::{DiffOptions, METADATA_KEY};

/// A structured unified diff between two texts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnifiedDiff {
    /// Label printed on the `---` header.
    pub old_label: String,
    /// Label printed on the `+++` header.
    pub new_label: String,
    /// The diff hunks.
    pub hunks: Vec<DiffHunk>,
}

impl UnifiedDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }
}

/// Renders the `---`/`+++` headers followed by every hunk. An empty diff
/// renders as the empty string.
impl fmt::Display for UnifiedDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        writeln!(f, "--- {}", self.old_label)?;
        writeln!(f, "+++ {}", self.new_label)?;
        for hunk in &self.hunks {
            write!(f, "{hunk}")?;
        }
        Ok(())
    }
}

/// A contiguous region of changes in a diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffHunk {
    /// Line number in the old text where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of lines from the old text in this hunk.
    pub old_count: usize,
    /// Line number in the new text where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of lines from the new text in this hunk.
    pub new_count: usize,
    /// The individual diff lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl fmt::Display for DiffHunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "@@ -{} +{} @@",
            hunk_range(self.old_start, self.old_count),
            hunk_range(self.new_start, self.new_count)
        )?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// An empty range points at the line before it, as in GNU diff.
fn hunk_range(start: usize, count: usize) -> String {
    if count == 0 {
        format!("{},0", start.saturating_sub(1))
    } else {
        format!("{start},{count}")
    }
}

/// A single line in a diff hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// A line present in both old and new (context).
    Context(String),
    /// A line added in the new text.
    Added(String),
    /// A line removed from the old text.
    Removed(String),
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context(text) => write!(f, " {text}"),
            Self::Added(text) => write!(f, "+{text}"),
            Self::Removed(text) => write!(f, "-{text}"),
        }
    }
}

/// Compute the hunks of a line-by-line diff between two texts.
pub fn diff_lines(old: &str, new: &str, context_lines: usize) -> Vec<DiffHunk> {
    if old == new {
        return Vec::new();
    }

    let text_diff = TextDiff::configure()
        .algorithm(Algorithm::Lcs)
        .diff_lines(old, new);

    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(context_lines) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_start = first.old_range().start;
        let new_start = first.new_range().start;
        let old_count = last.old_range().end - old_start;
        let new_count = last.new_range().end - new_start;

        let lines = group
            .iter()
            .flat_map(|op| text_diff.iter_changes(op))
            .map(|change| {
                let text = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Equal => DiffLine::Context(text),
                    ChangeTag::Delete => DiffLine::Removed(text),
                    ChangeTag::Insert => DiffLine::Added(text),
                }
            })
            .collect();

        hunks.push(DiffHunk {
            old_start: old_start + 1,
            old_count,
            new_start: new_start + 1,
            new_count,
            lines,
        });
    }

    hunks
}

/// Pretty-print both documents and diff them line by line.
///
/// With `ignore_metadata`, `metadata` keys are stripped before printing so
/// the text agrees with the change list.
pub fn unified_diff(
    old: &Value,
    new: &Value,
    old_label: &str,
    new_label: &str,
    options: &DiffOptions,
) -> UnifiedDiff {
    let (old_text, new_text) = if options.ignore_metadata {
        (
            document_text(&old.without_key(METADATA_KEY)),
            document_text(&new.without_key(METADATA_KEY)),
        )
    } else {
        (document_text(old), document_text(new))
    };

    UnifiedDiff {
        old_label: old_label.to_string(),
        new_label: new_label.to_string(),
        hunks: diff_lines(&old_text, &new_text, options.context_lines),
    }
}

fn document_text(value: &Value) -> String {
    let mut text = value.to_pretty_string();
    text.push('\n');
    text
}
