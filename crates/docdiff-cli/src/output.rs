//! Terminal coloring of rendered patches.

use colored::Colorize;
use docdiff_engine::{DiffFormat, DiffResult, DiffSummary};

/// Color each line of a rendered patch according to its marker. The result
/// always ends with a newline unless it is empty.
pub fn colorize(patch: &str, format: DiffFormat) -> String {
    if patch.is_empty() {
        return String::new();
    }
    let mut out: String = patch
        .lines()
        .map(|line| color_line(line, format))
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

fn color_line(line: &str, format: DiffFormat) -> String {
    match format {
        DiffFormat::Unified => {
            if line.starts_with("---") || line.starts_with("+++") {
                line.bold().to_string()
            } else if line.starts_with("@@") {
                line.cyan().to_string()
            } else if line.starts_with('+') {
                line.green().to_string()
            } else if line.starts_with('-') {
                line.red().to_string()
            } else {
                line.to_string()
            }
        }
        DiffFormat::Semantic => match line.chars().next() {
            Some('+') => line.green().to_string(),
            Some('~') => line.yellow().to_string(),
            Some('-') => line.red().to_string(),
            _ => line.bold().to_string(),
        },
        DiffFormat::JsonPatch => line.to_string(),
    }
}

/// Everything `diff` prints: the colored patch, then the count line when
/// `with_summary` is set. A non-empty semantic patch already ends with the
/// counts, so they are not repeated.
pub fn render_report(result: &DiffResult, format: DiffFormat, with_summary: bool) -> String {
    let mut out = colorize(&result.patch, format);
    let counted = format == DiffFormat::Semantic && !result.patch.is_empty();
    if with_summary && !counted {
        out.push_str(&summary_line(&result.summary));
        out.push('\n');
    }
    out
}

/// One-line count summary for `--summary`.
pub fn summary_line(summary: &DiffSummary) -> String {
    format!(
        "{} added, {} modified, {} deleted",
        summary.added.to_string().green(),
        summary.modified.to_string().yellow(),
        summary.deleted.to_string().red(),
    )
}
