use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use docdiff_engine::{apply_patch, Differ, PatchOperation};
use docdiff_types::Value;
use tracing::debug;

use crate::cli::*;
use crate::config::CliConfig;
use crate::output::render_report;

pub const EXIT_CLEAN: u8 = 0;
pub const EXIT_CHANGES: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

/// How a successful command ended, for scripting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Changes,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Clean => ExitCode::from(EXIT_CLEAN),
            Self::Changes => ExitCode::from(EXIT_CHANGES),
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    let config = CliConfig::load(cli.config.as_deref())?;
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &config),
        Command::Apply(args) => cmd_apply(args),
    }
}

fn cmd_diff(args: DiffArgs, config: &CliConfig) -> anyhow::Result<Outcome> {
    let options = config.diff_options(&args)?;
    let differ = Differ::new(options);
    let result = differ.compare_files(&args.old, &args.new)?;
    debug!(changes = result.changes.len(), "diff finished");

    if !args.quiet {
        print!(
            "{}",
            render_report(&result, differ.options().format, args.summary)
        );
    }

    Ok(if result.has_changes {
        Outcome::Changes
    } else {
        Outcome::Clean
    })
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<Outcome> {
    let document: Value = read_json(&args.document)?;
    let operations: Vec<PatchOperation> = read_json(&args.patch)?;
    let patched = apply_patch(&document, &operations)
        .with_context(|| format!("failed to apply {}", args.patch.display()))?;

    let mut text = patched.to_pretty_string();
    text.push('\n');
    match &args.output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "{} Applied {} operations to {}",
                "✓".green().bold(),
                operations.len(),
                path.display().to_string().bold()
            );
        }
        None => print!("{text}"),
    }
    Ok(Outcome::Clean)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::{Path, PathBuf};

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn run(args: &[&str]) -> anyhow::Result<Outcome> {
        let mut argv = vec!["docdiff", "--no-color"];
        argv.extend_from_slice(args);
        run_command(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn diff_exit_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.json", r#"{"name": "old"}"#);
        let b = write(dir.path(), "b.json", r#"{"name": "new"}"#);
        let a = a.to_str().unwrap();
        let b = b.to_str().unwrap();

        assert_eq!(run(&["diff", a, b, "-q"]).unwrap(), Outcome::Changes);
        assert_eq!(run(&["diff", a, a, "-q"]).unwrap(), Outcome::Clean);
    }

    #[test]
    fn diff_with_options_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.json", r#"{"items": [1, 2], "metadata": {"v": 1}}"#);
        let b = write(dir.path(), "b.json", r#"{"items": [2, 1], "metadata": {"v": 2}}"#);
        let config = write(
            dir.path(),
            "docdiff.toml",
            "ignore_order = true\nignore_metadata = true\nformat = \"semantic\"\n",
        );

        let outcome = run(&[
            "--config",
            config.to_str().unwrap(),
            "diff",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "-q",
        ])
        .unwrap();
        assert_eq!(outcome, Outcome::Clean);
    }

    #[test]
    fn diff_rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.json", "{}");
        let a = a.to_str().unwrap();
        let err = run(&["diff", a, a, "--format", "xml"]).unwrap_err();
        assert!(err.to_string().contains("unsupported diff format"));
    }

    #[test]
    fn diff_reports_unreadable_input() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.json", "{}");
        let missing = dir.path().join("missing.json");
        let err = run(&["diff", a.to_str().unwrap(), missing.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().contains("failed to read new document"));
    }

    #[test]
    fn apply_writes_patched_document() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write(dir.path(), "doc.json", r#"{"name": "old", "tags": ["a"]}"#);
        let patch = write(
            dir.path(),
            "patch.json",
            r#"[{"op": "replace", "path": "/name", "value": "new"},
                {"op": "add", "path": "/tags/-", "value": "b"}]"#,
        );
        let out = dir.path().join("out.json");

        let outcome = run(&[
            "apply",
            doc.to_str().unwrap(),
            patch.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(outcome, Outcome::Clean);

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"name": "new", "tags": ["a", "b"]}));
    }

    #[test]
    fn apply_reports_bad_patch() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write(dir.path(), "doc.json", "{}");
        let patch = write(dir.path(), "patch.json", r#"[{"op": "remove", "path": "/x"}]"#);
        let err = run(&["apply", doc.to_str().unwrap(), patch.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().starts_with("failed to apply"));
    }
}
