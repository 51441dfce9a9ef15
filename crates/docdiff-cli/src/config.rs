use std::fs;
use std::path::Path;

use anyhow::Context;
use docdiff_engine::{DiffFormat, DiffOptions, Result as EngineResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::DiffArgs;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "docdiff.toml";

/// Defaults for the `diff` command, read from a TOML file. Command-line
/// flags take precedence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Output format name: unified, jsonpatch or semantic.
    pub format: Option<String>,
    pub ignore_order: bool,
    pub ignore_metadata: bool,
    /// Lines of context in unified output.
    pub context_lines: Option<usize>,
    /// Colorize terminal output.
    pub color: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            format: None,
            ignore_order: false,
            ignore_metadata: false,
            context_lines: None,
            color: true,
        }
    }
}

impl CliConfig {
    /// Load `explicit`, or `./docdiff.toml` if it exists, or the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Merge the file defaults with command-line flags. An unknown format
    /// name fails here, before any document is read.
    pub fn diff_options(&self, args: &DiffArgs) -> EngineResult<DiffOptions> {
        let format = match args.format.as_deref().or(self.format.as_deref()) {
            Some(name) => name.parse::<DiffFormat>()?,
            None => DiffFormat::default(),
        };
        let defaults = DiffOptions::default();
        Ok(DiffOptions {
            format,
            ignore_order: args.ignore_order || self.ignore_order,
            ignore_metadata: args.ignore_metadata || self.ignore_metadata,
            context_lines: args
                .context
                .or(self.context_lines)
                .unwrap_or(defaults.context_lines),
        })
    }
}
