use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// Object key skipped at any depth when `ignore_metadata` is set.
pub const METADATA_KEY: &str = "metadata";

/// Object field used to pair array elements when `ignore_order` is set.
pub const IDENTITY_KEY: &str = "id";

/// Selects the renderer for [`DiffResult::patch`](crate::DiffResult::patch).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffFormat {
    /// Line-oriented unified diff of the pretty-printed documents.
    #[default]
    Unified,
    /// RFC 6902 JSON Patch operations.
    #[serde(alias = "json-patch")]
    JsonPatch,
    /// One human-readable line per change plus a count summary.
    Semantic,
}

impl FromStr for DiffFormat {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unified" => Ok(Self::Unified),
            "jsonpatch" | "json-patch" => Ok(Self::JsonPatch),
            "semantic" => Ok(Self::Semantic),
            _ => Err(DiffError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DiffFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unified => f.write_str("unified"),
            Self::JsonPatch => f.write_str("jsonpatch"),
            Self::Semantic => f.write_str("semantic"),
        }
    }
}

/// Options for a single comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Renderer used for the patch text.
    pub format: DiffFormat,
    /// Compare arrays as multisets, pairing elements by equality and then by
    /// their `id` field.
    pub ignore_order: bool,
    /// Skip every object key named `metadata`, at any depth.
    pub ignore_metadata: bool,
    /// Lines of context around each unified hunk.
    pub context_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            format: DiffFormat::Unified,
            ignore_order: false,
            ignore_metadata: false,
            context_lines: 3,
        }
    }
}

impl DiffOptions {
    /// Default options rendering with the given format.
    pub fn with_format(format: DiffFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_formats() {
        assert_eq!("unified".parse::<DiffFormat>().unwrap(), DiffFormat::Unified);
        assert_eq!("JSONPatch".parse::<DiffFormat>().unwrap(), DiffFormat::JsonPatch);
        assert_eq!("json-patch".parse::<DiffFormat>().unwrap(), DiffFormat::JsonPatch);
        assert_eq!("semantic".parse::<DiffFormat>().unwrap(), DiffFormat::Semantic);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = "side-by-side".parse::<DiffFormat>().unwrap_err();
        assert!(matches!(err, DiffError::UnsupportedFormat(ref f) if f == "side-by-side"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for format in [DiffFormat::Unified, DiffFormat::JsonPatch, DiffFormat::Semantic] {
            assert_eq!(format.to_string().parse::<DiffFormat>().unwrap(), format);
        }
    }

    #[test]
    fn default_options() {
        let options = DiffOptions::default();
        assert_eq!(options.format, DiffFormat::Unified);
        assert!(!options.ignore_order);
        assert!(!options.ignore_metadata);
        assert_eq!(options.context_lines, 3);
    }

    #[test]
    fn with_format_keeps_other_defaults() {
        let options = DiffOptions::with_format(DiffFormat::Semantic);
        assert_eq!(options.format, DiffFormat::Semantic);
        assert_eq!(options.context_lines, 3);
    }
}
