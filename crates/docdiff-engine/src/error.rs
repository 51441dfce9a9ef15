//! Error types for the diff engine.

use std::fmt;
use std::path::PathBuf;

use docdiff_types::{TypeError, ValueKind};

/// Which input of a comparison an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => f.write_str("old"),
            Self::New => f.write_str("new"),
        }
    }
}

/// Errors that can occur while loading, comparing, or rendering documents.
///
/// The comparison itself is total; only input handling and configuration
/// can fail.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A source document could not be read.
    #[error("failed to read {side} document {}: {source}", path.display())]
    Io {
        side: Side,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source document is not well-formed JSON.
    #[error("failed to parse {side} document: {source}")]
    Parse {
        side: Side,
        #[source]
        source: serde_json::Error,
    },

    /// The requested output format is not one of the known renderers.
    #[error("unsupported diff format {0:?}: expected unified, jsonpatch or semantic")]
    UnsupportedFormat(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while applying JSON Patch operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// The operation's path is not a valid JSON Pointer.
    #[error(transparent)]
    Pointer(#[from] TypeError),

    /// The pointer addresses a location that does not exist.
    #[error("path not found: {0:?}")]
    PathNotFound(String),

    /// An array token is not a valid index.
    #[error("invalid array index {token:?} in {pointer:?}")]
    InvalidIndex { pointer: String, token: String },

    /// An array index is past the end of the array.
    #[error("index {index} out of bounds in {pointer:?} (length {len})")]
    IndexOutOfBounds {
        pointer: String,
        index: usize,
        len: usize,
    },

    /// The pointer descends into a scalar.
    #[error("cannot address into {kind} at {pointer:?}")]
    NotAContainer { pointer: String, kind: ValueKind },
}

/// Convenience alias for diff operations.
pub type Result<T> = std::result::Result<T, DiffError>;
