use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid JSON pointer {pointer:?}: {reason}")]
    InvalidPointer { pointer: String, reason: String },
}
