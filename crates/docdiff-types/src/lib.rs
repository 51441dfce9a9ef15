//! Foundation types for docdiff.
//!
//! This crate provides the in-memory document model and the addressing scheme
//! used throughout the diff engine. Every other docdiff crate depends on
//! `docdiff-types`.
//!
//! # Key Types
//!
//! - [`Value`] -- Closed tagged union over null/bool/number/string/array/object
//! - [`Number`] -- JSON number compared by numeric value (`1 == 1.0`)
//! - [`Path`] / [`PathSegment`] -- Location inside a [`Value`] tree (`a.b[2].c`)
//! - [`parse_json_pointer`] -- RFC 6901 pointer decoding

pub mod error;
pub mod path;
pub mod value;

pub use error::TypeError;
pub use path::{escape_pointer_token, parse_json_pointer, Path, PathSegment};
pub use value::{Number, Value, ValueKind};
