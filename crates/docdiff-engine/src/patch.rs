//! JSON Patch (RFC 6902) operations and their application.
//!
//! Only the three operations the comparator can produce are modelled:
//! `add`, `remove`, and `replace`.

use docdiff_types::{parse_json_pointer, Value};
use serde::{Deserialize, Serialize};

use crate::change::{Change, ChangeKind};
use crate::error::PatchError;

/// A single patch operation. `path` is a JSON Pointer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
}

impl PatchOperation {
    /// The operation's target pointer.
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. } | Self::Remove { path } | Self::Replace { path, .. } => path,
        }
    }
}

impl From<&Change> for PatchOperation {
    fn from(change: &Change) -> Self {
        let path = change.path.to_json_pointer();
        match change.kind {
            ChangeKind::Added => Self::Add {
                path,
                value: change.new_value.clone().unwrap_or(Value::Null),
            },
            ChangeKind::Deleted => Self::Remove { path },
            ChangeKind::Modified => Self::Replace {
                path,
                value: change.new_value.clone().unwrap_or(Value::Null),
            },
        }
    }
}

/// Map each change to one operation, preserving order.
pub fn to_operations(changes: &[Change]) -> Vec<PatchOperation> {
    changes.iter().map(PatchOperation::from).collect()
}

/// Apply operations in order to a copy of `doc`.
pub fn apply_patch(doc: &Value, operations: &[PatchOperation]) -> Result<Value, PatchError> {
    let mut target = doc.clone();
    for operation in operations {
        apply_operation(&mut target, operation)?;
    }
    Ok(target)
}

fn apply_operation(doc: &mut Value, operation: &PatchOperation) -> Result<(), PatchError> {
    let pointer = operation.path();
    let mut tokens = parse_json_pointer(pointer)?;
    let Some(last) = tokens.pop() else {
        // The empty pointer addresses the whole document.
        return match operation {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => {
                *doc = value.clone();
                Ok(())
            }
            PatchOperation::Remove { .. } => Err(PatchError::PathNotFound(pointer.to_string())),
        };
    };

    let parent = resolve_mut(doc, &tokens, pointer)?;
    match (parent, operation) {
        (Value::Object(map), PatchOperation::Add { value, .. }) => {
            map.insert(last, value.clone());
        }
        (Value::Object(map), PatchOperation::Remove { .. }) => {
            map.remove(&last)
                .ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))?;
        }
        (Value::Object(map), PatchOperation::Replace { value, .. }) => {
            let slot = map
                .get_mut(&last)
                .ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))?;
            *slot = value.clone();
        }
        (Value::Array(items), PatchOperation::Add { value, .. }) => {
            let index = if last == "-" {
                items.len()
            } else {
                parse_index(&last, pointer)?
            };
            if index > items.len() {
                return Err(out_of_bounds(pointer, index, items.len()));
            }
            items.insert(index, value.clone());
        }
        (Value::Array(items), PatchOperation::Remove { .. }) => {
            let index = parse_index(&last, pointer)?;
            if index >= items.len() {
                return Err(out_of_bounds(pointer, index, items.len()));
            }
            items.remove(index);
        }
        (Value::Array(items), PatchOperation::Replace { value, .. }) => {
            let index = parse_index(&last, pointer)?;
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or_else(|| out_of_bounds(pointer, index, len))?;
            *slot = value.clone();
        }
        (scalar, _) => {
            return Err(PatchError::NotAContainer {
                pointer: pointer.to_string(),
                kind: scalar.kind(),
            })
        }
    }
    Ok(())
}

fn resolve_mut<'a>(
    doc: &'a mut Value,
    tokens: &[String],
    pointer: &str,
) -> Result<&'a mut Value, PatchError> {
    let mut current = doc;
    for token in tokens {
        current = match current {
            Value::Object(map) => map
                .get_mut(token)
                .ok_or_else(|| PatchError::PathNotFound(pointer.to_string()))?,
            Value::Array(items) => {
                let index = parse_index(token, pointer)?;
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or_else(|| out_of_bounds(pointer, index, len))?
            }
            scalar => {
                return Err(PatchError::NotAContainer {
                    pointer: pointer.to_string(),
                    kind: scalar.kind(),
                })
            }
        };
    }
    Ok(current)
}

// RFC 6901: no leading zeros, no signs.
fn parse_index(token: &str, pointer: &str) -> Result<usize, PatchError> {
    let valid = !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    valid
        .then(|| token.parse::<usize>().ok())
        .flatten()
        .ok_or_else(|| PatchError::InvalidIndex {
            pointer: pointer.to_string(),
            token: token.to_string(),
        })
}

fn out_of_bounds(pointer: &str, index: usize, len: usize) -> PatchError {
    PatchError::IndexOutOfBounds {
        pointer: pointer.to_string(),
        index,
        len,
    }
}
