//! Recursive structural comparison of two document trees.
//!
//! The walk keeps a single mutable [`Path`] that grows as it descends and
//! shrinks on the way back up; a clone is taken only when a change is
//! emitted. Decomposition stops at add/delete boundaries: a key or element
//! present on one side only becomes one change carrying the whole sub-tree.

use std::collections::{BTreeMap, BTreeSet};

use docdiff_types::{Path, PathSegment, Value};

use crate::change::Change;
use crate::matcher::match_elements;
use crate::options::{DiffOptions, METADATA_KEY};

/// Compute the ordered change list turning `old` into `new`.
///
/// Object keys are visited in sorted order and nested changes are emitted
/// depth-first. Trailing positional deletions are emitted from the highest
/// index down, so the list can be applied in sequence as a patch.
pub fn compare(old: &Value, new: &Value, options: &DiffOptions) -> Vec<Change> {
    let mut comparator = Comparator {
        options,
        path: Path::root(),
        changes: Vec::new(),
    };
    comparator.diff(old, new);
    comparator.changes
}

/// Returns `true` if comparing `old` with `new` under `options` would
/// produce no changes.
///
/// This is the equivalence the array matcher cancels on. It is a true
/// equivalence relation, so greedy pairing finds a perfect matching whenever
/// one exists.
pub(crate) fn equivalent(old: &Value, new: &Value, options: &DiffOptions) -> bool {
    match (old, new) {
        (Value::Object(a), Value::Object(b)) => {
            let skipped = |key: &str| options.ignore_metadata && key == METADATA_KEY;
            a.iter()
                .filter(|(key, _)| !skipped(key.as_str()))
                .all(|(key, o)| b.get(key).is_some_and(|n| equivalent(o, n, options)))
                && b
                    .keys()
                    .filter(|key| !skipped(key.as_str()))
                    .all(|key| a.contains_key(key))
        }
        (Value::Array(a), Value::Array(b)) if options.ignore_order => {
            let mut taken = vec![false; b.len()];
            a.len() == b.len()
                && a.iter().all(|o| {
                    match (0..b.len()).find(|&ni| !taken[ni] && equivalent(o, &b[ni], options)) {
                        Some(ni) => {
                            taken[ni] = true;
                            true
                        }
                        None => false,
                    }
                })
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(o, n)| equivalent(o, n, options))
        }
        _ => old == new,
    }
}

struct Comparator<'a> {
    options: &'a DiffOptions,
    path: Path,
    changes: Vec<Change>,
}

impl Comparator<'_> {
    fn diff(&mut self, old: &Value, new: &Value) {
        match (old, new) {
            (Value::Object(a), Value::Object(b)) => self.diff_objects(a, b),
            (Value::Array(a), Value::Array(b)) if self.options.ignore_order => {
                self.diff_arrays_unordered(a, b)
            }
            (Value::Array(a), Value::Array(b)) => self.diff_arrays_positional(a, b),
            _ if old.kind() != new.kind() => self.modified(old, new),
            _ => {
                if old != new {
                    self.modified(old, new);
                }
            }
        }
    }

    fn diff_objects(&mut self, old: &BTreeMap<String, Value>, new: &BTreeMap<String, Value>) {
        let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
        for key in keys {
            if self.options.ignore_metadata && key == METADATA_KEY {
                continue;
            }
            match (old.get(key), new.get(key)) {
                (Some(o), Some(n)) => self.descend(key.as_str(), o, n),
                (None, Some(n)) => {
                    let path = self.path.child(key.as_str());
                    self.changes.push(Change::added(path, n.clone()));
                }
                (Some(o), None) => {
                    let path = self.path.child(key.as_str());
                    self.changes.push(Change::deleted(path, o.clone()));
                }
                (None, None) => {}
            }
        }
    }

    fn diff_arrays_positional(&mut self, old: &[Value], new: &[Value]) {
        let common = old.len().min(new.len());
        for i in 0..common {
            self.descend(i, &old[i], &new[i]);
        }
        for (i, value) in new.iter().enumerate().skip(common) {
            self.changes
                .push(Change::added(self.path.child(i), value.clone()));
        }
        for (i, value) in old.iter().enumerate().skip(common).rev() {
            self.changes
                .push(Change::deleted(self.path.child(i), value.clone()));
        }
    }

    fn diff_arrays_unordered(&mut self, old: &[Value], new: &[Value]) {
        for pair in match_elements(old, new, self.options) {
            match (pair.old, pair.new) {
                (Some(oi), Some(ni)) => self.descend(ni, &old[oi], &new[ni]),
                (Some(oi), None) => {
                    self.changes
                        .push(Change::deleted(self.path.child(oi), old[oi].clone()));
                }
                (None, Some(ni)) => {
                    self.changes
                        .push(Change::added(self.path.child(ni), new[ni].clone()));
                }
                (None, None) => {}
            }
        }
    }

    fn descend<S>(&mut self, segment: S, old: &Value, new: &Value)
    where
        S: Into<PathSegment>,
    {
        self.path.push(segment);
        self.diff(old, new);
        self.path.pop();
    }

    fn modified(&mut self, old: &Value, new: &Value) {
        self.changes
            .push(Change::modified(self.path.clone(), old.clone(), new.clone()));
    }
}
