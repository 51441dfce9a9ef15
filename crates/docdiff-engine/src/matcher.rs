//! Order-insensitive pairing of array elements.
//!
//! Matching runs in two deterministic phases:
//!
//! 1. Equivalence cancellation: each old element, in ascending index order,
//!    is paired with the lowest-indexed unmatched new element that compares
//!    without changes under the active [`DiffOptions`] (so nested arrays are
//!    order-insensitive too, and `metadata` is skipped when ignored).
//! 2. Identity matching: remaining old objects carrying an `id` field are
//!    paired, in ascending index order, with the first unmatched new object
//!    whose `id` is equal. Duplicate ids resolve first-unmatched-wins.
//!
//! Whatever is left is reported alone on its side.

use docdiff_types::Value;
use tracing::trace;

use crate::compare::equivalent;
use crate::options::{DiffOptions, IDENTITY_KEY};

/// One entry of a matching. Every index of each input appears in exactly one
/// pair, either together with a partner or alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementPair {
    pub old: Option<usize>,
    pub new: Option<usize>,
}

impl ElementPair {
    /// Returns `true` if both sides are present.
    pub fn is_matched(&self) -> bool {
        self.old.is_some() && self.new.is_some()
    }
}

/// Pair the elements of two arrays without regard to position.
///
/// The result lists matched pairs by ascending new index, then unmatched old
/// indices ascending, then unmatched new indices ascending.
pub fn match_elements(old: &[Value], new: &[Value], options: &DiffOptions) -> Vec<ElementPair> {
    let mut partner: Vec<Option<usize>> = vec![None; old.len()];
    let mut new_taken = vec![false; new.len()];

    for (oi, element) in old.iter().enumerate() {
        if let Some(ni) =
            (0..new.len()).find(|&ni| !new_taken[ni] && equivalent(element, &new[ni], options))
        {
            new_taken[ni] = true;
            partner[oi] = Some(ni);
        }
    }
    trace!(
        cancelled = partner.iter().flatten().count(),
        "array match: equivalence phase"
    );

    for (oi, element) in old.iter().enumerate() {
        if partner[oi].is_some() {
            continue;
        }
        let Some(id) = identity(element) else {
            continue;
        };
        if let Some(ni) =
            (0..new.len()).find(|&ni| !new_taken[ni] && identity(&new[ni]) == Some(id))
        {
            new_taken[ni] = true;
            partner[oi] = Some(ni);
        }
    }
    trace!(
        matched = partner.iter().flatten().count(),
        "array match: identity phase"
    );

    let mut pairs: Vec<ElementPair> = partner
        .iter()
        .enumerate()
        .filter_map(|(oi, ni)| {
            ni.map(|ni| ElementPair {
                old: Some(oi),
                new: Some(ni),
            })
        })
        .collect();
    pairs.sort_by_key(|pair| pair.new);

    pairs.extend(
        partner
            .iter()
            .enumerate()
            .filter(|(_, ni)| ni.is_none())
            .map(|(oi, _)| ElementPair {
                old: Some(oi),
                new: None,
            }),
    );
    pairs.extend(
        new_taken
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(|(ni, _)| ElementPair {
                old: None,
                new: Some(ni),
            }),
    );
    pairs
}

fn identity(element: &Value) -> Option<&Value> {
    element.get(IDENTITY_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(v: serde_json::Value) -> Vec<Value> {
        match Value::from(v) {
            Value::Array(items) => items,
            other => panic!("expected array, got {other:?}"),
        }
    }

    fn pair(old: Option<usize>, new: Option<usize>) -> ElementPair {
        ElementPair { old, new }
    }

    fn unordered() -> DiffOptions {
        DiffOptions {
            ignore_order: true,
            ..Default::default()
        }
    }

    #[test]
    fn pure_permutation_matches_everything() {
        let old = values(json!([1, 2, 3]));
        let new = values(json!([3, 1, 2]));
        let pairs = match_elements(&old, &new, &unordered());
        assert_eq!(
            pairs,
            vec![
                pair(Some(2), Some(0)),
                pair(Some(0), Some(1)),
                pair(Some(1), Some(2)),
            ]
        );
        assert!(pairs.iter().all(ElementPair::is_matched));
    }

    #[test]
    fn duplicates_pair_lowest_index_first() {
        let old = values(json!(["a", "a"]));
        let new = values(json!(["b", "a", "a"]));
        let pairs = match_elements(&old, &new, &unordered());
        assert_eq!(
            pairs,
            vec![
                pair(Some(0), Some(1)),
                pair(Some(1), Some(2)),
                pair(None, Some(0)),
            ]
        );
    }

    #[test]
    fn identity_pairs_edited_records() {
        let old = values(json!([{"id": 1, "v": "a"}, {"id": 2, "v": "b"}]));
        let new = values(json!([{"id": 2, "v": "B"}, {"id": 1, "v": "a"}]));
        let pairs = match_elements(&old, &new, &unordered());
        assert_eq!(
            pairs,
            vec![pair(Some(1), Some(0)), pair(Some(0), Some(1))]
        );
    }

    #[test]
    fn equality_wins_over_identity() {
        // old[0] equals new[1] exactly; old[1] shares only the id with new[0].
        let old = values(json!([{"id": 7, "v": 1}, {"id": 7, "v": 2}]));
        let new = values(json!([{"id": 7, "v": 3}, {"id": 7, "v": 1}]));
        let pairs = match_elements(&old, &new, &unordered());
        assert_eq!(
            pairs,
            vec![pair(Some(1), Some(0)), pair(Some(0), Some(1))]
        );
    }

    #[test]
    fn duplicate_ids_first_unmatched_wins() {
        let old = values(json!([{"id": "x", "n": 1}, {"id": "x", "n": 2}]));
        let new = values(json!([{"id": "x", "n": 9}]));
        let pairs = match_elements(&old, &new, &unordered());
        assert_eq!(pairs, vec![pair(Some(0), Some(0)), pair(Some(1), None)]);
    }

    #[test]
    fn unmatched_elements_are_reported_per_side() {
        let old = values(json!([1, {"name": "no-id"}]));
        let new = values(json!([{"name": "other"}, 2]));
        let pairs = match_elements(&old, &new, &unordered());
        assert_eq!(
            pairs,
            vec![
                pair(Some(0), None),
                pair(Some(1), None),
                pair(None, Some(0)),
                pair(None, Some(1)),
            ]
        );
    }

    #[test]
    fn every_index_appears_exactly_once() {
        let old = values(json!([1, 2, {"id": 1}, {"id": 2, "x": 0}, 5]));
        let new = values(json!([{"id": 2, "x": 1}, 5, 6, 1]));
        let pairs = match_elements(&old, &new, &unordered());

        let mut olds: Vec<usize> = pairs.iter().filter_map(|p| p.old).collect();
        let mut news: Vec<usize> = pairs.iter().filter_map(|p| p.new).collect();
        olds.sort_unstable();
        news.sort_unstable();
        assert_eq!(olds, (0..old.len()).collect::<Vec<_>>());
        assert_eq!(news, (0..new.len()).collect::<Vec<_>>());
    }

    #[test]
    fn nested_arrays_cancel_regardless_of_order() {
        let old = values(json!([[1, 2], [3]]));
        let new = values(json!([[3], [2, 1]]));
        let pairs = match_elements(&old, &new, &unordered());
        assert_eq!(pairs, vec![pair(Some(1), Some(0)), pair(Some(0), Some(1))]);
    }

    #[test]
    fn ignored_metadata_does_not_block_cancellation() {
        let old = values(json!([{"name": "a", "metadata": {"v": 1}}]));
        let new = values(json!([{"name": "a", "metadata": {"v": 2}}]));
        let options = DiffOptions {
            ignore_metadata: true,
            ..unordered()
        };
        assert_eq!(match_elements(&old, &new, &options), vec![pair(Some(0), Some(0))]);
        assert_eq!(
            match_elements(&old, &new, &unordered()),
            vec![pair(Some(0), None), pair(None, Some(0))]
        );
    }

    #[test]
    fn empty_inputs() {
        assert!(match_elements(&[], &[], &unordered()).is_empty());
        let new = values(json!([1]));
        assert_eq!(match_elements(&[], &new, &unordered()), vec![pair(None, Some(0))]);
    }
}
