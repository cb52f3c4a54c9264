//! Predicates over two raw sequences.

use std::collections::hash_map::Entry;
use std::hash::Hash;

use super::{difference, intersect};
use crate::hash::{DefaultHashMap, temporary_map};
use crate::sequence::{Ledger, Observation, Side, zip_tagged};

/// Returns `true` if both sequences contain the same set of elements.
///
/// Duplicates are ignored. The inputs are co-iterated, and the comparison
/// fails as soon as one side produces an element never seen on the other
/// side after the other side has been exhausted.
///
/// # Complexity
///
/// O(k + m) time and space.
///
/// # Examples
///
/// ```rust
/// use iterset::algebra::equal;
///
/// assert!(equal(["a", "b", "a"], ["b", "a"]));
/// assert!(!equal(["a"], ["a", "c"]));
/// ```
pub fn equal<L, R>(left: L, right: R) -> bool
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    L::Item: Eq + Hash,
{
    let mut ledger = Ledger::new();
    for (item, tag) in zip_tagged(left, right) {
        if ledger.observe(item, tag.side) == Observation::First && tag.other_exhausted {
            return false;
        }
    }
    ledger.pending(Side::Left) == 0 && ledger.pending(Side::Right) == 0
}

/// Returns `true` if both sequences are equal as multisets.
///
/// Every element must occur the same number of times in both. A signed
/// count is kept per element; once either side is exhausted, any element
/// from the other side that has nothing left to cancel fails the
/// comparison immediately.
///
/// # Complexity
///
/// O(k + m) time and space.
///
/// # Examples
///
/// ```rust
/// use iterset::algebra::equal_counts;
///
/// assert!(equal_counts(["a", "b", "a"], ["a", "a", "b"]));
/// assert!(!equal_counts(["a", "b", "a"], ["a", "b", "b"]));
/// ```
pub fn equal_counts<L, R>(left: L, right: R) -> bool
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    L::Item: Eq + Hash,
{
    let mut counts: DefaultHashMap<L::Item, isize> = temporary_map();
    for (item, tag) in zip_tagged(left, right) {
        let delta = match tag.side {
            Side::Left => 1,
            Side::Right => -1,
        };
        match counts.entry(item) {
            Entry::Occupied(mut entry) => {
                let count = entry.get_mut();
                if tag.other_exhausted && *count * delta > 0 {
                    return false;
                }
                *count += delta;
                if *count == 0 {
                    entry.remove();
                }
            }
            Entry::Vacant(entry) => {
                if tag.other_exhausted {
                    return false;
                }
                entry.insert(delta);
            }
        }
    }
    counts.is_empty()
}

/// Returns `true` if every element of `keys` occurs in `seq`.
///
/// Evaluated as emptiness of the lazy [`difference`], so it stops at the
/// first unmatched key and advances `seq` no further than needed.
///
/// # Examples
///
/// ```rust
/// use iterset::algebra::is_subset;
///
/// assert!(is_subset(["a"], ["a", "b"]));
/// assert!(!is_subset(["a", "b"], ["a"]));
/// ```
pub fn is_subset<L, R>(keys: L, seq: R) -> bool
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    L::Item: Eq + Hash,
{
    difference(keys, seq).next().is_none()
}

/// Returns `true` if the sequences have no element in common.
///
/// Evaluated as emptiness of the lazy [`intersect`], so it stops at the
/// first common element.
///
/// # Examples
///
/// ```rust
/// use iterset::algebra::is_disjoint;
///
/// assert!(is_disjoint([1, 2], [3, 4]));
/// assert!(!is_disjoint([1, 2], [4, 2]));
/// ```
pub fn is_disjoint<L, R>(left: L, right: R) -> bool
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    L::Item: Eq + Hash,
{
    intersect(left, right).next().is_none()
}
