//! Lazy difference of two raw sequences.

use std::hash::Hash;
use std::iter::FusedIterator;

use crate::hash::{DefaultHashSet, temporary_set};
use crate::sequence::Cursor;

/// Iterator over the elements of `keys` that do not occur in `seq`.
///
/// Created by [`difference`]. `seq` is never collected up front: each key is
/// first looked up among the elements of `seq` already pulled, and only if it
/// is not there is `seq` advanced, remembering every element it passes,
/// until the key turns up or `seq` runs out. Once `seq` is exhausted each
/// lookup is a single hash probe.
///
/// Duplicate keys are filtered independently, so a key absent from `seq` is
/// yielded as many times as it occurs in `keys`.
pub struct Difference<I, J: Iterator> {
    keys: I,
    seq: Cursor<J>,
    seen: DefaultHashSet<J::Item>,
}

/// Returns the elements of `keys` that are not present in `seq`, in the
/// order of `keys`.
///
/// # Complexity
///
/// O(k + m) time over the whole traversal, with `seq` advanced only as far
/// as the lookups require. Space is bounded by the part of `seq` pulled so far.
///
/// # Examples
///
/// ```rust
/// use iterset::algebra::difference;
///
/// let missing: Vec<&str> = difference(["a", "b"], ["b", "c"]).collect();
/// assert_eq!(missing, vec!["a"]);
/// ```
pub fn difference<L, R>(keys: L, seq: R) -> Difference<L::IntoIter, R::IntoIter>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    L::Item: Eq + Hash,
{
    Difference {
        keys: keys.into_iter(),
        seq: Cursor::new(seq),
        seen: temporary_set(),
    }
}

impl<I, J> Difference<I, J>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
    I::Item: Eq + Hash,
{
    fn present(&mut self, key: &I::Item) -> bool {
        if self.seen.contains(key) {
            return true;
        }
        for item in self.seq.by_ref() {
            let found = item == *key;
            self.seen.insert(item);
            if found {
                return true;
            }
        }
        false
    }
}

impl<I, J> Iterator for Difference<I, J>
where
    I: Iterator,
    J: Iterator<Item = I::Item>,
    I::Item: Eq + Hash,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(key) = self.keys.next() else {
                self.seq.stop();
                return None;
            };
            if !self.present(&key) {
                return Some(key);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.keys.size_hint().1)
    }
}

impl<I, J> FusedIterator for Difference<I, J>
where
    I: FusedIterator,
    J: Iterator<Item = I::Item>,
    I::Item: Eq + Hash,
{
}

impl<I, J> Clone for Difference<I, J>
where
    I: Clone,
    J: Iterator + Clone,
    J::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            seq: self.seq.clone(),
            seen: self.seen.clone(),
        }
    }
}
