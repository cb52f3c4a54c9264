//! Deduplication and run compaction over a single sequence.
//!
//! [`unique`] and [`unique_by`] remove duplicates anywhere in the sequence
//! with a temporary dedup set. [`compact`] and [`compact_by`] only merge
//! *adjacent* equal elements and need no set at all.

use std::hash::Hash;
use std::iter::FusedIterator;

use crate::hash::{DefaultHashSet, temporary_set};
use crate::sequence::Cursor;

// =============================================================================
// Unique
// =============================================================================

/// Iterator yielding each element the first time it occurs.
///
/// Created by [`unique`]. The dedup set is part of the iterator, so a clone
/// taken before iteration starts has its own empty set.
pub struct Unique<I: Iterator> {
    iter: I,
    seen: DefaultHashSet<I::Item>,
}

/// Returns the elements of `seq` without duplicates, in first-seen order.
///
/// # Examples
///
/// ```rust
/// use iterset::transform::unique;
///
/// let letters: Vec<&str> = unique(["b", "a", "b"]).collect();
/// assert_eq!(letters, vec!["b", "a"]);
/// ```
pub fn unique<I>(seq: I) -> Unique<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Eq + Hash + Clone,
{
    Unique {
        iter: seq.into_iter(),
        seen: temporary_set(),
    }
}

impl<I> Iterator for Unique<I>
where
    I: Iterator,
    I::Item: Eq + Hash + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let seen = &mut self.seen;
        self.iter.find(|item| !seen.contains(item) && seen.insert(item.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I> FusedIterator for Unique<I>
where
    I: FusedIterator,
    I::Item: Eq + Hash + Clone,
{
}

impl<I> Clone for Unique<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            seen: self.seen.clone(),
        }
    }
}

// =============================================================================
// UniqueBy
// =============================================================================

/// Iterator yielding `(key, value)` for the first value of each derived key.
///
/// Created by [`unique_by`].
pub struct UniqueBy<I, K, F> {
    iter: I,
    key: F,
    seen: DefaultHashSet<K>,
}

/// Deduplicates `seq` on a derived key, yielding `(key, first value)`.
///
/// # Examples
///
/// ```rust
/// use iterset::transform::unique_by;
///
/// let firsts: Vec<(usize, &str)> = unique_by(["bb", "a", "cc"], |word| word.len()).collect();
/// assert_eq!(firsts, vec![(2, "bb"), (1, "a")]);
/// ```
pub fn unique_by<I, K, F>(seq: I, key: F) -> UniqueBy<I::IntoIter, K, F>
where
    I: IntoIterator,
    K: Eq + Hash + Clone,
    F: FnMut(&I::Item) -> K,
{
    UniqueBy {
        iter: seq.into_iter(),
        key,
        seen: temporary_set(),
    }
}

impl<I, K, F> Iterator for UniqueBy<I, K, F>
where
    I: Iterator,
    K: Eq + Hash + Clone,
    F: FnMut(&I::Item) -> K,
{
    type Item = (K, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        for value in self.iter.by_ref() {
            let key = (self.key)(&value);
            if !self.seen.contains(&key) {
                self.seen.insert(key.clone());
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I: Clone, K: Clone, F: Clone> Clone for UniqueBy<I, K, F> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            key: self.key.clone(),
            seen: self.seen.clone(),
        }
    }
}

// =============================================================================
// Compact
// =============================================================================

/// Iterator yielding `(element, run length)` for each run of equal
/// adjacent elements.
///
/// Created by [`compact`].
pub struct Compact<I: Iterator> {
    iter: Cursor<I>,
}

/// Collapses runs of equal adjacent elements into `(element, count)`.
///
/// Only consecutive duplicates are merged; combine with [`unique`] for
/// global deduplication.
///
/// # Examples
///
/// ```rust
/// use iterset::transform::compact;
///
/// let runs: Vec<(&str, usize)> = compact(["b", "b", "a", "a", "b"]).collect();
/// assert_eq!(runs, vec![("b", 2), ("a", 2), ("b", 1)]);
/// ```
pub fn compact<I>(seq: I) -> Compact<I::IntoIter>
where
    I: IntoIterator,
    I::Item: PartialEq,
{
    Compact {
        iter: Cursor::new(seq),
    }
}

impl<I> Iterator for Compact<I>
where
    I: Iterator,
    I::Item: PartialEq,
{
    type Item = (I::Item, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        let mut run = 1;
        while self.iter.next_if(|next| *next == item).is_some() {
            run += 1;
        }
        Some((item, run))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.iter.size_hint();
        (usize::from(lower > 0), upper)
    }
}

impl<I> FusedIterator for Compact<I>
where
    I: Iterator,
    I::Item: PartialEq,
{
}

impl<I> Clone for Compact<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

// =============================================================================
// CompactBy
// =============================================================================

/// Iterator yielding `(key, values)` for each run of adjacent values with
/// equal derived keys.
///
/// Created by [`compact_by`]. The key function is called once per value.
pub struct CompactBy<I: Iterator, K, F> {
    iter: I,
    key: F,
    pending: Option<(K, I::Item)>,
}

/// Groups runs of adjacent values sharing a derived key.
///
/// # Examples
///
/// ```rust
/// use iterset::transform::compact_by;
///
/// let runs: Vec<(bool, Vec<i32>)> = compact_by([2, 4, 1, 6], |n| n % 2 == 0).collect();
/// assert_eq!(runs, vec![(true, vec![2, 4]), (false, vec![1]), (true, vec![6])]);
/// ```
pub fn compact_by<I, K, F>(seq: I, key: F) -> CompactBy<I::IntoIter, K, F>
where
    I: IntoIterator,
    K: PartialEq,
    F: FnMut(&I::Item) -> K,
{
    CompactBy {
        iter: seq.into_iter(),
        key,
        pending: None,
    }
}

impl<I, K, F> Iterator for CompactBy<I, K, F>
where
    I: Iterator,
    K: PartialEq,
    F: FnMut(&I::Item) -> K,
{
    type Item = (K, Vec<I::Item>);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, first) = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let value = self.iter.next()?;
                ((self.key)(&value), value)
            }
        };
        let mut values = vec![first];
        for value in self.iter.by_ref() {
            let next_key = (self.key)(&value);
            if next_key == key {
                values.push(value);
            } else {
                self.pending = Some((next_key, value));
                break;
            }
        }
        Some((key, values))
    }
}

impl<I, K, F> Clone for CompactBy<I, K, F>
where
    I: Iterator + Clone,
    I::Item: Clone,
    K: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            key: self.key.clone(),
            pending: self.pending.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec!["b", "a", "b"], vec!["b", "a"])]
    #[case(vec!["a", "a", "a"], vec!["a"])]
    fn test_unique_cases(#[case] seq: Vec<&str>, #[case] expected: Vec<&str>) {
        assert_eq!(unique(seq).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn test_unique_clone_has_fresh_dedup_state() {
        let letters = unique(["b", "a", "b"].into_iter());
        let replay = letters.clone();
        assert_eq!(letters.collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(replay.collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[rstest]
    fn test_unique_by_first_value_wins() {
        let firsts: Vec<(i32, i32)> = unique_by([3, 5, 4, 7, 6], |n| n % 2).collect();
        assert_eq!(firsts, vec![(1, 3), (0, 4)]);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec!["b", "b", "a", "a", "b"], vec![("b", 2), ("a", 2), ("b", 1)])]
    #[case(vec!["a"], vec![("a", 1)])]
    fn test_compact_cases(#[case] seq: Vec<&str>, #[case] expected: Vec<(&str, usize)>) {
        assert_eq!(compact(seq).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn test_compact_by_groups_only_adjacent_runs() {
        let runs: Vec<(usize, Vec<&str>)> =
            compact_by(["aa", "bb", "c", "dd"], |word| word.len()).collect();
        assert_eq!(runs, vec![(2, vec!["aa", "bb"]), (1, vec!["c"]), (2, vec!["dd"])]);
    }

    #[rstest]
    fn test_compact_by_calls_key_once_per_value() {
        let mut calls = 0;
        let runs = compact_by([1, 1, 2, 2, 2], |n| {
            calls += 1;
            *n
        })
        .count();
        assert_eq!(runs, 2);
        assert_eq!(calls, 5);
    }

    #[rstest]
    fn test_transforms_are_restartable() {
        let runs = compact([1, 1, 2].into_iter());
        assert_eq!(runs.clone().count(), runs.count());
        let groups = compact_by([1, 1, 2].into_iter(), |n| *n);
        assert_eq!(groups.clone().count(), groups.count());
        let firsts = unique_by([1, 1, 2].into_iter(), |n| *n);
        assert_eq!(firsts.clone().count(), firsts.count());
    }
}
