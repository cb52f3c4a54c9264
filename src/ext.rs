//! Method syntax for the sequence adapters.
//!
//! [`IterSetExt`] is implemented for every iterator, so the free functions
//! of [`algebra`](crate::algebra), [`sorted`](crate::sorted) and
//! [`transform`](crate::transform) can be chained. Chaining binary stages is
//! how several sequences are combined:
//!
//! ```rust
//! use iterset::ext::IterSetExt;
//!
//! let rest: Vec<i32> = [5, 4, 3, 2, 1]
//!     .into_iter()
//!     .difference([4])
//!     .difference([2, 9])
//!     .collect();
//! assert_eq!(rest, vec![5, 3, 1]);
//! ```

use std::cmp::Ordering;
use std::hash::Hash;

use crate::algebra::{self, Difference, Intersect};
use crate::sorted::{self, Natural, SortedDifference, SortedIntersect, SortedUnion};
use crate::transform::{self, Compact, CompactBy, Unique, UniqueBy};

/// Extension methods for set algebra on iterators.
pub trait IterSetExt: Iterator + Sized {
    /// See [`transform::unique`].
    fn unique(self) -> Unique<Self>
    where
        Self::Item: Eq + Hash + Clone,
    {
        transform::unique(self)
    }

    /// See [`transform::unique_by`].
    fn unique_by<K, F>(self, key: F) -> UniqueBy<Self, K, F>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&Self::Item) -> K,
    {
        transform::unique_by(self, key)
    }

    /// See [`transform::compact`].
    fn compact(self) -> Compact<Self>
    where
        Self::Item: PartialEq,
    {
        transform::compact(self)
    }

    /// See [`transform::compact_by`].
    fn compact_by<K, F>(self, key: F) -> CompactBy<Self, K, F>
    where
        K: PartialEq,
        F: FnMut(&Self::Item) -> K,
    {
        transform::compact_by(self, key)
    }

    /// See [`algebra::intersect`].
    fn intersect<R>(self, seq: R) -> Intersect<Self, R::IntoIter>
    where
        R: IntoIterator<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        algebra::intersect(self, seq)
    }

    /// See [`algebra::difference`].
    fn difference<R>(self, seq: R) -> Difference<Self, R::IntoIter>
    where
        R: IntoIterator<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        algebra::difference(self, seq)
    }

    /// See [`algebra::equal`].
    fn set_eq<R>(self, other: R) -> bool
    where
        R: IntoIterator<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        algebra::equal(self, other)
    }

    /// See [`algebra::equal_counts`].
    fn multiset_eq<R>(self, other: R) -> bool
    where
        R: IntoIterator<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        algebra::equal_counts(self, other)
    }

    /// See [`algebra::is_subset`].
    fn is_subset_of<R>(self, seq: R) -> bool
    where
        R: IntoIterator<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        algebra::is_subset(self, seq)
    }

    /// See [`algebra::is_disjoint`].
    fn is_disjoint_from<R>(self, seq: R) -> bool
    where
        R: IntoIterator<Item = Self::Item>,
        Self::Item: Eq + Hash,
    {
        algebra::is_disjoint(self, seq)
    }

    /// See [`sorted::sorted_union`].
    fn sorted_union<R>(self, seq: R) -> SortedUnion<Self, R::IntoIter, Natural<Self::Item>>
    where
        R: IntoIterator<Item = Self::Item>,
        Self::Item: Ord,
    {
        sorted::sorted_union(self, seq)
    }

    /// See [`sorted::sorted_union_by`].
    fn sorted_union_by<R, F>(self, seq: R, compare: F) -> SortedUnion<Self, R::IntoIter, F>
    where
        R: IntoIterator<Item = Self::Item>,
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        sorted::sorted_union_by(self, seq, compare)
    }

    /// See [`sorted::sorted_intersect`].
    fn sorted_intersect<R>(self, seq: R) -> SortedIntersect<Self, R::IntoIter, Natural<Self::Item>>
    where
        R: IntoIterator<Item = Self::Item>,
        Self::Item: Ord,
    {
        sorted::sorted_intersect(self, seq)
    }

    /// See [`sorted::sorted_intersect_by`].
    fn sorted_intersect_by<R, F>(self, seq: R, compare: F) -> SortedIntersect<Self, R::IntoIter, F>
    where
        R: IntoIterator<Item = Self::Item>,
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        sorted::sorted_intersect_by(self, seq, compare)
    }

    /// See [`sorted::sorted_difference`].
    fn sorted_difference<R>(
        self,
        seq: R,
    ) -> SortedDifference<Self, R::IntoIter, Natural<Self::Item>>
    where
        R: IntoIterator<Item = Self::Item>,
        Self::Item: Ord,
    {
        sorted::sorted_difference(self, seq)
    }

    /// See [`sorted::sorted_difference_by`].
    fn sorted_difference_by<R, F>(self, seq: R, compare: F) -> SortedDifference<Self, R::IntoIter, F>
    where
        R: IntoIterator<Item = Self::Item>,
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        sorted::sorted_difference_by(self, seq, compare)
    }
}

impl<I: Iterator> IterSetExt for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_chained_intersections() {
        let common: Vec<i32> = [1, 2, 3, 4]
            .into_iter()
            .intersect([4, 3, 2])
            .intersect([2, 4])
            .collect();
        let mut common = common;
        common.sort_unstable();
        assert_eq!(common, vec![2, 4]);
    }

    #[rstest]
    fn test_pipeline_of_transforms() {
        let runs: Vec<(char, usize)> = "aabccc".chars().compact().collect();
        assert_eq!(runs, vec![('a', 2), ('b', 1), ('c', 3)]);
        let letters: String = "banana".chars().unique().collect();
        assert_eq!(letters, "ban");
    }

    #[rstest]
    fn test_predicates_via_methods() {
        assert!(["a", "b"].into_iter().set_eq(["b", "a", "a"]));
        assert!(!["a", "b"].into_iter().multiset_eq(["b", "a", "a"]));
        assert!(["a"].into_iter().is_subset_of(["a", "b"]));
        assert!(["c"].into_iter().is_disjoint_from(["a", "b"]));
    }

    #[rstest]
    fn test_sorted_methods() {
        let merged: Vec<i32> = [1, 4].into_iter().sorted_union([2, 3]).collect();
        assert_eq!(merged, vec![1, 2, 3, 4]);
        let rest: Vec<i32> = [1, 2, 3].into_iter().sorted_difference([2]).collect();
        assert_eq!(rest, vec![1, 3]);
        let common: Vec<i32> = [3, 2, 1]
            .into_iter()
            .sorted_intersect_by([2], |a: &i32, b: &i32| b.cmp(a))
            .collect();
        assert_eq!(common, vec![2]);
    }
}
