//! Merge-style set algebra over sequences that are already sorted.
//!
//! Each operation co-iterates a *driving* sequence (the first argument) and
//! a *lookahead* sequence with two [`Cursor`]s, in O(n + m) time and with
//! no auxiliary set. Both inputs must be sorted by the same order; this is
//! not checked, and unsorted input gives unspecified (but memory-safe)
//! output.
//!
//! | Function                | Yields                                           |
//! |-------------------------|--------------------------------------------------|
//! | [`sorted_union`]        | every element of both, merged; duplicates kept   |
//! | [`sorted_intersect`]    | driving elements with an equal lookahead element |
//! | [`sorted_difference`]   | driving elements with no equal lookahead element |
//!
//! The `_by` variants take a comparator instead of relying on [`Ord`].
//!
//! # Examples
//!
//! ```rust
//! use iterset::sorted::{sorted_difference, sorted_union};
//!
//! let rest: Vec<&str> = sorted_difference(["b", "c"], ["a", "b", "d"]).collect();
//! assert_eq!(rest, vec!["c"]);
//!
//! let merged: Vec<i32> = sorted_union([1, 3, 5], [2, 3]).collect();
//! assert_eq!(merged, vec![1, 2, 3, 3, 5]);
//! ```

use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::sequence::Cursor;

/// Comparator used by the non-`_by` functions: the element type's [`Ord`].
pub type Natural<T> = fn(&T, &T) -> Ordering;

// =============================================================================
// SortedUnion
// =============================================================================

/// Iterator merging two sorted sequences.
///
/// Created by [`sorted_union`] and [`sorted_union_by`]. On a tie the
/// driving element is yielded first, immediately followed by the lookahead
/// element.
pub struct SortedUnion<A: Iterator, B: Iterator, F> {
    left: Cursor<A>,
    right: Cursor<B>,
    compare: F,
    tied: bool,
}

/// Merges two sorted sequences into one sorted sequence.
pub fn sorted_union<L, R>(left: L, right: R) -> SortedUnion<L::IntoIter, R::IntoIter, Natural<L::Item>>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    L::Item: Ord,
{
    sorted_union_by(left, right, Ord::cmp as Natural<L::Item>)
}

/// Merges two sequences sorted by `compare`.
///
/// # Examples
///
/// ```rust
/// use iterset::sorted::sorted_union_by;
///
/// let merged: Vec<i32> = sorted_union_by([5, 1], [4, 2], |a: &i32, b: &i32| b.cmp(a)).collect();
/// assert_eq!(merged, vec![5, 4, 2, 1]);
/// ```
pub fn sorted_union_by<L, R, F>(left: L, right: R, compare: F) -> SortedUnion<L::IntoIter, R::IntoIter, F>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    F: FnMut(&L::Item, &L::Item) -> Ordering,
{
    SortedUnion {
        left: Cursor::new(left),
        right: Cursor::new(right),
        compare,
        tied: false,
    }
}

impl<A, B, F> Iterator for SortedUnion<A, B, F>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    F: FnMut(&A::Item, &A::Item) -> Ordering,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.tied {
            self.tied = false;
            return self.right.next();
        }
        let order = match (self.left.peek(), self.right.peek()) {
            (Some(left), Some(right)) => (self.compare)(left, right),
            (Some(_), None) => return self.left.next(),
            (None, _) => return self.right.next(),
        };
        match order {
            Ordering::Greater => self.right.next(),
            Ordering::Equal => {
                self.tied = true;
                self.left.next()
            }
            Ordering::Less => self.left.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left_lower, left_upper) = self.left.size_hint();
        let (right_lower, right_upper) = self.right.size_hint();
        let upper = left_upper.zip(right_upper).and_then(|(l, r)| l.checked_add(r));
        (left_lower.saturating_add(right_lower), upper)
    }
}

impl<A, B, F> FusedIterator for SortedUnion<A, B, F>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    F: FnMut(&A::Item, &A::Item) -> Ordering,
{
}

impl<A, B, F> Clone for SortedUnion<A, B, F>
where
    A: Iterator + Clone,
    B: Iterator<Item = A::Item> + Clone,
    A::Item: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            compare: self.compare.clone(),
            tied: self.tied,
        }
    }
}

// =============================================================================
// Lookahead Search
// =============================================================================

/// Where a driving element falls in the lookahead sequence.
enum Probe {
    Found,
    Absent,
    Exhausted,
}

/// Advances `lookahead` past every element that orders before `item`.
///
/// An element equal to `item` is left in place, so it can also match the
/// next driving element.
fn probe<B, F>(lookahead: &mut Cursor<B>, item: &B::Item, compare: &mut F) -> Probe
where
    B: Iterator,
    F: FnMut(&B::Item, &B::Item) -> Ordering,
{
    loop {
        let Some(candidate) = lookahead.peek() else {
            return Probe::Exhausted;
        };
        match compare(item, candidate) {
            Ordering::Greater => {
                lookahead.next();
            }
            Ordering::Equal => return Probe::Found,
            Ordering::Less => return Probe::Absent,
        }
    }
}

// =============================================================================
// SortedIntersect
// =============================================================================

/// Iterator over the driving elements that also occur in the lookahead.
///
/// Created by [`sorted_intersect`] and [`sorted_intersect_by`]. Ends as soon
/// as either input is exhausted.
pub struct SortedIntersect<A: Iterator, B: Iterator, F> {
    left: Cursor<A>,
    right: Cursor<B>,
    compare: F,
}

/// Returns the elements of sorted `left` that occur in sorted `right`.
///
/// Each driving element is yielded if an equal element exists in `right`;
/// duplicates in `left` are all yielded against a single match.
///
/// # Examples
///
/// ```rust
/// use iterset::sorted::sorted_intersect;
///
/// let common: Vec<i32> = sorted_intersect([1, 2, 4, 6], [2, 3, 6, 7]).collect();
/// assert_eq!(common, vec![2, 6]);
/// ```
pub fn sorted_intersect<L, R>(
    left: L,
    right: R,
) -> SortedIntersect<L::IntoIter, R::IntoIter, Natural<L::Item>>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    L::Item: Ord,
{
    sorted_intersect_by(left, right, Ord::cmp as Natural<L::Item>)
}

/// Returns the elements of `left` that occur in `right`, both sorted by
/// `compare`.
pub fn sorted_intersect_by<L, R, F>(
    left: L,
    right: R,
    compare: F,
) -> SortedIntersect<L::IntoIter, R::IntoIter, F>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    F: FnMut(&L::Item, &L::Item) -> Ordering,
{
    SortedIntersect {
        left: Cursor::new(left),
        right: Cursor::new(right),
        compare,
    }
}

impl<A, B, F> Iterator for SortedIntersect<A, B, F>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    F: FnMut(&A::Item, &A::Item) -> Ordering,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(item) = self.left.next() {
            match probe(&mut self.right, &item, &mut self.compare) {
                Probe::Found => return Some(item),
                Probe::Absent => {}
                Probe::Exhausted => break,
            }
        }
        self.left.stop();
        self.right.stop();
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.left.size_hint().1)
    }
}

impl<A, B, F> FusedIterator for SortedIntersect<A, B, F>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    F: FnMut(&A::Item, &A::Item) -> Ordering,
{
}

impl<A, B, F> Clone for SortedIntersect<A, B, F>
where
    A: Iterator + Clone,
    B: Iterator<Item = A::Item> + Clone,
    A::Item: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            compare: self.compare.clone(),
        }
    }
}

// =============================================================================
// SortedDifference
// =============================================================================

/// Iterator over the driving elements that do not occur in the lookahead.
///
/// Created by [`sorted_difference`] and [`sorted_difference_by`]. Once the
/// lookahead is exhausted the rest of the driving sequence passes through.
pub struct SortedDifference<A: Iterator, B: Iterator, F> {
    left: Cursor<A>,
    right: Cursor<B>,
    compare: F,
}

/// Returns the elements of sorted `left` that do not occur in sorted
/// `right`.
pub fn sorted_difference<L, R>(
    left: L,
    right: R,
) -> SortedDifference<L::IntoIter, R::IntoIter, Natural<L::Item>>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    L::Item: Ord,
{
    sorted_difference_by(left, right, Ord::cmp as Natural<L::Item>)
}

/// Returns the elements of `left` that do not occur in `right`, both
/// sorted by `compare`.
///
/// # Examples
///
/// ```rust
/// use iterset::sorted::sorted_difference_by;
///
/// let by_length = |a: &&str, b: &&str| a.len().cmp(&b.len());
/// let rest: Vec<&str> = sorted_difference_by(["a", "bb", "ccc"], ["xx"], by_length).collect();
/// assert_eq!(rest, vec!["a", "ccc"]);
/// ```
pub fn sorted_difference_by<L, R, F>(
    left: L,
    right: R,
    compare: F,
) -> SortedDifference<L::IntoIter, R::IntoIter, F>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    F: FnMut(&L::Item, &L::Item) -> Ordering,
{
    SortedDifference {
        left: Cursor::new(left),
        right: Cursor::new(right),
        compare,
    }
}

impl<A, B, F> Iterator for SortedDifference<A, B, F>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    F: FnMut(&A::Item, &A::Item) -> Ordering,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(item) = self.left.next() {
            match probe(&mut self.right, &item, &mut self.compare) {
                Probe::Found => {}
                Probe::Absent | Probe::Exhausted => return Some(item),
            }
        }
        self.right.stop();
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.left.size_hint().1)
    }
}

impl<A, B, F> FusedIterator for SortedDifference<A, B, F>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    F: FnMut(&A::Item, &A::Item) -> Ordering,
{
}

impl<A, B, F> Clone for SortedDifference<A, B, F>
where
    A: Iterator + Clone,
    B: Iterator<Item = A::Item> + Clone,
    A::Item: Clone,
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            compare: self.compare.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], vec![], vec![])]
    #[case(vec![1, 3], vec![], vec![1, 3])]
    #[case(vec![], vec![2], vec![2])]
    #[case(vec![1, 2, 2], vec![2, 3], vec![1, 2, 2, 2, 3])]
    fn test_sorted_union_cases(#[case] left: Vec<i32>, #[case] right: Vec<i32>, #[case] expected: Vec<i32>) {
        assert_eq!(sorted_union(left, right).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn test_sorted_union_tie_yields_left_then_right() {
        let pairs = [(1, 'l'), (2, 'l')];
        let others = [(2, 'r')];
        let merged: Vec<(i32, char)> =
            sorted_union_by(pairs, others, |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0)).collect();
        assert_eq!(merged, vec![(1, 'l'), (2, 'l'), (2, 'r')]);
    }

    #[rstest]
    #[case(vec!["a", "b", "c"], vec!["b", "c", "d"], vec!["b", "c"])]
    #[case(vec!["a", "a", "b"], vec!["a"], vec!["a", "a"])]
    #[case(vec!["a"], vec![], vec![])]
    #[case(vec![], vec!["a"], vec![])]
    fn test_sorted_intersect_cases(
        #[case] left: Vec<&str>,
        #[case] right: Vec<&str>,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(sorted_intersect(left, right).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn test_sorted_intersect_stops_when_lookahead_runs_out() {
        let mut pulled = 0;
        let driving = (0..1_000).inspect(|_| pulled += 1);
        let common: Vec<i32> = sorted_intersect(driving, [1, 2]).collect();
        assert_eq!(common, vec![1, 2]);
        assert!(pulled < 10);
    }

    #[rstest]
    #[case(vec!["b", "c"], vec!["a", "b", "d"], vec!["c"])]
    #[case(vec!["a", "a", "b"], vec!["a"], vec!["b"])]
    #[case(vec!["a", "b"], vec![], vec!["a", "b"])]
    #[case(vec![], vec!["a"], vec![])]
    fn test_sorted_difference_cases(
        #[case] left: Vec<&str>,
        #[case] right: Vec<&str>,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(sorted_difference(left, right).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn test_sorted_merges_are_restartable() {
        let union = sorted_union([1, 2].into_iter(), [2, 3].into_iter());
        assert_eq!(union.clone().count(), union.count());
        let intersect = sorted_intersect([1, 2].into_iter(), [2, 3].into_iter());
        assert_eq!(intersect.clone().count(), intersect.count());
        let difference = sorted_difference([1, 2].into_iter(), [2, 3].into_iter());
        assert_eq!(difference.clone().count(), difference.count());
    }

    #[rstest]
    fn test_sorted_union_is_fused() {
        let mut merged = sorted_union([1], [1]);
        assert_eq!(merged.next(), Some(1));
        assert_eq!(merged.next(), Some(1));
        assert_eq!(merged.next(), None);
        assert_eq!(merged.next(), None);
    }
}
