//! Lazy intersection of two raw sequences.

use std::hash::Hash;
use std::iter::FusedIterator;

use crate::sequence::{Ledger, Observation, ZipTagged, zip_tagged};

/// Iterator over the distinct elements common to two sequences.
///
/// Created by [`intersect`]. Both inputs are pulled alternately; an element
/// is yielded at the moment the second side produces it, so output order
/// follows the interleaving rather than either input. Iteration ends as
/// soon as one side is exhausted and every element it produced has already
/// been matched, without draining the other side.
pub struct Intersect<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
    zip: ZipTagged<A, B>,
    ledger: Ledger<A::Item>,
    done: bool,
}

/// Returns the distinct elements present in both `keys` and `seq`.
///
/// # Complexity
///
/// O(k + m) time and space in the worst case; stops early once the
/// shorter side has been matched out.
///
/// # Examples
///
/// ```rust
/// use iterset::algebra::intersect;
///
/// let common: Vec<i32> = intersect([1, 2, 3], [3, 2, 9]).collect();
/// assert_eq!(common.len(), 2);
/// assert!(common.contains(&2) && common.contains(&3));
/// ```
pub fn intersect<L, R>(keys: L, seq: R) -> Intersect<L::IntoIter, R::IntoIter>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
    L::Item: Eq + Hash,
{
    Intersect {
        zip: zip_tagged(keys, seq),
        ledger: Ledger::new(),
        done: false,
    }
}

impl<A, B> Iterator for Intersect<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    A::Item: Eq + Hash,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while let Some((item, tag)) = self.zip.next() {
            if tag.other_exhausted && self.ledger.pending(tag.side.other()) == 0 {
                break;
            }
            if let Observation::Matched(item) = self.ledger.observe(item, tag.side) {
                return Some(item);
            }
        }
        self.done = true;
        self.zip.stop();
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.zip.size_hint().1)
        }
    }
}

impl<A, B> FusedIterator for Intersect<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    A::Item: Eq + Hash,
{
}

impl<A, B> Clone for Intersect<A, B>
where
    A: Iterator + Clone,
    B: Iterator<Item = A::Item> + Clone,
    A::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            zip: self.zip.clone(),
            ledger: self.ledger.clone(),
            done: self.done,
        }
    }
}
