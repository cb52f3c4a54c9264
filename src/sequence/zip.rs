//! Tagged co-iteration of two sequences.
//!
//! [`ZipTagged`] interleaves two sequences and labels every element with the
//! side it came from, and whether the other side is already known to be
//! exhausted. A crate-internal ledger records which side(s) have produced
//! each distinct element, so that intersection and equality can be decided in one
//! interleaved pass without buffering either input in full first.

use std::hash::Hash;
use std::iter::FusedIterator;

use super::Cursor;
use crate::hash::{DefaultHashMap, temporary_map};

// =============================================================================
// Side and Tag
// =============================================================================

/// Which of two co-iterated sequences produced an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The first (driving) sequence.
    Left,
    /// The second sequence.
    Right,
}

impl Side {
    /// Returns the opposite side.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Origin of an element produced by [`ZipTagged`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag {
    /// The sequence the element came from.
    pub side: Side,
    /// `true` once the other sequence is known to have no elements left.
    pub other_exhausted: bool,
}

impl Tag {
    #[inline]
    const fn new(side: Side, other_exhausted: bool) -> Self {
        Self {
            side,
            other_exhausted,
        }
    }
}

// =============================================================================
// ZipTagged
// =============================================================================

/// Interleaves two sequences, tagging each element with its origin.
///
/// For each left element `a`, `a` is emitted first, then one element of the
/// right sequence if it has any left. Once the left sequence is exhausted,
/// the rest of the right sequence is drained with `other_exhausted` set.
/// Every element of both inputs is visited exactly once.
pub struct ZipTagged<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
    left: Cursor<A>,
    right: Cursor<B>,
    turn: Side,
}

/// Creates a [`ZipTagged`] over `left` and `right`.
///
/// # Examples
///
/// ```rust
/// use iterset::sequence::{zip_tagged, Side};
///
/// let sides: Vec<(char, Side)> = zip_tagged(['a', 'b'], ['x'])
///     .map(|(item, tag)| (item, tag.side))
///     .collect();
/// assert_eq!(
///     sides,
///     vec![('a', Side::Left), ('x', Side::Right), ('b', Side::Left)]
/// );
/// ```
pub fn zip_tagged<L, R>(left: L, right: R) -> ZipTagged<L::IntoIter, R::IntoIter>
where
    L: IntoIterator,
    R: IntoIterator<Item = L::Item>,
{
    ZipTagged {
        left: Cursor::new(left),
        right: Cursor::new(right),
        turn: Side::Left,
    }
}

impl<A, B> Clone for ZipTagged<A, B>
where
    A: Iterator + Clone,
    B: Iterator<Item = A::Item> + Clone,
    A::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            turn: self.turn,
        }
    }
}

impl<A, B> ZipTagged<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
    /// Releases both sources.
    pub fn stop(&mut self) {
        self.left.stop();
        self.right.stop();
    }
}

impl<A, B> Iterator for ZipTagged<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
    type Item = (A::Item, Tag);

    fn next(&mut self) -> Option<Self::Item> {
        if self.turn == Side::Right {
            self.turn = Side::Left;
            if let Some(item) = self.right.next() {
                return Some((item, Tag::new(Side::Right, false)));
            }
        }
        match self.left.next() {
            Some(item) => {
                let right_exhausted = self.right.is_exhausted();
                if !right_exhausted {
                    self.turn = Side::Right;
                }
                Some((item, Tag::new(Side::Left, right_exhausted)))
            }
            None => self
                .right
                .next()
                .map(|item| (item, Tag::new(Side::Right, true))),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left_lower, left_upper) = self.left.size_hint();
        let (right_lower, right_upper) = self.right.size_hint();
        let upper = match (left_upper, right_upper) {
            (Some(left), Some(right)) => left.checked_add(right),
            _ => None,
        };
        (left_lower.saturating_add(right_lower), upper)
    }
}

impl<A, B> FusedIterator for ZipTagged<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
}

// =============================================================================
// Ledger
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Presence {
    Only(Side),
    Both,
}

/// Result of recording one tagged element in a [`Ledger`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Observation<T> {
    /// First time this element has been seen on either side.
    First,
    /// The other side had already produced it; the element is handed back.
    Matched(T),
    /// Already recorded for this side, or already matched.
    Repeated,
}

/// Per-element record of which sides have produced it.
///
/// Keeps a count of elements that are still unmatched on each side; an
/// element leaves that count the moment the other side produces it.
#[derive(Clone, Debug)]
pub(crate) struct Ledger<T> {
    presence: DefaultHashMap<T, Presence>,
    pending: [usize; 2],
}

impl<T: Eq + Hash> Ledger<T> {
    pub(crate) fn new() -> Self {
        Self {
            presence: temporary_map(),
            pending: [0, 0],
        }
    }

    pub(crate) fn observe(&mut self, item: T, side: Side) -> Observation<T> {
        match self.presence.get_mut(&item) {
            Some(presence) => match *presence {
                Presence::Only(seen) if seen != side => {
                    *presence = Presence::Both;
                    self.pending[seen.index()] -= 1;
                    Observation::Matched(item)
                }
                _ => Observation::Repeated,
            },
            None => {
                self.presence.insert(item, Presence::Only(side));
                self.pending[side.index()] += 1;
                Observation::First
            }
        }
    }

    /// Number of distinct elements seen only on `side` so far.
    pub(crate) const fn pending(&self, side: Side) -> usize {
        self.pending[side.index()]
    }
}
