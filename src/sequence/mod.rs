//! Sequence primitives.
//!
//! A *sequence* is anything implementing [`IntoIterator`]. A sequence is
//! *restartable* when its iterator is `Clone`: cloning an iterator that has
//! not started yet replays the producer from the beginning. Slice iterators,
//! map key iterators, ranges and every adapter in this crate (given
//! restartable inputs) are restartable.
//!
//! Single-use sources are plain non-`Clone` iterators. Ownership prevents
//! restarting them; [`OneShot`] reports the misuse as an error when such a
//! source has to be shared by reference.
//!
//! Two-sequence algorithms are built from two pull primitives:
//!
//! - [`Cursor`]: a peekable, fused pull cursor that releases its source
//!   exactly once
//! - [`ZipTagged`]: interleaved co-iteration that tags each element with its
//!   [`Side`] and whether the other side is exhausted
//!
//! # Examples
//!
//! ```rust
//! use iterset::sequence::{is_restartable, Cursor};
//!
//! let keys = ["a", "b"].into_iter();
//! assert!(is_restartable(&keys));
//!
//! let mut cursor = Cursor::new(keys);
//! assert_eq!(cursor.peek(), Some(&"a"));
//! ```

mod cursor;
mod one_shot;
mod zip;

pub use cursor::Cursor;
pub use one_shot::OneShot;
pub use zip::{Side, Tag, ZipTagged, zip_tagged};

pub(crate) use zip::{Ledger, Observation};

/// Compile-time witness that a sequence can be replayed.
///
/// Always returns `true`; a sequence that cannot be restarted fails to
/// type-check instead.
#[inline]
#[must_use]
pub const fn is_restartable<I: Iterator + Clone>(_: &I) -> bool {
    true
}

/// Counts the elements of a restartable sequence without consuming it.
///
/// # Examples
///
/// ```rust
/// use iterset::sequence::size;
///
/// let values = [1, 2, 3].iter();
/// assert_eq!(size(&values), 3);
/// assert_eq!(size(&values), 3);
/// ```
#[must_use]
pub fn size<I: Iterator + Clone>(sequence: &I) -> usize {
    sequence.clone().count()
}
