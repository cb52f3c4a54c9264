//! Chains of lazy binary stages over a variable number of sequences.

use std::hash::Hash;

use super::{difference, intersect};

/// Object-safe iterator that can duplicate itself.
trait Stage<'a, T>: Iterator<Item = T> {
    fn clone_stage(&self) -> Box<dyn Stage<'a, T> + 'a>;
}

impl<'a, T, I> Stage<'a, T> for I
where
    I: Iterator<Item = T> + Clone + 'a,
{
    fn clone_stage(&self) -> Box<dyn Stage<'a, T> + 'a> {
        Box::new(self.clone())
    }
}

/// A lazy sequence built by composing one binary stage per input sequence.
///
/// Returned by [`intersect_all`] and [`difference_all`]. Each stage pulls
/// from the one before it, so nothing is evaluated until the result is
/// iterated. The inputs must be restartable; cloning a `Stages` replays the
/// whole chain.
pub struct Stages<'a, T> {
    chain: Box<dyn Stage<'a, T> + 'a>,
}

impl<'a, T: 'a> Stages<'a, T> {
    fn new<I>(iterator: I) -> Self
    where
        I: Iterator<Item = T> + Clone + 'a,
    {
        Self {
            chain: Box::new(iterator),
        }
    }
}

impl<T> Iterator for Stages<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.chain.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chain.size_hint()
    }
}

impl<T> Clone for Stages<'_, T> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone_stage(),
        }
    }
}

/// Returns the distinct elements of `keys` present in every sequence of
/// `seqs`.
///
/// Composed as `intersect(intersect(keys, s1), s2)...`; no sequence is
/// collected up front, and each stage stops early on its own.
/// With no `seqs`, `keys` is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use iterset::algebra::intersect_all;
///
/// let common: Vec<i32> = intersect_all(
///     vec![1, 2, 3].into_iter(),
///     vec![vec![3, 2].into_iter(), vec![2, 5].into_iter()],
/// )
/// .collect();
/// assert_eq!(common, vec![2]);
/// ```
pub fn intersect_all<'a, L, R, S>(keys: L, seqs: S) -> Stages<'a, L::Item>
where
    L: IntoIterator,
    L::IntoIter: Clone + 'a,
    S: IntoIterator<Item = R>,
    R: IntoIterator<Item = L::Item>,
    R::IntoIter: Clone + 'a,
    L::Item: Eq + Hash + Clone + 'a,
{
    seqs.into_iter()
        .fold(Stages::new(keys.into_iter()), |stages, seq| {
            Stages::new(intersect(stages, seq))
        })
}

/// Returns the elements of `keys` absent from every sequence of `seqs`.
///
/// Composed as `difference(difference(keys, s1), s2)...`, in the order of
/// `keys`. With no `seqs`, `keys` is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use iterset::algebra::difference_all;
///
/// let rest: Vec<&str> = difference_all(
///     ["a", "b", "c"].into_iter(),
///     [["b"].into_iter(), ["c"].into_iter()],
/// )
/// .collect();
/// assert_eq!(rest, vec!["a"]);
/// ```
pub fn difference_all<'a, L, R, S>(keys: L, seqs: S) -> Stages<'a, L::Item>
where
    L: IntoIterator,
    L::IntoIter: Clone + 'a,
    S: IntoIterator<Item = R>,
    R: IntoIterator<Item = L::Item>,
    R::IntoIter: Clone + 'a,
    L::Item: Eq + Hash + Clone + 'a,
{
    seqs.into_iter()
        .fold(Stages::new(keys.into_iter()), |stages, seq| {
            Stages::new(difference(stages, seq))
        })
}
