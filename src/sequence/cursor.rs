//! Pull cursor with one slot of lookahead.

use std::iter::FusedIterator;

/// A pull cursor over a sequence.
///
/// `Cursor` is a fused, peekable iterator that releases the underlying
/// iterator as soon as it is no longer needed: when the source reports
/// exhaustion, when [`Cursor::stop`] is called, or when the cursor is
/// dropped. Whichever happens first drops the source; later calls are
/// no-ops, so the source is released exactly once on every exit path,
/// including early `break` and unwinding.
///
/// # Examples
///
/// ```rust
/// use iterset::sequence::Cursor;
///
/// let mut cursor = Cursor::new(vec![1, 2, 3]);
/// assert_eq!(cursor.peek(), Some(&1));
/// assert_eq!(cursor.next(), Some(1));
///
/// cursor.stop();
/// assert!(cursor.is_exhausted());
/// assert_eq!(cursor.next(), None);
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<I: Iterator> {
    source: Option<I>,
    peeked: Option<I::Item>,
}

impl<I: Iterator> Cursor<I> {
    /// Creates a cursor over `iterable`.
    #[inline]
    pub fn new<T>(iterable: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            source: Some(iterable.into_iter()),
            peeked: None,
        }
    }

    /// Returns a reference to the next element without consuming it.
    pub fn peek(&mut self) -> Option<&I::Item> {
        if self.peeked.is_none() {
            self.peeked = self.pull();
        }
        self.peeked.as_ref()
    }

    /// Consumes and returns the next element if `predicate` accepts it.
    pub fn next_if<P>(&mut self, predicate: P) -> Option<I::Item>
    where
        P: FnOnce(&I::Item) -> bool,
    {
        match self.peek() {
            Some(item) if predicate(item) => self.peeked.take(),
            _ => None,
        }
    }

    /// Releases the source and any buffered lookahead.
    ///
    /// Calling `stop` more than once has no further effect.
    #[inline]
    pub fn stop(&mut self) {
        self.peeked = None;
        self.source = None;
    }

    /// Returns `true` once no further elements can be produced.
    ///
    /// A cursor only learns that its source is exhausted by pulling from it,
    /// so this may return `false` for a source that has nothing left.
    #[inline]
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.source.is_none() && self.peeked.is_none()
    }

    fn pull(&mut self) -> Option<I::Item> {
        let item = self.source.as_mut()?.next();
        if item.is_none() {
            self.source = None;
        }
        item
    }
}

impl<I: Iterator> Iterator for Cursor<I> {
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self.peeked.take() {
            Some(item) => Some(item),
            None => self.pull(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = usize::from(self.peeked.is_some());
        match &self.source {
            Some(source) => {
                let (lower, upper) = source.size_hint();
                (
                    lower.saturating_add(buffered),
                    upper.and_then(|upper| upper.checked_add(buffered)),
                )
            }
            None => (buffered, Some(buffered)),
        }
    }
}

impl<I: Iterator> FusedIterator for Cursor<I> {}
