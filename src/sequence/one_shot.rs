//! Single-use sources shared by reference.

use std::cell::RefCell;
use std::fmt;

use crate::error::AlreadyConsumedError;

/// A sequence that can be iterated only once.
///
/// Ownership already prevents restarting a non-`Clone` iterator. `OneShot`
/// covers the remaining case, where a single-use source sits behind a shared
/// reference: the iterator is handed out by the first call to
/// [`OneShot::try_iter`], and every later call reports
/// [`AlreadyConsumedError`] instead of quietly producing nothing.
///
/// # Examples
///
/// ```rust
/// use iterset::sequence::OneShot;
///
/// let lines = OneShot::new("lines", vec!["a", "b"]);
/// assert_eq!(lines.try_iter().unwrap().count(), 2);
/// assert!(lines.try_iter().is_err());
/// ```
pub struct OneShot<I> {
    name: &'static str,
    source: RefCell<Option<I>>,
}

impl<I: Iterator> OneShot<I> {
    /// Wraps `iterable`, labelling it `name` for error reporting.
    pub fn new<T>(name: &'static str, iterable: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            name,
            source: RefCell::new(Some(iterable.into_iter())),
        }
    }

    /// Takes the iterator out of the wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyConsumedError`] if the iterator was already taken.
    pub fn try_iter(&self) -> Result<I, AlreadyConsumedError> {
        self.source.take().ok_or(AlreadyConsumedError {
            source_name: self.name,
        })
    }

    /// Returns `true` once the iterator has been handed out.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.source.borrow().is_none()
    }
}

impl<I> fmt::Debug for OneShot<I> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OneShot")
            .field("name", &self.name)
            .field("consumed", &self.source.borrow().is_none())
            .finish()
    }
}
