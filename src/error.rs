//! Error types.
//!
//! Nearly every operation in this crate is total. The exceptions are
//! pulling a [`OneShot`](crate::sequence::OneShot) source a second time and
//! failing to start the worker of a background adapter.

use std::error::Error;
use std::fmt;
use std::io;

/// Represents an error when a single-use source has already been handed out.
///
/// A restartable sequence is any `Iterator + Clone`. Sources that cannot be
/// replayed are wrapped in [`OneShot`](crate::sequence::OneShot), which
/// hands its iterator out once and reports this error afterwards instead of
/// silently yielding nothing.
///
/// # Examples
///
/// ```rust
/// use iterset::error::AlreadyConsumedError;
///
/// let error = AlreadyConsumedError { source_name: "lines" };
/// assert_eq!(
///     format!("{}", error),
///     "lines: single-use sequence already consumed. Collect it to iterate more than once."
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyConsumedError {
    /// The label given to the source when it was wrapped.
    pub source_name: &'static str,
}

impl fmt::Display for AlreadyConsumedError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}: single-use sequence already consumed. Collect it to iterate more than once.",
            self.source_name
        )
    }
}

impl Error for AlreadyConsumedError {}

/// Errors that can occur when starting a background adapter.
#[derive(Debug)]
pub enum BackgroundError {
    /// The operating system refused to start the worker thread.
    Spawn(io::Error),
    /// A stream adapter was started outside a tokio runtime.
    #[cfg(feature = "async")]
    NoRuntime(tokio::runtime::TryCurrentError),
}

impl fmt::Display for BackgroundError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(error) => {
                write!(formatter, "failed to spawn background worker: {error}")
            }
            #[cfg(feature = "async")]
            Self::NoRuntime(error) => {
                write!(formatter, "no runtime to run background task: {error}")
            }
        }
    }
}

impl Error for BackgroundError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn(error) => Some(error),
            #[cfg(feature = "async")]
            Self::NoRuntime(error) => Some(error),
        }
    }
}

impl From<io::Error> for BackgroundError {
    fn from(error: io::Error) -> Self {
        Self::Spawn(error)
    }
}

#[cfg(feature = "async")]
impl From<tokio::runtime::TryCurrentError> for BackgroundError {
    fn from(error: tokio::runtime::TryCurrentError) -> Self {
        Self::NoRuntime(error)
    }
}
