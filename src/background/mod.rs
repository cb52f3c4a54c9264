//! Pumping a sequence through a worker and a bounded channel.
//!
//! [`background`] moves an iterator onto its own thread. The worker pulls
//! elements and pushes them into a bounded channel; the returned
//! [`Background`] iterator pulls from the channel. A capacity of `0` makes
//! every push a rendezvous with the consumer.
//!
//! Cancellation is cooperative. The worker checks a shared
//! [`CancellationToken`] before every push, and a push that is already
//! blocked is released as soon as the consumer side of the channel goes
//! away ([`Background::cancel`], [`Background::shutdown`] or drop). A
//! cancelled worker simply stops; the consumer sees the end of the sequence.
//!
//! A token cancelled from another thread does not wake a worker that is
//! already blocked in a push. That worker is released by the consumer's
//! next pull, which observes the token and closes the channel, or by
//! dropping the [`Background`].
//!
//! With the `async` feature, [`BackgroundStream`] offers the same contract
//! as a [`futures::Stream`] backed by a tokio blocking task.
//!
//! # Examples
//!
//! ```rust
//! use iterset::background::background;
//!
//! let squares = background((1..=3).map(|n| n * n), 1).unwrap();
//! assert_eq!(squares.collect::<Vec<_>>(), vec![1, 4, 9]);
//! ```

#[cfg(feature = "async")]
mod stream;

#[cfg(feature = "async")]
pub use stream::BackgroundStream;

use std::iter::FusedIterator;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread::{self, JoinHandle};

use crate::error::BackgroundError;

// =============================================================================
// CancellationToken
// =============================================================================

/// A shared flag that asks a background worker to stop.
///
/// Clones share the same flag, so any thread holding a clone can cancel.
/// Once set, the flag stays set.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`CancellationToken::cancel`] has been called on
    /// any clone.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// =============================================================================
// BackgroundBuilder
// =============================================================================

/// Configuration for a background adapter.
///
/// # Examples
///
/// ```rust
/// use iterset::background::BackgroundBuilder;
///
/// let numbers = BackgroundBuilder::new()
///     .capacity(16)
///     .thread_name("numbers")
///     .spawn(0..100)
///     .unwrap();
/// assert_eq!(numbers.sum::<i32>(), 4950);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BackgroundBuilder {
    capacity: usize,
    thread_name: Option<String>,
}

impl BackgroundBuilder {
    /// Creates a builder with capacity `0` and an unnamed worker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many elements may wait in the channel.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Names the worker thread.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = Some(name.into());
        self
    }

    /// Starts a worker thread that iterates `seq`.
    ///
    /// # Errors
    ///
    /// Returns [`BackgroundError::Spawn`] if the thread cannot be created.
    pub fn spawn<I>(self, seq: I) -> Result<Background<I::Item>, BackgroundError>
    where
        I: IntoIterator,
        I::IntoIter: Send + 'static,
        I::Item: Send + 'static,
    {
        let (sender, receiver) = sync_channel(self.capacity);
        let token = CancellationToken::new();
        let mut builder = thread::Builder::new();
        if let Some(name) = &self.thread_name {
            builder = builder.name(name.clone());
        }
        tracing::debug!(
            capacity = self.capacity,
            thread = self.thread_name.as_deref().unwrap_or("<unnamed>"),
            "starting background worker"
        );
        let iter = seq.into_iter();
        let worker_token = token.clone();
        let worker = builder.spawn(move || pump(iter, &sender, &worker_token))?;
        Ok(Background {
            receiver: Some(receiver),
            token,
            worker: Some(worker),
        })
    }

    /// Starts a tokio blocking task that iterates `seq`.
    ///
    /// Must be called from within a tokio runtime. The channel capacity is
    /// raised to `1` if set to `0`; the thread name is not used.
    ///
    /// # Errors
    ///
    /// Returns [`BackgroundError::NoRuntime`] outside a tokio runtime.
    #[cfg(feature = "async")]
    pub fn spawn_stream<I>(self, seq: I) -> Result<BackgroundStream<I::Item>, BackgroundError>
    where
        I: IntoIterator,
        I::IntoIter: Send + 'static,
        I::Item: Send + 'static,
    {
        BackgroundStream::spawn(seq.into_iter(), self.capacity)
    }
}

/// Runs `seq` on a worker thread, buffering up to `capacity` elements.
///
/// # Errors
///
/// Returns [`BackgroundError::Spawn`] if the thread cannot be created.
pub fn background<I>(seq: I, capacity: usize) -> Result<Background<I::Item>, BackgroundError>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    BackgroundBuilder::new().capacity(capacity).spawn(seq)
}

/// Runs `seq` on a tokio blocking task, buffering up to `capacity` elements.
///
/// # Errors
///
/// Returns [`BackgroundError::NoRuntime`] outside a tokio runtime.
#[cfg(feature = "async")]
pub fn background_stream<I>(seq: I, capacity: usize) -> Result<BackgroundStream<I::Item>, BackgroundError>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    BackgroundBuilder::new().capacity(capacity).spawn_stream(seq)
}

fn pump<I: Iterator>(iter: I, sender: &SyncSender<I::Item>, token: &CancellationToken) {
    let mut sent: usize = 0;
    for item in iter {
        if token.is_cancelled() {
            tracing::debug!(sent, "background worker cancelled");
            return;
        }
        if sender.send(item).is_err() {
            tracing::debug!(sent, "background consumer went away");
            return;
        }
        sent += 1;
        tracing::trace!(sent, "background worker pushed element");
    }
    tracing::debug!(sent, "background worker finished");
}

// =============================================================================
// Background
// =============================================================================

/// Iterator over the elements produced by a background worker thread.
///
/// Created by [`background`] or [`BackgroundBuilder::spawn`]. Dropping it
/// cancels the worker without waiting for it; use
/// [`Background::shutdown`] to wait.
///
/// # Panics
///
/// If the worker panics, the panic is resumed on the consuming thread when
/// the channel runs dry.
#[derive(Debug)]
pub struct Background<T> {
    receiver: Option<Receiver<T>>,
    token: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl<T> Background<T> {
    /// Stops consumption and releases the worker.
    ///
    /// Every later call to `next` returns `None`, including elements that
    /// were already buffered.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.receiver = None;
    }

    /// Returns a token that cancels this adapter from another thread.
    ///
    /// The worker observes it before its next push; the consumer observes
    /// it on its next pull. A worker already blocked in a push stays blocked
    /// until that pull or until the adapter is dropped.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Returns `true` once the adapter was cancelled by any means.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels the worker and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the worker panicked.
    pub fn shutdown(mut self) -> thread::Result<()> {
        self.cancel();
        self.worker.take().map_or(Ok(()), JoinHandle::join)
    }

    fn finish(&mut self) {
        self.receiver = None;
        if let Some(worker) = self.worker.take()
            && let Err(payload) = worker.join()
        {
            std::panic::resume_unwind(payload);
        }
    }
}

impl<T> Iterator for Background<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.token.is_cancelled() {
            self.receiver = None;
        }
        let item = self.receiver.as_ref()?.recv().ok();
        if item.is_none() {
            self.finish();
        }
        item
    }
}

impl<T> FusedIterator for Background<T> {}

impl<T> Drop for Background<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Barrier;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(8)]
    fn test_background_preserves_order(#[case] capacity: usize) {
        let values = background(vec!["a", "b", "c"], capacity).unwrap();
        assert_eq!(values.collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[rstest]
    fn test_cancel_before_first_pull_yields_nothing() {
        let mut values = background(vec![1, 2, 3], 0).unwrap();
        values.cancel();
        assert_eq!(values.next(), None);
        assert!(values.shutdown().is_ok());
    }

    #[rstest]
    fn test_cancel_mid_iteration_with_infinite_source() {
        let barrier = Arc::new(Barrier::new(2));
        let produced = Arc::new(AtomicUsize::new(0));
        let source = {
            let barrier = Arc::clone(&barrier);
            let produced = Arc::clone(&produced);
            (0..).inspect(move |n| {
                if *n == 2 {
                    barrier.wait();
                }
                produced.fetch_add(1, Ordering::SeqCst);
            })
        };
        let mut values = background(source, 0).unwrap();
        assert_eq!(values.next(), Some(0));
        assert_eq!(values.next(), Some(1));
        values.token.cancel();
        barrier.wait();
        assert_eq!(values.next(), None);
        assert!(values.shutdown().is_ok());
        assert_eq!(produced.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    fn test_token_from_another_thread_stops_consumer() {
        let mut values = background(0.., 4).unwrap();
        let token = values.cancellation_token();
        assert_eq!(values.next(), Some(0));
        thread::spawn(move || token.cancel()).join().unwrap();
        assert!(values.is_cancelled());
        assert_eq!(values.next(), None);
    }

    struct Guard(std::sync::mpsc::Sender<()>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let _ = self.0.send(());
        }
    }

    #[rstest]
    fn test_drop_releases_blocked_worker() {
        let (done, finished) = std::sync::mpsc::channel();
        let guard = Guard(done);
        let source = (0..).map(move |n| {
            let _guard = &guard;
            n
        });
        let values = background(source, 0).unwrap();
        let token = values.cancellation_token();
        drop(values);
        assert!(token.is_cancelled());
        assert!(finished.recv_timeout(Duration::from_secs(5)).is_ok());
    }

    #[rstest]
    fn test_token_cancel_releases_blocked_worker_on_next_pull() {
        let (done, finished) = std::sync::mpsc::channel();
        let guard = Guard(done);
        let source = (0..).map(move |n| {
            let _guard = &guard;
            n
        });
        let mut values = background(source, 0).unwrap();
        let token = values.cancellation_token();
        thread::spawn(move || token.cancel()).join().unwrap();

        assert_eq!(values.next(), None);
        assert!(finished.recv_timeout(Duration::from_secs(5)).is_ok());
        assert!(values.shutdown().is_ok());
    }

    #[rstest]
    fn test_worker_panic_is_resumed() {
        let values = background(
            (0..3).map(|n| {
                assert!(n < 2, "source failed");
                n
            }),
            0,
        )
        .unwrap();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| values.count()));
        assert!(outcome.is_err());
    }

    #[rstest]
    fn test_builder_names_thread() {
        let names = BackgroundBuilder::new()
            .thread_name("iterset-worker")
            .spawn(std::iter::once_with(|| thread::current().name().map(str::to_owned)))
            .unwrap();
        assert_eq!(names.collect::<Vec<_>>(), vec![Some("iterset-worker".to_owned())]);
    }
}
