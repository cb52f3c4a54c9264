//! The background adapter as an asynchronous stream.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc::{Receiver, Sender, channel};
use tokio::task::{JoinError, JoinHandle};

use super::CancellationToken;
use crate::error::BackgroundError;

/// Stream over the elements produced by a tokio blocking task.
///
/// Created by [`background_stream`](super::background_stream) or
/// [`BackgroundBuilder::spawn_stream`](super::BackgroundBuilder::spawn_stream).
/// Dropping it cancels the task; [`BackgroundStream::shutdown`] also waits
/// for it.
///
/// # Examples
///
/// ```rust
/// use futures::StreamExt;
/// use iterset::background::background_stream;
///
/// #[tokio::main]
/// async fn main() {
///     let letters = background_stream(["a", "b"], 1).unwrap();
///     assert_eq!(letters.collect::<Vec<_>>().await, vec!["a", "b"]);
/// }
/// ```
#[derive(Debug)]
pub struct BackgroundStream<T> {
    receiver: Receiver<T>,
    token: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> BackgroundStream<T> {
    pub(super) fn spawn<I>(iter: I, capacity: usize) -> Result<Self, BackgroundError>
    where
        I: Iterator<Item = T> + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current()?;
        let (sender, receiver) = channel(capacity.max(1));
        let token = CancellationToken::new();
        let worker_token = token.clone();
        tracing::debug!(capacity = capacity.max(1), "starting background task");
        let worker = runtime.spawn_blocking(move || pump(iter, &sender, &worker_token));
        Ok(Self {
            receiver,
            token,
            worker: Some(worker),
        })
    }
}

impl<T> BackgroundStream<T> {
    /// Stops consumption and releases the task.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.receiver.close();
    }

    /// Returns a token that cancels this stream from elsewhere.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancels the task and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] if the task panicked.
    pub async fn shutdown(mut self) -> Result<(), JoinError> {
        self.cancel();
        match self.worker.take() {
            Some(worker) => worker.await,
            None => Ok(()),
        }
    }
}

fn pump<I: Iterator>(iter: I, sender: &Sender<I::Item>, token: &CancellationToken) {
    let mut sent: usize = 0;
    for item in iter {
        if token.is_cancelled() || sender.blocking_send(item).is_err() {
            tracing::debug!(sent, "background task stopped early");
            return;
        }
        sent += 1;
    }
    tracing::debug!(sent, "background task finished");
}

impl<T> Stream for BackgroundStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.get_mut();
        if this.token.is_cancelled() {
            this.receiver.close();
            return Poll::Ready(None);
        }
        this.receiver.poll_recv(context)
    }
}

impl<T> Drop for BackgroundStream<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
