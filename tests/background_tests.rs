//! Integration tests for the background adapters.
//!
//! Cancellation is driven deterministically with a [`Barrier`]: the source
//! parks at a known element until the consumer has cancelled, so the test
//! never depends on thread timing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Once};
use std::thread;

use iterset::prelude::*;
use rstest::rstest;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// =============================================================================
// Thread Adapter
// =============================================================================

#[rstest]
fn test_immediate_cancel_yields_nothing_and_does_not_hang() {
    init_tracing();
    let mut values = background(vec!["a", "b", "c"], 0).unwrap();
    values.cancel();
    assert_eq!(values.by_ref().count(), 0);
    assert!(values.shutdown().is_ok());
}

#[rstest]
fn test_cancel_from_another_thread_mid_iteration() {
    init_tracing();
    let barrier = Arc::new(Barrier::new(2));
    let produced = Arc::new(AtomicUsize::new(0));
    let source = {
        let barrier = Arc::clone(&barrier);
        let produced = Arc::clone(&produced);
        (0_u64..).inspect(move |n| {
            produced.fetch_add(1, Ordering::SeqCst);
            if *n == 3 {
                barrier.wait();
            }
        })
    };
    let mut values = BackgroundBuilder::new()
        .capacity(0)
        .thread_name("barrier-source")
        .spawn(source)
        .unwrap();

    let received: Vec<u64> = values.by_ref().take(3).collect();
    assert_eq!(received, vec![0, 1, 2]);

    let token = values.cancellation_token();
    let canceller = {
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            token.cancel();
            barrier.wait();
        })
    };
    canceller.join().unwrap();

    assert_eq!(values.next(), None);
    assert!(values.shutdown().is_ok());
    assert_eq!(produced.load(Ordering::SeqCst), 4);
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(64)]
fn test_background_matches_foreground(#[case] capacity: usize) {
    let foreground: Vec<i32> = unique((0..200).map(|n| n % 37)).collect();
    let offloaded: Vec<i32> = background(unique((0..200).map(|n| n % 37)), capacity)
        .unwrap()
        .collect();
    assert_eq!(foreground, offloaded);
}

#[rstest]
fn test_background_feeds_set_algebra() {
    let evens = background((0..20).filter(|n| n % 2 == 0), 4).unwrap();
    let common: Vec<i32> = sorted_intersect(evens, [4, 5, 6]).collect();
    assert_eq!(common, vec![4, 6]);
}

// =============================================================================
// Stream Adapter
// =============================================================================

#[cfg(feature = "async")]
mod stream {
    use super::*;
    use futures::StreamExt;

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stream_collects_all_elements() {
        init_tracing();
        let values = background_stream(0..100, 8).unwrap();
        let collected: Vec<i32> = values.collect().await;
        assert_eq!(collected, (0..100).collect::<Vec<_>>());
    }

    #[rstest]
    #[tokio::test]
    async fn test_stream_immediate_cancel() {
        let mut values = BackgroundBuilder::new()
            .capacity(0)
            .spawn_stream(vec![1, 2, 3])
            .unwrap();
        values.cancel();
        assert_eq!(values.next().await, None);
        assert!(values.shutdown().await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn test_stream_drop_releases_infinite_source() {
        let mut values = background_stream(0_u64.., 1).unwrap();
        assert_eq!(values.next().await, Some(0));
        let token = values.cancellation_token();
        drop(values);
        assert!(token.is_cancelled());
    }
}
