//! # Suspension primitive.
//!
//! A [`Clock`] suspends the loop's flow for a given delay. The loop sleeps at
//! exactly two places: the backoff delay after a sender failure and the pacing
//! delay after a continuing receiver decision.
//!
//! [`TokioClock`] (the default) delegates to [`tokio::time::sleep`]. Every
//! suspension is its own timer future, so any number of loops can be suspended
//! at once without interfering, and tests can drive them with tokio's paused
//! clock (`#[tokio::test(start_paused = true)]`).

use std::time::Duration;

use futures::future::BoxFuture;

/// Source of delays for a call loop.
pub trait Clock: Send + Sync + 'static {
    /// Returns a future that completes after `delay`.
    fn sleep(&self, delay: Duration) -> BoxFuture<'static, ()>;
}

/// [`Clock`] backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, delay: Duration) -> BoxFuture<'static, ()> {
        Box::pin(sleep(delay))
    }
}

/// Suspends the current task for `delay` on the tokio timer.
pub async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}
