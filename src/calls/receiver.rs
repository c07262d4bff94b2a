//! # Receiver: the deciding half of a loop.
//!
//! A [`Receiver`] gets every value a sender produced, in call order, and
//! answers with a [`Decision`]: call again, or stop.
//!
//! ## Stop is the default
//! A receiver that returns "nothing" stops the loop. `()` and `None` both
//! convert to [`Decision::Stop`], so forgetting to return `true` ends the loop
//! after one call instead of running it forever.
//!
//! ```text
//! Ok(true)        ─► Continue
//! Ok(false)       ─► Stop
//! Ok(Some(true))  ─► Continue
//! Ok(None)        ─► Stop
//! Ok(())          ─► Stop
//! Err(e)          ─► loop ends with CallError::Receiver(e), no retry
//! ```
//!
//! ## Example
//! ```rust
//! use pacecall::{Decision, Receiver};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut seen = Vec::new();
//! let mut collect = |page: Vec<u32>| {
//!     let more = !page.is_empty();
//!     seen.extend(page);
//!     async move { Ok::<_, std::io::Error>(more) }
//! };
//!
//! assert_eq!(collect.receive(vec![1, 2]).await.unwrap(), Decision::Continue);
//! assert_eq!(collect.receive(vec![]).await.unwrap(), Decision::Stop);
//! # }
//! ```

use std::convert::Infallible;
use std::future::Future;

use async_trait::async_trait;

/// Whether the loop should call the sender again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Call the sender again (after pacing).
    Continue,
    /// End the loop normally.
    #[default]
    Stop,
}

impl Decision {
    /// `true` for [`Decision::Continue`].
    #[inline]
    pub fn is_continue(self) -> bool {
        matches!(self, Decision::Continue)
    }
}

impl From<bool> for Decision {
    fn from(more: bool) -> Self {
        if more {
            Decision::Continue
        } else {
            Decision::Stop
        }
    }
}

impl From<Option<bool>> for Decision {
    fn from(more: Option<bool>) -> Self {
        more.unwrap_or(false).into()
    }
}

impl From<()> for Decision {
    fn from(_: ()) -> Self {
        Decision::Stop
    }
}

/// # Consumer of sender values.
///
/// Receiver failures are **never** retried: re-running the receiver would
/// hand it a stale value.
#[async_trait]
pub trait Receiver<T>: Send {
    /// Error type ending the loop with [`CallError::Receiver`](crate::CallError::Receiver).
    type Error;

    /// Consumes one value and decides whether to continue.
    async fn receive(&mut self, value: T) -> Result<Decision, Self::Error>;
}

#[async_trait]
impl<F, Fut, T, D, E> Receiver<T> for F
where
    F: FnMut(T) -> Fut + Send,
    Fut: Future<Output = Result<D, E>> + Send + 'static,
    T: Send + 'static,
    D: Into<Decision> + Send + 'static,
    E: Send + 'static,
{
    type Error = E;

    async fn receive(&mut self, value: T) -> Result<Decision, E> {
        (self)(value).await.map(Into::into)
    }
}

/// Receiver used when none is configured.
///
/// Performs a single no-op asynchronous step (a scheduler yield, so it suspends
/// like any custom receiver would) and then stops: a loop without a receiver
/// calls its sender exactly once.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultReceiver;

#[async_trait]
impl<T: Send + 'static> Receiver<T> for DefaultReceiver {
    type Error = Infallible;

    async fn receive(&mut self, _value: T) -> Result<Decision, Infallible> {
        tokio::task::yield_now().await;
        Ok(Decision::Stop)
    }
}

/// Receiver backed by a plain (non-async) function.
///
/// Built with [`sync_receiver`].
#[derive(Debug, Clone)]
pub struct SyncReceiver<F> {
    f: F,
}

/// Wraps a plain function as a [`Receiver`].
///
/// ```rust
/// use pacecall::{Decision, Receiver, sync_receiver};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut below_three = sync_receiver(|n: u32| Ok::<_, ()>(n < 3));
/// assert_eq!(below_three.receive(1).await, Ok(Decision::Continue));
/// assert_eq!(below_three.receive(3).await, Ok(Decision::Stop));
/// # }
/// ```
pub fn sync_receiver<F, T, D, E>(f: F) -> SyncReceiver<F>
where
    F: FnMut(T) -> Result<D, E> + Send,
    D: Into<Decision>,
{
    SyncReceiver { f }
}

#[async_trait]
impl<F, T, D, E> Receiver<T> for SyncReceiver<F>
where
    F: FnMut(T) -> Result<D, E> + Send,
    T: Send + 'static,
    D: Into<Decision> + Send + 'static,
    E: Send + 'static,
{
    type Error = E;

    async fn receive(&mut self, value: T) -> Result<Decision, E> {
        (self.f)(value).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_conversions() {
        assert_eq!(Decision::from(true), Decision::Continue);
        assert_eq!(Decision::from(false), Decision::Stop);
        assert_eq!(Decision::from(Some(true)), Decision::Continue);
        assert_eq!(Decision::from(Some(false)), Decision::Stop);
        assert_eq!(Decision::from(None), Decision::Stop);
        assert_eq!(Decision::from(()), Decision::Stop);
        assert_eq!(Decision::default(), Decision::Stop);
        assert!(Decision::Continue.is_continue());
    }

    #[tokio::test]
    async fn test_default_receiver_stops() {
        let mut r = DefaultReceiver;
        let d = Receiver::<&str>::receive(&mut r, "anything").await;
        assert_eq!(d, Ok(Decision::Stop));
    }

    #[tokio::test]
    async fn test_unit_returning_receiver_stops() {
        let mut r = |_: u8| async { Ok::<(), ()>(()) };
        assert_eq!(r.receive(1).await, Ok(Decision::Stop));
    }

    #[tokio::test]
    async fn test_receiver_error_passes_through() {
        let mut r = sync_receiver(|n: i32| if n < 0 { Err("negative") } else { Ok(true) });
        assert_eq!(r.receive(5).await, Ok(Decision::Continue));
        assert_eq!(r.receive(-1).await, Err("negative"));
    }
}
