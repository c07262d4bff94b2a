//! # Sender: the retried half of a loop.
//!
//! A [`Sender`] is invoked once per iteration and once per retry. Every
//! invocation produces a **fresh** future; a failed attempt is never resumed.
//!
//! Any `FnMut() -> Fut` closure whose future resolves to `Result<T, E>` is a
//! sender. Plain functions returning `Result<T, E>` are wrapped with
//! [`sync_sender`].
//!
//! ## Example
//! ```rust
//! use pacecall::{Sender, sync_sender};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut page = 0u32;
//! let mut next_page = sync_sender(move || {
//!     page += 1;
//!     Ok::<_, std::io::Error>(page)
//! });
//!
//! assert_eq!(next_page.send().await.unwrap(), 1);
//! assert_eq!(next_page.send().await.unwrap(), 2);
//! # }
//! ```

use std::future::Future;

use async_trait::async_trait;

/// # Asynchronous, retryable unit of work.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use pacecall::Sender;
///
/// struct Countdown(u32);
///
/// #[async_trait]
/// impl Sender<u32, &'static str> for Countdown {
///     async fn send(&mut self) -> Result<u32, &'static str> {
///         if self.0 == 0 {
///             return Err("liftoff");
///         }
///         self.0 -= 1;
///         Ok(self.0)
///     }
/// }
/// ```
#[async_trait]
pub trait Sender<T, E>: Send {
    /// Performs one invocation.
    async fn send(&mut self) -> Result<T, E>;
}

#[async_trait]
impl<F, Fut, T, E> Sender<T, E> for F
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    async fn send(&mut self) -> Result<T, E> {
        (self)().await
    }
}

/// Sender backed by a plain (non-async) function.
///
/// Built with [`sync_sender`].
#[derive(Debug, Clone)]
pub struct SyncSender<F> {
    f: F,
}

/// Wraps a plain function as a [`Sender`].
pub fn sync_sender<F, T, E>(f: F) -> SyncSender<F>
where
    F: FnMut() -> Result<T, E> + Send,
{
    SyncSender { f }
}

#[async_trait]
impl<F, T, E> Sender<T, E> for SyncSender<F>
where
    F: FnMut() -> Result<T, E> + Send,
    T: Send + 'static,
    E: Send + 'static,
{
    async fn send(&mut self) -> Result<T, E> {
        (self.f)()
    }
}
