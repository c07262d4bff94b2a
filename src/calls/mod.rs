//! # Sender and receiver abstractions.
//!
//! This module provides the two caller-supplied halves of a loop:
//! - [`Sender`] - produces one value per invocation, or fails (retried per backoff)
//! - [`Receiver`] - consumes each value and returns a [`Decision`] (never retried)
//! - [`Decision`] - explicit continue/stop sentinel; "no value" means stop
//! - [`DefaultReceiver`] - one no-op async step, then stop
//! - [`sync_sender`], [`sync_receiver`] - adapters for plain (non-async) functions
//!
//! Async closures implement the traits directly:
//! ```text
//! || async { Ok::<_, E>(value) }            ──► Sender<T, E>
//! |value| async move { Ok::<_, E>(true) }   ──► Receiver<T>
//! ```

mod receiver;
mod sender;

pub use receiver::{Decision, DefaultReceiver, Receiver, SyncReceiver, sync_receiver};
pub use sender::{Sender, SyncSender, sync_sender};
