//! # Event subscribers for call loops.
//!
//! This module provides the [`Subscribe`] trait and the built-in [`LogWriter`]
//! for handling events emitted through a loop's [`EventSink`](crate::EventSink).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   CallLoop ── emit(&Event) ──► EventSink ──► handlers[kind]
//!                                                 │
//!                                                 ├──► closure registered with `on(kind, ..)`
//!                                                 └──► Subscribe::on_event(&Event)
//!                                                           │
//!                                                      ┌────┴────┬─────────┐
//!                                                      ▼         ▼         ▼
//!                                                  LogWriter  Metrics   Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```rust
//! use pacecall::{Event, EventKind, Subscribe};
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! #[derive(Default)]
//! struct RetryCounter(AtomicU64);
//!
//! impl<T, E> Subscribe<T, E> for RetryCounter {
//!     fn on_event(&self, event: &Event<'_, T, E>) {
//!         if let Event::Retry(_) = event {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn kinds(&self) -> &'static [EventKind] {
//!         &[EventKind::Retry]
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;
