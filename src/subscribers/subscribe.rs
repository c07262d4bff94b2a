//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging object-style event handlers
//! into a loop. A subscriber is registered once and receives every event of the
//! kinds it declares.
//!
//! ## Contract
//! - `on_event` runs **inline** on the loop's flow: keep it short and never block.
//!   Hand slow work (I/O, batching) off to a channel or a spawned task.
//! - Each subscriber **declares** the kinds it wants via [`Subscribe::kinds`].

use crate::events::{Event, EventKind};

/// Contract for event subscribers.
pub trait Subscribe<T, E>: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    ///
    /// # Parameters
    /// - `event`: Reference to the event (payloads borrow the sender's value/error)
    fn on_event(&self, event: &Event<'_, T, E>);

    /// Kinds this subscriber is registered for (default: all).
    fn kinds(&self) -> &'static [EventKind] {
        &EventKind::ALL
    }
}
