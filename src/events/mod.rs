//! Loop events: types and the synchronous sink.
//!
//! This module groups the event **data model** and the **sink** a
//! [`CallLoop`](crate::CallLoop) publishes to.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] and the payload structs
//! - [`EventSink`] per-kind ordered handler lists, invoked inline
//!
//! ## Quick reference
//! - **Publisher**: `CallLoop::run` (one sink per loop, no sharing).
//! - **Consumers**: closures registered with `on(kind, ..)` and
//!   [`Subscribe`](crate::Subscribe) objects registered with `subscribe(..)`.

mod event;
mod sink;

pub use event::{CallEvent, Event, EventKind, NextEvent, RetryEvent, ReturnEvent, UnknownEvent};
pub use sink::{EventSink, Handler};
