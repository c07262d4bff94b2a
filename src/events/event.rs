//! # Events emitted by a call loop.
//!
//! The [`EventKind`] enum names the four observable points of one iteration:
//! - `call`: the sender is about to be invoked;
//! - `return`: the sender produced a value;
//! - `retry`: the sender failed and a retry was scheduled;
//! - `next`: the receiver asked for another call.
//!
//! The [`Event`] enum carries the matching payload. Payloads borrow the
//! sender's value and error, so handlers observe them without cloning.
//!
//! ## Ordering guarantees
//! Events of one loop are emitted synchronously, in the order of the state
//! machine. There is no sequence number: emission order *is* delivery order.
//!
//! ## Example
//! ```rust
//! use pacecall::{CallEvent, Event, EventKind};
//!
//! let ev: Event<'_, String, std::io::Error> = Event::Call(CallEvent { calls: 0 });
//! assert_eq!(ev.kind(), EventKind::Call);
//! assert_eq!(ev.kind().as_str(), "call");
//! assert_eq!("retry".parse::<EventKind>().unwrap(), EventKind::Retry);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Classification of loop events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Sender is about to be invoked.
    ///
    /// Payload: [`CallEvent`] (`calls` = successful calls so far).
    Call,

    /// Sender produced a value.
    ///
    /// Payload: [`ReturnEvent`] (`calls` already incremented) and the value.
    Return,

    /// Sender failed; a backoff delay was taken from the schedule.
    ///
    /// Payload: [`RetryEvent`].
    Retry,

    /// Receiver asked for another call; pacing sleep follows.
    ///
    /// Payload: [`NextEvent`].
    Next,
}

impl EventKind {
    /// Number of distinct kinds.
    pub const COUNT: usize = 4;

    /// All kinds, in state-machine order.
    pub const ALL: [EventKind; Self::COUNT] = [
        EventKind::Call,
        EventKind::Return,
        EventKind::Retry,
        EventKind::Next,
    ];

    /// Stable lowercase name (`call`, `return`, `retry`, `next`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Call => "call",
            EventKind::Return => "return",
            EventKind::Retry => "retry",
            EventKind::Next => "next",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown event name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown event name: {0:?}")]
pub struct UnknownEvent(pub String);

impl FromStr for EventKind {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

/// Payload of [`EventKind::Call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallEvent {
    /// Successful sender invocations before this one.
    pub calls: u64,
}

/// Payload of [`EventKind::Return`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnEvent {
    /// Successful sender invocations, including this one.
    pub calls: u64,
}

/// Payload of [`EventKind::Retry`].
#[derive(Debug)]
pub struct RetryEvent<'a, E> {
    /// Delay before the next sender invocation.
    pub backoff_time: Duration,
    /// Delays left in the schedule after this one.
    pub remain_retries: usize,
    /// Retries since the last success.
    pub current_retries: u64,
    /// The failure that triggered this retry.
    pub err: &'a E,
    /// Retries over the whole loop lifetime.
    pub total_retries: u64,
}

// Manual impls: a derive would demand `E: Clone`.
impl<E> Clone for RetryEvent<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for RetryEvent<'_, E> {}

/// Payload of [`EventKind::Next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextEvent {
    /// Pacing delay about to be slept (`0` = no sleep).
    pub sleep_time: Duration,
}

/// One loop event with its payload.
///
/// `T` is the sender's value type, `E` its error type.
#[derive(Debug)]
pub enum Event<'a, T, E> {
    Call(CallEvent),
    Return(ReturnEvent, &'a T),
    Retry(RetryEvent<'a, E>),
    Next(NextEvent),
}

impl<T, E> Clone for Event<'_, T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E> Copy for Event<'_, T, E> {}

impl<T, E> Event<'_, T, E> {
    /// Returns the kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Call(_) => EventKind::Call,
            Event::Return(..) => EventKind::Return,
            Event::Retry(_) => EventKind::Retry,
            Event::Next(_) => EventKind::Next,
        }
    }
}
