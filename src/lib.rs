//! # pacecall
//!
//! **pacecall** repeatedly calls an async operation (the *sender*), retries it
//! with exponential backoff when it fails, and after every success asks a
//! *receiver* whether to call again, pausing between calls.
//!
//! It is protocol-agnostic: the crate performs no I/O itself. Typical senders
//! fetch the next page of an API, poll a queue or read a sensor; the receiver
//! stores the value and decides whether there is more to do.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐          ┌──────────────┐
//!     │    Sender    │          │   Receiver   │
//!     │ (user call)  │          │ (user sink)  │
//!     └──────┬───────┘          └──────┬───────┘
//!            ▼                         ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  CallLoop (state machine)                             │
//! │  - LoopConfig (retry policy, pacing sleep)            │
//! │  - BackoffSchedule (delays left since last success)   │
//! │  - CallStats (calls, current/total retries)           │
//! │  - Clock (backoff and pacing suspension)              │
//! └──────┬────────────────────────────────────────────────┘
//!        │ emits (inline, in order):
//!        │ call / return / retry / next
//!        ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  EventSink (per-kind ordered handlers)                │
//! └──────┬──────────────────┬─────────────────────────────┘
//!        ▼                  ▼
//!    closures          Subscribe impls (LogWriter, metrics, ...)
//! ```
//!
//! ### Lifecycle
//! ```text
//! CallLoop::run(sender)
//!
//! loop {
//!   ├─► emit call{calls}
//!   ├─► sender.send()
//!   │       │
//!   │       ├─ Err ──► delay = schedule.pop_front()
//!   │       │          ├─ none left ─► return CallError::Sender(original error)
//!   │       │          └─ emit retry{..}, sleep(delay), continue
//!   │       │
//!   │       └─ Ok  ──► reset current retries, emit return{calls}(&value)
//!   │
//!   ├─► receiver.receive(value)
//!   │       ├─ Err      ─► return CallError::Receiver(error)
//!   │       ├─ Stop     ─► return Ok(())
//!   │       └─ Continue ─► regenerate schedule
//!   │
//!   └─► emit next{sleep_time}, sleep(pacing) if > 0
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                         |
//! |-------------------|--------------------------------------------------------------|--------------------------------------------|
//! | **Loop**          | Sender/receiver state machine with retry and pacing.         | [`CallLoop`], [`CallLoopBuilder`]          |
//! | **Calls**         | Async closures, plain functions or custom types.             | [`Sender`], [`Receiver`], [`Decision`]     |
//! | **Policies**      | Exponential backoff schedule with optional jitter.           | [`RetryConfig`], [`BackoffSchedule`]       |
//! | **Events**        | Synchronous per-kind handlers and subscriber objects.        | [`EventSink`], [`Event`], [`Subscribe`]    |
//! | **Time**          | Pluggable suspension primitive (tokio by default).           | [`Clock`], [`TokioClock`]                  |
//! | **Errors**        | Typed errors; sender failures keep their original value.     | [`CallError`], [`ConfigError`]             |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], a subscriber writing `tracing` records.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use pacecall::{CallLoop, EventKind, Event, RetryConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut next_page = 0u32;
//!     let mut rows: Vec<String> = Vec::new();
//!
//!     let mut pager = CallLoop::builder()
//!         .retry(RetryConfig::default().with_retries(3))
//!         .sleep(Duration::from_millis(10))
//!         .on(EventKind::Retry, |ev| {
//!             if let Event::Retry(r) = ev {
//!                 eprintln!("retrying in {:?}: {}", r.backoff_time, r.err);
//!             }
//!         })
//!         .receiver(|page: Vec<String>| {
//!             let more = !page.is_empty();
//!             rows.extend(page);
//!             async move { Ok::<_, std::io::Error>(more) }
//!         })
//!         .build();
//!
//!     pager
//!         .run(|| {
//!             next_page += 1;
//!             let page = next_page;
//!             async move {
//!                 // stand-in for an HTTP request
//!                 let rows = if page <= 2 { vec![format!("row {page}")] } else { vec![] };
//!                 Ok::<_, std::io::Error>(rows)
//!             }
//!         })
//!         .await?;
//!
//!     assert_eq!(pager.stats().calls, 3);
//!     drop(pager);
//!     assert_eq!(rows, vec!["row 1", "row 2"]);
//!     Ok(())
//! }
//! ```
mod calls;
mod core;
mod error;
mod events;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use calls::{
    Decision, DefaultReceiver, Receiver, Sender, SyncReceiver, SyncSender, sync_receiver,
    sync_sender,
};
pub use self::core::{CallLoop, CallLoopBuilder, CallStats, Clock, LoopConfig, TokioClock, sleep};
pub use error::{CallError, ConfigError};
pub use events::{
    CallEvent, Event, EventKind, EventSink, Handler, NextEvent, RetryEvent, ReturnEvent,
    UnknownEvent,
};
pub use policies::{BackoffSchedule, RetryConfig, compute};
pub use subscribers::Subscribe;

// Optional: a subscriber forwarding events to `tracing`.
// Enabled by default; opt out with `default-features = false`.
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
