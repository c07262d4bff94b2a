//! # Logging subscriber backed by `tracing`.
//!
//! [`LogWriter`] forwards loop events to [`tracing`], one record per event.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Output format (fmt subscriber)
//! ```text
//! DEBUG pacecall: call call_loop="pages" calls=0
//! DEBUG pacecall: return call_loop="pages" calls=1
//!  WARN pacecall: retry scheduled call_loop="pages" delay_ms=1000 remain=9 current=1 total=1 err=connection refused
//! DEBUG pacecall: next call_loop="pages" sleep_ms=250
//! ```
//!
//! ## Example
//! ```no_run
//! # use std::sync::Arc;
//! # use pacecall::{CallLoop, LogWriter};
//! let pages = CallLoop::<u32, std::io::Error>::builder()
//!     .with_subscriber(Arc::new(LogWriter::new("pages")))
//!     .build();
//! ```

use std::fmt::Display;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Subscriber writing loop events as `tracing` records.
///
/// Enabled via the `logging` feature (on by default). Sender values are not
/// logged; sender errors are logged with their `Display` form.
#[derive(Debug, Clone, Copy)]
pub struct LogWriter {
    name: &'static str,
}

impl LogWriter {
    /// Creates a writer tagging every record with `name`.
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The tag attached to every record.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("call_loop")
    }
}

impl<T, E> Subscribe<T, E> for LogWriter
where
    E: Display,
{
    fn on_event(&self, e: &Event<'_, T, E>) {
        let call_loop = self.name;
        match e {
            Event::Call(ev) => {
                tracing::debug!(target: "pacecall", call_loop, calls = ev.calls, "call");
            }
            Event::Return(ev, _) => {
                tracing::debug!(target: "pacecall", call_loop, calls = ev.calls, "return");
            }
            Event::Retry(ev) => {
                tracing::warn!(
                    target: "pacecall",
                    call_loop,
                    delay_ms = ev.backoff_time.as_millis() as u64,
                    remain = ev.remain_retries,
                    current = ev.current_retries,
                    total = ev.total_retries,
                    err = %ev.err,
                    "retry scheduled"
                );
            }
            Event::Next(ev) => {
                tracing::debug!(
                    target: "pacecall",
                    call_loop,
                    sleep_ms = ev.sleep_time.as_millis() as u64,
                    "next"
                );
            }
        }
    }
}
