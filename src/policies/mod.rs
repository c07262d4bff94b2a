//! Retry policies.
//!
//! This module groups the knobs that control **how many** times a failed sender
//! is retried and **how long** to wait between attempts.
//!
//! ## Contents
//! - [`RetryConfig`] retry count and delay growth (min / factor / max + randomize)
//! - [`compute`] pure function turning a config into the ordered list of delays
//! - [`BackoffSchedule`] the same delays, computed lazily as they are popped
//!
//! ## Quick wiring
//! ```text
//! LoopConfig { retry: Option<RetryConfig>, sleep: Duration }
//!      └─► core::call_loop::CallLoop uses:
//!           - BackoffSchedule::new(retry) at start and after every continuing success
//!           - schedule.pop_front() after every sender failure
//! ```
//!
//! ## Defaults
//! - `RetryConfig::default()` → retries=10, factor=2.0, min=1s, max=∞, randomize=false.
//! - `retry = None` disables retries entirely (first failure is fatal).

mod backoff;
mod jitter;

pub use backoff::{BackoffSchedule, RetryConfig, compute};
