//! # Loop configuration.
//!
//! Provides [`LoopConfig`], the settings one [`CallLoop`](crate::CallLoop) runs with.
//!
//! ## Sentinel values
//! - `retry = None` → retries disabled (first sender failure is terminal)
//! - `sleep = 0s` → no pacing (no timer between a continue and the next call)

use std::time::Duration;

use crate::error::ConfigError;
use crate::policies::{BackoffSchedule, RetryConfig};

/// Settings of one call loop.
///
/// ## Field semantics
/// - `retry`: Backoff used after sender failures (`None` = no retries)
/// - `sleep`: Pause after each continuing receiver decision (`0s` = none)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`, `None`) across the codebase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopConfig {
    /// Retry policy for sender failures.
    ///
    /// A fresh [`BackoffSchedule`] is derived from it when the loop starts and
    /// after every continuing success.
    pub retry: Option<RetryConfig>,

    /// Inter-call pacing delay.
    ///
    /// - `Duration::ZERO` = call again immediately
    /// - `> 0` = sleep this long after the `next` event
    pub sleep: Duration,
}

impl LoopConfig {
    /// Returns the pacing delay as an `Option`.
    ///
    /// - `None` → no pacing
    /// - `Some(d)` → sleep `d` between calls
    #[inline]
    pub fn pacing(&self) -> Option<Duration> {
        if self.sleep == Duration::ZERO {
            None
        } else {
            Some(self.sleep)
        }
    }

    /// Derives a fresh backoff schedule from [`LoopConfig::retry`].
    #[inline]
    pub fn schedule(&self) -> Result<BackoffSchedule, ConfigError> {
        BackoffSchedule::new(self.retry.as_ref())
    }
}

impl Default for LoopConfig {
    /// Default configuration:
    ///
    /// - `retry = Some(RetryConfig::default())` (10 retries, 1s doubling)
    /// - `sleep = 1s`
    fn default() -> Self {
        Self {
            retry: Some(RetryConfig::default()),
            sleep: Duration::from_millis(1000),
        }
    }
}
