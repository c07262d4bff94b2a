//! Error types used by the call loop.
//!
//! This module defines:
//!
//! - [`ConfigError`]: invalid retry configuration, detected when a backoff
//!   schedule is computed (always before the first sender invocation).
//! - [`CallError`]: the terminal failure of [`CallLoop::run`](crate::CallLoop::run).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Invalid retry configuration.
///
/// Returned by [`compute`](crate::compute) and surfaced by
/// [`CallLoop::run`](crate::CallLoop::run) as [`CallError::Config`].
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Growth factor is not a finite positive number.
    #[error("backoff factor must be finite and > 0, got {factor}")]
    InvalidFactor {
        /// The rejected factor.
        factor: f64,
    },

    /// `min_timeout` is greater than `max_timeout`.
    #[error("min_timeout {min:?} is greater than max_timeout {max:?}")]
    MinExceedsMax {
        /// Configured minimum (first) delay.
        min: Duration,
        /// Configured delay cap.
        max: Duration,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use pacecall::ConfigError;
    ///
    /// let err = ConfigError::InvalidFactor { factor: -1.0 };
    /// assert_eq!(err.as_label(), "config_invalid_factor");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::InvalidFactor { .. } => "config_invalid_factor",
            ConfigError::MinExceedsMax { .. } => "config_min_exceeds_max",
        }
    }
}

/// # Terminal failure of a call loop.
///
/// `SE` is the sender's error type, `RE` the receiver's.
///
/// - [`CallError::Sender`] carries the **original** error value of the last
///   failed sender invocation once the backoff schedule is exhausted. Its
///   `Display`/`source` are forwarded unchanged.
/// - [`CallError::Receiver`] carries the receiver's error; receivers are never retried.
/// - [`CallError::Config`] is returned before any sender invocation.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CallError<SE, RE> {
    /// Retry configuration rejected while computing the backoff schedule.
    #[error("invalid retry configuration: {0}")]
    Config(#[from] ConfigError),

    /// Sender failed and no retries remain.
    #[error(transparent)]
    Sender(SE),

    /// Receiver failed (never retried).
    #[error(transparent)]
    Receiver(RE),
}

impl<SE, RE> CallError<SE, RE> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use pacecall::CallError;
    /// use std::convert::Infallible;
    ///
    /// let err: CallError<std::io::Error, Infallible> =
    ///     CallError::Sender(std::io::Error::other("boom"));
    /// assert_eq!(err.as_label(), "call_sender_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CallError::Config(_) => "call_config_invalid",
            CallError::Sender(_) => "call_sender_failed",
            CallError::Receiver(_) => "call_receiver_failed",
        }
    }

    /// `true` if the loop ended because the sender exhausted its retries.
    pub fn is_sender(&self) -> bool {
        matches!(self, CallError::Sender(_))
    }

    /// `true` if the loop ended because the receiver failed.
    pub fn is_receiver(&self) -> bool {
        matches!(self, CallError::Receiver(_))
    }

    /// Returns the sender's original error, if that is what ended the loop.
    pub fn into_sender(self) -> Option<SE> {
        match self {
            CallError::Sender(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the receiver's original error, if that is what ended the loop.
    pub fn into_receiver(self) -> Option<RE> {
        match self {
            CallError::Receiver(e) => Some(e),
            _ => None,
        }
    }
}

impl<SE, RE> CallError<SE, RE>
where
    SE: std::fmt::Display,
    RE: std::fmt::Display,
{
    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            CallError::Config(e) => format!("config: {e}"),
            CallError::Sender(e) => format!("sender: {e}"),
            CallError::Receiver(e) => format!("receiver: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Debug, PartialEq)]
    struct Boom(u32);

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "boom #{}", self.0)
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn test_sender_error_is_transparent() {
        let err: CallError<Boom, Infallible> = CallError::Sender(Boom(7));
        assert_eq!(err.to_string(), "boom #7");
        assert!(err.is_sender());
        assert!(!err.is_receiver());
        assert_eq!(err.into_sender(), Some(Boom(7)));
    }

    #[test]
    fn test_receiver_error_accessors() {
        let err: CallError<Infallible, Boom> = CallError::Receiver(Boom(1));
        assert_eq!(err.as_label(), "call_receiver_failed");
        assert_eq!(err.as_message(), "receiver: boom #1");
        assert_eq!(err.into_receiver(), Some(Boom(1)));
    }

    #[test]
    fn test_config_error_converts() {
        let cfg = ConfigError::MinExceedsMax {
            min: Duration::from_secs(2),
            max: Duration::from_secs(1),
        };
        let err: CallError<Boom, Boom> = cfg.clone().into();
        assert_eq!(err.as_label(), "call_config_invalid");
        assert!(err.to_string().starts_with("invalid retry configuration"));
        assert!(err.into_sender().is_none());
        assert_eq!(cfg.as_label(), "config_min_exceeds_max");
    }
}
