//! # Backoff schedule for retrying a failed sender.
//!
//! [`RetryConfig`] controls how many retries a loop may spend between two
//! successful calls and how long each retry waits. It is parameterized by:
//! - [`RetryConfig::retries`] the number of retries (schedule length);
//! - [`RetryConfig::min_timeout`] the first delay;
//! - [`RetryConfig::factor`] the multiplicative growth factor;
//! - [`RetryConfig::max_timeout`] the delay cap;
//! - [`RetryConfig::randomize`] whether to jitter each delay.
//!
//! The delay for retry `n` (0-indexed) is `min_timeout × factor^n`, jittered when
//! requested, rounded to whole milliseconds and clamped to `max_timeout`. Each
//! delay is derived from `n` alone, so a [`BackoffSchedule`] computes its delays
//! on demand and holds no more than the config and two counters, whatever the
//! retry count.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use pacecall::{RetryConfig, compute};
//!
//! let cfg = RetryConfig {
//!     retries: 4,
//!     min_timeout: Duration::from_millis(100),
//!     max_timeout: Duration::from_millis(500),
//!     ..RetryConfig::default()
//! };
//!
//! let delays = compute(&cfg).unwrap();
//! assert_eq!(
//!     delays,
//!     vec![
//!         Duration::from_millis(100),
//!         Duration::from_millis(200),
//!         Duration::from_millis(400),
//!         Duration::from_millis(500), // 800ms capped at max
//!     ]
//! );
//! ```

use std::time::Duration;

use crate::error::ConfigError;
use crate::policies::jitter;

/// Retry configuration.
///
/// Fields are public; merge over the defaults with struct-update syntax or the
/// `with_*` helpers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryConfig {
    /// Number of retries allowed between two successful calls.
    pub retries: u32,
    /// Multiplicative growth factor (`> 0`, `>= 1.0` for growing delays).
    pub factor: f64,
    /// Delay before the first retry.
    pub min_timeout: Duration,
    /// Upper bound for any single delay (`Duration::MAX` = unbounded).
    pub max_timeout: Duration,
    /// Multiply each delay by a random factor in `[1.0, 2.0)` before capping.
    pub randomize: bool,
}

impl Default for RetryConfig {
    /// Returns a config with:
    /// - `retries = 10`;
    /// - `factor = 2.0`;
    /// - `min_timeout = 1s`;
    /// - `max_timeout = Duration::MAX` (no cap);
    /// - `randomize = false`.
    fn default() -> Self {
        Self {
            retries: 10,
            factor: 2.0,
            min_timeout: Duration::from_millis(1000),
            max_timeout: Duration::MAX,
            randomize: false,
        }
    }
}

impl RetryConfig {
    /// Sets the number of retries.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the growth factor.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Sets the first delay.
    pub fn with_min_timeout(mut self, min_timeout: Duration) -> Self {
        self.min_timeout = min_timeout;
        self
    }

    /// Sets the delay cap.
    pub fn with_max_timeout(mut self, max_timeout: Duration) -> Self {
        self.max_timeout = max_timeout;
        self
    }

    /// Enables or disables jitter.
    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    /// Checks the config without computing a schedule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(ConfigError::InvalidFactor {
                factor: self.factor,
            });
        }
        if self.min_timeout > self.max_timeout {
            return Err(ConfigError::MinExceedsMax {
                min: self.min_timeout,
                max: self.max_timeout,
            });
        }
        Ok(())
    }

    /// Computes the delay for the given retry number (0-indexed).
    ///
    /// Jitter is drawn afresh on every call when [`RetryConfig::randomize`] is set.
    ///
    /// # Notes
    /// - Values that overflow (or are not finite) clamp to `max_timeout`.
    /// - If `factor` is less than 1.0, delays decrease with higher attempts (not typical).
    pub fn delay(&self, attempt: u32) -> Duration {
        let max_ms = self.max_timeout.as_secs_f64() * 1000.0;
        let exp = attempt.min(i32::MAX as u32) as i32;
        let unclamped_ms = self.min_timeout.as_secs_f64()
            * 1000.0
            * jitter::multiplier(self.randomize)
            * self.factor.powi(exp);

        if !unclamped_ms.is_finite() || unclamped_ms < 0.0 || unclamped_ms >= max_ms {
            return self.max_timeout;
        }

        let ms = unclamped_ms.round();
        if ms >= u64::MAX as f64 {
            return self.max_timeout;
        }
        Duration::from_millis(ms as u64).min(self.max_timeout)
    }
}

/// Turns a retry config into its ordered list of delays (smallest first).
///
/// The list has exactly `config.retries` entries; `retries = 0` yields an empty list.
/// It is allocated in full: the loop itself consumes a lazy [`BackoffSchedule`].
///
/// # Errors
/// [`ConfigError`] if the factor is not a finite positive number or if
/// `min_timeout > max_timeout`.
pub fn compute(config: &RetryConfig) -> Result<Vec<Duration>, ConfigError> {
    config.validate()?;

    let mut delays: Vec<Duration> = (0..config.retries).map(|n| config.delay(n)).collect();
    // Only randomized schedules can come out of order.
    delays.sort_unstable();
    Ok(delays)
}

/// Consumable backoff schedule.
///
/// Holds what is left of the current success-to-success window; every sender
/// failure pops one delay from the front. An empty schedule means the next
/// failure is terminal.
///
/// Delays are computed when popped, so `retries = u32::MAX` costs the same as
/// `retries = 1`. Without jitter the popped sequence equals [`compute`] for any
/// `factor >= 1.0`. With jitter each delay is drawn when it is popped and the
/// sequence is not re-sorted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackoffSchedule {
    config: Option<RetryConfig>,
    next: u32,
    remaining: u32,
}

impl BackoffSchedule {
    /// Builds a fresh schedule; `None` (retries disabled) yields an empty one.
    ///
    /// # Errors
    /// [`ConfigError`] under the same rules as [`compute`].
    pub fn new(config: Option<&RetryConfig>) -> Result<Self, ConfigError> {
        let Some(cfg) = config else {
            return Ok(Self::default());
        };
        cfg.validate()?;
        Ok(Self {
            config: Some(*cfg),
            next: 0,
            remaining: cfg.retries,
        })
    }

    /// Takes the next delay, if any remain.
    pub fn pop_front(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        let cfg = self.config.as_ref()?;
        let delay = cfg.delay(self.next);
        self.next += 1;
        self.remaining -= 1;
        Some(delay)
    }

    /// Number of delays still available.
    pub fn len(&self) -> usize {
        self.remaining as usize
    }

    /// `true` once every delay has been taken.
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: &[u64]) -> Vec<Duration> {
        v.iter().copied().map(Duration::from_millis).collect()
    }

    #[test]
    fn test_default_schedule() {
        let delays = compute(&RetryConfig::default()).unwrap();
        assert_eq!(
            delays,
            ms(&[
                1000, 2000, 4000, 8000, 16000, 32000, 64000, 128000, 256000, 512000
            ])
        );
    }

    #[test]
    fn test_zero_retries_is_empty() {
        let cfg = RetryConfig::default().with_retries(0);
        assert!(compute(&cfg).unwrap().is_empty());
    }

    #[test]
    fn test_clamped_to_max() {
        let cfg = RetryConfig::default()
            .with_retries(5)
            .with_min_timeout(Duration::from_millis(100))
            .with_max_timeout(Duration::from_millis(300));
        assert_eq!(compute(&cfg).unwrap(), ms(&[100, 200, 300, 300, 300]));
    }

    #[test]
    fn test_fractional_factor_rounds_to_millis() {
        let cfg = RetryConfig::default()
            .with_retries(3)
            .with_factor(1.5)
            .with_min_timeout(Duration::from_millis(101));
        // 101, 151.5, 227.25
        assert_eq!(compute(&cfg).unwrap(), ms(&[101, 152, 227]));
    }

    #[test]
    fn test_constant_factor() {
        let cfg = RetryConfig::default()
            .with_retries(4)
            .with_factor(1.0)
            .with_min_timeout(Duration::from_millis(500));
        assert_eq!(compute(&cfg).unwrap(), ms(&[500, 500, 500, 500]));
    }

    #[test]
    fn test_huge_attempt_clamps_to_max() {
        let cfg = RetryConfig::default().with_max_timeout(Duration::from_secs(60));
        assert_eq!(cfg.delay(100), Duration::from_secs(60));
        assert_eq!(cfg.delay(u32::MAX), Duration::from_secs(60));
    }

    #[test]
    fn test_overflow_without_cap_returns_max() {
        let cfg = RetryConfig::default();
        assert_eq!(cfg.delay(u32::MAX), Duration::MAX);
    }

    #[test]
    fn test_randomized_bounds_and_order() {
        let cfg = RetryConfig::default()
            .with_retries(8)
            .with_min_timeout(Duration::from_millis(100))
            .with_max_timeout(Duration::from_secs(10))
            .with_randomize(true);

        for _ in 0..50 {
            let delays = compute(&cfg).unwrap();
            assert_eq!(delays.len(), 8);
            assert!(delays.windows(2).all(|w| w[0] <= w[1]), "not sorted: {delays:?}");
            assert!(delays[0] >= Duration::from_millis(100));
            assert!(delays.iter().all(|d| *d <= Duration::from_secs(10)));
        }
    }

    #[test]
    fn test_randomized_first_delay_range() {
        let cfg = RetryConfig::default()
            .with_retries(1)
            .with_randomize(true);
        for _ in 0..200 {
            let d = compute(&cfg).unwrap()[0];
            assert!(d >= Duration::from_millis(1000) && d <= Duration::from_millis(2000));
        }
    }

    #[test]
    fn test_invalid_factor() {
        for factor in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let cfg = RetryConfig::default().with_factor(factor);
            assert!(matches!(
                compute(&cfg),
                Err(ConfigError::InvalidFactor { .. })
            ));
        }
    }

    #[test]
    fn test_min_exceeds_max() {
        let cfg = RetryConfig::default()
            .with_min_timeout(Duration::from_secs(10))
            .with_max_timeout(Duration::from_secs(5));
        assert_eq!(
            compute(&cfg),
            Err(ConfigError::MinExceedsMax {
                min: Duration::from_secs(10),
                max: Duration::from_secs(5),
            })
        );
    }

    #[test]
    fn test_schedule_pops_front_to_back() {
        let cfg = RetryConfig::default().with_retries(3);
        let mut schedule = BackoffSchedule::new(Some(&cfg)).unwrap();

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.pop_front(), Some(Duration::from_millis(1000)));
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.pop_front(), Some(Duration::from_millis(2000)));
        assert_eq!(schedule.pop_front(), Some(Duration::from_millis(4000)));
        assert!(schedule.is_empty());
        assert_eq!(schedule.pop_front(), None);
    }

    #[test]
    fn test_disabled_schedule_is_empty() {
        let mut schedule = BackoffSchedule::new(None).unwrap();
        assert!(schedule.is_empty());
        assert_eq!(schedule.len(), 0);
        assert_eq!(schedule.pop_front(), None);
    }

    #[test]
    fn test_schedule_matches_compute() {
        let cfg = RetryConfig::default()
            .with_retries(6)
            .with_factor(1.5)
            .with_min_timeout(Duration::from_millis(101))
            .with_max_timeout(Duration::from_millis(600));
        let mut schedule = BackoffSchedule::new(Some(&cfg)).unwrap();

        let popped: Vec<Duration> = std::iter::from_fn(|| schedule.pop_front()).collect();
        assert_eq!(popped, compute(&cfg).unwrap());
    }

    #[test]
    fn test_unbounded_retries_are_lazy() {
        let cfg = RetryConfig::default()
            .with_retries(u32::MAX)
            .with_max_timeout(Duration::from_secs(3));
        let mut schedule = BackoffSchedule::new(Some(&cfg)).unwrap();

        assert_eq!(schedule.len(), u32::MAX as usize);
        let first: Vec<Duration> = (0..4).filter_map(|_| schedule.pop_front()).collect();
        assert_eq!(first, ms(&[1000, 2000, 3000, 3000]));
        assert_eq!(schedule.len(), (u32::MAX - 4) as usize);
        assert!(!schedule.is_empty());
    }

    #[test]
    fn test_schedule_rejects_invalid_config() {
        let cfg = RetryConfig::default().with_factor(-1.0);
        assert_eq!(
            BackoffSchedule::new(Some(&cfg)),
            Err(ConfigError::InvalidFactor { factor: -1.0 })
        );
    }

    #[test]
    fn test_sub_millisecond_min_timeout() {
        let cfg = RetryConfig::default()
            .with_retries(3)
            .with_min_timeout(Duration::from_micros(1400));
        // 1.4ms, 2.8ms, 5.6ms
        assert_eq!(compute(&cfg).unwrap(), ms(&[1, 3, 6]));

        let tiny = RetryConfig::default()
            .with_retries(2)
            .with_min_timeout(Duration::from_micros(600));
        assert_eq!(compute(&tiny).unwrap(), ms(&[1, 1]));
    }
}
