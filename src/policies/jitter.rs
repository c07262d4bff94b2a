//! # Jitter for retry delays.
//!
//! When [`RetryConfig::randomize`](crate::RetryConfig::randomize) is set, every
//! computed delay is multiplied by an independent factor drawn uniformly from
//! `[1.0, 2.0)` **before** it is capped by `max_timeout`:
//!
//! ```text
//! delay[i] = min(round(min_timeout × jitter × factor^i), max_timeout)
//! jitter   = 1.0                   (randomize = false)
//!          = uniform[1.0, 2.0)     (randomize = true)
//! ```
//!
//! Jitter only ever lengthens a delay, so a randomized schedule never retries
//! sooner than the deterministic one would.

use rand::Rng;

/// Lower bound of the jitter multiplier (inclusive).
pub(crate) const JITTER_MIN: f64 = 1.0;
/// Upper bound of the jitter multiplier (exclusive).
pub(crate) const JITTER_MAX: f64 = 2.0;

/// Returns the multiplier applied to one delay.
///
/// `1.0` when `randomize` is false, otherwise a fresh draw from `[1.0, 2.0)`.
pub(crate) fn multiplier(randomize: bool) -> f64 {
    if !randomize {
        return JITTER_MIN;
    }
    let mut rng = rand::rng();
    rng.random_range(JITTER_MIN..JITTER_MAX)
}
