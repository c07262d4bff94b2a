//! Loop core: configuration, suspension and the call state machine.
//!
//! Public API from this module:
//! - [`CallLoop`] and its [`CallLoopBuilder`];
//! - [`LoopConfig`], [`CallStats`];
//! - [`Clock`], [`TokioClock`] and the [`sleep`] primitive.
//!
//! Internal modules:
//! - [`call_loop`]: runs the sender/receiver state machine;
//! - [`builder`]: assembles a loop from config, receiver, subscribers and clock;
//! - [`clock`]: backoff and pacing suspension;
//! - [`config`]: typed loop settings.

mod builder;
mod call_loop;
mod clock;
mod config;

pub use builder::CallLoopBuilder;
pub use call_loop::{CallLoop, CallStats};
pub use clock::{Clock, TokioClock, sleep};
pub use config::LoopConfig;
