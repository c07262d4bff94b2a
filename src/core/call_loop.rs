//! # CallLoop: sender/receiver state machine.
//!
//! Drives one [`Sender`] with:
//! - retries per the [`BackoffSchedule`] derived from [`LoopConfig::retry`],
//! - receiver consultation after every successful call,
//! - pacing per [`LoopConfig::sleep`],
//! - synchronous event emission through the loop's [`EventSink`].
//!
//! ## Event flow
//! For each iteration, the loop emits:
//! ```text
//! call → [sender] → return → [receiver] → next → [sleep] → (next iteration)
//!                 → retry  → [backoff sleep] → call → ...
//! ```
//!
//! ## Architecture
//! ```text
//! run(sender)
//!
//! schedule = BackoffSchedule::new(retry)?           (ConfigError before any call)
//! loop {
//!   ├─► emit call{calls}
//!   ├─► sender.send()
//!   │       ├─ Err ──► schedule.pop_front()
//!   │       │           ├─ None        → return CallError::Sender(err)      [Failed]
//!   │       │           └─ Some(delay) → current += 1, total += 1
//!   │       │                            emit retry{..}, sleep(delay), continue
//!   │       └─ Ok  ──► calls += 1, current = 0, emit return{calls}(&value)
//!   ├─► receiver.receive(value)
//!   │       ├─ Err      → return CallError::Receiver(err)                   [Failed]
//!   │       ├─ Stop     → return Ok(())                                     [Done]
//!   │       └─ Continue → schedule regenerated
//!   ├─► emit next{sleep_time}
//!   └─► sleep(pacing) if sleep > 0
//! }
//! ```
//!
//! ## Rules
//! - Calls run **sequentially** within one loop (`run` takes `&mut self`)
//! - Every retry is a **new** sender invocation
//! - `calls` and `total_retries` never reset; `current_retries` resets on every success
//! - Receiver failures are **never** retried

use std::sync::Arc;
use std::time::Duration;

use crate::{
    calls::{Decision, DefaultReceiver, Receiver, Sender},
    core::{
        builder::CallLoopBuilder,
        clock::{Clock, TokioClock},
        config::LoopConfig,
    },
    error::CallError,
    events::{CallEvent, Event, EventKind, EventSink, NextEvent, RetryEvent, ReturnEvent},
    policies::{BackoffSchedule, RetryConfig},
    subscribers::Subscribe,
};

/// Counters of one loop.
///
/// Kept across [`CallLoop::run`] invocations; only a new loop starts from zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallStats {
    /// Successful sender invocations.
    pub calls: u64,
    /// Retries since the last success.
    pub current_retries: u64,
    /// Retries over the loop lifetime.
    pub total_retries: u64,
}

/// Repeatedly calls a sender, retrying failures and pacing successes.
///
/// `T` is the sender's value type, `E` its error type and `R` the receiver.
///
/// ### Responsibilities
/// - **Retry**: failed sender calls are retried per the backoff schedule
/// - **Continuation**: the receiver decides whether to call again
/// - **Pacing**: successful iterations are spaced by [`LoopConfig::sleep`]
/// - **Event publishing**: every step is reported to the sink
///
/// ### Example
/// ```rust
/// use std::time::Duration;
/// use pacecall::CallLoop;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut pages = Vec::new();
/// let mut cursor = 0u32;
///
/// let mut fetch = CallLoop::builder()
///     .sleep(Duration::ZERO)
///     .receiver(|page: u32| {
///         pages.push(page);
///         async move { Ok::<_, std::io::Error>(page < 3) }
///     })
///     .build();
///
/// fetch
///     .run(|| {
///         cursor += 1;
///         let page = cursor;
///         async move { Ok::<_, std::io::Error>(page) }
///     })
///     .await
///     .unwrap();
///
/// assert_eq!(fetch.stats().calls, 3);
/// drop(fetch);
/// assert_eq!(pages, vec![1, 2, 3]);
/// # }
/// ```
pub struct CallLoop<T, E, R = DefaultReceiver> {
    config: LoopConfig,
    receiver: R,
    sink: EventSink<T, E>,
    clock: Arc<dyn Clock>,
    stats: CallStats,
}

impl<T, E> CallLoop<T, E> {
    /// Creates a loop with `config`, the default receiver and the tokio clock.
    pub fn new(config: LoopConfig) -> Self {
        Self::from_parts(
            config,
            DefaultReceiver,
            EventSink::new(),
            Arc::new(TokioClock),
        )
    }

    /// Returns a builder starting from [`LoopConfig::default`].
    pub fn builder() -> CallLoopBuilder<T, E> {
        CallLoopBuilder::new()
    }
}

impl<T, E> Default for CallLoop<T, E> {
    fn default() -> Self {
        Self::new(LoopConfig::default())
    }
}

impl<T, E, R> CallLoop<T, E, R> {
    pub(crate) fn from_parts(
        config: LoopConfig,
        receiver: R,
        sink: EventSink<T, E>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            receiver,
            sink,
            clock,
            stats: CallStats::default(),
        }
    }

    /// Replaces the receiver consulted after each successful call.
    pub fn with_receiver<R2>(self, receiver: R2) -> CallLoop<T, E, R2> {
        CallLoop {
            config: self.config,
            receiver,
            sink: self.sink,
            clock: self.clock,
            stats: self.stats,
        }
    }

    /// Overwrites the retry policy (`None` disables retries).
    pub fn set_retry(&mut self, retry: Option<RetryConfig>) -> &mut Self {
        self.config.retry = retry;
        self
    }

    /// Overwrites the pacing delay (`0` disables pacing).
    pub fn set_sleep(&mut self, sleep: Duration) -> &mut Self {
        self.config.sleep = sleep;
        self
    }

    /// Registers `handler` for events of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> &mut Self
    where
        F: Fn(&Event<'_, T, E>) + Send + Sync + 'static,
    {
        self.sink.on(kind, handler);
        self
    }

    /// Registers a subscriber for the kinds it declares.
    pub fn subscribe(&mut self, sub: Arc<dyn Subscribe<T, E>>) -> &mut Self
    where
        T: 'static,
        E: 'static,
    {
        self.sink.subscribe(sub);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Snapshot of the loop counters.
    pub fn stats(&self) -> CallStats {
        self.stats
    }

    /// Handlers registered on this loop.
    pub fn events(&self) -> &EventSink<T, E> {
        &self.sink
    }

    /// Runs the loop until the receiver stops it or a failure ends it.
    ///
    /// ### Exit conditions
    /// - Receiver returns [`Decision::Stop`] → `Ok(())`
    /// - Sender fails with no retries left → [`CallError::Sender`] (original error)
    /// - Receiver fails → [`CallError::Receiver`] (no further events)
    /// - Retry config is invalid → [`CallError::Config`] (before any event)
    ///
    /// ### Suspension points
    /// The returned future suspends only while awaiting the sender, the
    /// receiver, or the clock. Dropping it abandons the loop at that point.
    pub async fn run<S>(&mut self, mut sender: S) -> Result<(), CallError<E, R::Error>>
    where
        S: Sender<T, E>,
        R: Receiver<T>,
    {
        let mut schedule = self.config.schedule()?;

        loop {
            self.sink.emit(&Event::Call(CallEvent {
                calls: self.stats.calls,
            }));

            let value = match sender.send().await {
                Ok(value) => value,
                Err(err) => {
                    let delay = self.schedule_retry(&mut schedule, err)?;
                    self.clock.sleep(delay).await;
                    continue;
                }
            };

            self.stats.calls += 1;
            self.stats.current_retries = 0;
            self.sink.emit(&Event::Return(
                ReturnEvent {
                    calls: self.stats.calls,
                },
                &value,
            ));

            let decision = self
                .receiver
                .receive(value)
                .await
                .map_err(CallError::Receiver)?;
            if decision == Decision::Stop {
                return Ok(());
            }

            schedule = self.config.schedule()?;

            self.sink.emit(&Event::Next(NextEvent {
                sleep_time: self.config.sleep,
            }));
            if let Some(pause) = self.config.pacing() {
                self.clock.sleep(pause).await;
            }
        }
    }

    /// Takes the next backoff delay for `err` and emits `retry`.
    ///
    /// Returns the original error once the schedule is exhausted.
    fn schedule_retry<RE>(
        &mut self,
        schedule: &mut BackoffSchedule,
        err: E,
    ) -> Result<Duration, CallError<E, RE>> {
        let Some(delay) = schedule.pop_front() else {
            return Err(CallError::Sender(err));
        };

        self.stats.current_retries += 1;
        self.stats.total_retries += 1;
        self.sink.emit(&Event::Retry(RetryEvent {
            backoff_time: delay,
            remain_retries: schedule.len(),
            current_retries: self.stats.current_retries,
            err: &err,
            total_retries: self.stats.total_retries,
        }));
        Ok(delay)
    }
}

impl<T, E, R: std::fmt::Debug> std::fmt::Debug for CallLoop<T, E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallLoop")
            .field("config", &self.config)
            .field("receiver", &self.receiver)
            .field("sink", &self.sink)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
