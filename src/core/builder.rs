use std::sync::Arc;
use std::time::Duration;

use super::{
    call_loop::CallLoop,
    clock::{Clock, TokioClock},
    config::LoopConfig,
};
use crate::{
    calls::DefaultReceiver,
    events::{Event, EventKind, EventSink},
    policies::RetryConfig,
    subscribers::Subscribe,
};

/// Builder for constructing a [`CallLoop`] with optional features.
pub struct CallLoopBuilder<T, E, R = DefaultReceiver> {
    cfg: LoopConfig,
    receiver: R,
    sink: EventSink<T, E>,
    clock: Arc<dyn Clock>,
}

impl<T, E> CallLoopBuilder<T, E> {
    /// Creates a builder with [`LoopConfig::default`] and the default receiver.
    pub fn new() -> Self {
        Self {
            cfg: LoopConfig::default(),
            receiver: DefaultReceiver,
            sink: EventSink::new(),
            clock: Arc::new(TokioClock),
        }
    }
}

impl<T, E> Default for CallLoopBuilder<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E, R> CallLoopBuilder<T, E, R> {
    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: LoopConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the retry policy used after sender failures.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.cfg.retry = Some(retry);
        self
    }

    /// Disables retries: the first sender failure ends the loop.
    pub fn no_retry(mut self) -> Self {
        self.cfg.retry = None;
        self
    }

    /// Sets the pause between a continuing receiver decision and the next call.
    ///
    /// `Duration::ZERO` disables pacing.
    pub fn sleep(mut self, sleep: Duration) -> Self {
        self.cfg.sleep = sleep;
        self
    }

    /// Sets the receiver consulted after each successful call.
    pub fn receiver<R2>(self, receiver: R2) -> CallLoopBuilder<T, E, R2> {
        CallLoopBuilder {
            cfg: self.cfg,
            receiver,
            sink: self.sink,
            clock: self.clock,
        }
    }

    /// Replaces the clock used for backoff and pacing sleeps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Registers `handler` for events of `kind`.
    pub fn on<F>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&Event<'_, T, E>) + Send + Sync + 'static,
    {
        self.sink.on(kind, handler);
        self
    }

    /// Registers one subscriber.
    pub fn with_subscriber(mut self, sub: Arc<dyn Subscribe<T, E>>) -> Self
    where
        T: 'static,
        E: 'static,
    {
        self.sink.subscribe(sub);
        self
    }

    /// Registers subscribers, in order.
    pub fn with_subscribers(mut self, subs: Vec<Arc<dyn Subscribe<T, E>>>) -> Self
    where
        T: 'static,
        E: 'static,
    {
        for sub in subs {
            self.sink.subscribe(sub);
        }
        self
    }

    /// Builds the loop; stats start at zero.
    pub fn build(self) -> CallLoop<T, E, R> {
        CallLoop::from_parts(self.cfg, self.receiver, self.sink, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CallEvent;

    struct Noop;

    impl Subscribe<u8, ()> for Noop {
        fn on_event(&self, _: &Event<'_, u8, ()>) {}

        fn kinds(&self) -> &'static [EventKind] {
            &[EventKind::Retry, EventKind::Next]
        }
    }

    #[test]
    fn test_defaults() {
        let lp = CallLoopBuilder::<u8, ()>::new().build();
        assert_eq!(*lp.config(), LoopConfig::default());
        assert!(lp.events().is_empty());
    }

    #[test]
    fn test_overrides() {
        let lp = CallLoopBuilder::<u8, ()>::new()
            .retry(RetryConfig::default().with_retries(2))
            .sleep(Duration::ZERO)
            .build();
        assert_eq!(lp.config().retry.map(|r| r.retries), Some(2));
        assert_eq!(lp.config().pacing(), None);

        let lp = CallLoopBuilder::<u8, ()>::new().no_retry().build();
        assert_eq!(lp.config().retry, None);
    }

    #[test]
    fn test_subscribers_register_declared_kinds() {
        let lp = CallLoopBuilder::<u8, ()>::new()
            .with_subscribers(vec![
                Arc::new(Noop) as Arc<dyn Subscribe<u8, ()>>,
                Arc::new(Noop),
            ])
            .on(EventKind::Call, |ev| assert_eq!(ev.kind(), EventKind::Call))
            .build();

        assert_eq!(lp.events().count(EventKind::Retry), 2);
        assert_eq!(lp.events().count(EventKind::Next), 2);
        assert_eq!(lp.events().count(EventKind::Return), 0);
        assert_eq!(lp.events().len(), 5);
        lp.events().emit(&Event::Call(CallEvent { calls: 0 }));
    }
}
