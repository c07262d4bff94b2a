//! # Event sink for one call loop.
//!
//! [`EventSink`] maps every [`EventKind`] to an ordered list of handlers.
//! Emitting an event calls each handler of its kind **inline**, in
//! registration order, before the loop moves on.
//!
//! ## Architecture
//! ```text
//! CallLoop::run ── emit(&Event) ──► EventSink
//!                                     │  handlers[kind]
//!                                     ├──► handler #1 (closure)
//!                                     ├──► handler #2 (Subscribe::on_event)
//!                                     └──► handler #N
//! ```
//!
//! ## Rules
//! - **Synchronous**: `emit()` returns only after every handler returned.
//! - **Ordered**: handlers of one kind run in registration order.
//! - **No isolation**: a panicking handler unwinds through `emit()` and the loop.
//! - **Owned**: each loop owns its sink; nothing is shared between loops.

use std::fmt;
use std::sync::Arc;

use super::event::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Boxed event handler.
pub type Handler<T, E> = Box<dyn Fn(&Event<'_, T, E>) + Send + Sync>;

/// Per-kind ordered handler lists.
pub struct EventSink<T, E> {
    handlers: [Vec<Handler<T, E>>; EventKind::COUNT],
}

impl<T, E> Default for EventSink<T, E> {
    fn default() -> Self {
        Self {
            handlers: std::array::from_fn(|_| Vec::new()),
        }
    }
}

impl<T, E> EventSink<T, E> {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of `kind`.
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&Event<'_, T, E>) + Send + Sync + 'static,
    {
        self.handlers[kind.index()].push(Box::new(handler));
    }

    /// Registers a subscriber for every kind it declares in [`Subscribe::kinds`].
    pub fn subscribe(&mut self, sub: Arc<dyn Subscribe<T, E>>)
    where
        T: 'static,
        E: 'static,
    {
        for &kind in sub.kinds() {
            let s = Arc::clone(&sub);
            self.on(kind, move |ev| s.on_event(ev));
        }
    }

    /// Calls every handler registered for `event.kind()`, in order.
    pub fn emit(&self, event: &Event<'_, T, E>) {
        for handler in &self.handlers[event.kind().index()] {
            handler(event);
        }
    }

    /// Number of handlers registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers[kind.index()].len()
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.iter().map(Vec::len).sum()
    }

    /// `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, E> fmt::Debug for EventSink<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("EventSink");
        for kind in EventKind::ALL {
            dbg.field(kind.as_str(), &self.count(kind));
        }
        dbg.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CallEvent, NextEvent, ReturnEvent};
    use std::sync::Mutex;
    use std::time::Duration;

    type Sink = EventSink<&'static str, ()>;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut sink = Sink::new();

        for id in 1..=3 {
            let log = Arc::clone(&log);
            sink.on(EventKind::Call, move |_| log.lock().unwrap().push(id));
        }

        sink.emit(&Event::Call(CallEvent { calls: 0 }));
        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_only_matching_kind_is_called() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut sink = Sink::new();

        let s = Arc::clone(&seen);
        sink.on(EventKind::Return, move |ev| {
            if let Event::Return(stats, value) = ev {
                s.lock().unwrap().push((stats.calls, **value));
            }
        });

        sink.emit(&Event::Call(CallEvent { calls: 0 }));
        sink.emit(&Event::Next(NextEvent {
            sleep_time: Duration::ZERO,
        }));
        sink.emit(&Event::Return(ReturnEvent { calls: 1 }, &"one"));

        assert_eq!(*seen.lock().unwrap(), vec![(1, "one")]);
    }

    #[test]
    fn test_counts() {
        let mut sink = Sink::new();
        assert!(sink.is_empty());

        sink.on(EventKind::Retry, |_| {});
        sink.on(EventKind::Retry, |_| {});
        sink.on(EventKind::Next, |_| {});

        assert_eq!(sink.count(EventKind::Retry), 2);
        assert_eq!(sink.count(EventKind::Call), 0);
        assert_eq!(sink.len(), 3);
        assert_eq!(
            format!("{sink:?}"),
            "EventSink { call: 0, return: 0, retry: 2, next: 1 }"
        );
    }
}
