// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use rill_core::Event;
use std::sync::Arc;

/// Records every event delivered to it so tests can assert on the full
/// trace after the fact.
pub struct EventCollector<T, E> {
    events: Arc<Mutex<Vec<Event<T, E>>>>,
}

impl<T, E> EventCollector<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a callback suitable for `Signal::observe` or
    /// `Producer::start`.
    pub fn callback(&self) -> impl Fn(Event<T, E>) + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |event| events.lock().push(event)
    }

    /// Full event trace in delivery order.
    pub fn events(&self) -> Vec<Event<T, E>> {
        self.events.lock().clone()
    }

    /// Only the payloads of `Value` events, in order.
    pub fn values(&self) -> Vec<T> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| event.clone().value())
            .collect()
    }

    /// The error of the `Failed` event, if one was delivered.
    pub fn error(&self) -> Option<E> {
        self.events
            .lock()
            .iter()
            .find_map(|event| event.clone().error())
    }

    pub fn is_completed(&self) -> bool {
        self.events
            .lock()
            .iter()
            .any(|event| matches!(event, Event::Completed))
    }

    pub fn is_interrupted(&self) -> bool {
        self.events
            .lock()
            .iter()
            .any(|event| matches!(event, Event::Interrupted))
    }

    pub fn is_failed(&self) -> bool {
        self.events
            .lock()
            .iter()
            .any(|event| matches!(event, Event::Failed(_)))
    }

    /// True once any terminal event has been recorded.
    pub fn is_terminated(&self) -> bool {
        self.events.lock().iter().any(Event::is_terminal)
    }
}

impl<T, E> Default for EventCollector<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for EventCollector<T, E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}
