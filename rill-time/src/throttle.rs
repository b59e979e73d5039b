// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Rate limiting with trailing-edge coalescing.

use parking_lot::Mutex;
use rill_core::{Event, Producer, Scheduler, SerialDisposable};
use std::sync::Arc;
use std::time::Duration;

struct ThrottleState<T> {
    // Fire time of the most recent delivered emission.
    previous: Option<Duration>,
    pending: Option<T>,
}

/// Extension trait providing `throttle` for producers.
pub trait ThrottleExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Delivers at most one value per `interval`: the first value of a
    /// window goes out at once, later values coalesce into a single
    /// trailing emission carrying the latest one.
    ///
    /// A clock that moved backwards past the previous emission starts a
    /// fresh window, so the next value is delivered immediately.
    /// `Completed` is scheduled right away and replaces any pending
    /// trailing emission; `Failed` and `Interrupted` are forwarded
    /// synchronously.
    fn throttle<S>(&self, interval: Duration, scheduler: S) -> Producer<T, E>
    where
        S: Scheduler + Clone;
}

impl<T, E> ThrottleExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn throttle<S>(&self, interval: Duration, scheduler: S) -> Producer<T, E>
    where
        S: Scheduler + Clone,
    {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let scheduler = scheduler.clone();
            let state = Arc::new(Mutex::new(ThrottleState {
                previous: None,
                pending: None,
            }));
            let in_flight = SerialDisposable::new();
            lifetime.add(in_flight.as_disposable());

            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    let now = scheduler.now();
                    let fire_at = {
                        let mut state = state.lock();
                        state.pending = Some(v);
                        match state.previous {
                            // A `previous` in the future means the clock
                            // was rewound; start a fresh window.
                            Some(previous) if previous <= now => (previous + interval).max(now),
                            _ => now,
                        }
                    };

                    let forward = observer.clone();
                    let shared = Arc::clone(&state);
                    in_flight.set(scheduler.schedule_after(
                        fire_at - now,
                        Box::new(move || {
                            let value = {
                                let mut state = shared.lock();
                                let value = state.pending.take();
                                if value.is_some() {
                                    state.previous = Some(fire_at);
                                }
                                value
                            };
                            if let Some(value) = value {
                                forward.send_value(value);
                            }
                        }),
                    ));
                }
                Event::Completed => {
                    // Replaces a pending trailing emission: its value is
                    // dropped, completion wins.
                    let forward = observer.clone();
                    in_flight.set(scheduler.schedule(Box::new(move || forward.send_completed())));
                }
                Event::Failed(e) => observer.send_failed(e),
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }
}
