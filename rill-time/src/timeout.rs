// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Failing streams that stay silent too long.

use parking_lot::Mutex;
use rill_core::{Producer, Scheduler, SerialDisposable};
use std::time::Duration;

/// Extension trait providing `timeout` for producers.
pub trait TimeoutExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Fails with `error` and tears the upstream subscription down unless
    /// a terminal event arrives within `duration` of start.
    ///
    /// Values do not push the deadline back; it is measured from start
    /// alone.
    fn timeout<S>(&self, duration: Duration, error: E, scheduler: S) -> Producer<T, E>
    where
        S: Scheduler + Clone;
}

impl<T, E> TimeoutExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn timeout<S>(&self, duration: Duration, error: E, scheduler: S) -> Producer<T, E>
    where
        S: Scheduler + Clone,
    {
        let source = self.clone();
        // Locked so the body stays shareable with a Send-only error.
        let error = Mutex::new(error);
        Producer::new(move |observer, lifetime| {
            let upstream = SerialDisposable::new();

            let forward = observer.clone();
            let guard = upstream.clone();
            let error = error.lock().clone();
            lifetime.add(scheduler.schedule_after(
                duration,
                Box::new(move || {
                    forward.send_failed(error);
                    guard.dispose();
                }),
            ));

            upstream.set(source.start(move |event| observer.send(event)));
            lifetime.add(upstream.as_disposable());
        })
    }
}
