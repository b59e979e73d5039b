// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fallible side-effect and mapping operators.

use rill_core::{Event, Producer, SerialDisposable};
use std::sync::Arc;

/// Extension trait providing `attempt` and `attempt_map` for producers.
pub trait AttemptExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Runs `f` against each value; on `Err` the stream fails with that
    /// error and the upstream subscription is torn down.
    fn attempt<F>(&self, f: F) -> Producer<T, E>
    where
        F: Fn(&T) -> Result<(), E> + Send + Sync + 'static;

    /// Maps each value through a fallible `f`; the first `Err` fails the
    /// stream and tears the upstream subscription down.
    fn attempt_map<U, F>(&self, f: F) -> Producer<U, E>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static;
}

impl<T, E> AttemptExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn attempt<F>(&self, f: F) -> Producer<T, E>
    where
        F: Fn(&T) -> Result<(), E> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.attempt_map(move |value| match (*f)(&value) {
            Ok(()) => Ok(value),
            Err(e) => Err(e),
        })
    }

    fn attempt_map<U, F>(&self, f: F) -> Producer<U, E>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Producer::new(move |observer, lifetime| {
            let f = Arc::clone(&f);
            let upstream = SerialDisposable::new();
            let guard = upstream.clone();

            let handle = source.start(move |event| match event {
                Event::Value(v) => match (*f)(v) {
                    Ok(u) => observer.send_value(u),
                    Err(e) => {
                        observer.send_failed(e);
                        guard.dispose();
                    }
                },
                Event::Failed(e) => observer.send_failed(e),
                Event::Completed => observer.send_completed(),
                Event::Interrupted => observer.send_interrupted(),
            });

            // If the callback already failed during the synchronous start,
            // the serial handle is disposed and tears `handle` down here.
            upstream.set(handle);
            lifetime.add(upstream.as_disposable());
        })
    }
}
