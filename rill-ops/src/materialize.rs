// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reifying events as values and back.

use rill_core::{Event, Producer, SerialDisposable};
use std::convert::Infallible;

/// Extension trait providing `materialize` for producers.
pub trait MaterializeExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Wraps every event, terminal ones included, as a value of an
    /// infallible stream that completes right after the wrapped terminal.
    fn materialize(&self) -> Producer<Event<T, E>, Infallible>;
}

impl<T, E> MaterializeExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn materialize(&self) -> Producer<Event<T, E>, Infallible> {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            lifetime.add(source.start(move |event| {
                let terminal = event.is_terminal();
                observer.send_value(event);
                if terminal {
                    observer.send_completed();
                }
            }));
        })
    }
}

/// Extension trait providing `dematerialize` for producers of reified
/// events.
///
/// Only infallible streams of events can be collapsed back; the outer
/// stream has no failure channel of its own to confuse with the inner one.
pub trait DematerializeExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Unwraps reified events, re-terminating on the first inner terminal
    /// and tearing the upstream subscription down.
    fn dematerialize(&self) -> Producer<T, E>;
}

impl<T, E> DematerializeExt<T, E> for Producer<Event<T, E>, Infallible>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn dematerialize(&self) -> Producer<T, E> {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let upstream = SerialDisposable::new();
            let guard = upstream.clone();

            let handle = source.start(move |event| match event {
                Event::Value(inner) => {
                    let terminal = inner.is_terminal();
                    observer.send(inner);
                    if terminal {
                        guard.dispose();
                    }
                }
                Event::Completed => observer.send_completed(),
                Event::Interrupted => observer.send_interrupted(),
                Event::Failed(never) => match never {},
            });
            upstream.set(handle);
            lifetime.add(upstream.as_disposable());
        })
    }
}
