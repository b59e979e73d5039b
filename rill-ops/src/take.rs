// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operators that truncate the stream.

use parking_lot::Mutex;
use rill_core::{Event, Producer, SerialDisposable};
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Extension trait providing the `take` family for producers.
pub trait TakeExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Forwards the first `count` values, then completes and tears the
    /// upstream subscription down.
    ///
    /// `take(0)` delivers `Interrupted` synchronously and never starts
    /// the upstream at all.
    fn take(&self, count: usize) -> Producer<T, E>;

    /// Forwards values while `predicate` holds. The first value for which
    /// it fails is dropped and the stream completes.
    fn take_while<P>(&self, predicate: P) -> Producer<T, E>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static;

    /// Forwards values until `trigger` emits a value or completes, then
    /// completes.
    fn take_until<U>(&self, trigger: Producer<U, Infallible>) -> Producer<T, E>
    where
        U: Clone + Send + 'static;

    /// Forwards the source until `replacement` emits anything, then hands
    /// the stream over to `replacement` entirely.
    ///
    /// The source's `Completed` is swallowed: only the replacement can
    /// complete the result. Its failure and interruption still pass
    /// through while the source is live.
    fn take_until_replacement(&self, replacement: Producer<T, E>) -> Producer<T, E>;
}

impl<T, E> TakeExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn take(&self, count: usize) -> Producer<T, E> {
        if count == 0 {
            return Producer::new(move |observer, _lifetime| observer.send_interrupted());
        }
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let remaining = Arc::new(Mutex::new(count));
            let upstream = SerialDisposable::new();
            let guard = upstream.clone();

            let handle = source.start(move |event| match event {
                Event::Value(v) => {
                    let exhausted = {
                        let mut remaining = remaining.lock();
                        if *remaining == 0 {
                            return;
                        }
                        *remaining -= 1;
                        *remaining == 0
                    };
                    observer.send_value(v);
                    if exhausted {
                        observer.send_completed();
                        guard.dispose();
                    }
                }
                other => observer.send(other),
            });
            upstream.set(handle);
            lifetime.add(upstream.as_disposable());
        })
    }

    fn take_while<P>(&self, predicate: P) -> Producer<T, E>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Producer::new(move |observer, lifetime| {
            let predicate = Arc::clone(&predicate);
            let upstream = SerialDisposable::new();
            let guard = upstream.clone();

            let handle = source.start(move |event| match event {
                Event::Value(v) => {
                    if (*predicate)(&v) {
                        observer.send_value(v);
                    } else {
                        observer.send_completed();
                        guard.dispose();
                    }
                }
                other => observer.send(other),
            });
            upstream.set(handle);
            lifetime.add(upstream.as_disposable());
        })
    }

    fn take_until<U>(&self, trigger: Producer<U, Infallible>) -> Producer<T, E>
    where
        U: Clone + Send + 'static,
    {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let stopped = Arc::new(AtomicBool::new(false));
            let upstream = SerialDisposable::new();

            // The trigger subscribes first: one that has already fired
            // completes the output before the source ever runs.
            let trigger_handle = SerialDisposable::new();
            let trigger_guard = trigger_handle.clone();
            let upstream_guard = upstream.clone();
            let forward = observer.clone();
            let gate = Arc::clone(&stopped);
            trigger_handle.set(trigger.start(move |event| match event {
                Event::Value(_) | Event::Completed => {
                    gate.store(true, Ordering::SeqCst);
                    forward.send_completed();
                    upstream_guard.dispose();
                    trigger_guard.dispose();
                }
                Event::Interrupted => {}
                Event::Failed(never) => match never {},
            }));
            lifetime.add(trigger_handle.as_disposable());

            if stopped.load(Ordering::SeqCst) {
                return;
            }
            upstream.set(source.start(move |event| observer.send(event)));
            lifetime.add(upstream.as_disposable());
        })
    }

    fn take_until_replacement(&self, replacement: Producer<T, E>) -> Producer<T, E> {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let switched = Arc::new(AtomicBool::new(false));
            let original = SerialDisposable::new();

            let forward = observer.clone();
            let gate = Arc::clone(&switched);
            original.set(source.start(move |event| match event {
                // Only the replacement may complete the result.
                Event::Completed => {}
                other => {
                    if !gate.load(Ordering::SeqCst) {
                        forward.send(other);
                    }
                }
            }));
            lifetime.add(original.as_disposable());

            let gate = Arc::clone(&switched);
            lifetime.add(replacement.start(move |event| {
                // The swap suppresses the Interrupted that disposing the
                // original would otherwise feed back into the output.
                if !gate.swap(true, Ordering::SeqCst) {
                    original.dispose();
                }
                observer.send(event);
            }));
        })
    }
}
