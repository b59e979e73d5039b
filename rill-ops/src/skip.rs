// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operators that suppress a prefix of the stream.

use parking_lot::Mutex;
use rill_core::{Event, Producer, SerialDisposable};
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Extension trait providing the `skip` family for producers.
pub trait SkipExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Drops the first `count` values, then forwards everything.
    /// `skip(0)` is the identity.
    fn skip(&self, count: usize) -> Producer<T, E>;

    /// Drops values while `predicate` holds; the first value for which it
    /// fails is forwarded, along with everything after it.
    fn skip_while<P>(&self, predicate: P) -> Producer<T, E>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static;

    /// Drops values until `trigger` emits a value or completes; values
    /// arriving afterwards are forwarded.
    ///
    /// Terminal events from the source always pass through, gated or not.
    fn skip_until<U>(&self, trigger: Producer<U, Infallible>) -> Producer<T, E>
    where
        U: Clone + Send + 'static;
}

impl<T, E> SkipExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn skip(&self, count: usize) -> Producer<T, E> {
        if count == 0 {
            return self.clone();
        }
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let remaining = Arc::new(Mutex::new(count));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    let skipping = {
                        let mut remaining = remaining.lock();
                        if *remaining > 0 {
                            *remaining -= 1;
                            true
                        } else {
                            false
                        }
                    };
                    if !skipping {
                        observer.send_value(v);
                    }
                }
                other => observer.send(other),
            }));
        })
    }

    fn skip_while<P>(&self, predicate: P) -> Producer<T, E>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Producer::new(move |observer, lifetime| {
            let predicate = Arc::clone(&predicate);
            let skipping = Arc::new(AtomicBool::new(true));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    if skipping.load(Ordering::SeqCst) && (*predicate)(&v) {
                        return;
                    }
                    skipping.store(false, Ordering::SeqCst);
                    observer.send_value(v);
                }
                other => observer.send(other),
            }));
        })
    }

    fn skip_until<U>(&self, trigger: Producer<U, Infallible>) -> Producer<T, E>
    where
        U: Clone + Send + 'static,
    {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let open = Arc::new(AtomicBool::new(false));

            // The trigger subscription tears itself down on first fire.
            let trigger_handle = SerialDisposable::new();
            let gate = Arc::clone(&open);
            let guard = trigger_handle.clone();
            trigger_handle.set(trigger.start(move |event| match event {
                Event::Value(_) | Event::Completed => {
                    gate.store(true, Ordering::SeqCst);
                    guard.dispose();
                }
                Event::Interrupted => {}
                Event::Failed(never) => match never {},
            }));
            lifetime.add(trigger_handle.as_disposable());

            let open = Arc::clone(&open);
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    if open.load(Ordering::SeqCst) {
                        observer.send_value(v);
                    }
                }
                other => observer.send(other),
            }));
        })
    }
}
