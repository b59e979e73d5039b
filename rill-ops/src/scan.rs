// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stateful accumulation operators.

use parking_lot::Mutex;
use rill_core::{Event, Producer};
use std::sync::Arc;

/// Extension trait providing `scan` and `reduce` for producers.
pub trait ScanExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Folds values into an accumulator, emitting every intermediate
    /// state.
    ///
    /// The seed itself is never emitted; the first emission is
    /// `f(seed, first_value)`. Each start begins from a fresh seed.
    fn scan<A, F>(&self, seed: A, f: F) -> Producer<A, E>
    where
        A: Clone + Send + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static;

    /// Folds values into an accumulator, emitting only the final state
    /// just before `Completed`.
    ///
    /// An input that completes without values yields the seed.
    fn reduce<A, F>(&self, seed: A, f: F) -> Producer<A, E>
    where
        A: Clone + Send + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static;
}

impl<T, E> ScanExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn scan<A, F>(&self, seed: A, f: F) -> Producer<A, E>
    where
        A: Clone + Send + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        // Locked so the body stays shareable with a Send-only seed.
        let seed = Mutex::new(seed);
        Producer::new(move |observer, lifetime| {
            let f = Arc::clone(&f);
            let acc = Arc::new(Mutex::new(seed.lock().clone()));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    let next = {
                        let mut acc = acc.lock();
                        let next = (*f)(acc.clone(), v);
                        *acc = next.clone();
                        next
                    };
                    observer.send_value(next);
                }
                Event::Failed(e) => observer.send_failed(e),
                Event::Completed => observer.send_completed(),
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }

    fn reduce<A, F>(&self, seed: A, f: F) -> Producer<A, E>
    where
        A: Clone + Send + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        let seed = Mutex::new(seed);
        Producer::new(move |observer, lifetime| {
            let f = Arc::clone(&f);
            let acc = Arc::new(Mutex::new(seed.lock().clone()));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    let mut acc = acc.lock();
                    let next = (*f)(acc.clone(), v);
                    *acc = next;
                }
                Event::Failed(e) => observer.send_failed(e),
                Event::Completed => {
                    let last = acc.lock().clone();
                    observer.send_value(last);
                    observer.send_completed();
                }
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }
}
