// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Predicate-based filtering operators.

use rill_core::{Event, Producer};
use std::sync::Arc;

/// Extension trait providing `filter` and `filter_map` for producers.
pub trait FilterExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Forwards only the values for which `predicate` returns `true`.
    /// Terminal events always pass through.
    fn filter<P>(&self, predicate: P) -> Producer<T, E>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static;

    /// Maps each value with `f` and forwards the `Some` results,
    /// dropping the `None`s.
    fn filter_map<U, F>(&self, f: F) -> Producer<U, E>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> Option<U> + Send + Sync + 'static;
}

impl<T, E> FilterExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn filter<P>(&self, predicate: P) -> Producer<T, E>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Producer::new(move |observer, lifetime| {
            let predicate = Arc::clone(&predicate);
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    if (*predicate)(&v) {
                        observer.send_value(v);
                    }
                }
                other => observer.send(other),
            }));
        })
    }

    fn filter_map<U, F>(&self, f: F) -> Producer<U, E>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> Option<U> + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Producer::new(move |observer, lifetime| {
            let f = Arc::clone(&f);
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    if let Some(u) = (*f)(v) {
                        observer.send_value(u);
                    }
                }
                Event::Failed(e) => observer.send_failed(e),
                Event::Completed => observer.send_completed(),
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }
}

/// Extension trait unwrapping `Option` payloads.
pub trait SkipNoneExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Drops `None` values and unwraps the `Some`s.
    fn skip_none(&self) -> Producer<T, E>;
}

impl<T, E> SkipNoneExt<T, E> for Producer<Option<T>, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn skip_none(&self) -> Producer<T, E> {
        self.filter_map(|option| option)
    }
}
