// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Side-effect observation without modifying the stream.

use rill_core::{Event, Producer};
use std::sync::Arc;

/// Extension trait providing `tap` for producers.
pub trait TapExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Invokes `f` with a reference to each value, then forwards the value
    /// unchanged. Terminal events pass through without calling `f`.
    ///
    /// Useful for debugging, logging or metrics collection without
    /// affecting the data flow.
    fn tap<F>(&self, f: F) -> Producer<T, E>
    where
        F: Fn(&T) + Send + Sync + 'static;
}

impl<T, E> TapExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn tap<F>(&self, f: F) -> Producer<T, E>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Producer::new(move |observer, lifetime| {
            let f = Arc::clone(&f);
            lifetime.add(source.start(move |event| {
                if let Event::Value(v) = &event {
                    (*f)(v);
                }
                observer.send(event);
            }));
        })
    }
}
