// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pairs each value with its predecessor.

use parking_lot::Mutex;
use rill_core::{Event, Producer};
use std::sync::Arc;

/// Extension trait providing `combine_previous` for producers.
pub trait CombinePreviousExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Emits `(previous, current)` for every value; the first value is
    /// paired with `initial`.
    fn combine_previous(&self, initial: T) -> Producer<(T, T), E>;
}

impl<T, E> CombinePreviousExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn combine_previous(&self, initial: T) -> Producer<(T, T), E> {
        let source = self.clone();
        // Locked so the body stays shareable with a Send-only payload.
        let initial = Mutex::new(initial);
        Producer::new(move |observer, lifetime| {
            let previous = Arc::new(Mutex::new(initial.lock().clone()));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    let pair = {
                        let mut previous = previous.lock();
                        let pair = (previous.clone(), v.clone());
                        *previous = v;
                        pair
                    };
                    observer.send_value(pair);
                }
                Event::Failed(e) => observer.send_failed(e),
                Event::Completed => observer.send_completed(),
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }
}
