// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prepending initial values to a stream.

use parking_lot::Mutex;
use rill_core::Producer;

/// Extension trait providing `start_with` for producers.
pub trait StartWithExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Emits `initial_values` in order at start, then everything the
    /// source delivers.
    fn start_with(&self, initial_values: Vec<T>) -> Producer<T, E>;
}

impl<T, E> StartWithExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn start_with(&self, initial_values: Vec<T>) -> Producer<T, E> {
        let source = self.clone();
        // Locked so the body stays shareable with a Send-only payload.
        let initial_values = Mutex::new(initial_values);
        Producer::new(move |observer, lifetime| {
            let prefix = initial_values.lock().clone();
            for value in prefix {
                observer.send_value(value);
            }
            let forward = observer.clone();
            lifetime.add(source.start(move |event| forward.send(event)));
        })
    }
}
