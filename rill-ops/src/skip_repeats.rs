// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Consecutive-duplicate suppression.

use parking_lot::Mutex;
use rill_core::{Event, Producer};
use std::sync::Arc;

/// Extension trait providing `skip_repeats` for producers.
pub trait SkipRepeatsExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Drops values equal to the immediately preceding one.
    fn skip_repeats(&self) -> Producer<T, E>
    where
        T: PartialEq;

    /// Drops values that `is_equal` considers a repeat of the preceding
    /// one.
    fn skip_repeats_by<F>(&self, is_equal: F) -> Producer<T, E>
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static;
}

impl<T, E> SkipRepeatsExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn skip_repeats(&self) -> Producer<T, E>
    where
        T: PartialEq,
    {
        self.skip_repeats_by(|previous, current| previous == current)
    }

    fn skip_repeats_by<F>(&self, is_equal: F) -> Producer<T, E>
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let is_equal = Arc::new(is_equal);
        Producer::new(move |observer, lifetime| {
            let is_equal = Arc::clone(&is_equal);
            let previous: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    let repeat = {
                        let mut previous = previous.lock();
                        let repeat = previous
                            .as_ref()
                            .is_some_and(|prev| (*is_equal)(prev, &v));
                        if !repeat {
                            *previous = Some(v.clone());
                        }
                        repeat
                    };
                    if !repeat {
                        observer.send_value(v);
                    }
                }
                other => observer.send(other),
            }));
        })
    }
}
