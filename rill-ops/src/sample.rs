// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sampling the latest source value on an external cadence.

use parking_lot::Mutex;
use rill_core::{Event, Producer};
use std::convert::Infallible;
use std::sync::Arc;

use crate::map::MapExt;

struct SampleState<T> {
    latest: Option<T>,
    source_done: bool,
    sampler_done: bool,
}

/// Extension trait providing `sample_with` and `sample_on` for producers.
pub trait SampleExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Pairs the most recent source value with each sampler value.
    ///
    /// Sampler values arriving before the source has emitted anything are
    /// dropped. Completes once both inputs have completed.
    fn sample_with<U>(&self, sampler: Producer<U, Infallible>) -> Producer<(T, U), E>
    where
        U: Clone + Send + 'static;

    /// Re-emits the most recent source value on each sampler value,
    /// discarding the sampler's payload.
    fn sample_on<U>(&self, sampler: Producer<U, Infallible>) -> Producer<T, E>
    where
        U: Clone + Send + 'static;
}

impl<T, E> SampleExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn sample_with<U>(&self, sampler: Producer<U, Infallible>) -> Producer<(T, U), E>
    where
        U: Clone + Send + 'static,
    {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let state = Arc::new(Mutex::new(SampleState {
                latest: None,
                source_done: false,
                sampler_done: false,
            }));

            let forward = observer.clone();
            let shared = Arc::clone(&state);
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => shared.lock().latest = Some(v),
                Event::Failed(e) => forward.send_failed(e),
                Event::Completed => {
                    let both_done = {
                        let mut state = shared.lock();
                        state.source_done = true;
                        state.source_done && state.sampler_done
                    };
                    if both_done {
                        forward.send_completed();
                    }
                }
                Event::Interrupted => forward.send_interrupted(),
            }));

            let shared = Arc::clone(&state);
            lifetime.add(sampler.start(move |event| match event {
                Event::Value(u) => {
                    let sampled = shared.lock().latest.clone();
                    if let Some(v) = sampled {
                        observer.send_value((v, u));
                    }
                }
                Event::Completed => {
                    let both_done = {
                        let mut state = shared.lock();
                        state.sampler_done = true;
                        state.source_done && state.sampler_done
                    };
                    if both_done {
                        observer.send_completed();
                    }
                }
                Event::Interrupted => {}
                Event::Failed(never) => match never {},
            }));
        })
    }

    fn sample_on<U>(&self, sampler: Producer<U, Infallible>) -> Producer<T, E>
    where
        U: Clone + Send + 'static,
    {
        self.sample_with(sampler).map(|(value, _)| value)
    }
}
