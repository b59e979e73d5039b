// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pairs the freshest values of two producers.

use parking_lot::Mutex;
use rill_core::{Event, Producer};
use std::sync::Arc;

struct CombineState<T, U> {
    left: Option<T>,
    right: Option<U>,
    left_done: bool,
    right_done: bool,
}

/// Extension trait providing `combine_latest` for producers.
pub trait CombineLatestExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Emits `(left, right)` with the most recent value of each input
    /// every time either input emits, once both have emitted at least
    /// once.
    ///
    /// Completes when both inputs have completed; fails on the first
    /// failure of either.
    fn combine_latest<U>(&self, other: Producer<U, E>) -> Producer<(T, U), E>
    where
        U: Clone + Send + 'static;
}

impl<T, E> CombineLatestExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn combine_latest<U>(&self, other: Producer<U, E>) -> Producer<(T, U), E>
    where
        U: Clone + Send + 'static,
    {
        let left_source = self.clone();
        Producer::new(move |observer, lifetime| {
            let state = Arc::new(Mutex::new(CombineState::<T, U> {
                left: None,
                right: None,
                left_done: false,
                right_done: false,
            }));

            let forward = observer.clone();
            let shared = Arc::clone(&state);
            lifetime.add(left_source.start(move |event| match event {
                Event::Value(v) => {
                    let pair = {
                        let mut state = shared.lock();
                        state.left = Some(v);
                        match (&state.left, &state.right) {
                            (Some(l), Some(r)) => Some((l.clone(), r.clone())),
                            _ => None,
                        }
                    };
                    if let Some(pair) = pair {
                        forward.send_value(pair);
                    }
                }
                Event::Failed(e) => forward.send_failed(e),
                Event::Completed => {
                    let both_done = {
                        let mut state = shared.lock();
                        state.left_done = true;
                        state.left_done && state.right_done
                    };
                    if both_done {
                        forward.send_completed();
                    }
                }
                Event::Interrupted => forward.send_interrupted(),
            }));

            let shared = Arc::clone(&state);
            lifetime.add(other.start(move |event| match event {
                Event::Value(v) => {
                    let pair = {
                        let mut state = shared.lock();
                        state.right = Some(v);
                        match (&state.left, &state.right) {
                            (Some(l), Some(r)) => Some((l.clone(), r.clone())),
                            _ => None,
                        }
                    };
                    if let Some(pair) = pair {
                        observer.send_value(pair);
                    }
                }
                Event::Failed(e) => observer.send_failed(e),
                Event::Completed => {
                    let both_done = {
                        let mut state = shared.lock();
                        state.right_done = true;
                        state.left_done && state.right_done
                    };
                    if both_done {
                        observer.send_completed();
                    }
                }
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }
}
