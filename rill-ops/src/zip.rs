// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Strict pairwise combination of two producers.

use parking_lot::Mutex;
use rill_core::{Event, Observer, Producer};
use std::collections::VecDeque;
use std::sync::Arc;

struct ZipState<T, U> {
    left: VecDeque<T>,
    right: VecDeque<U>,
    left_done: bool,
    right_done: bool,
}

impl<T, U> ZipState<T, U> {
    fn pop_pair(&mut self) -> Option<(T, U)> {
        if self.left.is_empty() || self.right.is_empty() {
            return None;
        }
        let left = self.left.pop_front()?;
        let right = self.right.pop_front()?;
        Some((left, right))
    }

    // No further pair can ever form once a completed side has drained.
    fn exhausted(&self) -> bool {
        (self.left_done && self.left.is_empty()) || (self.right_done && self.right.is_empty())
    }
}

fn drain_and_report<T, U, E>(
    state: &Arc<Mutex<ZipState<T, U>>>,
    observer: &Observer<(T, U), E>,
) where
    T: Clone + Send + 'static,
    U: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    loop {
        let (pair, exhausted) = {
            let mut state = state.lock();
            let pair = state.pop_pair();
            let exhausted = state.exhausted();
            (pair, exhausted)
        };
        match pair {
            Some(pair) => {
                observer.send_value(pair);
                if exhausted {
                    observer.send_completed();
                    return;
                }
            }
            None => {
                if exhausted {
                    observer.send_completed();
                }
                return;
            }
        }
    }
}

/// Extension trait providing `zip` for producers.
pub trait ZipExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Pairs the n-th value of `self` with the n-th value of `other`.
    ///
    /// Completes as soon as a completed side's buffer is exhausted;
    /// unmatched buffered values on the other side are never delivered.
    fn zip<U>(&self, other: Producer<U, E>) -> Producer<(T, U), E>
    where
        U: Clone + Send + 'static;
}

impl<T, E> ZipExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn zip<U>(&self, other: Producer<U, E>) -> Producer<(T, U), E>
    where
        U: Clone + Send + 'static,
    {
        let left_source = self.clone();
        Producer::new(move |observer, lifetime| {
            let state = Arc::new(Mutex::new(ZipState {
                left: VecDeque::new(),
                right: VecDeque::new(),
                left_done: false,
                right_done: false,
            }));

            let forward = observer.clone();
            let shared = Arc::clone(&state);
            lifetime.add(left_source.start(move |event| match event {
                Event::Value(v) => {
                    shared.lock().left.push_back(v);
                    drain_and_report(&shared, &forward);
                }
                Event::Failed(e) => forward.send_failed(e),
                Event::Completed => {
                    shared.lock().left_done = true;
                    drain_and_report(&shared, &forward);
                }
                Event::Interrupted => forward.send_interrupted(),
            }));

            let shared = Arc::clone(&state);
            lifetime.add(other.start(move |event| match event {
                Event::Value(v) => {
                    shared.lock().right.push_back(v);
                    drain_and_report(&shared, &observer);
                }
                Event::Failed(e) => observer.send_failed(e),
                Event::Completed => {
                    shared.lock().right_done = true;
                    drain_and_report(&shared, &observer);
                }
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }
}
