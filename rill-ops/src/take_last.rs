// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trailing-window operator.

use parking_lot::Mutex;
use rill_core::{Event, Producer};
use std::collections::VecDeque;
use std::sync::Arc;

/// Extension trait providing `take_last` for producers.
pub trait TakeLastExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Buffers the stream and replays only the last `count` values once
    /// the source completes.
    ///
    /// On failure the buffer is discarded; nothing buffered is ever
    /// delivered after an error.
    fn take_last(&self, count: usize) -> Producer<T, E>;
}

impl<T, E> TakeLastExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn take_last(&self, count: usize) -> Producer<T, E> {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let buffer: Arc<Mutex<VecDeque<T>>> =
                Arc::new(Mutex::new(VecDeque::with_capacity(count)));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    if count == 0 {
                        return;
                    }
                    let mut buffer = buffer.lock();
                    if buffer.len() == count {
                        buffer.pop_front();
                    }
                    buffer.push_back(v);
                }
                Event::Failed(e) => {
                    buffer.lock().clear();
                    observer.send_failed(e);
                }
                Event::Completed => {
                    let drained: Vec<T> = buffer.lock().drain(..).collect();
                    for v in drained {
                        observer.send_value(v);
                    }
                    observer.send_completed();
                }
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }
}
