// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Batching operators that group values into `Vec` payloads.

use parking_lot::Mutex;
use rill_core::{Event, Producer};
use std::sync::Arc;

/// Extension trait providing the `collect` family for producers.
pub trait CollectExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Gathers every value into a single batch, delivered right before
    /// `Completed`. An input without values yields one empty batch.
    ///
    /// On failure the batch is discarded.
    fn collect(&self) -> Producer<Vec<T>, E>;

    /// Emits a batch each time `count` values have accumulated. A partial
    /// final batch is flushed on completion only when non-empty.
    fn collect_count(&self, count: usize) -> Producer<Vec<T>, E>;

    /// Grows the batch while `predicate(batch, next)` holds; a `false`
    /// seals the current batch and `next` opens the new one.
    ///
    /// An empty batch is never sealed.
    fn collect_while<P>(&self, predicate: P) -> Producer<Vec<T>, E>
    where
        P: Fn(&[T], &T) -> bool + Send + Sync + 'static;

    /// Appends each value, then seals the batch as soon as `predicate`
    /// holds for the batch as a whole.
    fn collect_until<P>(&self, predicate: P) -> Producer<Vec<T>, E>
    where
        P: Fn(&[T]) -> bool + Send + Sync + 'static;
}

impl<T, E> CollectExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn collect(&self) -> Producer<Vec<T>, E> {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let buffer: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => buffer.lock().push(v),
                Event::Failed(e) => {
                    buffer.lock().clear();
                    observer.send_failed(e);
                }
                Event::Completed => {
                    let batch = std::mem::take(&mut *buffer.lock());
                    observer.send_value(batch);
                    observer.send_completed();
                }
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }

    fn collect_count(&self, count: usize) -> Producer<Vec<T>, E> {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let buffer: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    let full = {
                        let mut buffer = buffer.lock();
                        buffer.push(v);
                        (buffer.len() == count).then(|| std::mem::take(&mut *buffer))
                    };
                    if let Some(batch) = full {
                        observer.send_value(batch);
                    }
                }
                Event::Failed(e) => {
                    buffer.lock().clear();
                    observer.send_failed(e);
                }
                Event::Completed => {
                    let leftover = std::mem::take(&mut *buffer.lock());
                    if !leftover.is_empty() {
                        observer.send_value(leftover);
                    }
                    observer.send_completed();
                }
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }

    fn collect_while<P>(&self, predicate: P) -> Producer<Vec<T>, E>
    where
        P: Fn(&[T], &T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Producer::new(move |observer, lifetime| {
            let predicate = Arc::clone(&predicate);
            let buffer: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    let sealed = {
                        let mut buffer = buffer.lock();
                        if buffer.is_empty() || (*predicate)(&buffer, &v) {
                            buffer.push(v);
                            None
                        } else {
                            Some(std::mem::replace(&mut *buffer, vec![v]))
                        }
                    };
                    if let Some(batch) = sealed {
                        observer.send_value(batch);
                    }
                }
                Event::Failed(e) => {
                    buffer.lock().clear();
                    observer.send_failed(e);
                }
                Event::Completed => {
                    let leftover = std::mem::take(&mut *buffer.lock());
                    if !leftover.is_empty() {
                        observer.send_value(leftover);
                    }
                    observer.send_completed();
                }
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }

    fn collect_until<P>(&self, predicate: P) -> Producer<Vec<T>, E>
    where
        P: Fn(&[T]) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);
        Producer::new(move |observer, lifetime| {
            let predicate = Arc::clone(&predicate);
            let buffer: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));
            lifetime.add(source.start(move |event| match event {
                Event::Value(v) => {
                    let sealed = {
                        let mut buffer = buffer.lock();
                        buffer.push(v);
                        (*predicate)(&buffer).then(|| std::mem::take(&mut *buffer))
                    };
                    if let Some(batch) = sealed {
                        observer.send_value(batch);
                    }
                }
                Event::Failed(e) => {
                    buffer.lock().clear();
                    observer.send_failed(e);
                }
                Event::Completed => {
                    let leftover = std::mem::take(&mut *buffer.lock());
                    if !leftover.is_empty() {
                        observer.send_value(leftover);
                    }
                    observer.send_completed();
                }
                Event::Interrupted => observer.send_interrupted(),
            }));
        })
    }
}
