// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shifting delivery into the future.

use crate::task_pool::TaskPool;
use rill_core::{Event, Producer, Scheduler};
use std::time::Duration;

/// Extension trait providing `delay` for producers.
pub trait DelayExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Delivers `Value` and `Completed` events `interval` later on
    /// `scheduler`.
    ///
    /// `Failed` and `Interrupted` skip the delay and are forwarded
    /// synchronously.
    fn delay<S>(&self, interval: Duration, scheduler: S) -> Producer<T, E>
    where
        S: Scheduler + Clone;
}

impl<T, E> DelayExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn delay<S>(&self, interval: Duration, scheduler: S) -> Producer<T, E>
    where
        S: Scheduler + Clone,
    {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let scheduler = scheduler.clone();
            let tasks = TaskPool::new();
            lifetime.add(tasks.as_disposable());

            lifetime.add(source.start(move |event| match event {
                Event::Failed(e) => observer.send_failed(e),
                Event::Interrupted => observer.send_interrupted(),
                other => {
                    let forward = observer.clone();
                    let id = tasks.reserve();
                    let pool = tasks.clone();
                    let handle = scheduler.schedule_after(
                        interval,
                        Box::new(move || {
                            forward.send(other);
                            pool.complete(id);
                        }),
                    );
                    tasks.register(id, handle);
                }
            }));
        })
    }
}
