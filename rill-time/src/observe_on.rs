// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Re-dispatching delivery onto a scheduler.

use crate::task_pool::TaskPool;
use rill_core::{Producer, Scheduler};

/// Extension trait providing `observe_on` for producers.
pub trait ObserveOnExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Re-dispatches every event through `scheduler`, preserving order.
    ///
    /// Delivery stops being synchronous with the upstream send; events
    /// arrive whenever the scheduler runs its queue.
    fn observe_on<S>(&self, scheduler: S) -> Producer<T, E>
    where
        S: Scheduler + Clone;
}

impl<T, E> ObserveOnExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn observe_on<S>(&self, scheduler: S) -> Producer<T, E>
    where
        S: Scheduler + Clone,
    {
        let source = self.clone();
        Producer::new(move |observer, lifetime| {
            let scheduler = scheduler.clone();
            let tasks = TaskPool::new();
            lifetime.add(tasks.as_disposable());

            lifetime.add(source.start(move |event| {
                let forward = observer.clone();
                let id = tasks.reserve();
                let pool = tasks.clone();
                let handle = scheduler.schedule(Box::new(move || {
                    forward.send(event);
                    pool.complete(id);
                }));
                tasks.register(id, handle);
            }));
        })
    }
}
