// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bookkeeping for in-flight scheduled tasks.

use parking_lot::Mutex;
use rill_core::Disposable;
use std::collections::HashMap;
use std::sync::Arc;

/// Tracks the cancellation handles of scheduled tasks and releases each
/// one as soon as its task has run, so a long-lived stream holds handles
/// only for work that is still outstanding.
///
/// Usage is a three-step handshake per task: [`reserve`](TaskPool::reserve)
/// a slot, pass the returned id into the scheduled action so it can call
/// [`complete`](TaskPool::complete) when done, then
/// [`register`](TaskPool::register) the schedule handle. The handshake
/// tolerates schedulers that run the action inline before `register` is
/// reached.
pub(crate) struct TaskPool {
    state: Arc<Mutex<PoolState>>,
}

struct PoolState {
    disposed: bool,
    next_id: u64,
    // Reserved slots carry None until the schedule handle arrives.
    pending: HashMap<u64, Option<Disposable>>,
}

impl TaskPool {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(PoolState {
                disposed: false,
                next_id: 0,
                pending: HashMap::new(),
            })),
        }
    }

    /// Reserves a slot for a task about to be scheduled.
    pub(crate) fn reserve(&self) -> u64 {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.pending.insert(id, None);
        id
    }

    /// Records the schedule handle for a reserved slot.
    ///
    /// If the task already ran the handle is spent and simply dropped; if
    /// the pool is disposed the handle is cancelled on the spot.
    pub(crate) fn register(&self, id: u64, handle: Disposable) {
        let cancel = {
            let mut state = self.state.lock();
            if state.disposed {
                Some(handle)
            } else {
                if let Some(slot) = state.pending.get_mut(&id) {
                    *slot = Some(handle);
                }
                None
            }
        };
        if let Some(handle) = cancel {
            handle.dispose();
        }
    }

    /// Marks a task as finished, releasing its slot and handle.
    pub(crate) fn complete(&self, id: u64) {
        self.state.lock().pending.remove(&id);
    }

    /// Cancels every task still outstanding.
    pub(crate) fn dispose(&self) {
        let handles: Vec<Disposable> = {
            let mut state = self.state.lock();
            state.disposed = true;
            state.pending.drain().filter_map(|(_, slot)| slot).collect()
        };
        // Outside the lock: a cancel action may touch the pool again.
        for handle in handles {
            handle.dispose();
        }
    }

    /// Wraps this pool in a plain [`Disposable`] handle.
    pub(crate) fn as_disposable(&self) -> Disposable {
        let pool = self.clone();
        Disposable::new(move || pool.dispose())
    }

    #[cfg(test)]
    fn outstanding(&self) -> usize {
        self.state.lock().pending.len()
    }
}

impl Clone for TaskPool {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
