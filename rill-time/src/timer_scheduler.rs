// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A wall-clock scheduler backed by a single timer thread.

use parking_lot::{Condvar, Mutex};
use rill_core::{Disposable, Scheduler};
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

enum TaskKind {
    Once(Box<dyn FnOnce() + Send>),
    Repeating {
        interval: Duration,
        action: Box<dyn FnMut() + Send>,
    },
}

struct Task {
    due: Duration,
    seq: u64,
    cancelled: Arc<AtomicBool>,
    kind: TaskKind,
}

// Min-heap on (due, seq): earliest deadline first, FIFO among equals.
impl Ord for Task {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        (other.due, other.seq).cmp(&(self.due, self.seq))
    }
}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        (self.due, self.seq) == (other.due, other.seq)
    }
}

impl Eq for Task {}

struct TimerState {
    queue: BinaryHeap<Task>,
    next_seq: u64,
    shutdown: bool,
}

struct Shared {
    epoch: Instant,
    state: Mutex<TimerState>,
    wakeup: Condvar,
}

/// A [`Scheduler`] that runs actions on a dedicated background thread at
/// their wall-clock deadlines.
///
/// Clones share the same thread and queue. The thread shuts down once the
/// last handle is dropped; actions still queued at that point never run.
pub struct TimerScheduler {
    shared: Arc<Shared>,
    // Last-clone-drop signals the worker to exit.
    _guard: Arc<ShutdownGuard>,
}

struct ShutdownGuard {
    shared: Arc<Shared>,
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        self.shared.state.lock().shutdown = true;
        self.shared.wakeup.notify_all();
    }
}

impl TimerScheduler {
    /// Spawns the timer thread and returns a handle to it.
    #[must_use]
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            epoch: Instant::now(),
            state: Mutex::new(TimerState {
                queue: BinaryHeap::new(),
                next_seq: 0,
                shutdown: false,
            }),
            wakeup: Condvar::new(),
        });

        let worker = Arc::clone(&shared);
        thread::Builder::new()
            .name("rill-timer".into())
            .spawn(move || run_worker(&worker))
            .ok();

        Self {
            _guard: Arc::new(ShutdownGuard {
                shared: Arc::clone(&shared),
            }),
            shared,
        }
    }

    fn enqueue(&self, due: Duration, kind: TaskKind) -> Disposable {
        let cancelled = Arc::new(AtomicBool::new(false));
        {
            let mut state = self.shared.state.lock();
            let seq = state.next_seq;
            state.next_seq += 1;
            state.queue.push(Task {
                due,
                seq,
                cancelled: Arc::clone(&cancelled),
                kind,
            });
        }
        self.shared.wakeup.notify_all();
        Disposable::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}

fn run_worker(shared: &Shared) {
    let mut state = shared.state.lock();
    loop {
        if state.shutdown {
            return;
        }
        let Some(due) = state.queue.peek().map(|task| task.due) else {
            shared.wakeup.wait(&mut state);
            continue;
        };

        let now = shared.epoch.elapsed();
        if due > now {
            shared.wakeup.wait_for(&mut state, due - now);
            continue;
        }

        let Some(task) = state.queue.pop() else {
            continue;
        };
        if task.cancelled.load(Ordering::SeqCst) {
            continue;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(due_ms = task.due.as_millis() as u64, seq = task.seq, "running timer task");

        // Actions run unlocked so they may schedule further work.
        drop(state);
        match task.kind {
            TaskKind::Once(action) => {
                action();
                state = shared.state.lock();
            }
            TaskKind::Repeating {
                interval,
                mut action,
            } => {
                action();
                state = shared.state.lock();
                if !task.cancelled.load(Ordering::SeqCst) {
                    let seq = state.next_seq;
                    state.next_seq += 1;
                    state.queue.push(Task {
                        due: task.due + interval,
                        seq,
                        cancelled: task.cancelled,
                        kind: TaskKind::Repeating { interval, action },
                    });
                }
            }
        }
    }
}

impl Default for TimerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TimerScheduler {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            _guard: Arc::clone(&self._guard),
        }
    }
}

impl Scheduler for TimerScheduler {
    fn now(&self) -> Duration {
        self.shared.epoch.elapsed()
    }

    fn schedule(&self, action: Box<dyn FnOnce() + Send>) -> Disposable {
        self.enqueue(self.now(), TaskKind::Once(action))
    }

    fn schedule_after(&self, delay: Duration, action: Box<dyn FnOnce() + Send>) -> Disposable {
        self.enqueue(self.now() + delay, TaskKind::Once(action))
    }

    fn schedule_repeating(
        &self,
        delay: Duration,
        interval: Duration,
        action: Box<dyn FnMut() + Send>,
    ) -> Disposable {
        self.enqueue(self.now() + delay, TaskKind::Repeating { interval, action })
    }
}
