// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A virtual-time scheduler for deterministic tests.

use parking_lot::Mutex;
use rill_core::{Disposable, Scheduler};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

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
    active: Arc<AtomicBool>,
    kind: TaskKind,
}

struct SchedulerState {
    now: Duration,
    next_seq: u64,
    tasks: Vec<Task>,
}

/// A [`Scheduler`] whose clock only moves when the test says so.
///
/// Work is held in a queue ordered by due time, with submission order as
/// the tie-break. [`advance_by`](TestScheduler::advance_by) moves the clock
/// and runs everything that came due along the way; [`run`](TestScheduler::run)
/// drains the queue entirely. Clones share the same clock and queue.
pub struct TestScheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl TestScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState {
                now: Duration::ZERO,
                next_seq: 0,
                tasks: Vec::new(),
            })),
        }
    }

    fn enqueue(&self, due: Duration, kind: TaskKind) -> Disposable {
        let active = Arc::new(AtomicBool::new(true));
        {
            let mut state = self.state.lock();
            let seq = state.next_seq;
            state.next_seq += 1;
            state.tasks.push(Task {
                due,
                seq,
                active: Arc::clone(&active),
                kind,
            });
        }
        Disposable::new(move || active.store(false, Ordering::SeqCst))
    }

    /// Removes the pending task with the smallest `(due, seq)` among those
    /// due at or before `limit`, skipping disposed ones.
    fn pop_due(&self, limit: Duration) -> Option<Task> {
        let mut state = self.state.lock();
        state.tasks.retain(|task| task.active.load(Ordering::SeqCst));
        let index = state
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= limit)
            .min_by_key(|(_, task)| (task.due, task.seq))
            .map(|(index, _)| index)?;
        let task = state.tasks.swap_remove(index);
        state.now = state.now.max(task.due);
        Some(task)
    }

    fn execute(&self, task: Task) {
        // Runs outside the state lock so the action may schedule more work.
        match task.kind {
            TaskKind::Once(action) => action(),
            TaskKind::Repeating {
                interval,
                mut action,
            } => {
                action();
                if task.active.load(Ordering::SeqCst) {
                    let mut state = self.state.lock();
                    let seq = state.next_seq;
                    state.next_seq += 1;
                    state.tasks.push(Task {
                        due: task.due + interval,
                        seq,
                        active: task.active,
                        kind: TaskKind::Repeating { interval, action },
                    });
                }
            }
        }
    }

    /// Advances the clock by a single nanosecond, enough to pick up work
    /// scheduled for "now".
    pub fn advance(&self) {
        self.advance_by(Duration::from_nanos(1));
    }

    /// Moves the clock forward by `amount`, running every task that comes
    /// due along the way in `(due, seq)` order.
    pub fn advance_by(&self, amount: Duration) {
        let target = self.state.lock().now + amount;
        while let Some(task) = self.pop_due(target) {
            self.execute(task);
        }
        self.state.lock().now = target;
    }

    /// Runs until no pending work remains, jumping the clock to each
    /// task's due time. Does not return while a repeating task is still
    /// live; dispose it first.
    pub fn run(&self) {
        while let Some(task) = self.pop_due(Duration::MAX) {
            self.execute(task);
        }
    }

    /// Moves the clock backwards, saturating at zero. Pending work keeps
    /// its original due times.
    pub fn rewind_by(&self, amount: Duration) {
        let mut state = self.state.lock();
        state.now = state.now.saturating_sub(amount);
    }
}

impl Default for TestScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TestScheduler {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl Scheduler for TestScheduler {
    fn now(&self) -> Duration {
        self.state.lock().now
    }

    fn schedule(&self, action: Box<dyn FnOnce() + Send>) -> Disposable {
        let due = self.state.lock().now;
        self.enqueue(due, TaskKind::Once(action))
    }

    fn schedule_after(&self, delay: Duration, action: Box<dyn FnOnce() + Send>) -> Disposable {
        let due = self.state.lock().now + delay;
        self.enqueue(due, TaskKind::Once(action))
    }

    fn schedule_repeating(
        &self,
        delay: Duration,
        interval: Duration,
        action: Box<dyn FnMut() + Send>,
    ) -> Disposable {
        let due = self.state.lock().now + delay;
        self.enqueue(due, TaskKind::Repeating { interval, action })
    }
}
