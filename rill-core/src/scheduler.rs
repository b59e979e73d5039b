// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Execution contexts for deferred and repeated work.
//!
//! Time-based operators never reach for an ambient clock; they take a
//! [`Scheduler`] handle at the call site. The trait keeps time as a
//! [`Duration`] offset from the scheduler's own epoch, which lets a
//! virtual-time implementation rewind below its starting point without
//! `Instant` underflow.

use crate::disposable::Disposable;
use std::time::{Duration, Instant};

/// An execution context that runs units of work now, after a delay, or
/// repeatedly.
///
/// Guarantees: actions run in non-decreasing scheduled-time order, with
/// FIFO submission order as the tie-break among actions due at the same
/// instant. Disposing the returned handle prevents a not-yet-run action
/// from running.
pub trait Scheduler: Send + Sync + 'static {
    /// The scheduler's current time, measured from its epoch.
    fn now(&self) -> Duration;

    /// Schedules `action` to run as soon as possible.
    fn schedule(&self, action: Box<dyn FnOnce() + Send>) -> Disposable;

    /// Schedules `action` to run once `delay` has elapsed.
    fn schedule_after(&self, delay: Duration, action: Box<dyn FnOnce() + Send>) -> Disposable;

    /// Schedules `action` to first run after `delay`, then every
    /// `interval` until disposed.
    fn schedule_repeating(
        &self,
        delay: Duration,
        interval: Duration,
        action: Box<dyn FnMut() + Send>,
    ) -> Disposable;
}

/// A scheduler that runs everything inline on the calling thread.
///
/// Delays collapse to zero and repeating work runs its action a single
/// time; use it where delivery timing is irrelevant and a scheduler handle
/// is required.
#[derive(Clone, Copy, Debug)]
pub struct ImmediateScheduler {
    epoch: Instant,
}

impl ImmediateScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for ImmediateScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ImmediateScheduler {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn schedule(&self, action: Box<dyn FnOnce() + Send>) -> Disposable {
        action();
        Disposable::empty()
    }

    fn schedule_after(&self, _delay: Duration, action: Box<dyn FnOnce() + Send>) -> Disposable {
        action();
        Disposable::empty()
    }

    fn schedule_repeating(
        &self,
        _delay: Duration,
        _interval: Duration,
        mut action: Box<dyn FnMut() + Send>,
    ) -> Disposable {
        action();
        Disposable::empty()
    }
}
