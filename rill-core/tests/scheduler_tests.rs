// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{ImmediateScheduler, Scheduler};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_immediate_runs_inline() {
    // Arrange
    let scheduler = ImmediateScheduler::new();
    let ran = Arc::new(AtomicUsize::new(0));

    // Act
    let counter = Arc::clone(&ran);
    let handle = scheduler.schedule(Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    // Assert - already ran before the call returned
    assert_eq!(ran.load(Ordering::SeqCst), 1);
    handle.dispose();
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

#[test]
fn test_immediate_collapses_delays() {
    // Arrange
    let scheduler = ImmediateScheduler::new();
    let ran = Arc::new(AtomicUsize::new(0));

    // Act
    let counter = Arc::clone(&ran);
    let _handle = scheduler.schedule_after(
        Duration::from_secs(3600),
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    // Assert
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

#[test]
fn test_immediate_repeating_runs_once() {
    // Arrange
    let scheduler = ImmediateScheduler::new();
    let ran = Arc::new(AtomicUsize::new(0));

    // Act
    let counter = Arc::clone(&ran);
    let _handle = scheduler.schedule_repeating(
        Duration::ZERO,
        Duration::from_millis(1),
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    // Assert
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

#[test]
fn test_clock_is_monotonic() {
    let scheduler = ImmediateScheduler::new();
    let first = scheduler.now();
    let second = scheduler.now();
    assert!(second >= first);
}
