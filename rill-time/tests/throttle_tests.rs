// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use rill_core::Producer;
use rill_test_utils::{EventCollector, TestError, TestScheduler};
use rill_time::ThrottleExt;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_secs(1);

#[test]
fn test_throttle_emits_at_no_less_than_the_interval() {
    // Arrange
    let scheduler = TestScheduler::new();
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .throttle(INTERVAL, scheduler.clone())
        .start(collector.callback());

    // Act / Assert - leading value goes out as soon as the queue runs
    input.send_value(0);
    assert!(collector.values().is_empty());
    scheduler.advance();
    assert_eq!(collector.values(), vec![0]);

    // Two values inside the window coalesce into the latest one
    input.send_value(1);
    input.send_value(2);
    assert_eq!(collector.values(), vec![0]);
    scheduler.advance_by(Duration::from_millis(1500));
    assert_eq!(collector.values(), vec![0, 2]);

    // A quiet stretch, then a value outside the window: immediate
    scheduler.advance_by(Duration::from_secs(3));
    input.send_value(3);
    assert_eq!(collector.values(), vec![0, 2]);
    scheduler.advance();
    assert_eq!(collector.values(), vec![0, 2, 3]);
}

#[test]
fn test_throttle_rewound_clock_starts_a_fresh_window() {
    // Arrange - reproduce the full schedule trace including a rewind
    let scheduler = TestScheduler::new();
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .throttle(INTERVAL, scheduler.clone())
        .start(collector.callback());

    input.send_value(0);
    scheduler.advance();
    input.send_value(1);
    input.send_value(2);
    scheduler.advance_by(Duration::from_millis(1500));
    scheduler.advance_by(Duration::from_secs(3));
    input.send_value(3);
    scheduler.advance();
    assert_eq!(collector.values(), vec![0, 2, 3]);

    // Act - values 4/5 are pending past the window edge when the clock
    // rewinds; value 6 must then go out immediately
    input.send_value(4);
    input.send_value(5);
    scheduler.advance();
    assert_eq!(collector.values(), vec![0, 2, 3]);

    scheduler.rewind_by(Duration::from_secs(2));
    input.send_value(6);
    scheduler.advance();
    assert_eq!(collector.values(), vec![0, 2, 3, 6]);

    // And throttling resumes from the new emission time
    input.send_value(7);
    input.send_value(8);
    scheduler.advance();
    assert_eq!(collector.values(), vec![0, 2, 3, 6]);
    scheduler.run();
    assert_eq!(collector.values(), vec![0, 2, 3, 6, 8]);
}

#[test]
fn test_throttle_schedules_completion_immediately() {
    // Arrange
    let scheduler = TestScheduler::new();
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .throttle(INTERVAL, scheduler.clone())
        .start(collector.callback());

    input.send_value(0);
    scheduler.advance();
    assert_eq!(collector.values(), vec![0]);

    // Act - completion replaces the pending trailing emission
    input.send_value(1);
    input.send_completed();
    scheduler.advance();

    // Assert - value 1 is dropped, completion wins
    assert_eq!(collector.values(), vec![0]);
    assert!(collector.is_completed());
}

#[test]
fn test_throttle_forwards_failure_synchronously() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TestScheduler::new();
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .throttle(INTERVAL, scheduler.clone())
        .start(collector.callback());

    // Act - no advance needed for the failure to surface
    input.send_failed(TestError::Injected("boom"));

    // Assert
    let error = collector.error().context("expected a failure")?;
    assert_eq!(error, TestError::Injected("boom"));
    Ok(())
}
