// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use rill_core::{Event, Producer};
use rill_test_utils::{EventCollector, TestError, TestScheduler};
use rill_time::DelayExt;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_secs(10);

#[test]
fn test_delay_shifts_values_and_completion() {
    // Arrange
    let scheduler = TestScheduler::new();
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .delay(INTERVAL, scheduler.clone())
        .start(collector.callback());

    // Act
    input.send_value(1);
    input.send_value(2);
    input.send_completed();
    assert!(collector.events().is_empty());

    scheduler.advance_by(Duration::from_secs(9));
    assert!(collector.events().is_empty());
    scheduler.advance_by(Duration::from_secs(1));

    // Assert - everything arrives in order at the shifted time
    assert_eq!(
        collector.events(),
        vec![Event::Value(1), Event::Value(2), Event::Completed]
    );
}

#[test]
fn test_delay_preserves_relative_spacing() {
    // Arrange
    let scheduler = TestScheduler::new();
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .delay(INTERVAL, scheduler.clone())
        .start(collector.callback());

    // Act - a value sent later is delivered later
    input.send_value(1);
    scheduler.advance_by(Duration::from_secs(4));
    input.send_value(2);

    scheduler.advance_by(Duration::from_secs(6));
    assert_eq!(collector.values(), vec![1]);
    scheduler.advance_by(Duration::from_secs(4));

    // Assert
    assert_eq!(collector.values(), vec![1, 2]);
}

#[test]
fn test_delay_fails_fast() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TestScheduler::new();
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .delay(INTERVAL, scheduler.clone())
        .start(collector.callback());

    // Act - the failure skips the delay entirely
    input.send_value(1);
    input.send_failed(TestError::Injected("boom"));

    // Assert - delivered synchronously; the delayed value is lost
    let error = collector.error().context("expected a failure")?;
    assert_eq!(error, TestError::Injected("boom"));
    assert!(collector.values().is_empty());
    scheduler.run();
    assert!(collector.values().is_empty());
    Ok(())
}
