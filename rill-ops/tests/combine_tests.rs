// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use rill_core::Producer;
use rill_ops::prelude::*;
use rill_test_utils::{EventCollector, TestError};

#[test]
fn test_combine_latest_waits_for_both_inputs() {
    // Arrange
    let (left, left_input) = Producer::<i32, TestError>::pipe();
    let (right, right_input) = Producer::<&str, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = left.combine_latest(right).start(collector.callback());

    // Act
    left_input.send_value(1);
    assert!(collector.values().is_empty()); // right has not emitted yet
    right_input.send_value("a");
    left_input.send_value(2);
    right_input.send_value("b");

    // Assert
    assert_eq!(collector.values(), vec![(1, "a"), (2, "a"), (2, "b")]);
}

#[test]
fn test_combine_latest_completes_when_both_complete() {
    // Arrange
    let (left, left_input) = Producer::<i32, TestError>::pipe();
    let (right, right_input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = left.combine_latest(right).start(collector.callback());

    // Act
    left_input.send_value(1);
    left_input.send_completed();
    assert!(!collector.is_completed()); // one side still live
    right_input.send_value(2);
    right_input.send_completed();

    // Assert
    assert_eq!(collector.values(), vec![(1, 2)]);
    assert!(collector.is_completed());
}

#[test]
fn test_combine_latest_fails_on_first_failure() -> anyhow::Result<()> {
    // Arrange
    let (left, left_input) = Producer::<i32, TestError>::pipe();
    let (right, right_input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = left.combine_latest(right).start(collector.callback());

    // Act
    left_input.send_value(1);
    right_input.send_failed(TestError::Injected("boom"));

    // Assert
    let error = collector.error().context("expected a failure")?;
    assert_eq!(error, TestError::Injected("boom"));
    Ok(())
}

#[test]
fn test_zip_pairs_strictly_by_index() {
    // Arrange
    let (left, left_input) = Producer::<i32, TestError>::pipe();
    let (right, right_input) = Producer::<&str, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = left.zip(right).start(collector.callback());

    // Act
    left_input.send_value(1);
    left_input.send_value(2);
    right_input.send_value("foo");
    right_input.send_value("bar");
    left_input.send_value(3);
    right_input.send_value("buzz");
    right_input.send_value("fuzz"); // unmatched, never delivered

    // Assert
    assert_eq!(
        collector.values(),
        vec![(1, "foo"), (2, "bar"), (3, "buzz")]
    );
}

#[test]
fn test_zip_completes_when_a_completed_side_drains() {
    // Arrange
    let (left, left_input) = Producer::<i32, TestError>::pipe();
    let (right, right_input) = Producer::<&str, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = left.zip(right).start(collector.callback());

    // Act - left completes with one value still buffered
    left_input.send_value(1);
    left_input.send_value(2);
    left_input.send_completed();
    assert!(!collector.is_completed()); // the buffer still holds 2
    right_input.send_value("a");
    right_input.send_value("b"); // drains the last buffered left value

    // Assert - completes right after the final pair
    assert_eq!(collector.values(), vec![(1, "a"), (2, "b")]);
    assert!(collector.is_completed());
}

#[test]
fn test_zip_completes_immediately_when_the_empty_side_completes() {
    // Arrange
    let (left, left_input) = Producer::<i32, TestError>::pipe();
    let (right, right_input) = Producer::<&str, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = left.zip(right).start(collector.callback());

    // Act - right completes without buffered values
    right_input.send_completed();

    // Assert
    assert!(collector.is_completed());
    left_input.send_value(1); // no effect
    assert!(collector.values().is_empty());
}

#[test]
fn test_zip_forwards_failure() -> anyhow::Result<()> {
    // Arrange
    let (left, left_input) = Producer::<i32, TestError>::pipe();
    let (right, _right_input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = left.zip(right).start(collector.callback());

    // Act
    left_input.send_failed(TestError::Injected("boom"));

    // Assert
    let error = collector.error().context("expected a failure")?;
    assert_eq!(error, TestError::Injected("boom"));
    Ok(())
}
