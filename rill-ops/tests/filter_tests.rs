// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use rill_core::Producer;
use rill_ops::prelude::*;
use rill_test_utils::{EventCollector, TestError};

#[test]
fn test_filter_keeps_matching_values() {
    // Arrange
    let source = Producer::<i32, TestError>::of_values(vec![1, 2, 3, 4]);
    let collector = EventCollector::new();

    // Act
    let _handle = source.filter(|v| v % 2 == 0).start(collector.callback());

    // Assert
    assert_eq!(collector.values(), vec![2, 4]);
    assert!(collector.is_completed());
}

#[test]
fn test_filter_forwards_failure() -> anyhow::Result<()> {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source.filter(|v| *v > 10).start(collector.callback());

    // Act
    input.send_value(1); // filtered out
    input.send_failed(TestError::Injected("boom"));

    // Assert
    assert!(collector.values().is_empty());
    let error = collector.error().context("expected a failure")?;
    assert_eq!(error, TestError::Injected("boom"));
    Ok(())
}

#[test]
fn test_filter_map_maps_and_drops_in_one_pass() {
    // Arrange
    let source = Producer::<&str, TestError>::of_values(vec!["1", "two", "3"]);
    let collector = EventCollector::new();

    // Act
    let _handle = source
        .filter_map(|s| s.parse::<i32>().ok())
        .start(collector.callback());

    // Assert
    assert_eq!(collector.values(), vec![1, 3]);
    assert!(collector.is_completed());
}

#[test]
fn test_skip_none_unwraps_values() {
    // Arrange
    let source = Producer::<Option<i32>, TestError>::of_values(vec![Some(1), None, Some(3)]);
    let collector = EventCollector::new();

    // Act
    let _handle = source.skip_none().start(collector.callback());

    // Assert
    assert_eq!(collector.values(), vec![1, 3]);
    assert!(collector.is_completed());
}

#[test]
fn test_skip_repeats_drops_consecutive_duplicates() {
    // Arrange
    let source = Producer::<i32, TestError>::of_values(vec![1, 1, 2, 2, 2, 1, 3]);
    let collector = EventCollector::new();

    // Act
    let _handle = source.skip_repeats().start(collector.callback());

    // Assert - non-consecutive repeats still pass
    assert_eq!(collector.values(), vec![1, 2, 1, 3]);
}

#[test]
fn test_skip_repeats_by_custom_comparison() {
    // Arrange - compare case-insensitively
    let source =
        Producer::<&str, TestError>::of_values(vec!["a", "A", "b", "B", "a"]);
    let collector = EventCollector::new();

    // Act
    let _handle = source
        .skip_repeats_by(|prev, next| prev.eq_ignore_ascii_case(next))
        .start(collector.callback());

    // Assert
    assert_eq!(collector.values(), vec!["a", "b", "a"]);
}
