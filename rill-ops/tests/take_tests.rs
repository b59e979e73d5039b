// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use rill_core::{Event, Producer};
use rill_ops::prelude::*;
use rill_test_utils::{EventCollector, TestError};
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_take_limits_values_and_completes() {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source.take(2).start(collector.callback());

    // Act
    input.send_value(1);
    input.send_value(2);
    input.send_value(3); // never delivered

    // Assert
    assert_eq!(
        collector.events(),
        vec![Event::Value(1), Event::Value(2), Event::Completed]
    );
}

#[test]
fn test_take_zero_interrupts_without_starting_upstream() {
    // Arrange - the body counts its invocations
    let starts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&starts);
    let source = Producer::<i32, TestError>::new(move |observer, _lifetime| {
        counter.fetch_add(1, Ordering::SeqCst);
        observer.send_value(1);
    });
    let collector = EventCollector::new();

    // Act
    let _handle = source.take(0).start(collector.callback());

    // Assert - interrupted synchronously, upstream never ran
    assert_eq!(collector.events(), vec![Event::Interrupted]);
    assert_eq!(starts.load(Ordering::SeqCst), 0);
}

#[test]
fn test_take_fewer_values_than_requested() {
    // Arrange
    let source = Producer::<i32, TestError>::of_values(vec![1]);
    let collector = EventCollector::new();

    // Act
    let _handle = source.take(5).start(collector.callback());

    // Assert - completes with the source
    assert_eq!(collector.events(), vec![Event::Value(1), Event::Completed]);
}

#[test]
fn test_take_while_drops_the_failing_value_and_completes() {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source.take_while(|v| *v < 3).start(collector.callback());

    // Act
    input.send_value(1);
    input.send_value(2);
    input.send_value(3); // fails the predicate, is not forwarded
    input.send_value(1); // upstream already torn down

    // Assert
    assert_eq!(
        collector.events(),
        vec![Event::Value(1), Event::Value(2), Event::Completed]
    );
}

#[test]
fn test_take_until_completes_on_trigger() {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let (trigger, trigger_input) = Producer::<(), Infallible>::pipe();
    let collector = EventCollector::new();
    let _handle = source.take_until(trigger).start(collector.callback());

    // Act
    input.send_value(1);
    trigger_input.send_value(());
    input.send_value(2); // after the cut-off

    // Assert
    assert_eq!(collector.events(), vec![Event::Value(1), Event::Completed]);
}

#[test]
fn test_take_until_already_fired_trigger_never_starts_the_source() {
    // Arrange - the body counts its invocations
    let starts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&starts);
    let source = Producer::<i32, TestError>::new(move |observer, _lifetime| {
        counter.fetch_add(1, Ordering::SeqCst);
        observer.send_value(1);
        observer.send_completed();
    });
    let collector = EventCollector::new();

    // Act - a cold trigger that completes on its own fires at subscribe
    let _handle = source
        .take_until(Producer::<(), Infallible>::empty())
        .start(collector.callback());

    // Assert - bare completion, the source never ran
    assert_eq!(collector.events(), vec![Event::Completed]);
    assert_eq!(starts.load(Ordering::SeqCst), 0);
}

#[test]
fn test_take_until_forwards_source_failure() -> anyhow::Result<()> {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let (trigger, _trigger_input) = Producer::<(), Infallible>::pipe();
    let collector = EventCollector::new();
    let _handle = source.take_until(trigger).start(collector.callback());

    // Act
    input.send_failed(TestError::Injected("boom"));

    // Assert
    let error = collector.error().context("expected a failure")?;
    assert_eq!(error, TestError::Injected("boom"));
    Ok(())
}

#[test]
fn test_take_until_replacement_hands_over_the_stream() {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let (replacement, replacement_input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .take_until_replacement(replacement)
        .start(collector.callback());

    // Act
    input.send_value(1);
    input.send_value(2);
    replacement_input.send_value(10);
    input.send_value(3); // original is switched out
    replacement_input.send_value(11);
    replacement_input.send_completed();

    // Assert
    assert_eq!(
        collector.events(),
        vec![
            Event::Value(1),
            Event::Value(2),
            Event::Value(10),
            Event::Value(11),
            Event::Completed
        ]
    );
}

#[test]
fn test_take_until_replacement_swallows_original_completion() {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let (replacement, replacement_input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .take_until_replacement(replacement)
        .start(collector.callback());

    // Act - the original completing must not complete the result
    input.send_value(1);
    input.send_completed();
    replacement_input.send_value(2);

    // Assert
    assert_eq!(collector.values(), vec![1, 2]);
    assert!(!collector.is_completed());
}

#[test]
fn test_take_until_replacement_forwards_original_failure() -> anyhow::Result<()> {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let (replacement, _replacement_input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source
        .take_until_replacement(replacement)
        .start(collector.callback());

    // Act
    input.send_failed(TestError::Injected("boom"));

    // Assert
    let error = collector.error().context("expected a failure")?;
    assert_eq!(error, TestError::Injected("boom"));
    Ok(())
}

#[test]
fn test_take_last_replays_trailing_window_on_completion() {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source.take_last(2).start(collector.callback());

    // Act
    input.send_value(1);
    input.send_value(2);
    input.send_value(3);
    assert!(collector.values().is_empty()); // nothing until completion
    input.send_completed();

    // Assert
    assert_eq!(
        collector.events(),
        vec![Event::Value(2), Event::Value(3), Event::Completed]
    );
}

#[test]
fn test_take_last_discards_buffer_on_failure() -> anyhow::Result<()> {
    // Arrange
    let (source, input) = Producer::<i32, TestError>::pipe();
    let collector = EventCollector::new();
    let _handle = source.take_last(2).start(collector.callback());

    // Act
    input.send_value(1);
    input.send_value(2);
    input.send_failed(TestError::Injected("boom"));

    // Assert - buffered values are never delivered after an error
    assert!(collector.values().is_empty());
    let error = collector.error().context("expected a failure")?;
    assert_eq!(error, TestError::Injected("boom"));
    Ok(())
}
