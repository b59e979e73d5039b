// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{CompositeDisposable, Disposable, SerialDisposable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counting() -> (Disposable, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let handle = Disposable::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (handle, calls)
}

#[test]
fn test_dispose_runs_action_exactly_once() {
    // Arrange
    let (handle, calls) = counting();

    // Act
    handle.dispose();
    handle.dispose();

    // Assert
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(handle.is_disposed());
}

#[test]
fn test_clones_share_disposal_state() {
    // Arrange
    let (handle, calls) = counting();
    let clone = handle.clone();

    // Act
    clone.dispose();
    handle.dispose();

    // Assert
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(handle.is_disposed());
    assert!(clone.is_disposed());
}

#[test]
fn test_empty_disposable_tracks_state_only() {
    // Arrange
    let handle = Disposable::empty();
    assert!(!handle.is_disposed());

    // Act
    handle.dispose();

    // Assert
    assert!(handle.is_disposed());
}

#[test]
fn test_composite_disposes_all_children() {
    // Arrange
    let composite = CompositeDisposable::new();
    let (a, a_calls) = counting();
    let (b, b_calls) = counting();
    composite.add(a);
    composite.add(b);

    // Act
    composite.dispose();

    // Assert
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_composite_add_after_dispose_disposes_immediately() {
    // Arrange
    let composite = CompositeDisposable::new();
    composite.dispose();

    // Act
    let (late, late_calls) = counting();
    composite.add(late);

    // Assert
    assert_eq!(late_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_composite_dispose_is_idempotent() {
    // Arrange
    let composite = CompositeDisposable::new();
    let (a, a_calls) = counting();
    composite.add(a);

    // Act
    composite.dispose();
    composite.dispose();

    // Assert
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_serial_set_disposes_previous() {
    // Arrange
    let serial = SerialDisposable::new();
    let (first, first_calls) = counting();
    let (second, second_calls) = counting();

    // Act
    serial.set(first);
    serial.set(second);

    // Assert - the replaced handle was disposed, the new one was not
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);

    serial.dispose();
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_serial_set_after_dispose_disposes_incoming() {
    // Arrange
    let serial = SerialDisposable::new();
    serial.dispose();

    // Act
    let (late, late_calls) = counting();
    serial.set(late);

    // Assert
    assert_eq!(late_calls.load(Ordering::SeqCst), 1);
}
