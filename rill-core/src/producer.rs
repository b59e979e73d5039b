// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold, restartable stream blueprints.
//!
//! A [`Producer`] describes how to build a stream; it owns no running
//! state. Every `start*` call creates a fresh [`Signal`] plus a lifetime
//! [`CompositeDisposable`], runs the producer body against them, and
//! returns a handle that interrupts the pipeline when disposed. Starting
//! the same producer twice yields two fully independent pipelines, and any
//! side effects in the body re-run per start.
//!
//! ## Example
//!
//! ```
//! use rill_core::{Event, Producer};
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! let producer = Producer::<i32, ()>::of_values(vec![1, 2, 3]);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let _handle = producer.start_with_values(move |v| sink.lock().push(v));
//!
//! assert_eq!(*seen.lock(), vec![1, 2, 3]);
//! ```

use crate::disposable::{CompositeDisposable, Disposable};
use crate::event::Event;
use crate::signal::{Observer, Signal};
use parking_lot::Mutex;
use std::sync::Arc;

type StartFn<T, E> = dyn Fn(Observer<T, E>, &CompositeDisposable) + Send + Sync;

/// A cold recipe for a push-based event stream.
///
/// See the [module documentation](self) for semantics.
pub struct Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    body: Arc<StartFn<T, E>>,
}

impl<T, E> Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates a producer from its body.
    ///
    /// The body receives the write side of a fresh signal plus the
    /// subscription's lifetime; cleanup registered on the lifetime runs
    /// when the subscription is disposed or the pipeline is torn down.
    #[must_use]
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(Observer<T, E>, &CompositeDisposable) + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(body),
        }
    }

    /// A producer that synchronously emits `value` and completes.
    #[must_use]
    pub fn of_value(value: T) -> Self {
        Self::of_values(std::iter::once(value))
    }

    /// A producer that synchronously emits every item of `values` in
    /// order, then completes.
    #[must_use]
    pub fn of_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + 'static,
    {
        // The lock makes the body shareable even when the items are
        // Send-only.
        let values = Mutex::new(values);
        Self::new(move |observer, _lifetime| {
            // Clone out before iterating: a subscriber may re-start this
            // same producer from inside its callback.
            let items = values.lock().clone();
            for value in items {
                observer.send_value(value);
            }
            observer.send_completed();
        })
    }

    /// A producer that completes immediately without values.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(|observer, _lifetime| observer.send_completed())
    }

    /// A producer that fails immediately with `error`.
    #[must_use]
    pub fn failed(error: E) -> Self {
        let error = Mutex::new(error);
        Self::new(move |observer, _lifetime| observer.send_failed(error.lock().clone()))
    }

    /// A producer that never emits anything.
    #[must_use]
    pub fn never() -> Self {
        Self::new(|_observer, _lifetime| {})
    }

    /// A producer view over a shared hot signal, plus the signal's write
    /// side.
    ///
    /// Every start observes the same underlying signal, so values pushed
    /// through the returned [`Observer`] reach all currently started
    /// pipelines. Late starts do not replay past events.
    #[must_use]
    pub fn pipe() -> (Self, Observer<T, E>) {
        let (signal, input) = Signal::pipe();
        let producer = Self::new(move |observer, lifetime| {
            let subscription = signal.observe(move |event| observer.send(event));
            lifetime.add(subscription);
        });
        (producer, input)
    }

    /// Starts a fresh pipeline, delivering every event to `callback`.
    ///
    /// Disposing the returned handle delivers `Interrupted` to the
    /// subscriber and then runs the lifetime's cleanup actions; both are
    /// idempotent.
    pub fn start<F>(&self, callback: F) -> Disposable
    where
        F: Fn(Event<T, E>) + Send + Sync + 'static,
    {
        let (signal, input) = Signal::pipe();
        let lifetime = CompositeDisposable::new();

        // Register the subscriber before running the body: synchronous
        // producers emit during start. Any terminal event also tears the
        // lifetime down so upstream subscriptions never outlive the
        // pipeline they feed.
        let cleanup = lifetime.clone();
        lifetime.add(signal.observe(move |event| {
            let terminal = event.is_terminal();
            callback(event);
            if terminal {
                cleanup.dispose();
            }
        }));
        (self.body)(input.clone(), &lifetime);

        Disposable::new(move || {
            input.send_interrupted();
            lifetime.dispose();
        })
    }

    /// Starts the producer, invoking `callback` for `Value` events only.
    pub fn start_with_values<F>(&self, callback: F) -> Disposable
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.start(move |event| {
            if let Event::Value(value) = event {
                callback(value);
            }
        })
    }

    /// Starts the producer, invoking `callback` once on `Completed`.
    pub fn start_with_completed<F>(&self, callback: F) -> Disposable
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.start(move |event| {
            if let Event::Completed = event {
                callback();
            }
        })
    }

    /// Starts the producer, invoking `callback` once on `Failed`.
    pub fn start_with_failed<F>(&self, callback: F) -> Disposable
    where
        F: Fn(E) + Send + Sync + 'static,
    {
        self.start(move |event| {
            if let Event::Failed(error) = event {
                callback(error);
            }
        })
    }
}

impl<T, E> Clone for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            body: Arc::clone(&self.body),
        }
    }
}
