// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Always-readable latest-value containers.
//!
//! A [`MutableProperty`] pairs a current value with a change signal; a
//! read-only [`Property`] tracks the latest value delivered by a producer.
//! Both never fail, which the error parameter ([`Infallible`]) encodes
//! statically.

use crate::disposable::Disposable;
use crate::producer::Producer;
use crate::signal::{Observer, Signal};
use parking_lot::Mutex;
use std::convert::Infallible;
use std::sync::Arc;

/// A writable latest-value container with a change signal.
///
/// `get()` is always answerable; `set()` stores the new value and then
/// broadcasts it. Clones share the same state.
pub struct MutableProperty<T>
where
    T: Clone + Send + 'static,
{
    value: Arc<Mutex<T>>,
    changes: Signal<T, Infallible>,
    input: Observer<T, Infallible>,
}

impl<T> MutableProperty<T>
where
    T: Clone + Send + 'static,
{
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (changes, input) = Signal::pipe();
        Self {
            value: Arc::new(Mutex::new(initial)),
            changes,
            input,
        }
    }

    /// The current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.lock().clone()
    }

    /// Stores `value` and broadcasts it to change observers.
    ///
    /// The value lock is released before broadcasting, so observers may
    /// read the property from inside their callback.
    pub fn set(&self, value: T) {
        *self.value.lock() = value.clone();
        self.input.send_value(value);
    }

    /// Applies `f` to the stored value, then broadcasts the result.
    pub fn modify<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let updated = {
            let mut guard = self.value.lock();
            f(&mut guard);
            guard.clone()
        };
        self.input.send_value(updated);
    }

    /// The change signal: subsequent values only, no replay.
    #[must_use]
    pub fn signal(&self) -> Signal<T, Infallible> {
        self.changes.clone()
    }

    /// A producer that replays the current value on start and then
    /// forwards every change.
    #[must_use]
    pub fn producer(&self) -> Producer<T, Infallible> {
        let this = self.clone();
        Producer::new(move |observer, lifetime| {
            observer.send_value(this.get());
            let forward = observer.clone();
            lifetime.add(this.changes.observe(move |event| forward.send(event)));
        })
    }
}

impl<T> Clone for MutableProperty<T>
where
    T: Clone + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            changes: self.changes.clone(),
            input: self.input.clone(),
        }
    }
}

/// A read-only latest-value view over a producer.
///
/// Holds `initial` until the source delivers its first value, then always
/// the most recently delivered one. Dropping the property tears the
/// source subscription down.
pub struct Property<T>
where
    T: Clone + Send + 'static,
{
    inner: MutableProperty<T>,
    subscription: Disposable,
}

impl<T> Property<T>
where
    T: Clone + Send + 'static,
{
    #[must_use]
    pub fn new(initial: T, source: Producer<T, Infallible>) -> Self {
        let inner = MutableProperty::new(initial);
        let writer = inner.clone();
        let subscription = source.start_with_values(move |value| writer.set(value));
        Self {
            inner,
            subscription,
        }
    }

    /// The most recently delivered value, or the initial one.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// The change signal: subsequent values only, no replay.
    #[must_use]
    pub fn signal(&self) -> Signal<T, Infallible> {
        self.inner.signal()
    }

    /// A producer that replays the current value and then forwards every
    /// change.
    #[must_use]
    pub fn producer(&self) -> Producer<T, Infallible> {
        self.inner.producer()
    }
}

impl<T> Drop for Property<T>
where
    T: Clone + Send + 'static,
{
    fn drop(&mut self) {
        self.subscription.dispose();
    }
}
