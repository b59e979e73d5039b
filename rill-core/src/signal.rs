// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multicast push source and its write side.
//!
//! A [`Signal`] broadcasts each [`Event<T, E>`] to all currently registered
//! observers, synchronously and in registration order. The matching
//! [`Observer`] is the only write side; it is created together with the
//! signal by [`Signal::pipe`].
//!
//! ## Characteristics
//!
//! - **Hot**: late observers do not receive past events.
//! - **Synchronous**: `send*` runs every observer callback on the calling
//!   thread before returning.
//! - **Terminal-once**: the first terminal event deactivates the signal;
//!   later `send*` calls are no-ops.
//! - **Late attach**: observing an already-terminated signal delivers
//!   `Interrupted` synchronously and registers nothing.
//!
//! ## Example
//!
//! ```
//! use rill_core::{Event, Signal};
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! let (signal, input) = Signal::<i32, ()>::pipe();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let _handle = signal.observe(move |event| {
//!     if let Event::Value(v) = event {
//!         sink.lock().push(v);
//!     }
//! });
//!
//! input.send_value(1);
//! input.send_value(2);
//! input.send_completed();
//! input.send_value(3); // dropped: the signal is terminated
//!
//! assert_eq!(*seen.lock(), vec![1, 2]);
//! ```

use crate::disposable::Disposable;
use crate::event::Event;
use parking_lot::Mutex;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

type Callback<T, E> = Arc<dyn Fn(Event<T, E>) + Send + Sync>;

struct Entry<T, E> {
    id: u64,
    // Cleared by the observation's Disposable; checked right before each
    // delivery so disposal mid-broadcast takes effect immediately.
    active: Arc<AtomicBool>,
    callback: Callback<T, E>,
}

impl<T, E> Clone for Entry<T, E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Arc::clone(&self.active),
            callback: Arc::clone(&self.callback),
        }
    }
}

struct State<T, E> {
    terminated: bool,
    next_id: u64,
    observers: Vec<Entry<T, E>>,
}

struct Core<T, E> {
    state: Mutex<State<T, E>>,
}

impl<T, E> Core<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn send(&self, event: Event<T, E>) {
        let snapshot = {
            let mut state = self.state.lock();
            if state.terminated {
                return;
            }
            if event.is_terminal() {
                state.terminated = true;
                // Drain so callbacks (and whatever they capture) are freed
                // as soon as the broadcast below finishes.
                mem::take(&mut state.observers)
            } else {
                state.observers.clone()
            }
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(observers = snapshot.len(), terminal = event.is_terminal(), "delivering event");

        // The lock is released here: callbacks may observe, dispose or
        // send re-entrantly without deadlocking.
        for entry in snapshot {
            if entry.active.load(Ordering::Acquire) {
                (entry.callback)(event.clone());
            }
        }
    }
}

/// A live, multicast push source of [`Event<T, E>`].
///
/// Create one with [`Signal::pipe`]. See the [module documentation](self)
/// for semantics and an example.
pub struct Signal<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    core: Arc<Core<T, E>>,
}

/// The write side of a [`Signal`], handed out by [`Signal::pipe`].
///
/// Cheap to clone; all clones feed the same signal. Once a terminal event
/// has gone through, every `send*` method becomes a no-op.
pub struct Observer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    core: Arc<Core<T, E>>,
}

impl<T, E> Signal<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Creates a signal together with its only write side.
    #[must_use]
    pub fn pipe() -> (Signal<T, E>, Observer<T, E>) {
        let core = Arc::new(Core {
            state: Mutex::new(State {
                terminated: false,
                next_id: 0,
                observers: Vec::new(),
            }),
        });
        (
            Signal {
                core: Arc::clone(&core),
            },
            Observer { core },
        )
    }

    /// Registers `callback` for every subsequent event and returns the
    /// handle that unregisters it.
    ///
    /// If the signal has already terminated, `callback` receives
    /// `Interrupted` synchronously and nothing is registered.
    ///
    /// The returned [`Disposable`] holds only a weak reference back to the
    /// signal, so a forgotten handle never keeps a dead signal alive.
    pub fn observe<F>(&self, callback: F) -> Disposable
    where
        F: Fn(Event<T, E>) + Send + Sync + 'static,
    {
        let (id, active) = {
            let mut state = self.core.state.lock();
            if state.terminated {
                drop(state);
                callback(Event::Interrupted);
                return Disposable::empty();
            }
            let active = Arc::new(AtomicBool::new(true));
            let id = state.next_id;
            state.next_id += 1;
            state.observers.push(Entry {
                id,
                active: Arc::clone(&active),
                callback: Arc::new(callback),
            });
            (id, active)
        };

        let core: Weak<Core<T, E>> = Arc::downgrade(&self.core);
        Disposable::new(move || {
            active.store(false, Ordering::Release);
            if let Some(core) = core.upgrade() {
                let mut state = core.state.lock();
                state.observers.retain(|entry| entry.id != id);
            }
        })
    }

    /// Returns `true` once a terminal event has been delivered.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.core.state.lock().terminated
    }

    /// Number of currently registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.core.state.lock().observers.len()
    }
}

impl<T, E> Clone for Signal<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<T, E> Observer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Delivers an event to all currently registered observers.
    pub fn send(&self, event: Event<T, E>) {
        self.core.send(event);
    }

    /// Delivers `Value(value)`.
    pub fn send_value(&self, value: T) {
        self.send(Event::Value(value));
    }

    /// Delivers `Failed(error)` and deactivates the signal.
    pub fn send_failed(&self, error: E) {
        self.send(Event::Failed(error));
    }

    /// Delivers `Completed` and deactivates the signal.
    pub fn send_completed(&self) {
        self.send(Event::Completed);
    }

    /// Delivers `Interrupted` and deactivates the signal.
    pub fn send_interrupted(&self) {
        self.send(Event::Interrupted);
    }
}

impl<T, E> Clone for Observer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}
