// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancellation handles for subscriptions and scheduled work.
//!
//! A [`Disposable`] owns a cleanup action that runs exactly once, no matter
//! how many clones exist or how often `dispose()` is called. Cleanup actions
//! always run outside the handle's internal lock, so disposing from within
//! an event-delivery callback cannot deadlock.

use parking_lot::Mutex;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Action = Box<dyn FnOnce() + Send>;

/// An idempotent cancellation handle.
///
/// Cloning shares the underlying state: disposing any clone disposes all
/// of them, and the wrapped action runs at most once.
///
/// # Example
///
/// ```
/// use rill_core::Disposable;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let handle = Disposable::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// handle.dispose();
/// handle.dispose();
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone)]
pub struct Disposable {
    inner: Arc<Inner>,
}

struct Inner {
    disposed: AtomicBool,
    action: Mutex<Option<Action>>,
}

impl Disposable {
    /// Creates a handle that runs `action` on first disposal.
    #[must_use]
    pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                disposed: AtomicBool::new(false),
                action: Mutex::new(Some(Box::new(action))),
            }),
        }
    }

    /// Creates a handle with no cleanup action.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(Inner {
                disposed: AtomicBool::new(false),
                action: Mutex::new(None),
            }),
        }
    }

    /// Runs the cleanup action if it has not run yet.
    pub fn dispose(&self) {
        let action = self.inner.action.lock().take();
        self.inner.disposed.store(true, Ordering::Release);
        if let Some(action) = action {
            action();
        }
    }

    /// Returns `true` once `dispose()` has been called on any clone.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for Disposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Aggregates child disposables and disposes them together.
///
/// Adding a child to an already-disposed composite disposes the child
/// immediately. Children are disposed in insertion order; each exactly once.
#[derive(Clone)]
pub struct CompositeDisposable {
    // None once disposed.
    children: Arc<Mutex<Option<Vec<Disposable>>>>,
}

impl CompositeDisposable {
    /// Creates an empty, un-disposed composite.
    #[must_use]
    pub fn new() -> Self {
        Self {
            children: Arc::new(Mutex::new(Some(Vec::new()))),
        }
    }

    /// Adds a child, or disposes it on the spot if the composite is
    /// already disposed.
    pub fn add(&self, child: Disposable) {
        let mut guard = self.children.lock();
        match guard.as_mut() {
            Some(children) => children.push(child),
            None => {
                drop(guard);
                child.dispose();
            }
        }
    }

    /// Disposes all children exactly once.
    pub fn dispose(&self) {
        let children = self.children.lock().take();
        if let Some(children) = children {
            for child in children {
                child.dispose();
            }
        }
    }

    /// Returns `true` once the composite has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.children.lock().is_none()
    }

    /// Wraps this composite in a plain [`Disposable`] handle.
    #[must_use]
    pub fn as_disposable(&self) -> Disposable {
        let this = self.clone();
        Disposable::new(move || this.dispose())
    }
}

impl Default for CompositeDisposable {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds at most one inner disposable, disposing the previous one on
/// replacement.
///
/// Used by operators that keep a single in-flight subscription or scheduled
/// task. Setting the inner handle on an already-disposed serial disposes
/// the incoming handle immediately, which makes it safe for upstream
/// subscriptions that may fail synchronously during start.
#[derive(Clone)]
pub struct SerialDisposable {
    state: Arc<Mutex<SerialState>>,
}

struct SerialState {
    disposed: bool,
    current: Option<Disposable>,
}

impl SerialDisposable {
    /// Creates an empty, un-disposed serial handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SerialState {
                disposed: false,
                current: None,
            })),
        }
    }

    /// Installs `inner` as the current handle, disposing whatever was
    /// there before. If this serial is already disposed, `inner` is
    /// disposed instead.
    pub fn set(&self, inner: Disposable) {
        let previous = {
            let mut state = self.state.lock();
            if state.disposed {
                drop(state);
                inner.dispose();
                return;
            }
            mem::replace(&mut state.current, Some(inner))
        };
        if let Some(previous) = previous {
            previous.dispose();
        }
    }

    /// Disposes the current inner handle and marks this serial disposed.
    pub fn dispose(&self) {
        let current = {
            let mut state = self.state.lock();
            state.disposed = true;
            state.current.take()
        };
        if let Some(current) = current {
            current.dispose();
        }
    }

    /// Returns `true` once `dispose()` has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }

    /// Wraps this serial in a plain [`Disposable`] handle.
    #[must_use]
    pub fn as_disposable(&self) -> Disposable {
        let this = self.clone();
        Disposable::new(move || this.dispose())
    }
}

impl Default for SerialDisposable {
    fn default() -> Self {
        Self::new()
    }
}
