// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The tagged payload flowing through a stream.

/// A single occurrence on a stream: either a value or one of three
/// terminal markers.
///
/// Once a terminal event (`Failed`, `Completed` or `Interrupted`) has been
/// delivered on a stream instance, nothing further is delivered on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T, E> {
    /// A payload-carrying, non-terminal event.
    Value(T),
    /// The stream terminated with a typed error.
    Failed(E),
    /// The stream terminated normally.
    Completed,
    /// The stream was cut short by cancellation. Terminal, but not an error.
    Interrupted,
}

impl<T, E> Event<T, E> {
    /// Returns `true` if this is a `Value`.
    pub const fn is_value(&self) -> bool {
        matches!(self, Event::Value(_))
    }

    /// Returns `true` if this event ends the stream it is delivered on.
    pub const fn is_terminal(&self) -> bool {
        !self.is_value()
    }

    /// Converts from `Event<T, E>` to `Option<T>`, discarding non-values.
    pub fn value(self) -> Option<T> {
        match self {
            Event::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Converts from `Event<T, E>` to `Option<E>`, discarding everything
    /// but failures.
    pub fn error(self) -> Option<E> {
        match self {
            Event::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Maps the value payload, forwarding terminal events unchanged.
    pub fn map<U, F>(self, f: F) -> Event<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Event::Value(v) => Event::Value(f(v)),
            Event::Failed(e) => Event::Failed(e),
            Event::Completed => Event::Completed,
            Event::Interrupted => Event::Interrupted,
        }
    }

    /// Maps the failure payload, forwarding all other events unchanged.
    pub fn map_err<F2, G>(self, g: G) -> Event<T, F2>
    where
        G: FnOnce(E) -> F2,
    {
        match self {
            Event::Value(v) => Event::Value(v),
            Event::Failed(e) => Event::Failed(g(e)),
            Event::Completed => Event::Completed,
            Event::Interrupted => Event::Interrupted,
        }
    }
}

impl<T, E> From<Result<T, E>> for Event<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Event::Value(v),
            Err(e) => Event::Failed(e),
        }
    }
}
