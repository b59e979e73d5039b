// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Value and error mapping operators.

use rill_core::Producer;
use std::sync::Arc;

/// Extension trait providing `map` and `map_err` for producers.
pub trait MapExt<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    /// Transforms every value with `f`, forwarding terminal events
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rill_core::Producer;
    /// use rill_ops::MapExt;
    ///
    /// let doubled = Producer::<i32, ()>::of_values(vec![1, 2]).map(|v| v * 2);
    /// ```
    fn map<U, F>(&self, f: F) -> Producer<U, E>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static;

    /// Transforms the failure with `f`, forwarding values and other
    /// terminal events unchanged.
    fn map_err<F2, G>(&self, f: G) -> Producer<T, F2>
    where
        F2: Clone + Send + 'static,
        G: Fn(E) -> F2 + Send + Sync + 'static;
}

impl<T, E> MapExt<T, E> for Producer<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn map<U, F>(&self, f: F) -> Producer<U, E>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Producer::new(move |observer, lifetime| {
            let f = Arc::clone(&f);
            lifetime.add(source.start(move |event| observer.send(event.map(|v| (*f)(v)))));
        })
    }

    fn map_err<F2, G>(&self, f: G) -> Producer<T, F2>
    where
        F2: Clone + Send + 'static,
        G: Fn(E) -> F2 + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Producer::new(move |observer, lifetime| {
            let f = Arc::clone(&f);
            lifetime.add(source.start(move |event| observer.send(event.map_err(|e| (*f)(e)))));
        })
    }
}
