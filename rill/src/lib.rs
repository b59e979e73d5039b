// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Rill
//!
//! A push-based reactive stream library: hot [`Signal`]s, cold
//! [`Producer`]s, a rich operator algebra and deterministic virtual-time
//! testing.
//!
//! ## Overview
//!
//! Rill models event streams around four ideas:
//!
//! - **Events**: every occurrence is an [`Event`] — a value or one of
//!   three terminal markers (failed, completed, interrupted).
//! - **Signals** are hot: they broadcast to whoever is observing at the
//!   moment of delivery, synchronously and in registration order.
//! - **Producers** are cold: they describe how to build a stream, and
//!   every start runs the recipe again against a fresh signal.
//! - **Disposables** tie the lifetime of subscriptions and scheduled
//!   work to explicit, idempotent cancellation handles.
//!
//! Operators live behind extension traits; pull them all in at once:
//!
//! ```rust
//! use rill_rx::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let summed = Producer::<i32, ()>::of_values(vec![1, 2, 3])
//!     .filter(|v| v % 2 == 1)
//!     .scan(0, |acc, v| acc + v);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let _handle = summed.start_with_values(move |v| sink.lock().unwrap().push(v));
//! assert_eq!(*seen.lock().unwrap(), vec![1, 4]);
//! ```
//!
//! Time-based operators take a [`Scheduler`] explicitly; production code
//! passes a [`TimerScheduler`], tests pass the virtual-time scheduler
//! from `rill-test-utils` and drive the clock by hand.

// Re-export the core model
pub use rill_core::{
    CompositeDisposable, Disposable, Event, ImmediateScheduler, MutableProperty, Observer,
    Producer, Property, Scheduler, SerialDisposable, Signal,
};

// Re-export the operator extension traits
pub use rill_ops::{
    AttemptExt, CollectExt, CombineLatestExt, CombinePreviousExt, DematerializeExt, FilterExt,
    MapExt, MaterializeExt, SampleExt, ScanExt, SkipExt, SkipNoneExt, SkipRepeatsExt,
    StartWithExt, TakeExt, TakeLastExt, TapExt, ZipExt,
};

// Re-export the time layer
pub use rill_time::{DelayExt, ObserveOnExt, ThrottleExt, TimeoutExt, TimerScheduler};

/// Prelude module for convenient imports
pub mod prelude {
    pub use rill_core::{
        CompositeDisposable, Disposable, Event, ImmediateScheduler, MutableProperty, Observer,
        Producer, Property, Scheduler, SerialDisposable, Signal,
    };
    pub use rill_ops::prelude::*;
    pub use rill_time::prelude::*;
}
