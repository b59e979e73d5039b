// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core primitives for push-based event streams.
//!
//! - [`Event`] — the tagged payload: a value or one of three terminal
//!   markers.
//! - [`Signal`] / [`Observer`] — a live, multicast source and its only
//!   write side.
//! - [`Producer`] — a cold, restartable blueprint; one fresh signal and
//!   lifetime per start.
//! - [`Disposable`], [`CompositeDisposable`], [`SerialDisposable`] —
//!   idempotent cancellation handles.
//! - [`Scheduler`] — explicitly passed execution context, with
//!   [`ImmediateScheduler`] for inline delivery.
//! - [`Property`] / [`MutableProperty`] — always-readable latest-value
//!   containers.

pub mod disposable;
pub mod event;
pub mod producer;
pub mod property;
pub mod scheduler;
pub mod signal;

pub use self::disposable::{CompositeDisposable, Disposable, SerialDisposable};
pub use self::event::Event;
pub use self::producer::Producer;
pub use self::property::{MutableProperty, Property};
pub use self::scheduler::{ImmediateScheduler, Scheduler};
pub use self::signal::{Observer, Signal};
