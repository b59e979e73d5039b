// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared helpers for testing rill pipelines: an event-trace collector,
//! a virtual-time scheduler and a stock error type.

pub mod collector;
pub mod error;
pub mod test_scheduler;

pub use collector::EventCollector;
pub use error::TestError;
pub use test_scheduler::TestScheduler;
