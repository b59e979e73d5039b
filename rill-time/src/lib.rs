// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-based scheduling and operators: a wall-clock [`TimerScheduler`]
//! plus `delay`, `throttle`, `timeout` and `observe_on`.
//!
//! Every operator takes its scheduler explicitly; nothing here reaches
//! for an ambient clock, which is what keeps the whole crate testable
//! against a virtual-time scheduler.

pub mod delay;
pub mod observe_on;
pub mod prelude;
mod task_pool;
pub mod throttle;
pub mod timeout;
pub mod timer_scheduler;

pub use delay::DelayExt;
pub use observe_on::ObserveOnExt;
pub use throttle::ThrottleExt;
pub use timeout::TimeoutExt;
pub use timer_scheduler::TimerScheduler;
