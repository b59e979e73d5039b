// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-stop import for the time-based operator extension traits.

pub use crate::delay::DelayExt;
pub use crate::observe_on::ObserveOnExt;
pub use crate::throttle::ThrottleExt;
pub use crate::timeout::TimeoutExt;
pub use crate::timer_scheduler::TimerScheduler;
