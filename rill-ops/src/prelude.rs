// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-stop import for every operator extension trait.
//!
//! ```rust
//! use rill_ops::prelude::*;
//! ```

pub use crate::attempt::AttemptExt;
pub use crate::collect::CollectExt;
pub use crate::combine_latest::CombineLatestExt;
pub use crate::combine_previous::CombinePreviousExt;
pub use crate::filter::{FilterExt, SkipNoneExt};
pub use crate::map::MapExt;
pub use crate::materialize::{DematerializeExt, MaterializeExt};
pub use crate::sample::SampleExt;
pub use crate::scan::ScanExt;
pub use crate::skip::SkipExt;
pub use crate::skip_repeats::SkipRepeatsExt;
pub use crate::start_with::StartWithExt;
pub use crate::take::TakeExt;
pub use crate::take_last::TakeLastExt;
pub use crate::tap::TapExt;
pub use crate::zip::ZipExt;
