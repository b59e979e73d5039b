// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operators over [`rill_core::Producer`]: mapping, filtering,
//! accumulation, truncation, batching and multi-input combination.
//!
//! Each operator lives in its own module behind an extension trait;
//! `use rill_ops::prelude::*;` brings them all into scope.

pub mod attempt;
pub mod collect;
pub mod combine_latest;
pub mod combine_previous;
pub mod filter;
pub mod map;
pub mod materialize;
pub mod prelude;
pub mod sample;
pub mod scan;
pub mod skip;
pub mod skip_repeats;
pub mod start_with;
pub mod take;
pub mod take_last;
pub mod tap;
pub mod zip;

pub use attempt::AttemptExt;
pub use collect::CollectExt;
pub use combine_latest::CombineLatestExt;
pub use combine_previous::CombinePreviousExt;
pub use filter::{FilterExt, SkipNoneExt};
pub use map::MapExt;
pub use materialize::{DematerializeExt, MaterializeExt};
pub use sample::SampleExt;
pub use scan::ScanExt;
pub use skip::SkipExt;
pub use skip_repeats::SkipRepeatsExt;
pub use start_with::StartWithExt;
pub use take::TakeExt;
pub use take_last::TakeLastExt;
pub use tap::TapExt;
pub use zip::ZipExt;
