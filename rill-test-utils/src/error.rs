// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thiserror::Error;

/// Error type used across the test suites.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    #[error("injected failure: {0}")]
    Injected(&'static str),

    #[error("operation timed out")]
    TimedOut,
}

impl Default for TestError {
    fn default() -> Self {
        TestError::Injected("default")
    }
}
