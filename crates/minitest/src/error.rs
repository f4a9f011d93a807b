//! Error types for registration, reporting, and in-test assertion aborts

use std::io;
use thiserror::Error;

/// Errors surfaced to the program driving the harness
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Registry is full: cannot register more than {capacity} tests")]
    CapacityExceeded { capacity: usize },

    #[error("Failed to write test report: {0}")]
    Io(#[from] io::Error),
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Abort token produced by a failed check.
///
/// Only a [`TestContext`](crate::TestContext) can create one, so a failure
/// always belongs to the test that is currently running. Propagate it with
/// `?` to leave the test procedure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionFailure {
    pub(crate) message: String,
}

impl AssertionFailure {
    /// The formatted message the failing check reported
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Return type of every test procedure
pub type TestResult = Result<(), AssertionFailure>;
