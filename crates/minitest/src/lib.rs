//! Minitest - a minimal sequential unit-testing harness
//!
//! Register named test procedures, run them one after another, and get a
//! plain-text report plus an overall pass/fail signal. A failed check aborts
//! only the test it occurs in; the run continues with the next test.
//!
//! # Example
//!
//! ```no_run
//! use minitest::{check, Registry, TestContext, TestResult};
//!
//! fn test_ok(t: &mut TestContext<'_>) -> TestResult {
//!     check!(t, 1 + 1 == 2, "this one is OK");
//!     Ok(())
//! }
//!
//! fn test_fail(t: &mut TestContext<'_>) -> TestResult {
//!     check!(t, 1 + 1 == 3, "this one fails");
//!     Ok(())
//! }
//!
//! let mut registry = Registry::new();
//! registry.add("test_ok", test_ok).unwrap();
//! registry.add("test_fail", test_fail).unwrap();
//!
//! let passed = minitest::run_all(&registry);
//! std::process::exit(if passed { 0 } else { 1 });
//! ```
//!
//! # Report format
//!
//! ```text
//! Running 2 tests...
//! * test_ok:
//! Test OK
//!
//! * test_fail:
//! test_fail: error: this one fails
//! Test FAILED
//!
//! Total of 1 tests passed, 1 failed
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod registry;
pub mod reporter;
pub mod runner;

// Re-export main types
pub use config::Config;
pub use context::TestContext;
pub use error::{AssertionFailure, HarnessError, HarnessResult, TestResult};
pub use registry::{Registry, TestEntry, TestFn, DEFAULT_CAPACITY};
pub use reporter::TestReporter;
pub use runner::{run_all, RunSummary, TestOutcome, TestRun, TestRunner};
