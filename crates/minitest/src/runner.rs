//! Test runner - execute registered tests one at a time

use crate::config::Config;
use crate::context::TestContext;
use crate::error::HarnessResult;
use crate::registry::{Registry, TestEntry, TestFn};
use crate::reporter::TestReporter;
use std::any::Any;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Result of running a single test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// Test ran to completion
    Pass { duration: Duration },
    /// A check failed and aborted the test
    Fail { message: String, duration: Duration },
    /// Test panicked outside the check machinery
    Panic { message: String, duration: Duration },
    /// Test produced no result within the configured timeout
    Timeout { duration: Duration },
}

impl TestOutcome {
    /// Check if this result is a pass
    pub fn is_pass(&self) -> bool {
        matches!(self, TestOutcome::Pass { .. })
    }

    /// Check if this result counts as a failure
    pub fn is_fail(&self) -> bool {
        !self.is_pass()
    }

    /// Failures not produced by a check
    pub fn is_fault(&self) -> bool {
        matches!(self, TestOutcome::Panic { .. } | TestOutcome::Timeout { .. })
    }

    /// Get the duration of this test
    pub fn duration(&self) -> Duration {
        match self {
            TestOutcome::Pass { duration } => *duration,
            TestOutcome::Fail { duration, .. } => *duration,
            TestOutcome::Panic { duration, .. } => *duration,
            TestOutcome::Timeout { duration } => *duration,
        }
    }
}

/// A completed test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRun {
    /// Name the test was registered under
    pub name: String,
    /// Result of running the test
    pub outcome: TestOutcome,
}

/// State of one pass over the registry
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    runs: Vec<TestRun>,
    passed: usize,
    failed: usize,
}

impl RunSummary {
    fn record(&mut self, name: &str, outcome: TestOutcome) {
        if outcome.is_pass() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.runs.push(TestRun {
            name: name.to_string(),
            outcome,
        });
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Failed tests, faults included
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Failures caused by panics or timeouts
    pub fn faults(&self) -> usize {
        self.runs.iter().filter(|r| r.outcome.is_fault()).count()
    }

    /// Per-test results in execution order
    pub fn runs(&self) -> &[TestRun] {
        &self.runs
    }

    pub fn total_duration(&self) -> Duration {
        self.runs.iter().map(|r| r.outcome.duration()).sum()
    }

    /// True iff no test failed
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Test runner with configuration
#[derive(Debug, Clone, Default)]
pub struct TestRunner {
    /// Timeout for individual tests
    timeout: Option<Duration>,
    /// Name substring a test must contain to run
    filter: Option<String>,
}

impl TestRunner {
    /// Create a new test runner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: config.timeout,
            filter: config.filter.clone(),
        }
    }

    /// Set the timeout for individual tests
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Only run tests whose name contains `pattern`
    pub fn with_filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Run all selected tests in registration order, reporting to stdout.
    ///
    /// Returns true iff every test passed.
    pub fn run_all(&self, registry: &Registry) -> bool {
        match self.run(registry, io::stdout()) {
            Ok(summary) => summary.success(),
            Err(e) => {
                error!(error = %e, "test run aborted");
                false
            }
        }
    }

    /// Run all selected tests in registration order, reporting to `out`.
    ///
    /// Test failures never abort the run; only a report stream error does.
    pub fn run<W: Write>(&self, registry: &Registry, out: W) -> HarnessResult<RunSummary> {
        let selected: Vec<&TestEntry> = registry.iter().filter(|t| self.selects(t)).collect();

        let mut reporter = TestReporter::new(out);
        let mut summary = RunSummary::default();

        reporter.start(selected.len())?;

        for (index, entry) in selected.into_iter().enumerate() {
            reporter.begin_test(entry.name())?;
            debug!(index, test = entry.name(), "running test");

            let start = Instant::now();
            let outcome = match self.timeout {
                Some(limit) => run_supervised(entry, limit, reporter.stream(), start)?,
                None => run_inline(entry.name(), entry.procedure(), reporter.stream(), start),
            };

            debug!(
                test = entry.name(),
                passed = outcome.is_pass(),
                duration = ?outcome.duration(),
                "finished test"
            );

            reporter.finish_test(entry.name(), &outcome)?;
            summary.record(entry.name(), outcome);
        }

        reporter.summary(&summary)?;
        info!(
            passed = summary.passed(),
            failed = summary.failed(),
            faults = summary.faults(),
            duration = ?summary.total_duration(),
            "test run complete"
        );

        Ok(summary)
    }

    fn selects(&self, entry: &TestEntry) -> bool {
        self.filter
            .as_deref()
            .map_or(true, |pattern| entry.name().contains(pattern))
    }
}

/// Run all tests in `registry` with default settings, reporting to stdout
pub fn run_all(registry: &Registry) -> bool {
    TestRunner::new().run_all(registry)
}

/// Run a test on the current thread, containing check failures and panics
fn run_inline(name: &str, procedure: &TestFn, out: &mut dyn Write, start: Instant) -> TestOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut ctx = TestContext::new(name, out);
        (**procedure)(&mut ctx)
    }));

    let duration = start.elapsed();
    match result {
        Ok(Ok(())) => TestOutcome::Pass { duration },
        Ok(Err(failure)) => TestOutcome::Fail {
            message: failure.message,
            duration,
        },
        Err(payload) => TestOutcome::Panic {
            message: panic_message(&*payload),
            duration,
        },
    }
}

/// Run a test on a worker thread, giving up after `limit`.
///
/// Output the test writes is buffered on the worker and relayed once it
/// reports back. A worker that misses the deadline is abandoned.
fn run_supervised(
    entry: &TestEntry,
    limit: Duration,
    out: &mut dyn Write,
    start: Instant,
) -> HarnessResult<TestOutcome> {
    let (tx, rx) = mpsc::channel();
    let name = entry.name().to_string();
    let procedure = Arc::clone(entry.procedure());

    thread::Builder::new()
        .name("minitest-worker".to_string())
        .spawn(move || {
            let mut buffer = Vec::new();
            let outcome = run_inline(&name, &procedure, &mut buffer, start);
            let _ = tx.send((outcome, buffer));
        })?;

    match rx.recv_timeout(limit) {
        Ok((outcome, buffer)) => {
            out.write_all(&buffer)?;
            Ok(outcome)
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!(test = entry.name(), ?limit, "test timed out, abandoning worker");
            Ok(TestOutcome::Timeout {
                duration: start.elapsed(),
            })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Ok(TestOutcome::Panic {
            message: "test worker exited without a result".to_string(),
            duration: start.elapsed(),
        }),
    }
}

/// Extract the text of a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked".to_string()
    }
}
