//! Test reporter - plain-text progress and summary lines

use crate::runner::{RunSummary, TestOutcome};
use std::io::{self, Write};

/// Writes the report stream.
///
/// Format:
///
/// ```text
/// Running 2 tests...
/// * t1:
/// Test OK
///
/// * t2:
/// t2: error: mismatch
/// Test FAILED
///
/// Total of 1 tests passed, 1 failed
/// ```
pub struct TestReporter<W: Write> {
    out: W,
}

impl<W: Write> TestReporter<W> {
    /// Create a reporter over `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Stream handed to the test context so check failures land in order
    pub(crate) fn stream(&mut self) -> &mut W {
        &mut self.out
    }

    /// Announce how many tests are about to run
    pub fn start(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "Running {} tests...", count)
    }

    /// Announce a single test
    pub fn begin_test(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "* {}:", name)?;
        self.out.flush()
    }

    /// Print the verdict for a finished test.
    ///
    /// Check failures were already reported by the context; panics and
    /// timeouts get their diagnostic line here.
    pub fn finish_test(&mut self, name: &str, outcome: &TestOutcome) -> io::Result<()> {
        match outcome {
            TestOutcome::Pass { .. } => writeln!(self.out, "Test OK")?,
            TestOutcome::Fail { .. } => writeln!(self.out, "Test FAILED")?,
            TestOutcome::Panic { message, .. } => {
                writeln!(self.out, "{}: panic: {}", name, message)?;
                writeln!(self.out, "Test FAILED")?;
            }
            TestOutcome::Timeout { duration } => {
                writeln!(self.out, "{}: timeout: no result after {:.2?}", name, duration)?;
                writeln!(self.out, "Test FAILED")?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Print the totals line
    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "Total of {} tests passed, {} failed",
            summary.passed(),
            summary.failed()
        )?;
        self.out.flush()
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn render(f: impl FnOnce(&mut TestReporter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut reporter = TestReporter::new(Vec::new());
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_reporter_start() {
        assert_eq!(render(|r| r.start(3)), "Running 3 tests...\n");
    }

    #[test]
    fn test_reporter_pass() {
        let out = render(|r| {
            r.begin_test("test_one")?;
            r.finish_test(
                "test_one",
                &TestOutcome::Pass {
                    duration: Duration::from_millis(10),
                },
            )
        });
        assert_eq!(out, "* test_one:\nTest OK\n\n");
    }

    #[test]
    fn test_reporter_fail() {
        let out = render(|r| {
            r.finish_test(
                "test_fail",
                &TestOutcome::Fail {
                    message: "assertion failed".to_string(),
                    duration: Duration::from_millis(5),
                },
            )
        });
        // The context already printed the error line
        assert_eq!(out, "Test FAILED\n\n");
    }

    #[test]
    fn test_reporter_panic() {
        let out = render(|r| {
            r.finish_test(
                "boom",
                &TestOutcome::Panic {
                    message: "index out of bounds".to_string(),
                    duration: Duration::ZERO,
                },
            )
        });
        assert_eq!(out, "boom: panic: index out of bounds\nTest FAILED\n\n");
    }

    #[test]
    fn test_reporter_timeout() {
        let out = render(|r| {
            r.finish_test(
                "slow",
                &TestOutcome::Timeout {
                    duration: Duration::from_millis(50),
                },
            )
        });
        assert!(out.starts_with("slow: timeout: no result after 50"));
        assert!(out.ends_with("Test FAILED\n\n"));
    }

    #[test]
    fn test_reporter_summary() {
        let summary = RunSummary::default();
        assert_eq!(
            render(|r| r.summary(&summary)),
            "Total of 0 tests passed, 0 failed\n"
        );
    }
}
