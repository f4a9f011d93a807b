//! Assertion primitives available inside a running test
//!
//! A failed check reports `<name>: error: <message>` on the report stream and
//! returns an [`AssertionFailure`]. Test code propagates it with `?`, which
//! leaves the test procedure (and any helper it called) and hands control
//! back to the runner. Only the first failure of a test is ever observed.
//!
//! # API
//!
//! - `check!(t, condition)` - message is `assertion failed: <condition>`
//! - `check!(t, condition, "fmt", args..)` - custom message
//! - `check_eq!(t, left, right)` / `check_ne!(t, left, right)` - `Debug` diff
//! - `fail!(t, "fmt", args..)` - unconditional failure

use crate::error::{AssertionFailure, TestResult};
use std::fmt;
use std::io::Write;

/// Identity and report stream of the test currently executing.
///
/// Created by the runner for each test; there is no public constructor.
pub struct TestContext<'a> {
    name: &'a str,
    out: &'a mut dyn Write,
}

impl<'a> TestContext<'a> {
    pub(crate) fn new(name: &'a str, out: &'a mut dyn Write) -> Self {
        Self { name, out }
    }

    /// Name of the running test
    pub fn name(&self) -> &str {
        self.name
    }

    /// Pass when `condition` holds, otherwise report `message` and abort.
    pub fn check(&mut self, condition: bool, message: fmt::Arguments<'_>) -> TestResult {
        if condition {
            return Ok(());
        }
        self.fail(message)
    }

    /// Report `message` and abort the test.
    pub fn fail(&mut self, message: fmt::Arguments<'_>) -> TestResult {
        let message = message.to_string();

        // The runner surfaces write errors on its own lines; a failure here
        // must still abort the test.
        let _ = writeln!(self.out, "{}: error: {}", self.name, message);
        let _ = self.out.flush();

        Err(AssertionFailure { message })
    }
}

impl fmt::Debug for TestContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Check a condition, aborting the test with a message when it is false.
///
/// Must be used in a function returning [`TestResult`](crate::TestResult).
#[macro_export]
macro_rules! check {
    ($ctx:expr, $cond:expr $(,)?) => {
        $ctx.check($cond, format_args!("assertion failed: {}", stringify!($cond)))?
    };
    ($ctx:expr, $cond:expr, $($arg:tt)+) => {
        $ctx.check($cond, format_args!($($arg)+))?
    };
}

/// Check that two values are equal, reporting both with `Debug`.
#[macro_export]
macro_rules! check_eq {
    ($ctx:expr, $left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => $ctx.check(
                *left == *right,
                format_args!(
                    "assertion `left == right` failed\n  left: {:?}\n right: {:?}",
                    left, right
                ),
            )?,
        }
    };
    ($ctx:expr, $left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left, right) => $ctx.check(*left == *right, format_args!($($arg)+))?,
        }
    };
}

/// Check that two values differ, reporting both with `Debug`.
#[macro_export]
macro_rules! check_ne {
    ($ctx:expr, $left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => $ctx.check(
                *left != *right,
                format_args!(
                    "assertion `left != right` failed\n  left: {:?}\n right: {:?}",
                    left, right
                ),
            )?,
        }
    };
    ($ctx:expr, $left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left, right) => $ctx.check(*left != *right, format_args!($($arg)+))?,
        }
    };
}

/// Abort the test unconditionally.
#[macro_export]
macro_rules! fail {
    ($ctx:expr, $($arg:tt)+) => {
        return $ctx.fail(format_args!($($arg)+))
    };
}
