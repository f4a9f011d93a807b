//! Harness configuration via environment variables
//!
//! Nothing here is required: the defaults run every registered test with no
//! timeout and no registry bound. Programs that want the knobs call
//! [`Config::from_env`] and hand the result to the runner and registry.

use std::env;
use std::time::Duration;
use tracing::warn;

/// Optional harness settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Per-test timeout (MINITEST_TIMEOUT_MS, unset or 0 disables)
    pub timeout: Option<Duration>,
    /// Only run tests whose name contains this text (MINITEST_FILTER)
    pub filter: Option<String>,
    /// Registry capacity (MINITEST_MAX_TESTS)
    pub max_tests: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            timeout: parse_number("MINITEST_TIMEOUT_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            filter: env::var("MINITEST_FILTER").ok().filter(|f| !f.is_empty()),
            max_tests: parse_number("MINITEST_MAX_TESTS").and_then(|n| {
                usize::try_from(n)
                    .map_err(|e| {
                        warn!(
                            variable = "MINITEST_MAX_TESTS",
                            value = n,
                            error = %e,
                            "ignoring invalid setting"
                        );
                    })
                    .ok()
            }),
        }
    }
}

/// Read an unsigned integer variable; unparsable values are ignored
fn parse_number(key: &str) -> Option<u64> {
    let raw = env::var(key).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!(variable = key, value = raw, error = %e, "ignoring invalid setting");
            None
        }
    }
}
