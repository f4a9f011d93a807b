use anyhow::{Context, Result};
use clap::Parser;
use minitest::{Config, Registry, TestRunner};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod suites;

use suites::Suite;

/// Run one of the bundled minitest suites.
///
/// The process exits with status 0 when every test passes and 1 otherwise.
///
/// EXAMPLES:
///     minitest-demo                        Run the usage suite
///     minitest-demo --suite arithmetic     Run a suite that passes
///     minitest-demo --filter ok            Only run tests matching "ok"
///
/// ENVIRONMENT VARIABLES:
///     MINITEST_FILTER      Default for --filter
///     MINITEST_TIMEOUT_MS  Default for --timeout-ms (invalid values are ignored)
///     MINITEST_MAX_TESTS   Default for --max-tests (invalid values are ignored)
///     MINITEST_LOG         Log filter for diagnostics on stderr (default: warn)
#[derive(Parser)]
#[command(name = "minitest-demo")]
#[command(version)]
struct Cli {
    /// Suite to run
    #[arg(long, short = 's', value_enum, default_value_t = Suite::Usage)]
    suite: Suite,
    /// Only run tests whose name contains this text
    #[arg(long, short = 'f')]
    filter: Option<String>,
    /// Per-test timeout in milliseconds (0 disables)
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Refuse to register more than this many tests
    #[arg(long)]
    max_tests: Option<usize>,
}

impl Cli {
    /// Environment settings, overridden by any flag given explicitly
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(ms) = self.timeout_ms {
            config.timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(filter) = &self.filter {
            config.filter = Some(filter.clone()).filter(|f| !f.is_empty());
        }
        if let Some(max_tests) = self.max_tests {
            config.max_tests = Some(max_tests);
        }
        config
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MINITEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = cli.config();
    debug!(?config, suite = cli.suite.name(), "loaded configuration");

    let mut registry = Registry::from_config(&config);
    cli.suite
        .register(&mut registry)
        .with_context(|| format!("Failed to register the {} suite", cli.suite.name()))?;

    debug!(tests = registry.len(), "registered suite");

    let passed = TestRunner::from_config(&config).run_all(&registry);

    // Exit with code 1 if any tests failed
    if !passed {
        std::process::exit(1);
    }

    Ok(())
}
