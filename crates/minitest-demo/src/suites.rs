//! Bundled demonstration suites

use clap::ValueEnum;
use minitest::{check, check_eq, fail, HarnessResult, Registry, TestContext, TestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    /// One passing and one failing test
    Usage,
    /// Arithmetic checks that all pass
    Arithmetic,
    /// Nested failures, a panic, and a passing test
    Faults,
}

impl Suite {
    pub fn name(self) -> &'static str {
        match self {
            Suite::Usage => "usage",
            Suite::Arithmetic => "arithmetic",
            Suite::Faults => "faults",
        }
    }

    pub fn register(self, registry: &mut Registry) -> HarnessResult<()> {
        match self {
            Suite::Usage => {
                registry.add("test_ok", test_ok)?;
                registry.add("test_fail", test_fail)?;
            }
            Suite::Arithmetic => {
                registry.add("test_addition", test_addition)?;
                registry.add("test_division", test_division)?;
                registry.add("test_overflow", test_overflow)?;
            }
            Suite::Faults => {
                registry.add("test_nested_failure", test_nested_failure)?;
                registry.add("test_panic", test_panic)?;
                registry.add("test_ok", test_ok)?;
            }
        }
        Ok(())
    }
}

fn test_ok(t: &mut TestContext<'_>) -> TestResult {
    check!(t, true, "this one is OK");
    Ok(())
}

fn test_fail(t: &mut TestContext<'_>) -> TestResult {
    check!(t, false, "this one fails");
    Ok(())
}

fn test_addition(t: &mut TestContext<'_>) -> TestResult {
    check_eq!(t, 2 + 2, 4);
    check_eq!(t, -3 + 3, 0);
    Ok(())
}

fn test_division(t: &mut TestContext<'_>) -> TestResult {
    check_eq!(t, 7 / 2, 3, "integer division truncates");
    check!(t, 7 % 2 == 1);
    Ok(())
}

fn test_overflow(t: &mut TestContext<'_>) -> TestResult {
    check!(t, u8::MAX.checked_add(1).is_none());
    check_eq!(t, 250u8.wrapping_add(10), 4);
    Ok(())
}

fn parse_digit(t: &mut TestContext<'_>, c: char) -> TestResult {
    match c.to_digit(10) {
        Some(_) => Ok(()),
        None => fail!(t, "'{}' is not a digit", c),
    }
}

fn test_nested_failure(t: &mut TestContext<'_>) -> TestResult {
    for c in "12x4".chars() {
        parse_digit(t, c)?;
    }
    Ok(())
}

fn test_panic(t: &mut TestContext<'_>) -> TestResult {
    let settings: Vec<u32> = Vec::new();
    let first = settings
        .first()
        .copied()
        .unwrap_or_else(|| panic!("value was never set"));
    check_eq!(t, first, 1);
    Ok(())
}
