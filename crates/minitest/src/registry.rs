//! Test registry - ordered collection of named test procedures

use crate::config::Config;
use crate::context::TestContext;
use crate::error::{HarnessError, HarnessResult, TestResult};
use std::fmt;
use std::sync::Arc;

/// Bound used by callers that want a fixed-size registry
pub const DEFAULT_CAPACITY: usize = 100;

/// Shared handle to a test procedure
pub type TestFn = Arc<dyn Fn(&mut TestContext<'_>) -> TestResult + Send + Sync + 'static>;

/// A registered test
#[derive(Clone)]
pub struct TestEntry {
    name: String,
    procedure: TestFn,
}

impl TestEntry {
    /// Name the test was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn procedure(&self) -> &TestFn {
        &self.procedure
    }
}

impl fmt::Debug for TestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Tests in registration order, which is also execution and report order
#[derive(Debug, Default, Clone)]
pub struct Registry {
    entries: Vec<TestEntry>,
    /// Maximum number of entries, `None` for unbounded
    limit: Option<usize>,
}

impl Registry {
    /// Create an unbounded registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that refuses more than `limit` tests
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Create a registry bounded by `MINITEST_MAX_TESTS`, if set
    pub fn from_config(config: &Config) -> Self {
        match config.max_tests {
            Some(limit) => Self::with_limit(limit),
            None => Self::new(),
        }
    }

    /// Register a test under `name`.
    ///
    /// Fails with [`HarnessError::CapacityExceeded`] when the registry is
    /// bounded and already full; the registry is left unchanged.
    pub fn add<F>(&mut self, name: impl Into<String>, procedure: F) -> HarnessResult<()>
    where
        F: Fn(&mut TestContext<'_>) -> TestResult + Send + Sync + 'static,
    {
        if let Some(capacity) = self.limit {
            if self.entries.len() >= capacity {
                return Err(HarnessError::CapacityExceeded { capacity });
            }
        }

        self.entries.push(TestEntry {
            name: name.into(),
            procedure: Arc::new(procedure),
        });
        Ok(())
    }

    /// Capacity bound, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate tests in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TestEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut TestContext<'_>) -> TestResult {
        Ok(())
    }

    #[test]
    fn test_registry_preserves_order() {
        let mut registry = Registry::new();
        registry.add("first", noop).unwrap();
        registry.add("second", noop).unwrap();
        registry.add("third", noop).unwrap();

        let names: Vec<_> = registry.iter().map(TestEntry::name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_registry_unbounded_grows() {
        let mut registry = Registry::new();
        for i in 0..(DEFAULT_CAPACITY * 2) {
            registry.add(format!("test_{}", i), noop).unwrap();
        }
        assert_eq!(registry.len(), DEFAULT_CAPACITY * 2);
        assert_eq!(registry.limit(), None);
    }

    #[test]
    fn test_registry_capacity_exceeded() {
        let mut registry = Registry::with_limit(2);
        registry.add("a", noop).unwrap();
        registry.add("b", noop).unwrap();

        let err = registry.add("c", noop).unwrap_err();
        assert!(matches!(err, HarnessError::CapacityExceeded { capacity: 2 }));
        assert_eq!(registry.len(), 2);
        assert!(err.to_string().contains("2 tests"));
    }

    #[test]
    fn test_registry_accepts_closures() {
        let expected = 3;
        let mut registry = Registry::new();
        registry
            .add("closure", move |t| {
                crate::check_eq!(t, 1 + 2, expected);
                Ok(())
            })
            .unwrap();
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_registry_from_config() {
        let config = Config {
            max_tests: Some(1),
            ..Config::default()
        };
        let mut registry = Registry::from_config(&config);
        registry.add("only", noop).unwrap();
        assert!(registry.add("extra", noop).is_err());
    }
}
