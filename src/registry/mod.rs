//! Test registry: declaratively registered test procedures.
//!
//! Suites register tests with `inventory::submit!`, so discovery is
//! independent of how the function itself is named:
//!
//! ```ignore
//! inventory::submit! {
//!     TestEntry::new("console_echo_uppercases_input", smoke::echo_uppercases_input)
//! }
//! ```
//!
//! The registry only answers "is this name runnable, and with what?";
//! execution order comes from the run list, never from enumeration order
//! here.

use std::collections::{BTreeSet, HashMap};

use log::warn;

use crate::checks::CheckResult;
use crate::executor::TestCx;

/// Signature of every registered test body. The context argument is the
/// per-session instance state a test runs against.
pub type TestFn = fn(&mut TestCx) -> CheckResult;

/// A registered test procedure.
#[derive(Debug, Clone, Copy)]
pub struct TestEntry {
    /// Name the run list refers to this test by
    pub name: &'static str,
    /// The test body
    pub run: TestFn,
}

impl TestEntry {
    /// Const constructor usable inside `inventory::submit!`.
    pub const fn new(name: &'static str, run: TestFn) -> Self {
        Self { name, run }
    }
}

inventory::collect!(TestEntry);

/// Name-indexed view of the registered tests for one session.
#[derive(Debug, Clone, Default)]
pub struct TestRegistry {
    tests: HashMap<String, TestFn>,
}

impl TestRegistry {
    /// Collect every registered [`TestEntry`] in the binary.
    pub fn discover() -> Self {
        Self::from_entries(inventory::iter::<TestEntry>.into_iter().copied())
    }

    /// Assemble a registry from explicit entries; `discover` feeds the
    /// registered set through here, and engine tests supply their own.
    pub fn from_entries(entries: impl IntoIterator<Item = TestEntry>) -> Self {
        let mut tests: HashMap<String, TestFn> = HashMap::new();
        for entry in entries {
            if tests.contains_key(entry.name) {
                // First registration wins; a duplicate is a suite bug, not
                // a reason to abort the session.
                warn!("duplicate test registration ignored: {}", entry.name);
                continue;
            }
            tests.insert(entry.name.to_string(), entry.run);
        }
        Self { tests }
    }

    /// Look up a test body by name.
    pub fn get(&self, name: &str) -> Option<TestFn> {
        self.tests.get(name).copied()
    }

    /// True when a test with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tests.contains_key(name)
    }

    /// Registered names, sorted for deterministic reporting.
    pub fn names(&self) -> BTreeSet<&str> {
        self.tests.keys().map(String::as_str).collect()
    }

    /// Number of registered tests.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes(_cx: &mut TestCx) -> CheckResult {
        Ok(())
    }

    fn also_passes(_cx: &mut TestCx) -> CheckResult {
        Ok(())
    }

    #[test]
    fn test_from_entries_indexes_by_name() {
        let registry = TestRegistry::from_entries([
            TestEntry::new("alpha", passes),
            TestEntry::new("beta", also_passes),
        ]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("alpha"));
        assert!(registry.contains("beta"));
        assert!(!registry.contains("gamma"));
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("gamma").is_none());
    }

    #[test]
    fn test_duplicate_registration_first_wins() {
        let registry = TestRegistry::from_entries([
            TestEntry::new("alpha", passes),
            TestEntry::new("alpha", also_passes),
        ]);
        assert_eq!(registry.len(), 1);
        let body = registry.get("alpha").unwrap();
        assert!(std::ptr::fn_addr_eq(body, passes as TestFn));
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = TestRegistry::from_entries([
            TestEntry::new("zeta", passes),
            TestEntry::new("alpha", passes),
        ]);
        let names: Vec<&str> = registry.names().into_iter().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_discover_includes_built_in_suites() {
        let registry = TestRegistry::discover();
        assert!(registry.contains(crate::config::SELF_CHECK_TEST));
        assert!(!registry.is_empty());
    }
}
