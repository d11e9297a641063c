//! Sequential test executor.
//!
//! Walks the run list in parsed order (duplicates run again), looking
//! each name up in the registry. Names with no registered test are
//! skipped here (the consistency report surfaces them later; skipping
//! keeps a misspelled name from crashing the session). Each invocation is
//! bracketed with lifecycle hooks when this build drives its own
//! lifecycle, panics are trapped, and the outcome is classified.
//!
//! Execution is strictly single-threaded: a test's side effects are
//! visible to every later test, and nothing here times out or cancels a
//! hung test.

pub mod hooks;

use std::panic::{AssertUnwindSafe, catch_unwind};

use log::debug;

use crate::catalog::SymbolCatalog;
use crate::checks::{CheckResult, Failure};
use crate::config::RunList;
use crate::console::Console;
use crate::domain::{RunStatus, TestOutcome};
use crate::error::Result;
use crate::platform::Platform;
use crate::registry::TestRegistry;
use crate::report::ReportWriter;

/// Per-session state a test body runs against: the scoped console and a
/// read-only view of the symbol catalog.
pub struct TestCx<'a> {
    /// Scoped console for tests exercising interactive code
    pub console: Console,
    catalog: &'a SymbolCatalog,
}

impl<'a> TestCx<'a> {
    /// Fresh context over the session's catalog.
    pub fn new(catalog: &'a SymbolCatalog) -> Self {
        Self {
            console: Console::new(),
            catalog,
        }
    }

    /// The session's symbol catalog.
    pub fn catalog(&self) -> &SymbolCatalog {
        self.catalog
    }
}

/// Runs the configured tests in order and collects their outcomes.
pub struct Executor {
    platform: Platform,
}

impl Executor {
    /// An executor for the given platform; only the standalone platform
    /// makes the executor drive lifecycle hooks itself.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Run every run-list entry found in the registry, in order, and
    /// return one outcome per executed entry.
    pub fn run(
        &self,
        run_list: &RunList,
        registry: &TestRegistry,
        cx: &mut TestCx<'_>,
        writer: &mut ReportWriter,
    ) -> Result<Vec<TestOutcome>> {
        let mut outcomes = Vec::new();
        for name in run_list.entries() {
            match registry.get(name) {
                Some(test) => outcomes.push(self.run_one(name, test, cx, writer)?),
                None => debug!("run-list entry {} is not registered; skipping", name),
            }
        }
        if self.platform.executor_runs_hooks() {
            hooks::cleanup_session(writer)?;
        }
        Ok(outcomes)
    }

    fn run_one(
        &self,
        name: &str,
        test: fn(&mut TestCx<'_>) -> CheckResult,
        cx: &mut TestCx<'_>,
        writer: &mut ReportWriter,
    ) -> Result<TestOutcome> {
        writer.blank()?;
        writer.trace(format!("{}()", name))?;

        let run_hooks = self.platform.executor_runs_hooks();
        if run_hooks {
            hooks::initialize_test(writer)?;
        }

        let invocation = catch_unwind(AssertUnwindSafe(|| test(&mut *cx)));

        // The test's console output belongs in the transcript whether or
        // not the test raised.
        let console_output = cx.console.take_output();
        for line in console_output.lines() {
            writer.line(line)?;
        }

        // Cleanup runs even when the test raised, mirroring a finally
        // block around the invocation.
        if run_hooks {
            hooks::cleanup_test(writer)?;
        }

        let outcome = match invocation {
            Ok(Ok(())) => TestOutcome::passed(name),
            Ok(Err(failure @ Failure::Inconclusive(_))) => {
                TestOutcome::raised(RunStatus::Inconclusive, name, failure.to_string())
            }
            Ok(Err(failure @ Failure::Assertion(_))) => {
                TestOutcome::raised(RunStatus::Failed, name, failure.to_string())
            }
            Err(payload) => TestOutcome::raised(RunStatus::Failed, name, panic_message(payload.as_ref())),
        };
        Ok(outcome)
    }
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "test panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{ensure, inconclusive};
    use crate::config::SourceUnit;
    use crate::registry::TestEntry;

    fn empty_catalog() -> SymbolCatalog {
        SymbolCatalog::from_entries(&[], &[] as &[SourceUnit]).unwrap()
    }

    fn run_with(
        platform: Platform,
        run_list_text: &str,
        entries: Vec<TestEntry>,
    ) -> (Vec<TestOutcome>, String) {
        let catalog = empty_catalog();
        let mut cx = TestCx::new(&catalog);
        let mut writer = ReportWriter::buffer();
        let run_list = RunList::parse(run_list_text);
        let registry = TestRegistry::from_entries(entries);

        let outcomes = Executor::new(platform)
            .run(&run_list, &registry, &mut cx, &mut writer)
            .unwrap();
        (outcomes, writer.into_string().unwrap())
    }

    fn passes(_cx: &mut TestCx) -> CheckResult {
        Ok(())
    }

    fn fails(_cx: &mut TestCx) -> CheckResult {
        ensure(false, "deliberate failure")
    }

    fn undecided(_cx: &mut TestCx) -> CheckResult {
        inconclusive("still being written")
    }

    fn panics(_cx: &mut TestCx) -> CheckResult {
        panic!("went off the rails");
    }

    fn writes_console(cx: &mut TestCx) -> CheckResult {
        cx.console.write_line("hello from the test");
        Ok(())
    }

    #[test]
    fn test_classification_of_each_result_kind() {
        let (outcomes, _) = run_with(
            Platform::Host,
            "good\nbad\nmaybe\nwild\n",
            vec![
                TestEntry::new("good", passes),
                TestEntry::new("bad", fails),
                TestEntry::new("maybe", undecided),
                TestEntry::new("wild", panics),
            ],
        );

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].status, RunStatus::Passed);
        assert_eq!(outcomes[1].status, RunStatus::Failed);
        assert!(outcomes[1].diagnostic.as_deref().unwrap().contains("deliberate failure"));
        assert_eq!(outcomes[2].status, RunStatus::Inconclusive);
        assert!(outcomes[2].diagnostic.as_deref().unwrap().contains("still being written"));
        assert_eq!(outcomes[3].status, RunStatus::Failed);
        assert!(outcomes[3].diagnostic.as_deref().unwrap().contains("went off the rails"));
    }

    #[test]
    fn test_duplicates_run_once_per_occurrence_in_order() {
        let (outcomes, _) = run_with(
            Platform::Host,
            "twice\nother\ntwice\n",
            vec![TestEntry::new("twice", passes), TestEntry::new("other", passes)],
        );
        let names: Vec<&str> = outcomes.iter().map(|o| o.test_name.as_str()).collect();
        assert_eq!(names, vec!["twice", "other", "twice"]);
    }

    #[test]
    fn test_unregistered_names_silently_skipped() {
        let (outcomes, report) = run_with(
            Platform::Host,
            "known\nunknown\n",
            vec![TestEntry::new("known", passes)],
        );
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].test_name, "known");
        assert!(!report.contains("unknown"));
    }

    #[test]
    fn test_standalone_platform_brackets_with_hooks() {
        let (_, report) = run_with(
            Platform::Standalone,
            "good\n",
            vec![TestEntry::new("good", passes)],
        );
        assert!(report.contains("test initialized at"));
        assert!(report.contains("test cleanup is complete"));
        assert!(report.contains("session cleanup is complete"));
    }

    #[test]
    fn test_host_platform_never_runs_hooks() {
        let (_, report) = run_with(Platform::Host, "good\n", vec![TestEntry::new("good", passes)]);
        assert!(!report.contains("test initialized at"));
        assert!(!report.contains("cleanup"));
    }

    #[test]
    fn test_cleanup_hook_runs_even_when_test_panics() {
        let (outcomes, report) = run_with(
            Platform::Standalone,
            "wild\n",
            vec![TestEntry::new("wild", panics)],
        );
        assert_eq!(outcomes[0].status, RunStatus::Failed);
        assert!(report.contains("test cleanup is complete"));
    }

    #[test]
    fn test_console_output_lands_in_transcript_under_header() {
        let (_, report) = run_with(
            Platform::Host,
            "chatty\n",
            vec![TestEntry::new("chatty", writes_console)],
        );
        let header_at = report.find("***** chatty()").unwrap();
        let output_at = report.find("hello from the test").unwrap();
        assert!(header_at < output_at);
    }

    #[test]
    fn test_panic_message_extraction() {
        assert_eq!(panic_message(&"literal"), "literal");
        assert_eq!(panic_message(&"owned".to_string()), "owned");
        assert_eq!(panic_message(&42_u32), "test panicked");
    }
}
