//! Report assembly and rendering.
//!
//! Everything the session writes flows through a [`ReportWriter`]; the
//! assembled [`Report`] owns the outcomes, the totals, the mismatch
//! report, and the derived final status, and knows how to render the
//! aggregate sections and a machine-readable [`SessionSummary`].

pub mod aggregate;
pub mod consistency;
pub mod sink;

pub use aggregate::{SessionStatus, final_status, render_status_groups};
pub use consistency::MismatchReport;
pub use sink::ReportWriter;

use serde::Serialize;

use crate::domain::{RunStatus, SessionTotals, TestOutcome};
use crate::error::Result;

/// Prefix on engine trace lines, so they are easy to locate (or strip)
/// in a captured report.
pub const TRACE_PREFIX: &str = "***** ";

/// Serializable session summary for machine consumption.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    /// Final status label
    pub status: SessionStatus,
    /// Derived process exit code
    pub exit_code: i32,
    /// Whether the run list and registry disagreed
    pub mismatch: bool,
    /// Count of passed tests
    pub passed: usize,
    /// Count of failed tests
    pub failed: usize,
    /// Count of inconclusive tests
    pub inconclusive: usize,
    /// Every outcome, in execution order
    pub outcomes: Vec<TestOutcome>,
}

/// The aggregated result of one session.
#[derive(Debug)]
pub struct Report {
    outcomes: Vec<TestOutcome>,
    totals: SessionTotals,
    mismatch: MismatchReport,
    status: SessionStatus,
}

impl Report {
    /// Tally outcomes and derive the final status.
    pub fn assemble(outcomes: Vec<TestOutcome>, mismatch: MismatchReport) -> Result<Self> {
        let totals = SessionTotals::tally(&outcomes);
        let status = final_status(mismatch.any(), &totals)?;
        Ok(Self {
            outcomes,
            totals,
            mismatch,
            status,
        })
    }

    /// The derived final status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The process exit code for this session.
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// Counts per status.
    pub fn totals(&self) -> &SessionTotals {
        &self.totals
    }

    /// Outcomes in execution order.
    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    /// Render the aggregate sections: status groups, the mismatch
    /// report, the totals line, and the final summary sentence.
    pub fn render(&self, writer: &mut ReportWriter) -> Result<()> {
        writer.rule()?;
        writer.blank()?;
        writer.line(format!(
            "{0}This was a test run.  The following results were generated. {0}",
            TRACE_PREFIX
        ))?;

        render_status_groups(&self.outcomes, writer)?;

        writer.rule()?;
        self.mismatch.render(writer)?;

        writer.rule()?;
        writer.blank()?;
        writer.line(format!(
            "Passed: {}  Failed: {}  Inconclusive: {}",
            self.totals.count(RunStatus::Passed),
            self.totals.count(RunStatus::Failed),
            self.totals.count(RunStatus::Inconclusive)
        ))?;
        writer.rule()?;
        writer.blank()?;

        writer.line(self.status.summary_line())?;
        writer.blank()?;
        writer.trace("(end of test summary)")?;
        Ok(())
    }

    /// Build the serializable summary.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            status: self.status,
            exit_code: self.exit_code(),
            mismatch: self.mismatch.any(),
            passed: self.totals.count(RunStatus::Passed),
            failed: self.totals.count(RunStatus::Failed),
            inconclusive: self.totals.count(RunStatus::Inconclusive),
            outcomes: self.outcomes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunList;
    use crate::registry::TestRegistry;

    fn no_mismatch() -> MismatchReport {
        // Empty registry against an empty run list still differs by the
        // appended self-check, so compare matching sets instead.
        let run_list = RunList::parse("");
        let registry = TestRegistry::from_entries([crate::registry::TestEntry::new(
            crate::config::SELF_CHECK_TEST,
            |_cx| Ok(()),
        )]);
        MismatchReport::compute(&registry, &run_list)
    }

    #[test]
    fn test_assemble_derives_status_and_exit_code() {
        let outcomes = vec![TestOutcome::passed("a"), TestOutcome::passed("b")];
        let report = Report::assemble(outcomes, no_mismatch()).unwrap();
        assert_eq!(report.status(), SessionStatus::AllPassed);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.totals().count(RunStatus::Passed), 2);
    }

    #[test]
    fn test_render_contains_all_sections() {
        let outcomes = vec![
            TestOutcome::passed("good"),
            TestOutcome::raised(RunStatus::Failed, "bad", "broke"),
        ];
        let report = Report::assemble(outcomes, no_mismatch()).unwrap();

        let mut writer = ReportWriter::buffer();
        report.render(&mut writer).unwrap();
        let text = writer.into_string().unwrap();

        assert!(text.contains("This was a test run."));
        assert!(text.contains("  - good"));
        assert!(text.contains("  - bad"));
        assert!(text.contains("Passed: 1  Failed: 1  Inconclusive: 0"));
        assert!(text.contains("  At least one test failed."));
        assert!(text.contains("(end of test summary)"));
    }

    #[test]
    fn test_summary_serializes() {
        let outcomes = vec![TestOutcome::passed("good")];
        let report = Report::assemble(outcomes, no_mismatch()).unwrap();
        let json = serde_json::to_value(report.summary()).unwrap();

        assert_eq!(json["status"], "all_passed");
        assert_eq!(json["exit_code"], 0);
        assert_eq!(json["passed"], 1);
        assert_eq!(json["mismatch"], false);
        assert_eq!(json["outcomes"][0]["test_name"], "good");
        assert_eq!(json["outcomes"][0]["status"], "passed");
    }
}
