//! Final-status derivation and status-group rendering.
//!
//! The exit code is a pure function of (mismatch, Passed, Failed,
//! Inconclusive), checked in a fixed order. The trailing arm cannot be
//! reached by any combination the preceding arms miss; reaching it means
//! the derivation itself is broken, which is reported as a defect rather
//! than a normal outcome.

use serde::Serialize;

use crate::domain::{RunStatus, SessionTotals, TestOutcome};
use crate::error::{Result, TestrigError};

use super::ReportWriter;

/// Aggregate status of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// At least one test ran and every outcome was Passed
    AllPassed,
    /// The run list and the registry disagree
    ListMismatch,
    /// At least one test failed
    Failure,
    /// No failures, but at least one inconclusive outcome
    Inconclusive,
    /// Nothing executed
    NothingRan,
}

impl SessionStatus {
    /// Process exit code for this status.
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionStatus::AllPassed => 0,
            SessionStatus::ListMismatch | SessionStatus::NothingRan => 1,
            SessionStatus::Inconclusive => 2,
            SessionStatus::Failure => 3,
        }
    }

    /// Short label for logs and the JSON summary.
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::AllPassed => "all passed",
            SessionStatus::ListMismatch => "list mismatch",
            SessionStatus::Failure => "failure",
            SessionStatus::Inconclusive => "inconclusive",
            SessionStatus::NothingRan => "nothing ran",
        }
    }

    /// Sentence rendered at the foot of the report.
    pub fn summary_line(&self) -> &'static str {
        match self {
            SessionStatus::AllPassed => "  All listed tests passed.",
            SessionStatus::ListMismatch => "  The run list does not match the registered tests.",
            SessionStatus::Failure => "  At least one test failed.",
            SessionStatus::Inconclusive => "  At least one test was inconclusive.",
            SessionStatus::NothingRan => "  No tests were run.",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Derive the final status from the mismatch signal and the totals.
pub fn final_status(mismatch: bool, totals: &SessionTotals) -> Result<SessionStatus> {
    let passed = totals.count(RunStatus::Passed);
    let failed = totals.count(RunStatus::Failed);
    let inconclusive = totals.count(RunStatus::Inconclusive);

    if mismatch {
        Ok(SessionStatus::ListMismatch)
    } else if passed > 0 && failed == 0 && inconclusive == 0 {
        Ok(SessionStatus::AllPassed)
    } else if failed > 0 {
        Ok(SessionStatus::Failure)
    } else if inconclusive > 0 {
        Ok(SessionStatus::Inconclusive)
    } else if passed == 0 {
        Ok(SessionStatus::NothingRan)
    } else {
        Err(TestrigError::Internal(
            "inconsistent summary conditions".to_string(),
        ))
    }
}

/// Render one section per status, in ordinal order.
pub fn render_status_groups(outcomes: &[TestOutcome], writer: &mut ReportWriter) -> Result<()> {
    for status in RunStatus::ALL {
        let group: Vec<&TestOutcome> = outcomes.iter().filter(|o| o.status == status).collect();
        writer.rule()?;
        writer.blank()?;

        if group.is_empty() {
            writer.line(format!("No called test finished with a status of {}.", status))?;
            continue;
        }

        let count_note = if group.len() > 1 {
            format!("{} ", group.len())
        } else {
            String::new()
        };
        writer.line(format!("{} tests", status))?;
        writer.line(format!(
            "  The following {}test{} finished with a status of {}:",
            count_note,
            if group.len() > 1 { "s" } else { "" },
            status
        ))?;

        for outcome in group {
            if status != RunStatus::Passed {
                // Passed entries carry no diagnostics, so they need no
                // separating blank line.
                writer.blank()?;
            }
            writer.line(format!("  - {}", outcome.test_name))?;
            if status != RunStatus::Passed {
                if let Some(diagnostic) = &outcome.diagnostic {
                    writer.line("      Diagnostic message:")?;
                    writer.line(diagnostic)?;
                }
            }
        }
    }
    Ok(())
}
