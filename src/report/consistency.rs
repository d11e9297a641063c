//! Consistency check between the run list and the registry.
//!
//! The two sets are hand-maintained on one side (the run-list manifest)
//! and registration-driven on the other, so they drift: a misspelled
//! run-list entry, a commented-out name, or a newly registered test not
//! yet listed. Each direction of the symmetric difference gets its own
//! paragraph; any non-empty direction makes the session's final status a
//! list mismatch.

use crate::config::RunList;
use crate::error::Result;
use crate::registry::TestRegistry;

use super::ReportWriter;

/// Both directions of the symmetric difference, sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchReport {
    /// Registered with the harness but missing from the run list
    registered_not_listed: Vec<String>,
    /// In the run list (deduplicated) but not registered
    listed_not_registered: Vec<String>,
}

impl MismatchReport {
    /// Compare registry names against deduplicated run-list names.
    pub fn compute(registry: &TestRegistry, run_list: &RunList) -> Self {
        let registered = registry.names();
        let listed = run_list.unique_names();

        let registered_not_listed = registered
            .iter()
            .filter(|name| !listed.contains(*name))
            .map(|name| name.to_string())
            .collect();
        let listed_not_registered = listed
            .iter()
            .filter(|name| !registered.contains(*name))
            .map(|name| name.to_string())
            .collect();

        Self {
            registered_not_listed,
            listed_not_registered,
        }
    }

    /// True when at least one name is on only one side.
    pub fn any(&self) -> bool {
        !self.registered_not_listed.is_empty() || !self.listed_not_registered.is_empty()
    }

    /// Registered names missing from the run list.
    pub fn registered_not_listed(&self) -> &[String] {
        &self.registered_not_listed
    }

    /// Run-list names with no registration.
    pub fn listed_not_registered(&self) -> &[String] {
        &self.listed_not_registered
    }

    /// Render one paragraph per direction, pluralized.
    pub fn render(&self, writer: &mut ReportWriter) -> Result<()> {
        render_difference(
            writer,
            &self.registered_not_listed,
            "registered with the harness",
            "in the run list",
        )?;
        render_difference(
            writer,
            &self.listed_not_registered,
            "in the run list",
            "registered with the harness",
        )
    }
}

fn render_difference(
    writer: &mut ReportWriter,
    names: &[String],
    in_this: &str,
    in_other: &str,
) -> Result<()> {
    writer.blank()?;
    if names.is_empty() {
        writer.line(format!("All tests that are {}", in_this))?;
        writer.line(format!("    are {}.", in_other))?;
        return Ok(());
    }

    let plural = names.len() > 1;
    writer.line(format!(
        "The following test{} {} {}",
        if plural { "s" } else { "" },
        if plural { "are" } else { "is" },
        in_this
    ))?;
    writer.line(format!(
        "    but {} not (yet) {}:",
        if plural { "are" } else { "is" },
        in_other
    ))?;
    for name in names {
        writer.line(format!("      {}()", name))?;
    }
    Ok(())
}
