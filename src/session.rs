//! Session orchestration.
//!
//! One session is one end-to-end pass: open the report sink, parse the
//! manifests, build the symbol catalog and the registry, execute the run
//! list, and render the aggregated report. Everything is created fresh
//! here and dropped at the end; only the report file, if any, outlives
//! the run.

use std::path::PathBuf;

use log::info;

use crate::catalog::SymbolCatalog;
use crate::config::{self, RunList};
use crate::error::Result;
use crate::executor::{Executor, TestCx};
use crate::platform::Platform;
use crate::registry::TestRegistry;
use crate::report::{MismatchReport, Report, ReportWriter};

/// Caller-supplied knobs for one session.
#[derive(Debug, Default, Clone)]
pub struct SessionOptions {
    /// Write the report to this new `.txt` file instead of the terminal
    pub report_path: Option<PathBuf>,
    /// Read the run list from this file instead of the embedded manifest
    pub run_list_path: Option<PathBuf>,
}

/// Run a full session from the embedded (or overridden) configuration.
///
/// The report sink is opened first: a bad report path aborts here, before
/// any test executes. Returns the assembled report; the caller decides
/// what to do with the exit code.
pub fn run(options: &SessionOptions) -> Result<Report> {
    let mut writer = match &options.report_path {
        Some(path) => {
            let writer = ReportWriter::to_file(path)?;
            println!(
                "[The remaining report output is written to file \"{}\".]",
                path.display()
            );
            writer
        }
        None => ReportWriter::stdout(),
    };

    let run_list = config::load_run_list(options.run_list_path.as_deref())?;
    let units = config::load_source_units();
    let catalog = SymbolCatalog::build(&units)?;
    let registry = TestRegistry::discover();

    let report = run_pipeline(&run_list, &registry, &catalog, &mut writer)?;
    writer.flush()?;
    Ok(report)
}

/// Drive the pipeline over already-built collaborators. `run` feeds the
/// discovered set through here; engine tests supply their own.
pub fn run_pipeline(
    run_list: &RunList,
    registry: &TestRegistry,
    catalog: &SymbolCatalog,
    writer: &mut ReportWriter,
) -> Result<Report> {
    writer.trace("session initialization has begun.")?;
    render_catalog_header(catalog, writer)?;

    info!(
        "executing {} run-list entries against {} registered tests on the {} platform",
        run_list.len(),
        registry.len(),
        catalog.platform()
    );

    let mut cx = TestCx::new(catalog);
    let outcomes = Executor::new(Platform::active()).run(run_list, registry, &mut cx, writer)?;

    let mismatch = MismatchReport::compute(registry, run_list);
    let report = Report::assemble(outcomes, mismatch)?;
    report.render(writer)?;
    Ok(report)
}

/// Transcript header: active flags per unit, then a paragraph for any
/// unit that registered no flags at all (a missing or out-of-date flag
/// block in that file; reported, not fatal).
fn render_catalog_header(catalog: &SymbolCatalog, writer: &mut ReportWriter) -> Result<()> {
    for (file, flags) in catalog.active_by_unit() {
        writer.trace(format!(
            "The following compile-time flag{} active in source unit {}:",
            if flags.len() > 1 { "s are" } else { " is" },
            file
        ))?;
        for flag in &flags {
            writer.line(format!("          {}", flag))?;
        }
        writer.blank()?;
    }

    let missing = catalog.units_without_flags();
    if !missing.is_empty() {
        writer.blank()?;
        writer.trace(format!(
            "Error -- the following source unit{} no compile-time flags registered: {}",
            if missing.len() > 1 { "s have" } else { " has" },
            missing.join(", ")
        ))?;
        writer.line("      (the unit's flag block may be missing or out of date)")?;
        writer.blank()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SymbolEntry;
    use crate::config::SourceUnit;
    use crate::error::TestrigError;
    use crate::report::SessionStatus;

    #[test]
    fn test_default_session_to_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        let report = run(&SessionOptions {
            report_path: Some(path.clone()),
            run_list_path: None,
        })
        .unwrap();

        assert_eq!(report.status(), SessionStatus::AllPassed);
        assert_eq!(report.exit_code(), 0);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("session initialization has begun."));
        assert!(text.contains("All listed tests passed."));
    }

    #[test]
    fn test_bad_report_path_aborts_before_anything_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.log");

        let err = run(&SessionOptions {
            report_path: Some(path.clone()),
            run_list_path: None,
        })
        .unwrap_err();

        assert!(matches!(err, TestrigError::ReportPath(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_catalog_header_lists_active_flags() {
        let units = vec![SourceUnit {
            stem: "smoke".to_string(),
            ext: ".rs".to_string(),
        }];
        let entries = [
            SymbolEntry::new("standalone_platform_smoke", true),
            SymbolEntry::new("selected_data_only_smoke", false),
        ];
        let catalog = SymbolCatalog::from_entries(&entries, &units).unwrap();

        let mut writer = ReportWriter::buffer();
        render_catalog_header(&catalog, &mut writer).unwrap();
        let text = writer.into_string().unwrap();

        assert!(text.contains("The following compile-time flag is active in source unit smoke.rs:"));
        assert!(text.contains("          standalone_platform"));
        assert!(!text.contains("selected_data_only"));
    }

    #[test]
    fn test_catalog_header_reports_units_without_flags() {
        let units = vec![
            SourceUnit {
                stem: "smoke".to_string(),
                ext: ".rs".to_string(),
            },
            SourceUnit {
                stem: "orphan".to_string(),
                ext: ".rs".to_string(),
            },
        ];
        let entries = [SymbolEntry::new("standalone_platform_smoke", true)];
        let catalog = SymbolCatalog::from_entries(&entries, &units).unwrap();

        let mut writer = ReportWriter::buffer();
        render_catalog_header(&catalog, &mut writer).unwrap();
        let text = writer.into_string().unwrap();

        assert!(text.contains("Error -- the following source unit has no compile-time flags registered: orphan.rs"));
    }
}
