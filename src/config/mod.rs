//! Configuration for a test session.
//!
//! Two hand-maintained free-form text blocks drive a session:
//! 1. The source-unit manifest: one suite file name per line.
//! 2. The run-list manifest: one test name per line, in execution order.
//!
//! Both are embedded below and parsed with line-anchored patterns; the CLI
//! may substitute the run-list text from a file. A `//` at the start of a
//! line (after leading whitespace) comments that line out.

use std::fs;
use std::path::Path;

use crate::error::{Result, TestrigError};

pub use self::run_list::RunList;
pub use self::source_units::{SourceUnit, parse_source_units};

mod run_list;
mod source_units;

/// Name of the self-check test appended to every run list, so at least one
/// test always runs. It fails while any suite skips part of its cases.
pub const SELF_CHECK_TEST: &str = "all_cases_enabled";

/// Suite files that register tests and compile-time flags with the engine.
/// Each name is on its own line; text after the extension is ignored.
pub const SOURCE_UNIT_MANIFEST: &str = "
    selfcheck.rs
    smoke.rs
";

/// Tests to run, in order. A name listed twice runs twice. The optional
/// `suites::` prefix and trailing parentheses or comma are accepted and
/// ignored, as is anything after the name. Insert `//` before a name to
/// bench it without deleting the line.
pub const RUN_LIST_MANIFEST: &str = "
    console_echo_uppercases_input
//  nonexistent_test                    // enable to see the mismatch report
    suites::scripted_input_is_restored()
//  console_echo_uppercases_input       // duplicate; enable to run the echo test twice
";

/// Load the run list, either from an explicit file or from the embedded
/// manifest. File contents are parsed with the same rules as the manifest.
pub fn load_run_list(explicit_path: Option<&Path>) -> Result<RunList> {
    let text = match explicit_path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            TestrigError::Config(format!("Failed to read run list {}: {}", path.display(), e))
        })?,
        None => RUN_LIST_MANIFEST.to_string(),
    };
    Ok(RunList::parse(&text))
}

/// Parse the embedded source-unit manifest.
pub fn load_source_units() -> Vec<SourceUnit> {
    parse_source_units(SOURCE_UNIT_MANIFEST)
}
