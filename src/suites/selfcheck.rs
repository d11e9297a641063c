//! Self-check suite.
//!
//! Builds with the `selected-data-only` feature let suites skip part of
//! their cases, which is handy while debugging one case in isolation but
//! misleading in a full run: everything can look green while half the
//! cases never executed. The self-check test is appended to every run
//! list and fails for as long as that feature is active anywhere, so a
//! filtered build cannot produce a quietly passing report.

use crate::catalog::{SELECTED_DATA_FLAG, SymbolEntry};
use crate::checks::{CheckResult, ensure};
use crate::config::SELF_CHECK_TEST;
use crate::executor::TestCx;
use crate::registry::TestEntry;

/// Passes only when no source unit was compiled to skip test cases.
pub fn all_cases_enabled(cx: &mut TestCx) -> CheckResult {
    let files = cx.catalog().units_with_flag_active(SELECTED_DATA_FLAG);
    ensure(
        files.is_empty(),
        format!(
            "*** Some test cases may have been skipped! ***\n\n      \
             To run every case, rebuild without the \"selected-data-only\"\n      \
             feature reported by the following file(s):\n      {}",
            files.join(", ")
        ),
    )
}

inventory::submit! {
    TestEntry::new(SELF_CHECK_TEST, all_cases_enabled)
}

inventory::submit! {
    SymbolEntry::new("selected_data_only_selfcheck", cfg!(feature = "selected-data-only"))
}

inventory::submit! {
    SymbolEntry::new("standalone_platform_selfcheck", cfg!(feature = "standalone-platform"))
}

inventory::submit! {
    SymbolEntry::new("libtest_platform_selfcheck", cfg!(feature = "libtest-platform"))
}
