//! Smoke suite: exercises the scoped console the way real
//! console-driven code under test would.

use crate::catalog::SymbolEntry;
use crate::checks::{CheckResult, ensure, ensure_eq};
use crate::console::Console;
use crate::executor::TestCx;
use crate::registry::TestEntry;

/// Reads one line and echoes it back uppercased. Stands in for the kind
/// of interactive routine the engine exists to drive.
fn echo_uppercased(console: &mut Console) -> String {
    let line = console.read_line().unwrap_or_default();
    let reply = line.trim().to_uppercase();
    console.write_line(format!("echo: {}", reply));
    reply
}

/// Scripts one input line and checks both the returned value and the
/// captured console transcript.
pub fn console_echo_uppercases_input(cx: &mut TestCx) -> CheckResult {
    let mut console = cx.console.script(" done\n");
    let reply = echo_uppercased(&mut console);
    drop(console);

    ensure_eq("DONE", &reply, "the reply should be the trimmed input, uppercased")?;
    ensure(
        cx.console.output().contains("echo: DONE"),
        "the echo should appear on the captured console",
    )
}

/// Nests two scripts and checks that dropping the inner one restores the
/// outer input source.
pub fn scripted_input_is_restored(cx: &mut TestCx) -> CheckResult {
    let mut outer = cx.console.script("outer line\n");
    {
        let mut inner = outer.script("inner line\n");
        ensure_eq(
            "inner line",
            inner.read_line().unwrap_or_default(),
            "the inner script should be active inside the nested scope",
        )?;
    }
    ensure_eq(
        "outer line",
        outer.read_line().unwrap_or_default(),
        "the outer script should be active again after the inner scope ends",
    )
}

inventory::submit! {
    TestEntry::new("console_echo_uppercases_input", console_echo_uppercases_input)
}

inventory::submit! {
    TestEntry::new("scripted_input_is_restored", scripted_input_is_restored)
}

inventory::submit! {
    SymbolEntry::new("selected_data_only_smoke", cfg!(feature = "selected-data-only"))
}

inventory::submit! {
    SymbolEntry::new("standalone_platform_smoke", cfg!(feature = "standalone-platform"))
}

inventory::submit! {
    SymbolEntry::new("libtest_platform_smoke", cfg!(feature = "libtest-platform"))
}
