//! Scoped console abstraction for tests that exercise interactive code.
//!
//! Instead of mutating process-wide stdin/stdout, each session owns a
//! [`Console`] that tests reach through their context. Scripted input is
//! installed with [`Console::script`], which returns an RAII guard: when
//! the guard drops, by normal return or by unwind, the previous input
//! source is restored, so a test that raises mid-script cannot leak its script
//! into subsequent tests.

use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};

/// In-session replacement for the process console: a queue of scripted
/// input lines and a captured output transcript.
#[derive(Debug, Default)]
pub struct Console {
    input: VecDeque<String>,
    output: String,
}

impl Console {
    /// A console with no scripted input and empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the next scripted line, or `None` when the script is
    /// exhausted (the analogue of end-of-input on a real console).
    pub fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    /// Append one line to the captured output.
    pub fn write_line(&mut self, line: impl AsRef<str>) {
        self.output.push_str(line.as_ref());
        self.output.push('\n');
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Drain the captured output, leaving the transcript empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Install `script` as the input source, one queued line per text
    /// line. The returned guard dereferences to the console; dropping it
    /// restores whatever input source was active before, even during an
    /// unwind.
    pub fn script(&mut self, script: &str) -> ScriptGuard<'_> {
        let scripted: VecDeque<String> = script.lines().map(str::to_string).collect();
        let saved = std::mem::replace(&mut self.input, scripted);
        ScriptGuard {
            console: self,
            saved: Some(saved),
        }
    }

    /// Number of scripted lines not yet consumed.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

/// Restores the previously active input source on drop.
pub struct ScriptGuard<'a> {
    console: &'a mut Console,
    saved: Option<VecDeque<String>>,
}

impl Drop for ScriptGuard<'_> {
    fn drop(&mut self) {
        self.console.input = self.saved.take().unwrap_or_default();
    }
}

impl Deref for ScriptGuard<'_> {
    type Target = Console;

    fn deref(&self) -> &Console {
        self.console
    }
}

impl DerefMut for ScriptGuard<'_> {
    fn deref_mut(&mut self) -> &mut Console {
        self.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn test_read_line_returns_none_without_script() {
        let mut console = Console::new();
        assert_eq!(console.read_line(), None);
    }

    #[test]
    fn test_scripted_lines_read_in_order() {
        let mut console = Console::new();
        let mut scripted = console.script(" done\nsecond line\n");
        assert_eq!(scripted.read_line().as_deref(), Some(" done"));
        assert_eq!(scripted.read_line().as_deref(), Some("second line"));
        assert_eq!(scripted.read_line(), None);
    }

    #[test]
    fn test_output_capture_and_drain() {
        let mut console = Console::new();
        console.write_line("first");
        console.write_line("second");
        assert_eq!(console.output(), "first\nsecond\n");
        assert_eq!(console.take_output(), "first\nsecond\n");
        assert_eq!(console.output(), "");
    }

    #[test]
    fn test_guard_restores_previous_script() {
        let mut console = Console::new();
        let mut outer = console.script("outer line\n");
        {
            let mut inner = outer.script("inner line\n");
            assert_eq!(inner.read_line().as_deref(), Some("inner line"));
        }
        // Inner guard dropped: the outer script is active again.
        assert_eq!(outer.read_line().as_deref(), Some("outer line"));
    }

    #[test]
    fn test_script_restored_even_when_panicking_mid_script() {
        let mut console = Console::new();
        let mut outer = console.script("outer line\n");

        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut inner = outer.script("inner a\ninner b\n");
            let _ = inner.read_line();
            panic!("raised mid-script");
        }));
        assert!(result.is_err());

        // The unwind ran the guard's drop: outer input is back intact.
        assert_eq!(outer.remaining_input(), 1);
        assert_eq!(outer.read_line().as_deref(), Some("outer line"));
    }
}
