//! Platform shim.
//!
//! Maps the mutually exclusive platform feature flags to how lifecycle
//! hooks are driven. Under the standalone platform the executor brackets
//! every test with the hooks itself; under a host platform (cargo's
//! libtest, or an external harness) the host is responsible and the
//! executor must stay out of the way to avoid double-initialization.
//!
//! Conflicting selections across source units are caught by the symbol
//! catalog before execution; this shim only answers "who runs the hooks".

/// The test platform this build runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Built-in executor drives setup/teardown itself
    Standalone,
    /// cargo's libtest harness drives lifecycle
    Libtest,
    /// Some other host harness drives lifecycle
    Host,
}

impl Platform {
    /// The platform selected by this build's feature flags.
    pub fn active() -> Self {
        if cfg!(feature = "libtest-platform") {
            Platform::Libtest
        } else if cfg!(feature = "standalone-platform") {
            Platform::Standalone
        } else {
            Platform::Host
        }
    }

    /// Whether the executor invokes the lifecycle hooks itself.
    pub fn executor_runs_hooks(&self) -> bool {
        matches!(self, Platform::Standalone)
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Standalone => "standalone",
            Platform::Libtest => "libtest",
            Platform::Host => "host",
        }
    }
}
