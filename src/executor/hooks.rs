//! Lifecycle hooks around test invocations.
//!
//! One procedure per lifecycle point. The executor calls these only when
//! the standalone platform is active; a host platform drives its own
//! lifecycle and must not see a second initialization. Anything a suite
//! needs before or after every test belongs here, so the bracketing stays
//! in one place.

use chrono::Local;

use crate::error::Result;
use crate::report::ReportWriter;

/// Runs before each test.
pub fn initialize_test(writer: &mut ReportWriter) -> Result<()> {
    writer.trace(format!("test initialized at {}", Local::now().to_rfc3339()))
}

/// Runs after each test, also when the test raised.
pub fn cleanup_test(writer: &mut ReportWriter) -> Result<()> {
    writer.trace("test cleanup is complete.")?;
    writer.trace("(end of test)")
}

/// Runs once after the last test of the session.
pub fn cleanup_session(writer: &mut ReportWriter) -> Result<()> {
    writer.blank()?;
    writer.trace(format!("the final test completed at {}", Local::now().to_rfc3339()))?;
    writer.trace("session cleanup is complete.")
}
