//! Assertion kit for registered tests.
//!
//! A small subset of what a full test platform provides, enough for tests
//! to express pass/fail/inconclusive. The executor classifies an
//! `Err(Failure::Inconclusive)` as [`crate::domain::RunStatus::Inconclusive`]
//! and every other raised failure (including panics) as `Failed`.

use thiserror::Error;

/// A failure raised inside a test body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// A condition the test required did not hold
    #[error("{0}")]
    Assertion(String),

    /// The test could not be proven true or false
    #[error("{0}")]
    Inconclusive(String),
}

/// Return type of every registered test body.
pub type CheckResult = std::result::Result<(), Failure>;

/// Verify that `condition` is true; raise an assertion failure with
/// `message` otherwise.
pub fn ensure(condition: bool, message: impl Into<String>) -> CheckResult {
    if condition {
        Ok(())
    } else {
        Err(Failure::Assertion(format!("ensure failed. {}", message.into())))
    }
}

/// Verify that two values have equal display representations (not that the
/// values themselves are equal), so simple checks need no trait bounds
/// beyond `Display`.
pub fn ensure_eq(
    expected: impl std::fmt::Display,
    actual: impl std::fmt::Display,
    message: impl Into<String>,
) -> CheckResult {
    let exp = expected.to_string();
    let act = actual.to_string();
    if exp == act {
        Ok(())
    } else {
        Err(Failure::Assertion(format!(
            "ensure_eq failed. Expected:\n<{}>. Actual:\n<{}>.  {}",
            exp,
            act,
            message.into()
        )))
    }
}

/// Mark the current test inconclusive. Always raises; typically used while
/// a test is still being written.
pub fn inconclusive(message: impl Into<String>) -> CheckResult {
    Err(Failure::Inconclusive(format!(
        "inconclusive was raised. {}",
        message.into()
    )))
}
