//! Error types for testrig
//!
//! Centralized error handling using thiserror.
//!
//! Test-level failures are deliberately not represented here: an assertion
//! or inconclusive result raised inside a test is recovered by the executor
//! and recorded as an outcome (see [`crate::checks::Failure`]). The variants
//! below are the fatal paths that abort a session.

use thiserror::Error;

/// All fatal error types that can occur in testrig
#[derive(Debug, Error)]
pub enum TestrigError {
    /// Malformed or conflicting compile-time configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad report-file argument (wrong suffix, or the file already exists)
    #[error("Report path error: {0}")]
    ReportPath(String),

    /// The final-status derivation reached a combination that cannot occur
    #[error("Internal consistency fault: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for testrig operations
pub type Result<T> = std::result::Result<T, TestrigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = TestrigError::Config("two platform flags are active".to_string());
        assert_eq!(err.to_string(), "Configuration error: two platform flags are active");
    }

    #[test]
    fn test_report_path_error() {
        let err = TestrigError::ReportPath("report.log should end with .txt".to_string());
        assert_eq!(err.to_string(), "Report path error: report.log should end with .txt");
    }

    #[test]
    fn test_internal_error() {
        let err = TestrigError::Internal("inconsistent summary conditions".to_string());
        assert_eq!(
            err.to_string(),
            "Internal consistency fault: inconsistent summary conditions"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TestrigError = io_err.into();
        assert!(matches!(err, TestrigError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: TestrigError = json_err.into();
        assert!(matches!(err, TestrigError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(TestrigError::Config("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
