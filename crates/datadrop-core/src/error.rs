//! Error types module
//!
//! All failures raised by the core crate are unified under [`IntakeError`]. Each
//! variant self-describes how it should be surfaced through [`ErrorMetadata`], so
//! the CLI (or any other front end) can render a message without matching on
//! every variant.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a failed submission
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for presenting an error to the user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the user can recover by correcting input or resubmitting
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from the internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Submission already in flight")]
    SubmissionInFlight,

    #[error("Submission already completed")]
    AlreadySubmitted,

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for IntakeError {
    fn from(err: anyhow::Error) -> Self {
        IntakeError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for IntakeError {
    fn from(err: io::Error) -> Self {
        IntakeError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        IntakeError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for IntakeError {
    fn from(err: uuid::Error) -> Self {
        IntakeError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn intake_error_static_metadata(
    err: &IntakeError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        IntakeError::UnknownSection(_) => (
            "UNKNOWN_SECTION",
            false,
            Some("Run `datadrop sections` to list valid section keys"),
            LogLevel::Debug,
        ),
        IntakeError::Validation(_) => (
            "VALIDATION_ERROR",
            true,
            Some("Fill in the required fields and submit again"),
            LogLevel::Debug,
        ),
        IntakeError::Submission(_) => (
            "SUBMISSION_FAILED",
            true,
            Some("Submit again; staged files are kept"),
            LogLevel::Warn,
        ),
        IntakeError::SubmissionInFlight => (
            "SUBMISSION_IN_FLIGHT",
            true,
            Some("Wait for the current submission to finish"),
            LogLevel::Debug,
        ),
        IntakeError::AlreadySubmitted => (
            "ALREADY_SUBMITTED",
            false,
            None,
            LogLevel::Debug,
        ),
        IntakeError::InvalidCatalog(_) => (
            "INVALID_CATALOG",
            false,
            Some("Check the catalog file for duplicate or missing section keys"),
            LogLevel::Error,
        ),
        IntakeError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Check DATADROP_* environment variables"),
            LogLevel::Error,
        ),
        IntakeError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check the input and try again"),
            LogLevel::Debug,
        ),
        IntakeError::Internal(_) | IntakeError::InternalWithSource { .. } => (
            "INTERNAL_ERROR",
            false,
            None,
            LogLevel::Error,
        ),
    }
}

impl IntakeError {
    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for IntakeError {
    fn error_code(&self) -> &'static str {
        intake_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        intake_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        intake_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        intake_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            IntakeError::Validation(ref msg) => msg.clone(),
            IntakeError::Submission(ref msg) => msg.clone(),
            IntakeError::UnknownSection(ref key) => format!("Unknown section '{}'", key),
            IntakeError::InvalidInput(ref msg) => msg.clone(),
            IntakeError::Internal(_) | IntakeError::InternalWithSource { .. } => {
                "Internal error".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result alias for core operations
pub type IntakeResult<T> = Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_validation() {
        let err = IntakeError::Validation("Company name and contact person are required.".into());
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(
            err.client_message(),
            "Company name and contact person are required."
        );
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_submission() {
        let err = IntakeError::Submission("Server error: 500".into());
        assert_eq!(err.error_code(), "SUBMISSION_FAILED");
        assert!(err.is_recoverable());
        assert!(err.client_message().contains("500"));
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_internal_hides_details() {
        let err = IntakeError::Internal("disk exploded".into());
        assert_eq!(err.client_message(), "Internal error");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = IntakeError::from(anyhow::anyhow!("root cause").context("outer"));
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error with source"));
        assert!(details.contains("Caused by: outer"));
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err = IntakeError::UnknownSection("tv".into());
        assert_eq!(
            err.suggested_action(),
            Some("Run `datadrop sections` to list valid section keys")
        );
        assert_eq!(IntakeError::AlreadySubmitted.suggested_action(), None);
    }
}
