// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside step failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("'{name}' is not a valid project name: {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("unknown storage driver: {0}")]
    UnknownStorageDriver(String),

    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),

    #[error("'{value}' is not a valid answer for step '{step}'")]
    InvalidSelection { step: String, value: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, .. } => vec![
                format!("'{}' cannot be used as a project name", name),
                "Use letters, digits, '_' and '-'".into(),
                "Segments may be joined with '.' or '/'".into(),
                "Examples: my-logs, acme/api, service.worker".into(),
            ],
            Self::UnknownStorageDriver(_) => {
                vec!["Supported drivers: sqlite, postgres".into()]
            }
            Self::UnknownLogLevel(_) => {
                vec!["Supported log levels: debug, info, warn, error".into()]
            }
            _ => vec!["See `jotl init --help` for accepted values".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
