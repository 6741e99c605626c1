//! Application layer errors.
//!
//! These errors represent failures in orchestration: prompts, ports, and
//! provisioning steps. Rule violations on values are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::services::pipeline::ProvisionStep;
use crate::domain::Field;
use crate::error::{ErrorCategory, JotlError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The user aborted an interactive step.
    #[error("Cancelled while resolving '{field}'")]
    Cancelled { field: Field },

    /// The prompt renderer itself failed (not a cancellation).
    #[error("Prompt for '{field}' failed: {reason}")]
    PromptFailed { field: Field, reason: String },

    /// A provisioning step failed. Remaining steps were not run.
    #[error("Step {index} ({name}) failed: {source}", index = .step.index(), name = .step.name())]
    StepFailed {
        step: ProvisionStep,
        #[source]
        source: Box<JotlError>,
    },

    /// The environment is missing something the pipeline cannot work around.
    #[error("{key} is not set in git config")]
    FatalPrecondition { key: String },

    /// A panic was caught at the orchestrator boundary.
    #[error("Unexpected failure during provisioning: {message}")]
    UnexpectedPanic { message: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Settings could not be serialized or parsed.
    #[error("Settings codec failed: {reason}")]
    CodecFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// External process could not be spawned or exited unsuccessfully.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// Shared state lock poisoned.
    #[error("Internal lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Cancelled { .. } => vec![
                "Initialization was cancelled before any file was written".into(),
                "Pass --name, --driver, --log and --git to skip the prompts".into(),
            ],
            Self::StepFailed { step, source } => {
                let mut suggestions = vec![format!(
                    "Provisioning stopped at step {} ({})",
                    step.index(),
                    step.name()
                )];
                suggestions.extend(source.suggestions());
                suggestions.push(
                    "Steps already completed are kept; re-running `jotl init` converges".into(),
                );
                suggestions
            }
            Self::FatalPrecondition { key } => vec![
                format!("Set it with: git config --global {key} \"you@example.com\""),
                "Or re-run with --git false to skip repository setup".into(),
            ],
            Self::UnexpectedPanic { .. } => vec![
                "This appears to be a bug in Jotl".into(),
                "Please report this issue at: https://github.com/ebarthur/jotl/issues".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Ensure `{command}` is installed and in your PATH"),
                "Check the command output above for details".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
            Self::FatalPrecondition { .. } => ErrorCategory::Configuration,
            Self::StepFailed { .. }
            | Self::UnexpectedPanic { .. }
            | Self::PromptFailed { .. }
            | Self::RenderingFailed { .. }
            | Self::CodecFailed { .. }
            | Self::FilesystemError { .. }
            | Self::CommandFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
