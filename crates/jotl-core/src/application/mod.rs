//! Application layer for Jotl.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (InitService, ProvisioningPipeline)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Value validation lives in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    FieldResolver, InitReport, InitService, PipelineOptions, ProgressCoordinator, ProvisionReport,
    ProvisionStep, ProvisioningPipeline, Resolution, StepOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandOutput, CommandRunner, Filesystem, Indicator, PromptAnswer, Prompter, SettingsCodec,
    TemplateRenderer,
};

pub use error::ApplicationError;
