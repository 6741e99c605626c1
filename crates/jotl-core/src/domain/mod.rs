//! Core domain layer for Jotl.
//!
//! This module contains pure logic with no I/O. File-system access, external
//! processes, prompting, and rendering are handled via ports (traits) defined
//! in the application layer.
//!
//! - **Value objects**: `ProjectName`, `StorageDriver`, `LogLevel`
//! - **Records**: `ProjectDraft` (possibly incomplete) and `ProjectConfig` (resolved)
//! - **Catalog**: the selection steps of the wizard
//! - **Reconstruction**: the equivalent non-interactive command line

pub mod command_line;
pub mod error;
pub mod project;
pub mod settings;
pub mod steps;
pub mod value_objects;

pub use command_line::{FlagKind, FlagSpec, FlagValue, INIT_FLAGS, PROGRAM_NAME};
pub use error::{DomainError, ErrorCategory};
pub use project::{Field, IGNORE_ENTRY, PROJECT_DIR, ProjectConfig, ProjectDraft, ProjectLayout};
pub use settings::{JotlSettings, PostgresService, RenderContext, TemplateKind};
pub use steps::{SelectOption, SelectionStep, StepCatalog, StepKey};
pub use value_objects::{LogLevel, ProjectName, StorageDriver};
