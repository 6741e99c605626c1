//! Jotl Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the `jotl init`
//! project scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             jotl-cli (CLI)              │
//! │  (Prompter + Indicator implementations) │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  (FieldResolver, ProvisioningPipeline,  │
//! │   ProgressCoordinator, InitService)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, CommandRunner, Renderer,   │
//! │  SettingsCodec, Prompter, Indicator)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     jotl-adapters (Infrastructure)      │
//! │ (LocalFilesystem, SystemCommandRunner,  │
//! │  BuiltinRenderer, YamlSettingsCodec)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProjectConfig, StepCatalog, settings)  │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jotl_core::prelude::*;
//!
//! let pipeline = ProvisioningPipeline::new(filesystem, runner, renderer, codec);
//! let report = InitService::new(pipeline).execute(
//!     ProjectDraft::new().with_name("demo"),
//!     &StepCatalog::new(None, None),
//!     &prompter,
//!     std::env::current_dir,
//!     || spinner,
//! )?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, InitReport, InitService, PipelineOptions, ProvisionStep,
        ProvisioningPipeline, Resolution,
        ports::{
            CommandOutput, CommandRunner, Filesystem, Indicator, PromptAnswer, Prompter,
            SettingsCodec, TemplateRenderer,
        },
    };
    pub use crate::domain::{
        Field, JotlSettings, LogLevel, ProjectConfig, ProjectDraft, ProjectLayout, ProjectName,
        RenderContext, SelectionStep, StepCatalog, StepKey, StorageDriver, TemplateKind,
    };
    pub use crate::error::{JotlError, JotlResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
