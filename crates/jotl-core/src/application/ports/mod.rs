//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `CommandRunner`: External processes (`git`, the driver installer)
//!   - `TemplateRenderer`: Template expansion
//!   - `SettingsCodec`: Config file format
//!   - `Prompter`, `Indicator`: Terminal interaction (implemented in the CLI)

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, Filesystem, Indicator, PromptAnswer, Prompter, SettingsCodec,
    TemplateRenderer,
};

#[cfg(test)]
pub use output::{MockCommandRunner, MockPrompter};
