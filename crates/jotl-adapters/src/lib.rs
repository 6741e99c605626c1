//! Infrastructure adapters for Jotl.
//!
//! This crate implements the ports defined in `jotl-core::application::ports`.
//! It contains all external dependencies and I/O operations except the
//! terminal ones, which live in the CLI.

pub mod builtin_templates;
pub mod codec;
pub mod filesystem;
pub mod process;
pub mod renderer;

// Re-export commonly used adapters
pub use codec::YamlSettingsCodec;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::SystemCommandRunner;
pub use renderer::BuiltinRenderer;
