//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `jotl-adapters` crate provides file-system, process, codec, and
//! rendering implementations; the CLI crate provides the terminal ones
//! (`Prompter`, `Indicator`).

use std::io;
use std::path::Path;

use crate::domain::{JotlSettings, RenderContext, SelectionStep, TemplateKind};
use crate::error::JotlResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `jotl_adapters::filesystem::LocalFilesystem` (production)
/// - `jotl_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> JotlResult<()>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> JotlResult<()>;

    /// Append content to an existing file.
    fn append_file(&self, path: &Path, content: &str) -> JotlResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> JotlResult<String>;

    /// Create an empty file unless something already exists at `path`.
    /// Returns `true` if a file was created.
    fn create_file_if_missing(&self, path: &Path) -> JotlResult<bool>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;
}

/// Result of running an external process to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn with_exit_code(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Port for running external binaries (`git`, the package installer).
///
/// Implemented by `jotl_adapters::process::SystemCommandRunner`.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` inside `dir` and wait for it.
    ///
    /// Returns `Err` only when the process could not be started; a non-zero
    /// exit is reported through [`CommandOutput::exit_code`].
    fn run(&self, program: &str, args: &[String], dir: &Path) -> JotlResult<CommandOutput>;
}

/// Port for expanding the static templates (docker-compose, `.env`).
///
/// Implemented by `jotl_adapters::renderer::BuiltinRenderer`.
pub trait TemplateRenderer: Send + Sync {
    /// Render `kind` with every placeholder substituted from `context`.
    fn render(&self, kind: TemplateKind, context: &RenderContext) -> JotlResult<String>;
}

/// Port for the configuration file format.
///
/// Implemented by `jotl_adapters::codec::YamlSettingsCodec`.
pub trait SettingsCodec: Send + Sync {
    fn encode(&self, settings: &JotlSettings) -> JotlResult<String>;

    fn decode(&self, text: &str) -> JotlResult<JotlSettings>;
}

/// Outcome of one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAnswer<T> {
    Answered(T),
    Cancelled,
}

/// Port for the interactive prompt renderer.
///
/// Errors are renderer failures (terminal gone, not a TTY); a user abort is
/// [`PromptAnswer::Cancelled`], never an error.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Free-text input under `header`.
    fn input(&self, header: &str) -> io::Result<PromptAnswer<String>>;

    /// Choose one of `step.options`; answers with the option index.
    fn select(&self, step: &SelectionStep) -> io::Result<PromptAnswer<usize>>;
}

/// Port for the progress indicator rendered while provisioning runs.
///
/// Driven from the auxiliary thread owned by `ProgressCoordinator`.
pub trait Indicator: Send + 'static {
    /// Advance one frame.
    fn tick(&mut self);

    /// Clear the indicator and hand the terminal back to the shell.
    fn release(&mut self);
}
