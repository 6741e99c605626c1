//! External process adapter.

use std::path::Path;
use std::process::{Command, Stdio};

use jotl_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner},
    },
    error::JotlResult,
};
use tracing::{debug, instrument};

/// Runs binaries from `PATH` with `std::process::Command`.
///
/// Output is captured, never inherited, so nothing lands on the terminal
/// while the progress indicator is drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip(self, args), fields(args = %args.join(" "), dir = %dir.display()))]
    fn run(&self, program: &str, args: &[String], dir: &Path) -> JotlResult<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::CommandFailed {
                command: format!("{program} {}", args.join(" ")),
                reason: format!("could not start: {e}"),
            })?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(exit_code = ?result.exit_code, "Command finished");
        Ok(result)
    }
}
