//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, shells};

use jotl_core::domain::PROGRAM_NAME;

use crate::cli::{Cli, CompletionsArgs, Shell};

pub fn execute(args: CompletionsArgs) -> crate::error::CliResult<()> {
    let mut cmd = Cli::command();
    let mut out = io::stdout();

    match args.shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, PROGRAM_NAME, &mut out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, PROGRAM_NAME, &mut out),
        Shell::Fish => generate(shells::Fish, &mut cmd, PROGRAM_NAME, &mut out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, PROGRAM_NAME, &mut out),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, PROGRAM_NAME, &mut out),
    };

    Ok(())
}
