//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use jotl_core::domain::{LogLevel, ProjectDraft, StorageDriver};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "jotl",
    bin_name = "jotl",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Log management for developers, set up in one command",
    long_about = "Jotl initializes a log-capture project in the current directory: \
                  storage driver, log level, config file, and an optional git repository.",
    after_help = "EXAMPLES:\n\
        \x20 jotl init\n\
        \x20 jotl init --name demo --driver sqlite --log info --git false\n\
        \x20 jotl config list\n\
        \x20 jotl completions bash > /usr/share/bash-completion/completions/jotl",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a Jotl project in the current directory.
    #[command(
        about = "Initialize a Jotl project",
        after_help = "Any flag left out is asked for interactively.\n\n\
            EXAMPLES:\n\
            \x20 jotl init\n\
            \x20 jotl init -n demo -d postgres -l debug -g\n\
            \x20 jotl init --name demo --driver sqlite --log warn --git false"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 jotl completions bash > ~/.local/share/bash-completion/completions/jotl\n\
            \x20 jotl completions zsh  > ~/.zfunc/_jotl\n\
            \x20 jotl completions fish > ~/.config/fish/completions/jotl.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Jotl CLI configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 jotl config get installer.program\n\
            \x20 jotl config list\n\
            \x20 jotl config init --force"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `jotl init`.
///
/// Declaration order here is the order of the reconstructed command line.
#[derive(Debug, Clone, Default, Args)]
pub struct InitArgs {
    /// Project name.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Name of the project (letters, digits, '_', '-'; segments joined by '.' or '/')"
    )]
    pub name: Option<String>,

    /// Storage driver.
    #[arg(
        short = 'd',
        long = "driver",
        value_name = "DRIVER",
        value_enum,
        help = "Database driver to use"
    )]
    pub driver: Option<DriverArg>,

    /// Log level.
    #[arg(
        short = 'l',
        long = "log",
        value_name = "LEVEL",
        value_enum,
        help = "Minimum log level to record"
    )]
    pub log: Option<LogLevelArg>,

    /// Git repository setup. `--git` alone means `--git true`.
    #[arg(
        short = 'g',
        long = "git",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        help = "Initialize a git repository (true or false)"
    )]
    pub git: Option<bool>,
}

impl InitArgs {
    /// Convert the parsed flags into a draft; absent flags stay `None`.
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            storage_driver: self.driver.map(Into::into),
            log_level: self.log.map(Into::into),
            version_control: self.git,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `jotl completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `jotl config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `installer.program`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a configuration file with the default values.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Accepted `--driver` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum DriverArg {
    /// File-based SQLite database under `jotl/db`.
    Sqlite,
    /// PostgreSQL via a generated docker-compose file.
    Postgres,
}

impl From<DriverArg> for StorageDriver {
    fn from(arg: DriverArg) -> Self {
        match arg {
            DriverArg::Sqlite => StorageDriver::Sqlite,
            DriverArg::Postgres => StorageDriver::Postgres,
        }
    }
}

/// Accepted `--log` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevelArg {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Error => LogLevel::Error,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use jotl_core::domain::INIT_FLAGS;

    fn init_args(args: &[&str]) -> InitArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Init(args) => args,
            other => panic!("expected init, got {other:?}"),
        }
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn init_flag_order_matches_reconstruction_order() {
        let cmd = Cli::command();
        let init = cmd.find_subcommand("init").unwrap();
        let declared: Vec<_> = init
            .get_arguments()
            .filter(|a| !a.is_global_set())
            .filter_map(|a| a.get_long())
            .filter(|long| *long != "help")
            .collect();
        let reconstructed: Vec<_> = INIT_FLAGS
            .iter()
            .map(|f| f.name)
            .filter(|name| *name != "help")
            .collect();
        assert_eq!(declared, reconstructed);
    }

    #[test]
    fn bare_git_flag_means_true() {
        let args = init_args(&["jotl", "init", "--git"]);
        assert_eq!(args.git, Some(true));
    }

    #[test]
    fn git_flag_accepts_explicit_false() {
        let args = init_args(&["jotl", "init", "--git", "false"]);
        assert_eq!(args.git, Some(false));
    }

    #[test]
    fn absent_git_flag_means_ask() {
        let args = init_args(&["jotl", "init", "-n", "demo"]);
        assert_eq!(args.git, None);
        assert_eq!(args.to_draft().version_control, None);
    }

    #[test]
    fn short_flags_fill_the_draft() {
        let args = init_args(&[
            "jotl", "init", "-n", "demo", "-d", "postgres", "-l", "debug", "-g",
        ]);
        let draft = args.to_draft();
        assert_eq!(draft.name.as_deref(), Some("demo"));
        assert_eq!(draft.storage_driver, Some(StorageDriver::Postgres));
        assert_eq!(draft.log_level, Some(LogLevel::Debug));
        assert_eq!(draft.version_control, Some(true));
    }

    #[test]
    fn unknown_driver_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["jotl", "init", "--driver", "mysql"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["jotl", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
