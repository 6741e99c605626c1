//! Rebuilds the fully-flagged command equivalent to an interactive run.
//!
//! The output is printed as a tip after the wizard so the same project can be
//! initialised again without prompts. Flag order follows declaration order.

use crate::domain::project::ProjectConfig;

pub const PROGRAM_NAME: &str = "jotl";

/// How a flag renders on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// `--name value`
    Value,
    /// Plain boolean: bare `--name` when true, omitted when false.
    Switch,
    /// Optional boolean: bare `--name` when true, `--name false` when false.
    /// Absence means "ask", so false has to be spelled out.
    Toggle,
}

/// A declared flag of a subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub kind: FlagKind,
}

/// Flags of `jotl init` in declaration order.
///
/// `git` is a [`FlagKind::Toggle`] rather than a `Switch`: an omitted `--git`
/// makes `init` ask, so a hint that dropped it would prompt again instead of
/// reproducing a "no".
pub const INIT_FLAGS: &[FlagSpec] = &[
    FlagSpec {
        name: "name",
        kind: FlagKind::Value,
    },
    FlagSpec {
        name: "driver",
        kind: FlagKind::Value,
    },
    FlagSpec {
        name: "log",
        kind: FlagKind::Value,
    },
    FlagSpec {
        name: "git",
        kind: FlagKind::Toggle,
    },
    FlagSpec {
        name: "help",
        kind: FlagKind::Switch,
    },
];

/// Final value of one flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Text(String),
    Bool(bool),
}

/// Build `jotl <subcommand> --flag value ...` from declared flags and their values.
///
/// Flags named `help` and flags without a value are skipped.
pub fn non_interactive_command<F>(subcommand: &str, flags: &[FlagSpec], value_of: F) -> String
where
    F: Fn(&str) -> Option<FlagValue>,
{
    let mut command = format!("{PROGRAM_NAME} {subcommand}");

    for flag in flags.iter().filter(|f| f.name != "help") {
        let Some(value) = value_of(flag.name) else {
            continue;
        };

        match (flag.kind, value) {
            (FlagKind::Switch, FlagValue::Bool(true)) => {
                command.push_str(&format!(" --{}", flag.name));
            }
            (FlagKind::Switch, FlagValue::Bool(false)) => {}
            (FlagKind::Toggle, FlagValue::Bool(true)) => {
                command.push_str(&format!(" --{}", flag.name));
            }
            (FlagKind::Toggle, FlagValue::Bool(false)) => {
                command.push_str(&format!(" --{} false", flag.name));
            }
            (_, FlagValue::Text(text)) => {
                command.push_str(&format!(" --{} {}", flag.name, text));
            }
            (FlagKind::Value, FlagValue::Bool(b)) => {
                command.push_str(&format!(" --{} {}", flag.name, b));
            }
        }
    }

    command
}

impl ProjectConfig {
    /// Value of an `init` flag for this configuration.
    pub fn flag_value(&self, flag: &str) -> Option<FlagValue> {
        match flag {
            "name" => Some(FlagValue::Text(self.name.to_string())),
            "driver" => Some(FlagValue::Text(self.storage_driver.to_string())),
            "log" => Some(FlagValue::Text(self.log_level.to_string())),
            "git" => Some(FlagValue::Bool(self.version_control)),
            _ => None,
        }
    }

    /// `jotl init ...` reproducing this configuration without prompts.
    pub fn init_command(&self) -> String {
        non_interactive_command("init", INIT_FLAGS, |flag| self.flag_value(flag))
    }
}
