//! Selection steps shown by the interactive wizard.
//!
//! The catalog is plain data: three steps (driver, log level, git), each with
//! a header and an ordered list of options. The project name is collected as
//! free text and has no entry here.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::value_objects::{LogLevel, StorageDriver};

/// Identifies a step in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepKey {
    Driver,
    LogLevel,
    Git,
}

impl StepKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::LogLevel => "log_level",
            Self::Git => "git",
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub label: &'static str,
    pub description: &'static str,
    /// Machine value the option resolves to (parsed by the resolver).
    pub value: &'static str,
}

impl SelectOption {
    const fn new(label: &'static str, description: &'static str, value: &'static str) -> Self {
        Self {
            label,
            description,
            value,
        }
    }
}

/// Immutable descriptor for one interactive step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStep {
    pub key: StepKey,
    pub name: &'static str,
    pub header: &'static str,
    pub options: Vec<SelectOption>,
    /// Value pre-selected when the prompt opens.
    pub default: Option<&'static str>,
}

impl SelectionStep {
    /// Index of the default option, or the first option.
    pub fn default_index(&self) -> usize {
        self.default
            .and_then(|value| self.options.iter().position(|o| o.value == value))
            .unwrap_or(0)
    }

    pub fn option(&self, index: usize) -> Option<&SelectOption> {
        self.options.get(index)
    }
}

/// All selection steps, keyed by [`StepKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    steps: BTreeMap<StepKey, SelectionStep>,
}

impl StepCatalog {
    /// Build the catalog. The defaults only decide which option starts highlighted.
    pub fn new(driver_default: Option<StorageDriver>, log_level_default: Option<LogLevel>) -> Self {
        let mut steps = BTreeMap::new();

        steps.insert(
            StepKey::Driver,
            SelectionStep {
                key: StepKey::Driver,
                name: "Database Driver",
                header: "What database driver do you want to use in your Jotl project?",
                options: vec![
                    SelectOption::new(
                        "Sqlite",
                        "Store logs in a lightweight, file-based SQLite database",
                        StorageDriver::Sqlite.as_str(),
                    ),
                    SelectOption::new(
                        "Postgres",
                        "Store logs in a robust, production-ready PostgreSQL database",
                        StorageDriver::Postgres.as_str(),
                    ),
                ],
                default: driver_default.map(|d| d.as_str()),
            },
        );

        steps.insert(
            StepKey::LogLevel,
            SelectionStep {
                key: StepKey::LogLevel,
                name: "Log Level",
                header: "Choose log level.",
                options: vec![
                    SelectOption::new(
                        "Info",
                        "Standard information logging",
                        LogLevel::Info.as_str(),
                    ),
                    SelectOption::new(
                        "Debug",
                        "Detailed logging for debugging purposes",
                        LogLevel::Debug.as_str(),
                    ),
                    SelectOption::new(
                        "Warn",
                        "Log warning messages and higher severity issues",
                        LogLevel::Warn.as_str(),
                    ),
                    SelectOption::new(
                        "Error",
                        "Only log errors and critical issues",
                        LogLevel::Error.as_str(),
                    ),
                ],
                default: log_level_default.map(|l| l.as_str()),
            },
        );

        steps.insert(
            StepKey::Git,
            SelectionStep {
                key: StepKey::Git,
                name: "Git Repository",
                header: "Initialize a Git Repository for your Jotl project.",
                options: vec![
                    SelectOption::new(
                        "Yes",
                        "Initialize a new git repository stage all changes",
                        "true",
                    ),
                    SelectOption::new(
                        "Skip",
                        "Proceed without initializing a git repository",
                        "false",
                    ),
                ],
                default: None,
            },
        );

        Self { steps }
    }

    pub fn get(&self, key: StepKey) -> &SelectionStep {
        // Every key is inserted by `new`.
        &self.steps[&key]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = StepKey> + '_ {
        self.steps.keys().copied()
    }
}
