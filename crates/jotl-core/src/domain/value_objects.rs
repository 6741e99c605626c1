//! Domain value objects: ProjectName, StorageDriver, LogLevel.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Text
//! enters the system through clap or a prompt and is parsed here exactly once;
//! everything downstream works with the closed enums and never re-validates.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

static PROJECT_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(?:[./][A-Za-z0-9_-]+)*$").expect("project name pattern is valid")
});

// ── ProjectName ──────────────────────────────────────────────────────────────

/// A validated project identifier.
///
/// Invariant: matches `^[A-Za-z0-9_-]+([./][A-Za-z0-9_-]+)*$`. Enforced at
/// construction, so holding a `ProjectName` proves the name is usable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidProjectName {
                name: raw,
                reason: "name cannot be empty".into(),
            });
        }
        if !PROJECT_NAME_PATTERN.is_match(&raw) {
            return Err(DomainError::InvalidProjectName {
                name: raw,
                reason: "only letters, digits, '_' and '-' separated by '.' or '/' are allowed"
                    .into(),
            });
        }
        Ok(Self(raw))
    }

    /// Check a candidate without allocating a `ProjectName`.
    pub fn is_valid(raw: &str) -> bool {
        PROJECT_NAME_PATTERN.is_match(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProjectName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProjectName> for String {
    fn from(name: ProjectName) -> Self {
        name.0
    }
}

// ── StorageDriver ────────────────────────────────────────────────────────────

/// Where the project stores captured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageDriver {
    /// Local, file-based database inside the project directory.
    Sqlite,
    /// Externally hosted database, run through docker compose.
    Postgres,
}

impl StorageDriver {
    pub const ALL: [StorageDriver; 2] = [Self::Sqlite, Self::Postgres];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }

    /// Whether the data lives in a file under the project directory.
    pub const fn is_file_based(&self) -> bool {
        matches!(self, Self::Sqlite)
    }

    /// Package fetched by the installer for this driver.
    pub const fn driver_package(&self) -> &'static str {
        match self {
            Self::Sqlite => "github.com/mattn/go-sqlite3",
            Self::Postgres => "github.com/lib/pq",
        }
    }
}

impl fmt::Display for StorageDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageDriver {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" => Ok(Self::Postgres),
            other => Err(DomainError::UnknownStorageDriver(other.to_string())),
        }
    }
}

// ── LogLevel ─────────────────────────────────────────────────────────────────

/// Minimum severity recorded by the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(DomainError::UnknownLogLevel(other.to_string())),
        }
    }
}
