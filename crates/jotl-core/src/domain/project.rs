//! Project configuration records and the on-disk layout they provision.
//!
//! A [`ProjectDraft`] is what the user supplied up front; every field may be
//! missing. Resolution turns it into a [`ProjectConfig`] where nothing is
//! missing. The working directory is fixed separately, as a [`ProjectLayout`],
//! at the moment provisioning begins.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{LogLevel, ProjectName, StorageDriver};

/// Name of the directory jotl owns inside the working directory.
pub const PROJECT_DIR: &str = "jotl";

/// Line added to `.gitignore` so the project directory is never committed.
pub const IGNORE_ENTRY: &str = "/jotl";

/// Configuration fields, in the order they are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    StorageDriver,
    LogLevel,
    VersionControl,
}

impl Field {
    /// Resolution order. Must not be reordered.
    pub const ORDER: [Field; 4] = [
        Self::Name,
        Self::StorageDriver,
        Self::LogLevel,
        Self::VersionControl,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::StorageDriver => "driver",
            Self::LogLevel => "log_level",
            Self::VersionControl => "git",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values supplied non-interactively (flags). `None` means "ask".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: Option<String>,
    pub storage_driver: Option<StorageDriver>,
    pub log_level: Option<LogLevel>,
    pub version_control: Option<bool>,
}

impl ProjectDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_storage_driver(mut self, driver: StorageDriver) -> Self {
        self.storage_driver = Some(driver);
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn with_version_control(mut self, enabled: bool) -> Self {
        self.version_control = Some(enabled);
        self
    }

    /// Whether the supplied name counts as present (empty strings do not).
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Fully resolved project intent. Read-only once provisioning starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: ProjectName,
    pub storage_driver: StorageDriver,
    pub log_level: LogLevel,
    pub version_control: bool,
}

/// Every path the pipeline touches, derived from one absolute working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: working_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `.git` entry; a directory for normal repos, a file for worktrees and submodules.
    pub fn git_entry(&self) -> PathBuf {
        self.root.join(".git")
    }

    pub fn gitignore(&self) -> PathBuf {
        self.root.join(".gitignore")
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.project_dir().join("config.yaml")
    }

    pub fn db_dir(&self) -> PathBuf {
        self.project_dir().join("db")
    }

    pub fn database_file(&self) -> PathBuf {
        self.db_dir().join("jotl.db")
    }

    pub fn compose_file(&self) -> PathBuf {
        self.project_dir().join("docker-compose.yml")
    }

    pub fn env_file(&self) -> PathBuf {
        self.project_dir().join(".env")
    }

    /// Database path as written into settings and `.env`, relative to the root.
    pub fn database_file_relative() -> String {
        format!("{PROJECT_DIR}/db/jotl.db")
    }
}
