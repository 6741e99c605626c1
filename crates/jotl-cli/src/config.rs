//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the pieces handed to it
//! ([`PipelineOptions`] and the wizard defaults).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `JOTL_<SECTION>__<KEY>`, e.g. `JOTL_INSTALLER__PROGRAM`
//! 3. Config file (`--config FILE`, or [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use jotl_core::application::PipelineOptions;
use jotl_core::domain::{LogLevel, StorageDriver};

use crate::cli::OutputFormat;

const ENV_PREFIX: &str = "JOTL";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Options pre-selected by the wizard.
    pub defaults: Defaults,
    /// Git preflight settings.
    pub git: GitConfig,
    /// Driver installer invocation.
    pub installer: InstallerConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub driver: Option<StorageDriver>,
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Key that must be set in `git config` before a repository is created.
    pub identity_key: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            identity_key: PipelineOptions::default().identity_key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    pub program: String,
    /// Arguments placed before the driver package.
    pub args: Vec<String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        let options = PipelineOptions::default();
        Self {
            program: options.installer_program,
            args: options.installer_args,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load configuration from defaults, the config file, and the environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.  The
    /// default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let config = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("installer.args"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?;

        config
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in '{}'", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.jotl.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "jotl", "jotl")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".jotl.toml"))
    }

    /// The file that [`AppConfig::load`] reads for this invocation.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }

    /// Settings handed to the provisioning pipeline.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            identity_key: self.git.identity_key.clone(),
            installer_program: self.installer.program.clone(),
            installer_args: self.installer.args.clone(),
        }
    }

    /// Serialize to the on-disk TOML form.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Look up a dotted key such as `installer.program`.
    ///
    /// Returns `None` for unknown keys.  Unset optional values render as an
    /// empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&tree, |node, segment| node.get(segment))?;

        Some(match value {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_owned))
                .collect::<Vec<_>>()
                .join(" "),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jotl.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_match_pipeline_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.pipeline_options(), PipelineOptions::default());
        assert_eq!(cfg.defaults.driver, None);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let (_dir, path) = write_config(
            r#"
[defaults]
driver = "postgres"
log_level = "warn"

[installer]
program = "true"
"#,
        );

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.driver, Some(StorageDriver::Postgres));
        assert_eq!(cfg.defaults.log_level, Some(LogLevel::Warn));
        assert_eq!(cfg.installer.program, "true");
        assert_eq!(cfg.installer.args, vec!["get", "-u"]);
        assert_eq!(cfg.git.identity_key, "user.email");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn unknown_driver_in_file_is_an_error() {
        let (_dir, path) = write_config("[defaults]\ndriver = \"mysql\"\n");
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("jotl.toml"));
    }

    #[test]
    fn toml_output_reloads_to_the_same_config() {
        let mut cfg = AppConfig::default();
        cfg.defaults.log_level = Some(LogLevel::Debug);
        cfg.installer.args = vec!["install".into()];

        let (_dir, path) = write_config(&cfg.to_toml().unwrap());
        assert_eq!(AppConfig::load(Some(&path)).unwrap(), cfg);
    }

    #[test]
    fn get_reads_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("installer.program").as_deref(), Some("go"));
        assert_eq!(cfg.get("installer.args").as_deref(), Some("get -u"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("output.format").as_deref(), Some("auto"));
        assert_eq!(cfg.get("defaults.driver").as_deref(), Some(""));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
