//! On-disk schema for `jotl/config.yaml` and the values baked into generated files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::project::{ProjectConfig, ProjectLayout};
use crate::domain::value_objects::{LogLevel, StorageDriver};

pub const SETTINGS_VERSION: &str = "1.0.0";
pub const DEFAULT_TIME_FORMAT: &str = "RFC3339";
pub const DEFAULT_REFRESH_RATE: u32 = 5;
pub const DEFAULT_DASHBOARD_PORT: u16 = 8080;

/// Root of the persisted configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JotlSettings {
    pub version: String,
    pub project: ProjectSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub dashboard: DashboardSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version_control: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub driver: StorageDriver,
    /// Connection string or file path.
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSection {
    pub level: LogLevel,
    pub format: LogFormat,
    pub time_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSection {
    pub port: u16,
    pub theme: String,
    pub refresh_rate: u32,
}

impl JotlSettings {
    /// Map a resolved configuration onto the on-disk schema.
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            version: SETTINGS_VERSION.into(),
            project: ProjectSection {
                name: config.name.to_string(),
                description: String::new(),
                version_control: config.version_control,
            },
            database: DatabaseSection {
                driver: config.storage_driver,
                path: connection_string(config.storage_driver),
            },
            logging: LoggingSection {
                level: config.log_level,
                format: LogFormat::Text,
                time_format: DEFAULT_TIME_FORMAT.into(),
            },
            dashboard: DashboardSection {
                port: DEFAULT_DASHBOARD_PORT,
                theme: "system".into(),
                refresh_rate: DEFAULT_REFRESH_RATE,
            },
        }
    }
}

/// Connection string for the chosen driver.
pub fn connection_string(driver: StorageDriver) -> String {
    match driver {
        StorageDriver::Sqlite => ProjectLayout::database_file_relative(),
        StorageDriver::Postgres => PostgresService::default().connection_string(),
    }
}

// ── Postgres service ─────────────────────────────────────────────────────────

/// Fixed values for the docker-compose service of an externally hosted database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresService {
    pub container_name: String,
    pub db_name: String,
    pub user: String,
    pub password: String,
    pub port: String,
    pub volume: String,
}

impl Default for PostgresService {
    fn default() -> Self {
        Self {
            container_name: "jotl-postgres".into(),
            db_name: "jotl".into(),
            user: "jotl".into(),
            password: "jotl_password".into(),
            port: "5432".into(),
            volume: "postgres_data".into(),
        }
    }
}

impl PostgresService {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@localhost:{}/{}?sslmode=disable",
            self.user, self.password, self.port, self.db_name
        )
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new()
            .with_variable("CONTAINER_NAME", &self.container_name)
            .with_variable("DB_NAME", &self.db_name)
            .with_variable("DB_USER", &self.user)
            .with_variable("DB_PASSWORD", &self.password)
            .with_variable("DB_PORT", &self.port)
            .with_variable("VOLUME", &self.volume)
    }
}

/// Variables for the `.env` file.
pub fn env_context(settings: &JotlSettings) -> RenderContext {
    RenderContext::new()
        .with_variable("DB_CONNECTION_STRING", &settings.database.path)
        .with_variable("APP_NAME", &settings.project.name)
}

// ── Rendering ────────────────────────────────────────────────────────────────

/// Static templates the pipeline expands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    DockerCompose,
    EnvFile,
}

impl TemplateKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DockerCompose => "docker-compose",
            Self::EnvFile => "env",
        }
    }
}

/// Named string fields substituted into `{{FIELD}}` placeholders.
///
/// Immutable after creation - `with_variable` consumes and returns a new context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
