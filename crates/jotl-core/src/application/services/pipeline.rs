//! Provisioning Pipeline - the ordered side effects of `jotl init`.
//!
//! Steps run strictly in order against one working directory:
//! 1. Git preflight (identity key present)
//! 2. Git initialization
//! 3. Ignore-file maintenance
//! 4. Directory scaffolding
//! 5. Configuration persistence
//! 6. Driver installation
//! 7. Database bootstrap
//! 8. Environment file
//!
//! The first failure stops the run. Nothing is retried and completed steps
//! are not rolled back; a second run converges instead.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, Filesystem, SettingsCodec, TemplateRenderer},
    },
    domain::{
        IGNORE_ENTRY, JotlSettings, PostgresService, ProjectConfig, ProjectLayout, StorageDriver,
        TemplateKind, settings::env_context,
    },
    error::{JotlError, JotlResult},
};

/// One unit of provisioning work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStep {
    GitPreflight,
    GitInit,
    IgnoreFile,
    Directories,
    PersistConfig,
    InstallDriver,
    BootstrapDatabase,
    EnvFile,
}

impl ProvisionStep {
    /// Execution order.
    pub const ALL: [ProvisionStep; 8] = [
        Self::GitPreflight,
        Self::GitInit,
        Self::IgnoreFile,
        Self::Directories,
        Self::PersistConfig,
        Self::InstallDriver,
        Self::BootstrapDatabase,
        Self::EnvFile,
    ];

    /// 1-based position in the pipeline.
    pub const fn index(&self) -> usize {
        match self {
            Self::GitPreflight => 1,
            Self::GitInit => 2,
            Self::IgnoreFile => 3,
            Self::Directories => 4,
            Self::PersistConfig => 5,
            Self::InstallDriver => 6,
            Self::BootstrapDatabase => 7,
            Self::EnvFile => 8,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::GitPreflight => "git preflight",
            Self::GitInit => "git initialization",
            Self::IgnoreFile => "ignore file",
            Self::Directories => "directory scaffolding",
            Self::PersistConfig => "configuration persistence",
            Self::InstallDriver => "driver installation",
            Self::BootstrapDatabase => "database bootstrap",
            Self::EnvFile => "environment file",
        }
    }
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.index(), self.name())
    }
}

/// What a step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Done,
    /// Not applicable for this configuration, or already in place.
    Skipped,
}

/// Per-step outcomes of a successful run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub steps: Vec<(ProvisionStep, StepOutcome)>,
}

impl ProvisionReport {
    pub fn outcome(&self, step: ProvisionStep) -> Option<StepOutcome> {
        self.steps
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, outcome)| *outcome)
    }

    pub fn done(&self) -> impl Iterator<Item = ProvisionStep> + '_ {
        self.steps
            .iter()
            .filter(|(_, outcome)| *outcome == StepOutcome::Done)
            .map(|(step, _)| *step)
    }
}

/// Knobs for the external commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Git config key that must be set when version control is enabled.
    pub identity_key: String,
    pub installer_program: String,
    /// Arguments placed before the driver package.
    pub installer_args: Vec<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            identity_key: "user.email".into(),
            installer_program: "go".into(),
            installer_args: vec!["get".into(), "-u".into()],
        }
    }
}

/// Runs the provisioning steps against the injected ports.
pub struct ProvisioningPipeline {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    renderer: Box<dyn TemplateRenderer>,
    codec: Box<dyn SettingsCodec>,
    options: PipelineOptions,
}

impl ProvisioningPipeline {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
        renderer: Box<dyn TemplateRenderer>,
        codec: Box<dyn SettingsCodec>,
    ) -> Self {
        Self {
            filesystem,
            runner,
            renderer,
            codec,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Whether a previous run already left a project behind.
    pub fn is_initialized(&self, layout: &ProjectLayout) -> bool {
        self.filesystem.exists(&layout.config_file())
            && (self.filesystem.exists(&layout.db_dir())
                || self.filesystem.exists(&layout.compose_file()))
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// Step failures come back as [`ApplicationError::StepFailed`]. A missing
    /// git identity comes back unwrapped as
    /// [`ApplicationError::FatalPrecondition`] so callers can tell them apart.
    #[instrument(
        skip_all,
        fields(
            project = %config.name,
            driver = %config.storage_driver,
            dir = %layout.root().display()
        )
    )]
    pub fn run(
        &self,
        config: &ProjectConfig,
        layout: &ProjectLayout,
    ) -> JotlResult<ProvisionReport> {
        let settings = JotlSettings::from_config(config);
        let mut report = ProvisionReport::default();

        for step in ProvisionStep::ALL {
            debug!(step = step.index(), name = step.name(), "Running step");

            let outcome = self
                .run_step(step, config, &settings, layout)
                .map_err(|e| wrap_failure(step, e))?;

            debug!(step = step.index(), ?outcome, "Step finished");
            report.steps.push((step, outcome));
        }

        info!("Provisioning completed");
        Ok(report)
    }

    fn run_step(
        &self,
        step: ProvisionStep,
        config: &ProjectConfig,
        settings: &JotlSettings,
        layout: &ProjectLayout,
    ) -> JotlResult<StepOutcome> {
        match step {
            ProvisionStep::GitPreflight => self.git_preflight(config, layout),
            ProvisionStep::GitInit => self.git_init(config, layout),
            ProvisionStep::IgnoreFile => self.ensure_ignore_entry(layout),
            ProvisionStep::Directories => self.create_directories(config, layout),
            ProvisionStep::PersistConfig => self.persist_settings(settings, layout),
            ProvisionStep::InstallDriver => self.install_driver(config, layout),
            ProvisionStep::BootstrapDatabase => self.bootstrap_database(config, layout),
            ProvisionStep::EnvFile => self.write_env_file(settings, layout),
        }
    }

    // -------------------------------------------------------------------------
    // Steps
    // -------------------------------------------------------------------------

    fn git_preflight(
        &self,
        config: &ProjectConfig,
        layout: &ProjectLayout,
    ) -> JotlResult<StepOutcome> {
        if !config.version_control {
            return Ok(StepOutcome::Skipped);
        }

        let key = &self.options.identity_key;
        let args = vec!["config".to_string(), "--get".to_string(), key.clone()];
        let output = self.runner.run("git", &args, layout.root())?;

        match output.exit_code {
            Some(0) => Ok(StepOutcome::Done),
            // `git config --get` exits 1 when the key is not set.
            Some(1) => Err(ApplicationError::FatalPrecondition { key: key.clone() }.into()),
            _ => Err(command_failed("git", &args, &output)),
        }
    }

    fn git_init(&self, config: &ProjectConfig, layout: &ProjectLayout) -> JotlResult<StepOutcome> {
        if !config.version_control {
            return Ok(StepOutcome::Skipped);
        }
        if self.filesystem.exists(&layout.git_entry()) {
            info!("Already a git repository, skipping git init");
            return Ok(StepOutcome::Skipped);
        }

        self.run_checked("git", &["init".to_string()], layout.root())?;
        Ok(StepOutcome::Done)
    }

    fn ensure_ignore_entry(&self, layout: &ProjectLayout) -> JotlResult<StepOutcome> {
        let path = layout.gitignore();
        if self.filesystem.create_file_if_missing(&path)? {
            debug!(path = %path.display(), "Created ignore file");
        }

        let current = self.filesystem.read_to_string(&path)?;
        if current.lines().any(|line| line.trim() == IGNORE_ENTRY) {
            return Ok(StepOutcome::Skipped);
        }

        let mut entry = String::new();
        if !current.is_empty() && !current.ends_with('\n') {
            entry.push('\n');
        }
        entry.push_str(IGNORE_ENTRY);
        entry.push('\n');

        self.filesystem.append_file(&path, &entry)?;
        Ok(StepOutcome::Done)
    }

    fn create_directories(
        &self,
        config: &ProjectConfig,
        layout: &ProjectLayout,
    ) -> JotlResult<StepOutcome> {
        self.filesystem.create_dir_all(&layout.project_dir())?;
        if config.storage_driver.is_file_based() {
            self.filesystem.create_dir_all(&layout.db_dir())?;
        }
        Ok(StepOutcome::Done)
    }

    fn persist_settings(
        &self,
        settings: &JotlSettings,
        layout: &ProjectLayout,
    ) -> JotlResult<StepOutcome> {
        let path = layout.config_file();
        let text = self.codec.encode(settings)?;

        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, &text)?;
        Ok(StepOutcome::Done)
    }

    fn install_driver(
        &self,
        config: &ProjectConfig,
        layout: &ProjectLayout,
    ) -> JotlResult<StepOutcome> {
        let package = config.storage_driver.driver_package();
        let mut args = self.options.installer_args.clone();
        args.push(package.to_string());

        info!(package, "Installing storage driver");
        self.run_checked(&self.options.installer_program, &args, layout.root())?;
        Ok(StepOutcome::Done)
    }

    fn bootstrap_database(
        &self,
        config: &ProjectConfig,
        layout: &ProjectLayout,
    ) -> JotlResult<StepOutcome> {
        match config.storage_driver {
            StorageDriver::Sqlite => {
                let path = layout.database_file();
                if self.filesystem.create_file_if_missing(&path)? {
                    Ok(StepOutcome::Done)
                } else {
                    warn!(
                        path = %path.display(),
                        "Database file already exists, leaving it untouched"
                    );
                    Ok(StepOutcome::Skipped)
                }
            }
            StorageDriver::Postgres => {
                let context = PostgresService::default().render_context();
                let rendered = self.renderer.render(TemplateKind::DockerCompose, &context)?;
                self.filesystem.write_file(&layout.compose_file(), &rendered)?;
                Ok(StepOutcome::Done)
            }
        }
    }

    fn write_env_file(
        &self,
        settings: &JotlSettings,
        layout: &ProjectLayout,
    ) -> JotlResult<StepOutcome> {
        let rendered = self
            .renderer
            .render(TemplateKind::EnvFile, &env_context(settings))?;
        self.filesystem.write_file(&layout.env_file(), &rendered)?;
        Ok(StepOutcome::Done)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Run a command and turn a non-zero exit into an error.
    fn run_checked(&self, program: &str, args: &[String], dir: &Path) -> JotlResult<CommandOutput> {
        let output = self.runner.run(program, args, dir)?;
        if output.success() {
            Ok(output)
        } else {
            Err(command_failed(program, args, &output))
        }
    }
}

fn command_failed(program: &str, args: &[String], output: &CommandOutput) -> JotlError {
    let reason = match (output.stderr.trim(), output.exit_code) {
        (stderr, _) if !stderr.is_empty() => stderr.to_string(),
        (_, Some(code)) => format!("exited with status {code}"),
        (_, None) => "terminated by signal".to_string(),
    };

    ApplicationError::CommandFailed {
        command: format!("{program} {}", args.join(" ")),
        reason,
    }
    .into()
}

fn wrap_failure(step: ProvisionStep, error: JotlError) -> JotlError {
    if error.is_fatal_precondition() {
        return error;
    }
    warn!(step = step.index(), name = step.name(), error = %error, "Step failed");
    ApplicationError::StepFailed {
        step,
        source: Box::new(error),
    }
    .into()
}
