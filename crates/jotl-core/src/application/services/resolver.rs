//! Field Resolver - turns a [`ProjectDraft`] into a [`ProjectConfig`].
//!
//! Fields are resolved in [`Field::ORDER`]. A supplied value is used as-is
//! (the name is still validated); a missing one is asked for through the
//! [`Prompter`] port.

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{PromptAnswer, Prompter},
    },
    domain::{
        DomainError, Field, LogLevel, ProjectConfig, ProjectDraft, ProjectName, StepCatalog,
        StepKey, StorageDriver,
    },
    error::JotlResult,
};

/// Header shown for the free-text name prompt.
pub const NAME_HEADER: &str = "What is the name of your project?";

/// Outcome of resolution: the config plus which fields were prompted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub config: ProjectConfig,
    pub prompted: Vec<Field>,
}

impl Resolution {
    /// Whether at least one field came from a prompt.
    pub fn is_interactive(&self) -> bool {
        !self.prompted.is_empty()
    }

    /// The equivalent flag-only command, shown only after an interactive run.
    pub fn command_hint(&self) -> Option<String> {
        self.is_interactive().then(|| self.config.init_command())
    }
}

/// Resolves each configuration field from the draft or from a prompt.
pub struct FieldResolver<'a> {
    prompter: &'a dyn Prompter,
    catalog: &'a StepCatalog,
}

impl<'a> FieldResolver<'a> {
    pub fn new(prompter: &'a dyn Prompter, catalog: &'a StepCatalog) -> Self {
        Self { prompter, catalog }
    }

    /// Whether `draft` can be resolved without any prompt.
    pub fn is_complete(draft: &ProjectDraft) -> bool {
        draft.has_name()
            && draft.storage_driver.is_some()
            && draft.log_level.is_some()
            && draft.version_control.is_some()
    }

    /// Resolve every field in order. Stops at the first invalid value or
    /// cancelled prompt.
    #[instrument(skip_all)]
    pub fn resolve(&self, draft: ProjectDraft) -> JotlResult<Resolution> {
        let mut prompted = Vec::new();

        let name = match draft.name.filter(|n| !n.is_empty()) {
            Some(raw) => ProjectName::parse(raw)?,
            None => {
                prompted.push(Field::Name);
                ProjectName::parse(self.prompt_name()?)?
            }
        };

        let storage_driver = match draft.storage_driver {
            Some(driver) => driver,
            None => {
                prompted.push(Field::StorageDriver);
                self.select(StepKey::Driver, Field::StorageDriver)?
                    .parse::<StorageDriver>()?
            }
        };

        let log_level = match draft.log_level {
            Some(level) => level,
            None => {
                prompted.push(Field::LogLevel);
                self.select(StepKey::LogLevel, Field::LogLevel)?
                    .parse::<LogLevel>()?
            }
        };

        let version_control = match draft.version_control {
            Some(enabled) => enabled,
            None => {
                prompted.push(Field::VersionControl);
                let value = self.select(StepKey::Git, Field::VersionControl)?;
                value
                    .parse::<bool>()
                    .map_err(|_| DomainError::InvalidSelection {
                        step: StepKey::Git.to_string(),
                        value: value.to_string(),
                    })?
            }
        };

        let config = ProjectConfig {
            name,
            storage_driver,
            log_level,
            version_control,
        };
        info!(
            name = %config.name,
            driver = %config.storage_driver,
            log_level = %config.log_level,
            git = config.version_control,
            prompted = prompted.len(),
            "Configuration resolved"
        );

        Ok(Resolution { config, prompted })
    }

    fn prompt_name(&self) -> JotlResult<String> {
        debug!("Prompting for project name");
        match self.prompter.input(NAME_HEADER) {
            Ok(PromptAnswer::Answered(raw)) => Ok(raw.trim().to_string()),
            Ok(PromptAnswer::Cancelled) => {
                Err(ApplicationError::Cancelled { field: Field::Name }.into())
            }
            Err(e) => Err(ApplicationError::PromptFailed {
                field: Field::Name,
                reason: e.to_string(),
            }
            .into()),
        }
    }

    /// Run the catalog step for `key` and return the chosen option's value.
    fn select(&self, key: StepKey, field: Field) -> JotlResult<&'static str> {
        let step = self.catalog.get(key);
        debug!(step = step.name, "Prompting for selection");

        let index = match self.prompter.select(step) {
            Ok(PromptAnswer::Answered(index)) => index,
            Ok(PromptAnswer::Cancelled) => return Err(ApplicationError::Cancelled { field }.into()),
            Err(e) => {
                return Err(ApplicationError::PromptFailed {
                    field,
                    reason: e.to_string(),
                }
                .into());
            }
        };

        step.option(index)
            .map(|option| option.value)
            .ok_or_else(|| {
                DomainError::InvalidSelection {
                    step: key.to_string(),
                    value: index.to_string(),
                }
                .into()
            })
    }
}
