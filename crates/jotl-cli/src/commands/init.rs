//! Implementation of the `jotl init` command.
//!
//! Responsibility: translate flags into a draft, wire the adapters into the
//! core init service, and display results. No business logic lives here.

use tracing::{info, instrument};

use jotl_adapters::{BuiltinRenderer, LocalFilesystem, SystemCommandRunner, YamlSettingsCodec};
use jotl_core::{
    application::{FieldResolver, InitReport, InitService, ProvisioningPipeline, StepOutcome},
    domain::{Field, ProjectDraft, ProjectName, StepCatalog},
    error::JotlError,
};

use crate::{
    cli::{InitArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::SpinnerIndicator,
    prompt::{PROMPTS_AVAILABLE, terminal_prompter},
};

const SPINNER_MESSAGE: &str = "Setting up your Jotl project...";

/// Execute `jotl init`.
///
/// Dispatch sequence:
/// 1. Refuse early if a prompt would be needed but cannot be shown
/// 2. Print the banner
/// 3. Resolve missing fields and provision via `InitService`
/// 4. Print the summary and, after an interactive run, the equivalent command
#[instrument(skip_all)]
pub fn execute(
    args: InitArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let draft = args.to_draft();
    validate_supplied_name(&draft)?;
    ensure_prompts_possible(&draft)?;

    output.logo()?;

    let pipeline = ProvisioningPipeline::new(
        Box::new(LocalFilesystem::new()),
        Box::new(SystemCommandRunner::new()),
        Box::new(BuiltinRenderer::new()),
        Box::new(YamlSettingsCodec::new()),
    )
    .with_options(config.pipeline_options());
    let catalog = StepCatalog::new(config.defaults.driver, config.defaults.log_level);
    let prompter = terminal_prompter();
    let animate = !output.is_quiet() && output.format() == OutputFormat::Human;

    let report = InitService::new(pipeline)
        .execute(draft, &catalog, &*prompter, std::env::current_dir, || {
            if animate {
                SpinnerIndicator::new(SPINNER_MESSAGE)
            } else {
                SpinnerIndicator::hidden()
            }
        })
        .map_err(|e| {
            if e.is_cancellation() {
                info!(reason = %e, "Init cancelled by user");
                CliError::Cancelled
            } else {
                CliError::Core(e)
            }
        })?;

    show_report(&report, &output)
}

/// Fields a prompt would be needed for, in resolution order.
fn missing_fields(draft: &ProjectDraft) -> Vec<Field> {
    let present = [
        draft.has_name(),
        draft.storage_driver.is_some(),
        draft.log_level.is_some(),
        draft.version_control.is_some(),
    ];
    Field::ORDER
        .into_iter()
        .zip(present)
        .filter(|(_, present)| !present)
        .map(|(field, _)| field)
        .collect()
}

/// A bad `--name` is reported as such, not as a prompt that cannot be shown.
fn validate_supplied_name(draft: &ProjectDraft) -> CliResult<()> {
    match draft.name.as_deref() {
        Some(name) if !name.is_empty() => ProjectName::parse(name)
            .map(|_| ())
            .map_err(|e| CliError::Core(JotlError::from(e))),
        _ => Ok(()),
    }
}

fn ensure_prompts_possible(draft: &ProjectDraft) -> CliResult<()> {
    if FieldResolver::is_complete(draft) {
        return Ok(());
    }
    if !PROMPTS_AVAILABLE {
        return Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        });
    }
    if !console::user_attended_stderr() {
        let missing: Vec<_> = missing_fields(draft)
            .into_iter()
            .map(|field| field.as_str())
            .collect();
        return Err(CliError::InvalidInput {
            message: format!(
                "no terminal to prompt on; pass the missing values as flags ({})",
                missing.join(", ")
            ),
        });
    }
    Ok(())
}

fn show_report(report: &InitReport, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(report)?;
        return Ok(());
    }

    if report.already_initialized {
        output.warning(&format!(
            "{} already had a Jotl project; existing files were kept or refreshed",
            report.working_dir.display()
        ))?;
    }

    output.success(&format!(
        "Jotl project '{}' initialized in {}",
        report.config.name,
        report.working_dir.display()
    ))?;
    output.print(&format!(
        "  driver: {}  log level: {}  git: {}",
        report.config.storage_driver,
        report.config.log_level,
        if report.config.version_control { "yes" } else { "no" }
    ))?;

    for (step, outcome) in &report.provisioning.steps {
        let marker = match outcome {
            StepOutcome::Done => "done",
            StepOutcome::Skipped => "skipped",
        };
        output.print(&format!("    {:<32} {marker}", step.to_string()))?;
    }
    output.print("")?;

    if let Some(command) = &report.command_hint {
        output.tip(
            "Repeat the equivalent Jotl with the following non-interactive command:",
            std::slice::from_ref(command),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotl_core::domain::{LogLevel, StorageDriver};

    #[test]
    fn complete_draft_needs_no_prompt() {
        let draft = ProjectDraft::new()
            .with_name("demo")
            .with_storage_driver(StorageDriver::Sqlite)
            .with_log_level(LogLevel::Info)
            .with_version_control(false);
        assert!(missing_fields(&draft).is_empty());
        assert!(ensure_prompts_possible(&draft).is_ok());
    }

    #[test]
    fn missing_fields_keep_resolution_order() {
        let draft = ProjectDraft::new().with_log_level(LogLevel::Warn);
        assert_eq!(
            missing_fields(&draft),
            vec![Field::Name, Field::StorageDriver, Field::VersionControl]
        );
    }

    #[test]
    fn invalid_name_fails_before_prompt_check() {
        let draft = ProjectDraft::new().with_name("bad name");
        let err = validate_supplied_name(&draft).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("bad name"), "{err}");
    }

    #[test]
    fn absent_or_empty_name_is_left_to_the_prompt() {
        assert!(validate_supplied_name(&ProjectDraft::new()).is_ok());
        assert!(validate_supplied_name(&ProjectDraft::new().with_name("")).is_ok());
        assert!(validate_supplied_name(&ProjectDraft::new().with_name("acme/api")).is_ok());
    }

    #[test]
    fn empty_name_counts_as_missing() {
        let draft = ProjectDraft::new()
            .with_name("")
            .with_storage_driver(StorageDriver::Postgres)
            .with_log_level(LogLevel::Debug)
            .with_version_control(true);
        assert_eq!(missing_fields(&draft), vec![Field::Name]);
    }
}
