//! Init Service - the `jotl init` use case.
//!
//! Resolve every field, fix the working directory, then run the pipeline
//! while the progress indicator animates on its own thread. The indicator is
//! stopped (and joined) before this returns on every path, including panics
//! inside a pipeline step.

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Indicator, Prompter},
        services::{
            pipeline::{ProvisionReport, ProvisioningPipeline},
            progress::{DEFAULT_TICK_INTERVAL, ProgressCoordinator},
            resolver::{FieldResolver, Resolution},
        },
    },
    domain::{Field, ProjectConfig, ProjectDraft, ProjectLayout, StepCatalog},
    error::JotlResult,
};

/// Everything the caller needs to report a finished `init`.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub config: ProjectConfig,
    pub working_dir: PathBuf,
    pub provisioning: ProvisionReport,
    /// A previous run had already provisioned this directory.
    pub already_initialized: bool,
    #[serde(skip)]
    pub prompted: Vec<Field>,
    /// Flag-only command equivalent to the answers given interactively.
    pub command_hint: Option<String>,
}

/// Orchestrates resolution and provisioning.
pub struct InitService {
    pipeline: ProvisioningPipeline,
    tick_interval: Duration,
}

impl InitService {
    pub fn new(pipeline: ProvisioningPipeline) -> Self {
        Self {
            pipeline,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Resolve the draft, then provision.
    ///
    /// `working_dir` is called once, after the last prompt. `indicator` is
    /// called once, right before the pipeline starts, and never if
    /// resolution fails.
    #[instrument(skip_all)]
    pub fn execute<I, W, F>(
        &self,
        draft: ProjectDraft,
        catalog: &StepCatalog,
        prompter: &dyn Prompter,
        working_dir: W,
        indicator: F,
    ) -> JotlResult<InitReport>
    where
        I: Indicator,
        W: FnOnce() -> io::Result<PathBuf>,
        F: FnOnce() -> I,
    {
        let resolution = FieldResolver::new(prompter, catalog).resolve(draft)?;

        let root = working_dir().map_err(|e| ApplicationError::FilesystemError {
            path: PathBuf::from("."),
            reason: e.to_string(),
        })?;

        self.provision(resolution, ProjectLayout::new(root), indicator())
    }

    /// Run the pipeline for an already resolved configuration.
    #[instrument(skip_all, fields(dir = %layout.root().display()))]
    pub fn provision<I: Indicator>(
        &self,
        resolution: Resolution,
        layout: ProjectLayout,
        indicator: I,
    ) -> JotlResult<InitReport> {
        let already_initialized = self.pipeline.is_initialized(&layout);
        if already_initialized {
            warn!(
                dir = %layout.root().display(),
                "Project already initialized, provisioning again"
            );
        }

        let mut progress = ProgressCoordinator::start(indicator, self.tick_interval);
        let (outcome, location) =
            catch_quietly(|| self.pipeline.run(&resolution.config, &layout));
        progress.stop();

        let provisioning = match outcome {
            Ok(result) => result?,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(%message, location = location.as_deref(), "Provisioning panicked");
                return Err(ApplicationError::UnexpectedPanic { message }.into());
            }
        };

        info!(project = %resolution.config.name, "Project initialized");
        Ok(InitReport {
            command_hint: resolution.command_hint(),
            config: resolution.config,
            working_dir: layout.root().to_path_buf(),
            provisioning,
            already_initialized,
            prompted: resolution.prompted,
        })
    }
}

/// `catch_unwind` that keeps the default hook from printing over the
/// spinner. A panic on this thread only records where it happened; panics on
/// other threads go to the previous hook.
fn catch_quietly<R>(f: impl FnOnce() -> R) -> (thread::Result<R>, Option<String>) {
    let owner = thread::current().id();
    let location = Arc::new(Mutex::new(None));
    let previous = Arc::new(panic::take_hook());

    let slot = Arc::clone(&location);
    let fallback = Arc::clone(&previous);
    panic::set_hook(Box::new(move |info| {
        if thread::current().id() != owner {
            (*fallback)(info);
        } else if let Ok(mut slot) = slot.lock() {
            *slot = info.location().map(ToString::to_string);
        }
    }));

    let outcome = panic::catch_unwind(AssertUnwindSafe(f));

    drop(panic::take_hook());
    match Arc::try_unwrap(previous) {
        Ok(hook) => panic::set_hook(hook),
        Err(shared) => panic::set_hook(Box::new(move |info| (*shared)(info))),
    }

    let location = location.lock().ok().and_then(|mut slot| slot.take());
    (outcome, location)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
