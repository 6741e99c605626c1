//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "initialize a project".

pub mod init_service;
pub mod pipeline;
pub mod progress;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

pub use init_service::{InitReport, InitService};
pub use pipeline::{
    PipelineOptions, ProvisionReport, ProvisionStep, ProvisioningPipeline, StepOutcome,
};
pub use progress::{DEFAULT_TICK_INTERVAL, ProgressCoordinator};
pub use resolver::{FieldResolver, NAME_HEADER, Resolution};
