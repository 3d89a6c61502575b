//! sfops Core - operational targets for the audio_slowfast thesis project.
//!
//! This crate turns each target (dataset provisioning, weight download,
//! cluster sessions and submissions, model driver runs, quality gates,
//! dependency management) into external command lines and runs them through
//! a [`CommandRunner`]. The model driver and the workload manager are opaque:
//! failures are whatever exit status they return.
//!
//! # Example
//!
//! ```rust,no_run
//! use sfops_core::{OpsConfig, OpsContext, ProcessEnv, Project, SystemRunner};
//!
//! # async fn example() -> sfops_core::Result<()> {
//! let cwd = std::env::current_dir()?;
//! let project = Project::discover_from(&cwd, None, &ProcessEnv)?;
//! let config = OpsConfig::discover_and_load(project.root())?;
//! let ctx = OpsContext::new(config, project, Box::new(SystemRunner::new()), Box::new(ProcessEnv));
//! ctx.provision_data().await?;
//! # Ok(())
//! # }
//! ```

pub mod activate;
pub mod audio;
pub mod cluster;
pub mod config;
pub mod deps;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod project;
pub mod provision;
pub mod quality;
pub mod runner;
pub mod tasks;
pub mod weights;

pub use activate::Activation;
pub use cluster::{SessionKind, Submission};
pub use config::{DatasetRepo, EnvSource, OpsConfig, ProcessEnv};
pub use dispatch::HostMode;
pub use driver::{DriverMode, DriverProfile, LABEL_FILTERS, ModelDriver};
pub use error::{OpsError, Result};
pub use project::{Project, ProjectLayout};
pub use provision::ProvisionReport;
pub use runner::{CommandRunner, DryRunRunner, Invocation, SystemRunner};
pub use tasks::OpsContext;
