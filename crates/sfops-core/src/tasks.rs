//! Operational targets.
//!
//! Each method is one target. Composite targets are linear sequences that
//! stop at the first failing step; nothing is retried or rolled back.

use crate::activate::Activation;
use crate::cluster::{self, SessionKind, Submission};
use crate::config::{EnvSource, OpsConfig};
use crate::deps;
use crate::dispatch::{HostMode, current_hostname};
use crate::driver::ModelDriver;
use crate::error::Result;
use crate::project::{Project, ProjectLayout};
use crate::provision::{self, ProvisionReport};
use crate::quality;
use crate::runner::{CommandRunner, Invocation, run_all};
use crate::weights;
use sfops_cluster::JobLogDir;
use std::path::PathBuf;
use tracing::info;

/// Everything a target needs: configuration, project root, runner and environment.
pub struct OpsContext {
    pub config: OpsConfig,
    pub project: Project,
    pub runner: Box<dyn CommandRunner>,
    pub env: Box<dyn EnvSource>,
}

impl OpsContext {
    pub fn new(
        config: OpsConfig,
        project: Project,
        runner: Box<dyn CommandRunner>,
        env: Box<dyn EnvSource>,
    ) -> Self {
        Self { config, project, runner, env }
    }

    #[must_use]
    pub fn layout(&self) -> ProjectLayout {
        self.project.layout(&self.config)
    }

    /// Whether commands are printed instead of run.
    pub fn is_dry_run(&self) -> bool {
        self.runner.is_dry_run()
    }

    fn driver(&self) -> ModelDriver<'_> {
        ModelDriver::new(&self.config.driver, self.project.root())
    }

    fn activation(&self) -> Result<Activation> {
        Activation::resolve(&self.config.environment, self.env.as_ref())
    }

    /// provision-data
    pub async fn provision_data(&self) -> Result<ProvisionReport> {
        provision::provision_datasets(self.runner.as_ref(), &self.layout(), &self.config.datasets).await
    }

    /// fetch-weights. Returns the bytes written, `None` on a dry run.
    pub async fn fetch_weights(&self, progress: bool) -> Result<Option<u64>> {
        let dest = self.layout().weights_path();
        if self.runner.is_dry_run() {
            self.runner.describe(&format!("download {} -> {}", self.config.weights.url, dest.display()));
            return Ok(None);
        }
        let client = reqwest::Client::new();
        let written = weights::fetch_weights(&client, &self.config.weights.url, &dest, progress).await?;
        Ok(Some(written))
    }

    /// sync-and-update
    pub async fn sync_and_update(&self) -> Result<()> {
        provision::sync_submodules(self.runner.as_ref(), &self.layout()).await
    }

    /// interactive-cpu-session / interactive-gpu-session
    pub async fn interactive_session(&self, kind: SessionKind) -> Result<()> {
        let inv = cluster::interactive_session(kind, &self.config.cluster)?;
        self.runner.run(&inv).await
    }

    /// list-queued-jobs
    pub async fn list_queued_jobs(&self) -> Result<()> {
        let inv = cluster::list_queued_jobs(self.env.as_ref())?;
        self.runner.run(&inv).await
    }

    /// Mode chosen for `hostname`, or for the current host when `None`.
    pub async fn host_mode(&self, hostname: Option<&str>) -> Result<HostMode> {
        let hostname = match hostname {
            Some(name) => name.to_string(),
            None => current_hostname(self.env.as_ref()).await?,
        };
        let mode = HostMode::for_hostname(&hostname, &self.config.cluster.host_marker);
        info!(%hostname, %mode, "selected example mode");
        Ok(mode)
    }

    /// The example invocation for `mode`.
    pub fn example_invocation(&self, mode: HostMode) -> Invocation {
        match mode {
            HostMode::Cluster => self.driver().example_cluster(),
            HostMode::Local => self.driver().example_local(),
        }
    }

    /// run-example-cluster / run-example-local
    pub async fn run_example_in(&self, mode: HostMode) -> Result<()> {
        self.runner.run(&self.example_invocation(mode)).await
    }

    /// run-example: picks the mode from the hostname.
    pub async fn run_example(&self, hostname: Option<&str>) -> Result<HostMode> {
        let mode = self.host_mode(hostname).await?;
        self.run_example_in(mode).await?;
        Ok(mode)
    }

    /// run-quality-checks
    pub async fn run_quality_checks(&self) -> Result<()> {
        run_all(self.runner.as_ref(), &quality::quality_checks(&self.config.quality, self.project.root())).await
    }

    /// run-tests
    pub async fn run_tests(&self) -> Result<()> {
        self.runner.run(&quality::test_run(&self.config.quality, self.project.root())).await
    }

    /// sync-dependencies
    pub async fn sync_dependencies(&self) -> Result<()> {
        self.runner.run(&deps::sync_dependencies(&self.config.deps, self.project.root())).await
    }

    /// The activated training invocation.
    pub fn training_invocation(&self) -> Result<Invocation> {
        Ok(self.activation()?.wrap(&self.driver().train()))
    }

    /// run-training
    pub async fn run_training(&self) -> Result<()> {
        let inv = self.training_invocation()?;
        self.runner.run(&inv).await
    }

    /// reinstall-model-dependency
    pub async fn reinstall_model_dependency(&self) -> Result<()> {
        run_all(self.runner.as_ref(), &deps::reinstall_model(&self.config.deps, self.project.root())).await
    }

    /// reinstall-and-retrain: reinstall, clear checkpoints, train.
    pub async fn reinstall_and_retrain(&self) -> Result<()> {
        // Resolve activation up front so a missing $SCRATCH fails before pip runs.
        let training = self.training_invocation()?;
        self.reinstall_model_dependency().await?;
        self.runner.remove_dir_all(&self.layout().checkpoints_dir()).await?;
        self.runner.run(&training).await
    }

    /// The `sbatch` call for a training job logging to `log_path`.
    pub fn training_submission(&self, log_path: PathBuf) -> Result<Submission> {
        let activation = self.activation()?;
        cluster::training_submission(
            &self.config.cluster,
            self.env.as_ref(),
            &activation,
            &self.driver().train(),
            self.project.root(),
            log_path,
        )
    }

    /// submit-training-job. Returns the job's log path.
    pub async fn submit_training_job(&self) -> Result<PathBuf> {
        let logs = JobLogDir::new(self.layout().logs_dir());
        if !self.runner.is_dry_run() {
            logs.ensure()?;
        }
        let submission = self.training_submission(logs.new_log_path())?;
        self.runner.run(&submission.invocation).await?;
        Ok(submission.log_path)
    }
}
