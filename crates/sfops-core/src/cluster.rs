//! Slurm command lines for sessions, queue listing and training submission.

use crate::activate::Activation;
use crate::config::{ClusterConfig, EnvSource, require_var};
use crate::error::Result;
use crate::runner::Invocation;
use sfops_cluster::{BatchJob, InteractiveSession, MailNotify, SlurmResources, squeue_args};
use std::path::{Path, PathBuf};

/// Cluster username.
pub const USER_ENV: &str = "USER";
/// Institutional email domain, used when the config leaves it unset.
pub const EMAIL_DOMAIN_ENV: &str = "EMAIL_DOMAIN";

/// Kind of interactive allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Cpu,
    Gpu,
}

/// `srun ... --pty <shell>`
pub fn interactive_session(kind: SessionKind, config: &ClusterConfig) -> Result<Invocation> {
    let resources = match kind {
        SessionKind::Cpu => SlurmResources::interactive_cpu(),
        SessionKind::Gpu => SlurmResources::interactive_gpu(),
    };
    let mut session = InteractiveSession::new(resources);
    session.shell.clone_from(&config.shell);
    Ok(Invocation::new("srun").args(session.srun_args()?))
}

/// `squeue -u $USER`
pub fn list_queued_jobs(env: &dyn EnvSource) -> Result<Invocation> {
    let user = require_var(env, USER_ENV)?;
    Ok(Invocation::new("squeue").args(squeue_args(&user)))
}

/// A prepared `sbatch` call and the log it will write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub invocation: Invocation,
    pub log_path: PathBuf,
}

/// `sbatch` wrapping an activated training command.
///
/// Resources are always [`SlurmResources::batch_training`]; the job mails
/// `$USER@<domain>` when it starts and when it ends. Slurm runs `--wrap`
/// under `/bin/sh`, so the activated command is handed over as `bash -c`.
pub fn training_submission(
    config: &ClusterConfig,
    env: &dyn EnvSource,
    activation: &Activation,
    training: &Invocation,
    root: &Path,
    log_path: PathBuf,
) -> Result<Submission> {
    let user = require_var(env, USER_ENV)?;
    let domain = match config.email_domain {
        Some(ref domain) => domain.clone(),
        None => require_var(env, EMAIL_DOMAIN_ENV)?,
    };

    let job = BatchJob {
        resources: SlurmResources::batch_training(),
        job_name: config.job_name.clone(),
        log: log_path.clone(),
        mail: Some(MailNotify::start_and_end(&user, &domain)?),
        wrap: activation.wrap(training).to_string(),
    };

    let invocation = Invocation::new("sbatch").args(job.sbatch_args()?).current_dir(root);
    Ok(Submission { invocation, log_path })
}
