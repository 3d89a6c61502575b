use crate::error::{ClusterError, ClusterResult};
use crate::resources::SlurmResources;
use std::fmt;
use std::path::PathBuf;

/// Job state transitions the training job emails about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailEvent {
    Begin,
    End,
}

impl fmt::Display for MailEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailEvent::Begin => write!(f, "BEGIN"),
            MailEvent::End => write!(f, "END"),
        }
    }
}

/// Email notification target for a batch job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailNotify {
    pub address: String,
    pub events: Vec<MailEvent>,
}

impl MailNotify {
    /// Notify `<user>@<domain>` when the job starts and when it ends.
    pub fn start_and_end(user: &str, domain: &str) -> ClusterResult<Self> {
        let user = user.trim();
        let domain = domain.trim().trim_start_matches('@');
        if user.is_empty() {
            return Err(ClusterError::InvalidMail("user is empty".to_string()));
        }
        if domain.is_empty() {
            return Err(ClusterError::InvalidMail("email domain is empty".to_string()));
        }
        Ok(Self {
            address: format!("{user}@{domain}"),
            events: vec![MailEvent::Begin, MailEvent::End],
        })
    }

    fn to_args(&self) -> Vec<String> {
        let events: Vec<String> = self.events.iter().map(ToString::to_string).collect();
        vec![format!("--mail-type={}", events.join(",")), format!("--mail-user={}", self.address)]
    }
}

/// An interactive allocation that attaches a shell once granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveSession {
    pub resources: SlurmResources,
    pub shell: String,
}

impl InteractiveSession {
    #[must_use]
    pub fn new(resources: SlurmResources) -> Self {
        Self { resources, shell: "/bin/bash".to_string() }
    }

    /// Arguments for `srun`.
    pub fn srun_args(&self) -> ClusterResult<Vec<String>> {
        let mut args = self.resources.to_args()?;
        args.push("--pty".to_string());
        args.push(self.shell.clone());
        Ok(args)
    }
}

/// A detached job that wraps a single shell command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub resources: SlurmResources,
    pub job_name: Option<String>,
    /// stdout and stderr both go here.
    pub log: PathBuf,
    pub mail: Option<MailNotify>,
    pub wrap: String,
}

impl BatchJob {
    /// Arguments for `sbatch`.
    pub fn sbatch_args(&self) -> ClusterResult<Vec<String>> {
        if self.wrap.trim().is_empty() {
            return Err(ClusterError::EmptyCommand);
        }

        let mut args = self.resources.to_args()?;
        if let Some(ref name) = self.job_name {
            args.push(format!("--job-name={name}"));
        }
        let log = self.log.display();
        args.push(format!("--output={log}"));
        args.push(format!("--error={log}"));
        if let Some(ref mail) = self.mail {
            args.extend(mail.to_args());
        }
        args.push(format!("--wrap={}", self.wrap));
        Ok(args)
    }
}

/// Arguments for `squeue` restricted to one user's jobs.
#[must_use]
pub fn squeue_args(user: &str) -> Vec<String> {
    vec!["-u".to_string(), user.to_string()]
}
