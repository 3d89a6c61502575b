//! Runner trait and implementations.

use super::invocation::Invocation;
use crate::error::{OpsError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::ExitStatus;
use std::sync::Mutex;
use tokio::process::Command;
use tracing::{debug, info};

/// Executes external commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `invocation` to completion.
    ///
    /// # Errors
    /// Returns [`OpsError::CommandFailed`] on a non-zero exit and
    /// [`OpsError::Spawn`] if the program cannot be started.
    async fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Removes `path` recursively. A missing path is not an error.
    async fn remove_dir_all(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => {
                info!(path = %path.display(), "removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "nothing to remove");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reports an action performed without an external command.
    fn describe(&self, line: &str) {
        info!("{line}");
    }

    /// Whether this runner only reports what it would do.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Runs commands on the host with inherited stdio.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Creates a new system runner.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        info!(command = %invocation, "running");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(ref dir) = invocation.cwd {
            cmd.current_dir(dir);
        }

        let status = cmd.status().await.map_err(|source| OpsError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        if status.success() {
            debug!(program = %invocation.program, "finished");
            Ok(())
        } else {
            Err(OpsError::CommandFailed {
                command: invocation.to_string(),
                code: status.code(),
                signal: terminating_signal(status),
            })
        }
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}

/// Prints each command instead of running it.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    printed: Mutex<Vec<String>>,
}

impl DryRunRunner {
    /// Creates a new dry-run runner.
    pub fn new() -> Self {
        Self::default()
    }

    fn print(&self, line: String) {
        println!("{line}");
        if let Ok(mut printed) = self.printed.lock() {
            printed.push(line);
        }
    }

    /// Command lines printed so far.
    pub fn printed(&self) -> Vec<String> {
        self.printed.lock().map(|lines| lines.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        let line = match invocation.cwd {
            Some(ref dir) => format!("(cd {} && {})", dir.display(), invocation),
            None => invocation.to_string(),
        };
        self.print(line);
        Ok(())
    }

    async fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.print(Invocation::new("rm").arg("-rf").path_arg(path).to_string());
        Ok(())
    }

    fn describe(&self, line: &str) {
        self.print(line.to_string());
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// Runs `invocations` in order, stopping at the first failure.
pub async fn run_all(runner: &dyn CommandRunner, invocations: &[Invocation]) -> Result<()> {
    for invocation in invocations {
        runner.run(invocation).await?;
    }
    Ok(())
}
