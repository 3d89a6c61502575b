//! Test double that records invocations.

use super::invocation::Invocation;
use super::runner::CommandRunner;
use crate::error::{OpsError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

type Hook = Box<dyn Fn(&Invocation) -> Result<()> + Send + Sync>;

pub(crate) struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    hook: Hook,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::with_hook(|_| Ok(()))
    }

    pub(crate) fn with_hook(hook: impl Fn(&Invocation) -> Result<()> + Send + Sync + 'static) -> Self {
        Self { calls: Mutex::new(Vec::new()), hook: Box::new(hook) }
    }

    /// Fails with exit status 1 whenever `program` runs.
    pub(crate) fn failing_on(program: &'static str) -> Self {
        Self::with_hook(move |inv| {
            if inv.program == program {
                Err(OpsError::CommandFailed { command: inv.to_string(), code: Some(1), signal: None })
            } else {
                Ok(())
            }
        })
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|inv| inv.program).collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<()> {
        self.calls.lock().unwrap().push(invocation.clone());
        (self.hook)(invocation)
    }

    /// Recorded as `rm -rf <path>`, then performed.
    async fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.run(&Invocation::new("rm").arg("-rf").path_arg(path)).await?;
        match std::fs::remove_dir_all(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
