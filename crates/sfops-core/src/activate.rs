//! Conda environment activation prelude.
//!
//! Training commands run inside `bash -c '<prelude> && <command>'`, where the
//! prelude sources conda's shell hook and activates the project environment.

use crate::config::{EnvSource, EnvironmentConfig, require_var};
use crate::error::Result;
use crate::runner::{Invocation, shell_quote};
use std::path::PathBuf;

/// Scratch storage root on the cluster.
pub const SCRATCH_ENV: &str = "SCRATCH";

/// A resolved conda activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    conda_root: PathBuf,
    env_path: PathBuf,
}

impl Activation {
    /// Resolves conda and environment paths, defaulting both under `$SCRATCH`.
    ///
    /// `SCRATCH` is only required when a path is not configured explicitly.
    pub fn resolve(config: &EnvironmentConfig, env: &dyn EnvSource) -> Result<Self> {
        let scratch = || require_var(env, SCRATCH_ENV).map(PathBuf::from);

        let conda_root = match config.conda_root {
            Some(ref root) => root.clone(),
            None => scratch()?.join("miniconda3"),
        };
        let env_root = match config.env_root {
            Some(ref root) => root.clone(),
            None => scratch()?.join("envs"),
        };

        Ok(Self { conda_root, env_path: env_root.join(&config.name) })
    }

    #[must_use]
    pub fn hook_script(&self) -> PathBuf {
        self.conda_root.join("etc").join("profile.d").join("conda.sh")
    }

    #[must_use]
    pub fn env_path(&self) -> &PathBuf {
        &self.env_path
    }

    /// `source <conda.sh> && conda activate <env>`
    #[must_use]
    pub fn prelude(&self) -> String {
        format!(
            "source {} && conda activate {}",
            shell_quote(&self.hook_script().display().to_string()),
            shell_quote(&self.env_path.display().to_string())
        )
    }

    /// Shell line running `command` after activation.
    #[must_use]
    pub fn script_for(&self, command: &Invocation) -> String {
        format!("{} && {}", self.prelude(), command)
    }

    /// Wraps `command` in `bash -c` so it runs inside the environment.
    #[must_use]
    pub fn wrap(&self, command: &Invocation) -> Invocation {
        let mut wrapped = Invocation::new("bash").arg("-c").arg(self.script_for(command));
        wrapped.cwd.clone_from(&command.cwd);
        wrapped
    }
}
