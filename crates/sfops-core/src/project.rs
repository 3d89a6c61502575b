//! Project root discovery and on-disk layout.
//!
//! The project root is resolved from, in order:
//! 1. An explicit path (the `--project` flag)
//! 2. The `SFOPS_PROJECT` environment variable
//! 3. The nearest ancestor of the starting directory holding `.sfopsrc` or `.git`
//! 4. The starting directory itself

use crate::config::{EnvSource, LOCAL_CONFIG_FILE, OpsConfig};
use crate::error::{OpsError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable pinning the project root.
pub const PROJECT_ENV: &str = "SFOPS_PROJECT";

/// A resolved project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Wraps an existing directory as the project root.
    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(OpsError::Config(format!(
                "project root {} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// Resolves the project root starting from `start`.
    pub fn discover_from(start: &Path, explicit: Option<PathBuf>, env: &dyn EnvSource) -> Result<Self> {
        if let Some(root) = explicit {
            return Self::at(root);
        }
        if let Some(root) = env.var(PROJECT_ENV) {
            return Self::at(root);
        }
        let root = Self::find_marker_upward(start).unwrap_or_else(|| start.to_path_buf());
        debug!(root = %root.display(), "resolved project root");
        Self::at(root)
    }

    fn find_marker_upward(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(LOCAL_CONFIG_FILE).exists() || dir.join(".git").exists())
            .map(Path::to_path_buf)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute layout for this project under `config`.
    #[must_use]
    pub fn layout(&self, config: &OpsConfig) -> ProjectLayout {
        ProjectLayout {
            root: self.root.clone(),
            data_dir: config.project.data_dir.clone(),
            weights_path: config.weights.path.clone(),
            logs_dir: config.project.logs_dir.clone(),
            checkpoints_dir: config.project.checkpoints_dir.clone(),
        }
    }
}

/// Paths the operational targets touch. Stored relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    data_dir: PathBuf,
    weights_path: PathBuf,
    logs_dir: PathBuf,
    checkpoints_dir: PathBuf,
}

impl ProjectLayout {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Submodule path of a dataset, relative to the root (as git wants it).
    #[must_use]
    pub fn dataset_rel(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    #[must_use]
    pub fn dataset_dir(&self, name: &str) -> PathBuf {
        self.root.join(self.dataset_rel(name))
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }

    #[must_use]
    pub fn weights_path(&self) -> PathBuf {
        self.root.join(&self.weights_path)
    }

    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(&self.logs_dir)
    }

    #[must_use]
    pub fn checkpoints_dir(&self) -> PathBuf {
        self.root.join(&self.checkpoints_dir)
    }
}
