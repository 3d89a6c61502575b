//! Model driver command lines.
//!
//! The driver (`python main.py`) is opaque: it owns training, inference and
//! output formatting. This module only fixes how it is called.

use crate::config::DriverConfig;
use crate::runner::Invocation;
use std::path::{Path, PathBuf};

/// Label categories passed to every driver invocation, in this order.
pub const LABEL_FILTERS: [&str; 8] = ["break", "crush", "pat", "shake", "sharpen", "smell", "throw", "water"];

/// Which configuration file variant the driver reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverProfile {
    Cluster,
    Local,
}

/// What the driver is asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverMode {
    /// Classify a single input, optionally plotting the result.
    Example { input: PathBuf, plot: bool },
    Train,
}

/// Builds driver invocations rooted at the project directory.
#[derive(Debug, Clone)]
pub struct ModelDriver<'a> {
    config: &'a DriverConfig,
    root: &'a Path,
}

impl<'a> ModelDriver<'a> {
    pub fn new(config: &'a DriverConfig, root: &'a Path) -> Self {
        Self { config, root }
    }

    fn config_path(&self, profile: DriverProfile) -> &Path {
        match profile {
            DriverProfile::Cluster => &self.config.cluster_config,
            DriverProfile::Local => &self.config.local_config,
        }
    }

    pub fn invocation(&self, profile: DriverProfile, mode: &DriverMode) -> Invocation {
        let mut inv = Invocation::new(self.config.python.as_str())
            .path_arg(&self.config.entry_point)
            .arg("--model")
            .arg(self.config.model.as_str())
            .arg("--config")
            .path_arg(self.config_path(profile));

        inv = match mode {
            DriverMode::Example { input, plot } => {
                let inv = inv.arg("--example").path_arg(input);
                if *plot { inv.arg("--plot") } else { inv }
            }
            DriverMode::Train => inv.arg("--train"),
        };

        inv.arg("--labels").args(LABEL_FILTERS).current_dir(self.root)
    }

    /// Example on the cluster: cluster config, no plots.
    pub fn example_cluster(&self) -> Invocation {
        self.invocation(
            DriverProfile::Cluster,
            &DriverMode::Example { input: self.config.example_input.clone(), plot: false },
        )
    }

    /// Example on a workstation: local config, with plots.
    pub fn example_local(&self) -> Invocation {
        self.invocation(
            DriverProfile::Local,
            &DriverMode::Example { input: self.config.example_input.clone(), plot: true },
        )
    }

    /// Training run, always with the cluster config.
    pub fn train(&self) -> Invocation {
        self.invocation(DriverProfile::Cluster, &DriverMode::Train)
    }
}
