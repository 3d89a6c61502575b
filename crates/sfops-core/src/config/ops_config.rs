//! sfops configuration file support.
//!
//! Every value has a built-in default, so an empty (or absent) file yields a
//! working configuration for the standard project layout.

use crate::error::{OpsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Local configuration file name, looked up in the project root.
pub const LOCAL_CONFIG_FILE: &str = ".sfopsrc";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsConfig {
    /// Project directory layout.
    pub project: ProjectConfig,
    /// Dataset repositories registered as submodules under the data root.
    pub datasets: Vec<DatasetRepo>,
    /// Pretrained weights download.
    pub weights: WeightsConfig,
    /// Conda environment activated before training.
    pub environment: EnvironmentConfig,
    /// Model driver entrypoint.
    pub driver: DriverConfig,
    /// Workload manager settings.
    pub cluster: ClusterConfig,
    /// Formatter and linter settings.
    pub quality: QualityConfig,
    /// Python package management.
    pub deps: DepsConfig,
}

/// Directory layout relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub checkpoints_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            logs_dir: PathBuf::from("logs"),
            checkpoints_dir: PathBuf::from("checkpoints"),
        }
    }
}

/// An external repository tracked as a submodule at `<data_dir>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRepo {
    pub name: String,
    pub url: String,
}

impl DatasetRepo {
    fn new(name: &str, url: &str) -> Self {
        Self { name: name.to_string(), url: url.to_string() }
    }

    /// EPIC-Sounds annotations, EPIC-KITCHENS-100 annotations and the download scripts.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "epic-sounds-annotations",
                "https://github.com/epic-kitchens/epic-sounds-annotations",
            ),
            Self::new(
                "epic-kitchens-100-annotations",
                "https://github.com/epic-kitchens/epic-kitchens-100-annotations",
            ),
            Self::new(
                "epic-kitchens-download-scripts",
                "https://github.com/epic-kitchens/epic-kitchens-download-scripts",
            ),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub url: String,
    /// Destination, relative to the project root.
    pub path: PathBuf,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            url: "https://www.dropbox.com/s/cr0c6xdaggc2wzz/SLOWFAST_EPIC.pyth".to_string(),
            path: PathBuf::from("models/SLOWFAST_EPIC.pyth"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Environment name, activated as `<env_root>/<name>`.
    pub name: String,
    /// Conda installation. Defaults to `$SCRATCH/miniconda3`.
    pub conda_root: Option<PathBuf>,
    /// Directory holding environments. Defaults to `$SCRATCH/envs`.
    pub env_root: Option<PathBuf>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self { name: "slowfast".to_string(), conda_root: None, env_root: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub python: String,
    pub entry_point: PathBuf,
    pub model: String,
    /// Config used on the cluster, for training and cluster examples.
    pub cluster_config: PathBuf,
    /// Config used on workstations.
    pub local_config: PathBuf,
    pub example_input: PathBuf,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            python: "python".to_string(),
            entry_point: PathBuf::from("main.py"),
            model: "audio_slowfast".to_string(),
            cluster_config: PathBuf::from("configs/epic_sounds_hpc.yaml"),
            local_config: PathBuf::from("configs/epic_sounds_local.yaml"),
            example_input: PathBuf::from("data/examples/example.wav"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Hostname substring identifying the cluster.
    pub host_marker: String,
    /// Institutional email domain. Falls back to `$EMAIL_DOMAIN`.
    pub email_domain: Option<String>,
    pub job_name: Option<String>,
    pub shell: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            host_marker: "nyu".to_string(),
            email_domain: None,
            job_name: Some("slowfast-train".to_string()),
            shell: "/bin/bash".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub line_length: u16,
    /// Directory skipped by every tool.
    pub exclude: String,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self { line_length: 120, exclude: "data".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepsConfig {
    pub pip: String,
    pub requirements: PathBuf,
    /// Installed distribution name of the model package.
    pub model_package: String,
    /// Install target for the model package (PyPI name, path or VCS URL).
    pub model_source: String,
}

impl Default for DepsConfig {
    fn default() -> Self {
        Self {
            pip: "pip".to_string(),
            requirements: PathBuf::from("requirements.txt"),
            model_package: "audio_slowfast".to_string(),
            model_source: "git+https://github.com/ekazakos/auditory-slow-fast.git".to_string(),
        }
    }
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            datasets: DatasetRepo::defaults(),
            weights: WeightsConfig::default(),
            environment: EnvironmentConfig::default(),
            driver: DriverConfig::default(),
            cluster: ClusterConfig::default(),
            quality: QualityConfig::default(),
            deps: DepsConfig::default(),
        }
    }
}

impl OpsConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| OpsError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let table = read_table(path)?;
        table
            .try_into()
            .map_err(|e: toml::de::Error| OpsError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| OpsError::Config(format!("Failed to serialize: {}", e)))
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sfops").join("config.toml"))
    }

    /// Get local configuration file path for a project root.
    pub fn local_path(project_root: &Path) -> PathBuf {
        project_root.join(LOCAL_CONFIG_FILE)
    }

    /// Discover and load configuration files.
    ///
    /// Loads configuration from:
    /// 1. Global config (~/.sfops/config.toml)
    /// 2. Local config (<project>/.sfopsrc)
    ///
    /// Local values override global ones key by key. Missing files are
    /// skipped; unreadable or malformed files are errors.
    pub fn discover_and_load(project_root: &Path) -> Result<Self> {
        let global = Self::default_global_path();
        let local = Self::local_path(project_root);
        Self::load_layered(global.as_deref().into_iter().chain(std::iter::once(local.as_path())))
    }

    /// Load and merge the given files in order; later files win.
    pub fn load_layered<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Result<Self> {
        let mut merged = toml::Table::new();
        for path in paths {
            if !path.exists() {
                debug!(path = %path.display(), "config file not present");
                continue;
            }
            debug!(path = %path.display(), "loading config file");
            merge_tables(&mut merged, read_table(path)?);
        }
        merged.try_into().map_err(|e: toml::de::Error| OpsError::Config(e.to_string()))
    }
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| OpsError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    content
        .parse::<toml::Table>()
        .map_err(|e| OpsError::Config(format!("{}: {}", path.display(), e)))
}

/// Merges `overlay` into `base`. Nested tables merge recursively; any other
/// value (arrays included) replaces the base value.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
