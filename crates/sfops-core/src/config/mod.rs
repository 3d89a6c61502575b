//! Configuration loading and environment lookup.

mod env;
mod ops_config;

pub use env::{EnvSource, ProcessEnv, require_var};
pub use ops_config::{
    ClusterConfig, DatasetRepo, DepsConfig, DriverConfig, EnvironmentConfig, LOCAL_CONFIG_FILE, OpsConfig,
    ProjectConfig, QualityConfig, WeightsConfig,
};
