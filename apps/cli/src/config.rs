//! Context construction for the CLI.

use anyhow::Context;
use sfops_core::{CommandRunner, DryRunRunner, OpsConfig, OpsContext, ProcessEnv, Project, SystemRunner};
use std::path::PathBuf;
use tracing::debug;

/// Resolve the project and load its configuration.
///
/// Configuration precedence:
/// 1. CLI arguments (handled by clap)
/// 2. Local config file (`<project>/.sfopsrc`)
/// 3. Global config file (`~/.sfops/config.toml`)
/// 4. Defaults
pub fn build_context(project: Option<PathBuf>, dry_run: bool) -> anyhow::Result<OpsContext> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let project = Project::discover_from(&cwd, project, &ProcessEnv).context("Failed to resolve project root")?;
    let config = OpsConfig::discover_and_load(project.root())
        .with_context(|| format!("Failed to load configuration for {}", project.root().display()))?;
    debug!(root = %project.root().display(), dry_run, "loaded configuration");

    let runner: Box<dyn CommandRunner> =
        if dry_run { Box::new(DryRunRunner::new()) } else { Box::new(SystemRunner::new()) };

    Ok(OpsContext::new(config, project, runner, Box::new(ProcessEnv)))
}
