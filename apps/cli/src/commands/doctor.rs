//! Doctor command implementation.
//!
//! Validates the project layout, environment variables and external tools.
//! Only reports; never fails because something is missing.

use colored::Colorize;
use serde_json::json;
use sfops_core::activate::SCRATCH_ENV;
use sfops_core::cluster::{EMAIL_DOMAIN_ENV, USER_ENV};
use sfops_core::{EnvSource, OpsContext};
use std::path::{Path, PathBuf};

/// Tools the targets shell out to.
const TOOLS: [&str; 9] = ["git", "python", "srun", "sbatch", "squeue", "isort", "ruff", "black", "pytest"];

/// Execute the doctor command.
pub fn execute(ctx: &OpsContext, json_output: bool) -> anyhow::Result<()> {
    let report = DoctorReport::collect(ctx);
    if json_output {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        report.print();
    }
    Ok(())
}

struct DoctorReport {
    root: PathBuf,
    datasets: Vec<(String, bool)>,
    weights: (PathBuf, bool),
    env: Vec<(&'static str, Option<String>)>,
    email_domain_configured: bool,
    tools: Vec<(&'static str, Option<PathBuf>)>,
}

impl DoctorReport {
    fn collect(ctx: &OpsContext) -> Self {
        let layout = ctx.layout();
        let datasets = ctx
            .config
            .datasets
            .iter()
            .map(|repo| (repo.name.clone(), layout.dataset_dir(&repo.name).exists()))
            .collect();
        let weights_path = layout.weights_path();
        let weights_present = weights_path.is_file();
        let env = [SCRATCH_ENV, USER_ENV, EMAIL_DOMAIN_ENV]
            .into_iter()
            .map(|key| (key, ctx.env.var(key)))
            .collect();
        let path_var = std::env::var_os("PATH").unwrap_or_default();
        let tools = TOOLS.into_iter().map(|tool| (tool, find_on_path(tool, &path_var))).collect();

        Self {
            root: ctx.project.root().to_path_buf(),
            datasets,
            weights: (weights_path, weights_present),
            env,
            email_domain_configured: ctx.config.cluster.email_domain.is_some(),
            tools,
        }
    }

    fn print(&self) {
        println!("{}", "sfops Doctor - Environment Validation".bold().cyan());
        println!();

        println!("{}", "Project:".bold());
        println!("  Root: {}", self.root.display().to_string().dimmed());
        println!();

        println!("{}", "Datasets:".bold());
        for (name, present) in &self.datasets {
            if *present {
                println!("  {}: {}", name, "✓ Present".green());
            } else {
                println!("  {}: {}", name, "✗ Missing".red());
            }
        }
        if self.datasets.iter().any(|(_, present)| !present) {
            println!("  {} sfops provision-data", "Fix:".yellow());
        }
        println!();

        println!("{}", "Weights:".bold());
        let (path, present) = &self.weights;
        if *present {
            println!("  {}: {}", path.display(), "✓ Present".green());
        } else {
            println!("  {}: {}", path.display(), "✗ Missing".red());
            println!("  {} sfops fetch-weights", "Fix:".yellow());
        }
        println!();

        println!("{}", "Environment:".bold());
        for (key, value) in &self.env {
            match value {
                Some(value) => println!("  {}: {}", key, format!("✓ {value}").green()),
                None if *key == EMAIL_DOMAIN_ENV && self.email_domain_configured => {
                    println!("  {}: {}", key, "✓ Set in config".green());
                }
                None => println!("  {}: {}", key, "⚠ Not set".yellow()),
            }
        }
        println!();

        println!("{}", "Tools:".bold());
        for (tool, location) in &self.tools {
            match location {
                Some(path) => println!("  {}: {}", tool, path.display().to_string().dimmed()),
                None => println!("  {}: {}", tool, "✗ Not found".red()),
            }
        }
    }

    fn to_json(&self) -> serde_json::Value {
        let datasets: serde_json::Map<String, serde_json::Value> =
            self.datasets.iter().map(|(name, present)| (name.clone(), json!(present))).collect();
        let env: serde_json::Map<String, serde_json::Value> =
            self.env.iter().map(|(key, value)| ((*key).to_string(), json!(value))).collect();
        let tools: serde_json::Map<String, serde_json::Value> = self
            .tools
            .iter()
            .map(|(tool, path)| ((*tool).to_string(), json!(path.as_ref().map(|p| p.display().to_string()))))
            .collect();

        json!({
            "project": { "root": self.root.display().to_string() },
            "datasets": datasets,
            "weights": { "path": self.weights.0.display().to_string(), "present": self.weights.1 },
            "environment": env,
            "tools": tools,
        })
    }
}

fn find_on_path(tool: &str, path_var: &std::ffi::OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var).map(|dir| dir.join(tool)).find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_find_on_path_requires_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("ruff");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o644)).unwrap();

        let path_var = std::env::join_paths([temp.path()]).unwrap();
        assert!(find_on_path("ruff", &path_var).is_none());

        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(find_on_path("ruff", &path_var), Some(tool));
    }
}
