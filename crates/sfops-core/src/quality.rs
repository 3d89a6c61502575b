//! Formatting, linting and test gates for the Python tree.
//!
//! Each tool's exit status is the pass/fail signal. Nothing is parsed.

use crate::config::QualityConfig;
use crate::runner::Invocation;
use std::path::Path;

/// isort, ruff (with fixes) and black, in that order.
pub fn quality_checks(config: &QualityConfig, root: &Path) -> Vec<Invocation> {
    let line_length = config.line_length.to_string();
    let exclude = config.exclude.as_str();

    vec![
        Invocation::new("isort")
            .args([".", "--skip", exclude, "--profile", "black", "--line-length"])
            .arg(line_length.as_str())
            .current_dir(root),
        Invocation::new("ruff")
            .args(["check", ".", "--fix", "--exclude", exclude, "--line-length"])
            .arg(line_length.as_str())
            .current_dir(root),
        Invocation::new("black")
            .args([".", "--exclude", exclude, "--line-length"])
            .arg(line_length.as_str())
            .current_dir(root),
    ]
}

/// pytest, verbose with output capture disabled.
pub fn test_run(config: &QualityConfig, root: &Path) -> Invocation {
    Invocation::new("pytest")
        .arg(format!("--ignore={}", config.exclude))
        .args(["-v", "-s"])
        .current_dir(root)
}
