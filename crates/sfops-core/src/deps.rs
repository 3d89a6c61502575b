//! Python dependency management through pip.

use crate::config::DepsConfig;
use crate::runner::Invocation;
use std::path::Path;

/// `pip install -r <requirements>`
pub fn sync_dependencies(config: &DepsConfig, root: &Path) -> Invocation {
    Invocation::new(config.pip.as_str())
        .args(["install", "-r"])
        .path_arg(&config.requirements)
        .current_dir(root)
}

/// `pip uninstall -y <package>` then `pip install <source>`.
pub fn reinstall_model(config: &DepsConfig, root: &Path) -> Vec<Invocation> {
    vec![
        Invocation::new(config.pip.as_str())
            .args(["uninstall", "-y", config.model_package.as_str()])
            .current_dir(root),
        Invocation::new(config.pip.as_str())
            .args(["install", config.model_source.as_str()])
            .current_dir(root),
    ]
}
