//! Dataset submodule provisioning.

use crate::config::DatasetRepo;
use crate::error::Result;
use crate::project::ProjectLayout;
use crate::runner::{CommandRunner, Invocation, run_all};
use serde::Serialize;
use tracing::{debug, info};

/// What happened to each dataset repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    /// Newly registered submodules.
    pub added: Vec<String>,
    /// Repositories already present on disk.
    pub present: Vec<String>,
}

/// `git submodule add <url> <data_dir>/<name>`, run from the project root.
pub fn submodule_add(layout: &ProjectLayout, repo: &DatasetRepo) -> Invocation {
    Invocation::new("git")
        .args(["submodule", "add"])
        .arg(repo.url.as_str())
        .path_arg(layout.dataset_rel(&repo.name))
        .current_dir(layout.root())
}

/// Registers every repository that is not already present.
///
/// Stops at the first git failure; repositories after it are not attempted.
pub async fn provision_datasets(
    runner: &dyn CommandRunner,
    layout: &ProjectLayout,
    repos: &[DatasetRepo],
) -> Result<ProvisionReport> {
    let mut report = ProvisionReport::default();

    for repo in repos {
        let dir = layout.dataset_dir(&repo.name);
        if dir.exists() {
            debug!(dataset = %repo.name, path = %dir.display(), "already present, skipping");
            report.present.push(repo.name.clone());
            continue;
        }

        info!(dataset = %repo.name, url = %repo.url, "registering submodule");
        runner.run(&submodule_add(layout, repo)).await?;
        report.added.push(repo.name.clone());
    }

    Ok(report)
}

/// `git submodule sync` then `git submodule update --init`, both recursive.
pub fn sync_and_update(layout: &ProjectLayout) -> Vec<Invocation> {
    vec![
        Invocation::new("git")
            .args(["submodule", "sync", "--recursive"])
            .current_dir(layout.root()),
        Invocation::new("git")
            .args(["submodule", "update", "--init", "--recursive"])
            .current_dir(layout.root()),
    ]
}

/// Runs [`sync_and_update`].
pub async fn sync_submodules(runner: &dyn CommandRunner, layout: &ProjectLayout) -> Result<()> {
    run_all(runner, &sync_and_update(layout)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpsConfig;
    use crate::project::Project;
    use crate::runner::recording::RecordingRunner;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn layout(temp: &TempDir) -> ProjectLayout {
        Project::at(temp.path()).unwrap().layout(&OpsConfig::default())
    }

    /// Behaves like git: a successful `submodule add` leaves the checkout on disk.
    fn git_like_runner(root: PathBuf) -> RecordingRunner {
        RecordingRunner::with_hook(move |inv| {
            if inv.args.first().map(String::as_str) == Some("submodule") && inv.has_arg("add") {
                let target = inv.args.last().unwrap();
                std::fs::create_dir_all(root.join(target)).unwrap();
            }
            Ok(())
        })
    }

    #[tokio::test]
    async fn test_provision_twice_registers_each_once() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        let repos = DatasetRepo::defaults();
        let runner = git_like_runner(temp.path().to_path_buf());

        let first = provision_datasets(&runner, &layout, &repos).await.unwrap();
        assert_eq!(first.added.len(), 3);
        assert!(first.present.is_empty());

        let second = provision_datasets(&runner, &layout, &repos).await.unwrap();
        assert!(second.added.is_empty());
        assert_eq!(second.present.len(), 3);

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        for repo in &repos {
            let registrations = calls.iter().filter(|c| c.has_arg(&repo.url)).count();
            assert_eq!(registrations, 1, "{} registered {} times", repo.name, registrations);
        }
    }

    #[tokio::test]
    async fn test_provision_skips_present_repo() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        let repos = DatasetRepo::defaults();
        std::fs::create_dir_all(layout.dataset_dir(&repos[1].name)).unwrap();

        let runner = RecordingRunner::new();
        let report = provision_datasets(&runner, &layout, &repos).await.unwrap();

        assert_eq!(report.present, vec![repos[1].name.clone()]);
        assert_eq!(report.added, vec![repos[0].name.clone(), repos[2].name.clone()]);
    }

    #[tokio::test]
    async fn test_provision_stops_at_first_failure() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        let runner = RecordingRunner::failing_on("git");

        let err = provision_datasets(&runner, &layout, &DatasetRepo::defaults()).await.unwrap_err();
        assert_eq!(err.exit_code(), Some(1));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_submodule_add_invocation() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        let repo = &DatasetRepo::defaults()[0];
        let inv = submodule_add(&layout, repo);

        assert_eq!(inv.program, "git");
        assert_eq!(
            inv.args,
            vec![
                "submodule",
                "add",
                "https://github.com/epic-kitchens/epic-sounds-annotations",
                "data/epic-sounds-annotations",
            ]
        );
        assert_eq!(inv.cwd.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_sync_and_update_order() {
        let temp = TempDir::new().unwrap();
        let steps = sync_and_update(&layout(&temp));
        assert_eq!(steps[0].args, vec!["submodule", "sync", "--recursive"]);
        assert_eq!(steps[1].args, vec!["submodule", "update", "--init", "--recursive"]);
    }
}
