//! Integration tests for the operational targets, run with `--dry-run`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const LABELS: &str = "--labels break crush pat shake sharpen smell throw water";

/// Command rooted at `temp_dir`, isolated from the caller's global config.
fn sfops(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sfops").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .env("USER", "ab1234")
        .env("SCRATCH", "/scratch/ab1234")
        .env("EMAIL_DOMAIN", "nyu.edu")
        .env_remove("SFOPS_PROJECT")
        .arg("--project")
        .arg(temp_dir.path());
    cmd
}

fn dry_run_stdout(temp_dir: &TempDir, args: &[&str]) -> String {
    let output = sfops(temp_dir).arg("--dry-run").args(args).assert().success().get_output().clone();
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_no_command_prints_help() {
    let temp_dir = TempDir::new().unwrap();
    sfops(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("provision-data"))
        .stdout(predicate::str::contains("submit-training-job"));
}

#[test]
fn test_provision_data_registers_missing_datasets() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("data/epic-sounds-annotations")).unwrap();

    let stdout = dry_run_stdout(&temp_dir, &["provision-data"]);
    assert!(!stdout.contains("git submodule add https://github.com/epic-kitchens/epic-sounds-annotations"));
    assert!(stdout.contains(
        "git submodule add https://github.com/epic-kitchens/epic-kitchens-100-annotations data/epic-kitchens-100-annotations"
    ));
    assert!(stdout.contains("git submodule add https://github.com/epic-kitchens/epic-kitchens-download-scripts"));
}

#[test]
fn test_provision_data_json_when_everything_present() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["epic-sounds-annotations", "epic-kitchens-100-annotations", "epic-kitchens-download-scripts"] {
        fs::create_dir_all(temp_dir.path().join("data").join(name)).unwrap();
    }

    let stdout = dry_run_stdout(&temp_dir, &["provision-data", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("report should be valid JSON");
    assert_eq!(json["added"].as_array().unwrap().len(), 0);
    assert_eq!(json["present"].as_array().unwrap().len(), 3);
}

#[test]
fn test_fetch_weights_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    let stdout = dry_run_stdout(&temp_dir, &["fetch-weights"]);
    assert!(stdout.contains("https://www.dropbox.com/s/cr0c6xdaggc2wzz/SLOWFAST_EPIC.pyth"));
    assert!(stdout.contains("models/SLOWFAST_EPIC.pyth"));
    assert!(!temp_dir.path().join("models").exists());
}

#[test]
fn test_sync_and_update_order() {
    let temp_dir = TempDir::new().unwrap();
    let stdout = dry_run_stdout(&temp_dir, &["sync-and-update"]);
    let sync = stdout.find("git submodule sync --recursive").unwrap();
    let update = stdout.find("git submodule update --init --recursive").unwrap();
    assert!(sync < update);
}

#[test]
fn test_interactive_sessions() {
    let temp_dir = TempDir::new().unwrap();

    let cpu = dry_run_stdout(&temp_dir, &["interactive-cpu-session"]);
    assert!(cpu.starts_with("srun "));
    assert!(!cpu.contains("--gres"));
    assert!(cpu.trim_end().ends_with("--pty /bin/bash"));

    let gpu = dry_run_stdout(&temp_dir, &["interactive-gpu-session"]);
    assert!(gpu.contains("--gres=gpu:1"));
    assert!(gpu.trim_end().ends_with("--pty /bin/bash"));
}

#[test]
fn test_list_queued_jobs() {
    let temp_dir = TempDir::new().unwrap();
    let stdout = dry_run_stdout(&temp_dir, &["list-queued-jobs"]);
    assert_eq!(stdout.trim(), "squeue -u ab1234");
}

#[test]
fn test_list_queued_jobs_requires_user() {
    let temp_dir = TempDir::new().unwrap();
    sfops(&temp_dir)
        .env_remove("USER")
        .arg("--dry-run")
        .arg("list-queued-jobs")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("USER"));
}

#[test]
fn test_example_modes() {
    let temp_dir = TempDir::new().unwrap();

    let local = dry_run_stdout(&temp_dir, &["run-example-local"]);
    assert!(local.contains("configs/epic_sounds_local.yaml"));
    assert!(local.contains("--plot"));
    assert!(local.contains(LABELS));

    let cluster = dry_run_stdout(&temp_dir, &["run-example-cluster"]);
    assert!(cluster.contains("configs/epic_sounds_hpc.yaml"));
    assert!(!cluster.contains("--plot"));
    assert!(cluster.contains(LABELS));
}

#[test]
fn test_run_example_dispatches_on_host() {
    let temp_dir = TempDir::new().unwrap();

    let on_cluster = dry_run_stdout(&temp_dir, &["run-example", "--host", "login.nyu.edu"]);
    assert!(on_cluster.contains("configs/epic_sounds_hpc.yaml"));
    assert!(!on_cluster.contains("--plot"));

    let on_laptop = dry_run_stdout(&temp_dir, &["run-example", "--host", "laptop"]);
    assert!(on_laptop.contains("configs/epic_sounds_local.yaml"));
    assert!(on_laptop.contains("--plot"));
}

#[test]
fn test_host_marker_from_local_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".sfopsrc"), "[cluster]\nhost_marker = \"greene\"\n").unwrap();

    let stdout = dry_run_stdout(&temp_dir, &["run-example", "--host", "log-1.greene.hpc"]);
    assert!(stdout.contains("configs/epic_sounds_hpc.yaml"));

    let stdout = dry_run_stdout(&temp_dir, &["run-example", "--host", "login.nyu.edu"]);
    assert!(stdout.contains("--plot"));
}

#[test]
fn test_quality_checks_order() {
    let temp_dir = TempDir::new().unwrap();
    let stdout = dry_run_stdout(&temp_dir, &["run-quality-checks"]);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("isort"));
    assert!(lines[1].contains("ruff check . --fix"));
    assert!(lines[2].contains("black"));
    assert!(lines[2].contains("--line-length 120"));
}

#[test]
fn test_run_tests_skips_data() {
    let temp_dir = TempDir::new().unwrap();
    let stdout = dry_run_stdout(&temp_dir, &["run-tests"]);
    assert!(stdout.contains("pytest --ignore=data -v -s"));
}

#[test]
fn test_dependency_targets() {
    let temp_dir = TempDir::new().unwrap();

    let sync = dry_run_stdout(&temp_dir, &["sync-dependencies"]);
    assert!(sync.contains("pip install -r requirements.txt"));

    let reinstall = dry_run_stdout(&temp_dir, &["reinstall-model-dependency"]);
    let uninstall = reinstall.find("pip uninstall -y audio_slowfast").unwrap();
    let install = reinstall.find("pip install").unwrap();
    assert!(uninstall < install);
}

#[test]
fn test_run_training_activates_environment() {
    let temp_dir = TempDir::new().unwrap();
    let stdout = dry_run_stdout(&temp_dir, &["run-training"]);
    assert!(stdout.contains("source /scratch/ab1234/miniconda3/etc/profile.d/conda.sh"));
    assert!(stdout.contains("conda activate /scratch/ab1234/envs/slowfast"));
    assert!(stdout.contains("--train"));
    assert!(stdout.contains(LABELS));
}

#[test]
fn test_run_training_requires_scratch() {
    let temp_dir = TempDir::new().unwrap();
    sfops(&temp_dir)
        .env_remove("SCRATCH")
        .arg("--dry-run")
        .arg("run-training")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SCRATCH"));
}

#[test]
fn test_reinstall_and_retrain_dry_run_keeps_checkpoints() {
    let temp_dir = TempDir::new().unwrap();
    let checkpoints = temp_dir.path().join("checkpoints");
    fs::create_dir_all(&checkpoints).unwrap();

    let stdout = dry_run_stdout(&temp_dir, &["reinstall-and-retrain"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("pip uninstall"));
    assert!(lines[1].contains("pip install"));
    assert!(lines[2].starts_with("rm -rf"));
    assert!(lines[2].contains("checkpoints"));
    assert!(lines[3].contains("--train"));
    assert!(checkpoints.exists());
}

#[test]
fn test_submit_training_job() {
    let temp_dir = TempDir::new().unwrap();
    let stdout = dry_run_stdout(&temp_dir, &["submit-training-job"]);

    assert!(stdout.contains("sbatch"));
    for flag in ["--nodes=1", "--ntasks=1", "--cpus-per-task=4", "--gres=gpu:1", "--time=12:00:00", "--mem=16GB"] {
        assert!(stdout.contains(flag), "missing {flag} in {stdout}");
    }
    assert!(stdout.contains("--mail-type=BEGIN,END"));
    assert!(stdout.contains("--mail-user=ab1234@nyu.edu"));
    assert!(stdout.contains(&format!("--output={}", temp_dir.path().join("logs").display())));
    assert!(stdout.contains("conda activate"));
    assert!(!temp_dir.path().join("logs").exists());
}

#[test]
fn test_submit_training_job_requires_email_domain() {
    let temp_dir = TempDir::new().unwrap();
    sfops(&temp_dir)
        .env_remove("EMAIL_DOMAIN")
        .arg("--dry-run")
        .arg("submit-training-job")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("EMAIL_DOMAIN"));
}

#[cfg(unix)]
#[test]
fn test_failing_tool_exit_code_is_propagated() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let fake_pip = temp_dir.path().join("fake-pip");
    fs::write(&fake_pip, "#!/bin/sh\nexit 7\n").unwrap();
    fs::set_permissions(&fake_pip, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(
        temp_dir.path().join(".sfopsrc"),
        format!("[deps]\npip = \"{}\"\n", fake_pip.display()),
    )
    .unwrap();

    sfops(&temp_dir).arg("sync-dependencies").assert().code(7);
}

#[cfg(unix)]
#[test]
fn test_killed_tool_exits_with_shell_signal_status() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let fake_pip = temp_dir.path().join("fake-pip");
    fs::write(&fake_pip, "#!/bin/sh\nkill -9 $$\n").unwrap();
    fs::set_permissions(&fake_pip, fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(
        temp_dir.path().join(".sfopsrc"),
        format!("[deps]\npip = \"{}\"\n", fake_pip.display()),
    )
    .unwrap();

    sfops(&temp_dir).arg("sync-dependencies").assert().code(137);
}

#[test]
fn test_missing_tool_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".sfopsrc"), "[deps]\npip = \"/nonexistent/sfops-pip\"\n").unwrap();

    sfops(&temp_dir)
        .arg("sync-dependencies")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to launch"));
}
