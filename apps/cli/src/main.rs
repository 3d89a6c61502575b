//! sfops CLI - operational targets for the audio_slowfast thesis project
//!
//! This CLI provides an `sfops` command that provisions datasets, fetches
//! pretrained weights, drives the model entrypoint locally or on the Slurm
//! cluster, and runs the Python quality gates.

mod commands;
mod config;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, shells};
use sfops_core::OpsError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{clip, cluster, data, doctor, model, quality, show_config};

/// sfops - operational targets for the audio_slowfast thesis project
///
/// Every target shells out to an external tool (git, pip, Slurm, python,
/// the Python linters) and exits with that tool's status.
#[derive(Parser, Debug)]
#[command(
    name = "sfops",
    author,
    version,
    about = "sfops - operational targets for the audio_slowfast thesis project",
    long_about = "sfops wires the audio_slowfast model driver, the dataset submodules and the Slurm cluster together.\nEach subcommand runs one external tool (or a short fail-fast sequence) and propagates its exit status."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Project root (overrides SFOPS_PROJECT)
    #[arg(short = 'p', long, global = true)]
    project: Option<PathBuf>,

    /// Print the commands instead of running them
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register the dataset repositories as submodules under the data root
    ///
    /// Repositories already present on disk are skipped, so re-running never
    /// registers a submodule twice.
    ProvisionData {
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download the pretrained weights, replacing any existing file
    FetchWeights,

    /// Sync submodule URLs and update every submodule recursively
    SyncAndUpdate,

    /// Open an interactive shell on a CPU allocation
    InteractiveCpuSession,

    /// Open an interactive shell on a GPU allocation
    InteractiveGpuSession,

    /// List your pending and running cluster jobs
    ListQueuedJobs,

    /// Run the example, choosing cluster or local mode from the hostname
    RunExample {
        /// Hostname to dispatch on instead of this machine's
        #[arg(long)]
        host: Option<String>,
    },

    /// Run the example with the cluster configuration
    RunExampleCluster,

    /// Run the example with the local configuration and plots
    RunExampleLocal,

    /// Run isort, ruff and black over the tree, skipping the data directory
    RunQualityChecks,

    /// Run pytest, skipping the data directory
    RunTests,

    /// Install the Python requirements
    SyncDependencies,

    /// Train inside the activated conda environment
    RunTraining,

    /// Uninstall and reinstall the model package
    ReinstallModelDependency,

    /// Reinstall the model package, clear checkpoints, then train
    ReinstallAndRetrain,

    /// Submit a batch training job with a timestamped log
    SubmitTrainingJob,

    /// Validate project layout, environment and tools
    Doctor {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Compute the sample window(s) the dataset loader reads from a record
    ClipWindow(clip::ClipWindowArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Handle completion generation
    if let Ok(shell) = std::env::var("SFOPS_GENERATE_COMPLETIONS") {
        let mut cmd = Args::command();
        match shell.as_str() {
            "bash" => generate(shells::Bash, &mut cmd, "sfops", &mut std::io::stdout()),
            "zsh" => generate(shells::Zsh, &mut cmd, "sfops", &mut std::io::stdout()),
            "fish" => generate(shells::Fish, &mut cmd, "sfops", &mut std::io::stdout()),
            "powershell" => generate(shells::PowerShell, &mut cmd, "sfops", &mut std::io::stdout()),
            "elvish" => generate(shells::Elvish, &mut cmd, "sfops", &mut std::io::stdout()),
            _ => {
                eprintln!("Unknown shell: {}. Supported: bash, zsh, fish, powershell, elvish", shell);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let args = Args::parse();

    // Initialize tracing; RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => exit_code_for(&err),
    }
}

/// External tools already printed their own diagnostics; hand back their status.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if let Some(code) = err.downcast_ref::<OpsError>().and_then(OpsError::exit_code) {
        error!("{:#}", err);
        return ExitCode::from(u8::try_from(code).unwrap_or(1));
    }
    eprintln!("Error: {:#}", err);
    ExitCode::FAILURE
}

async fn run(args: Args) -> anyhow::Result<()> {
    // If no command provided, show help
    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    // clip-window needs no project, so the context is only built for targets
    let context = || config::build_context(args.project.clone(), args.dry_run);

    match command {
        Command::ClipWindow(ref clip_args) => clip::execute(clip_args)?,
        Command::ProvisionData { json } => data::provision(&context()?, json).await?,
        Command::FetchWeights => data::fetch_weights(&context()?).await?,
        Command::SyncAndUpdate => data::sync_and_update(&context()?).await?,
        Command::InteractiveCpuSession => cluster::cpu_session(&context()?).await?,
        Command::InteractiveGpuSession => cluster::gpu_session(&context()?).await?,
        Command::ListQueuedJobs => cluster::list_queued_jobs(&context()?).await?,
        Command::SubmitTrainingJob => cluster::submit_training_job(&context()?).await?,
        Command::RunExample { host } => model::run_example(&context()?, host.as_deref()).await?,
        Command::RunExampleCluster => model::run_example_cluster(&context()?).await?,
        Command::RunExampleLocal => model::run_example_local(&context()?).await?,
        Command::RunTraining => model::run_training(&context()?).await?,
        Command::SyncDependencies => model::sync_dependencies(&context()?).await?,
        Command::ReinstallModelDependency => model::reinstall_model_dependency(&context()?).await?,
        Command::ReinstallAndRetrain => model::reinstall_and_retrain(&context()?).await?,
        Command::RunQualityChecks => quality::run_quality_checks(&context()?).await?,
        Command::RunTests => quality::run_tests(&context()?).await?,
        Command::Doctor { json } => doctor::execute(&context()?, json)?,
        Command::Config { json } => show_config::execute(&context()?, json)?,
    }

    Ok(())
}
