//! Slurm commands.

use colored::Colorize;
use sfops_core::{OpsContext, SessionKind};

pub async fn cpu_session(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.interactive_session(SessionKind::Cpu).await?)
}

pub async fn gpu_session(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.interactive_session(SessionKind::Gpu).await?)
}

pub async fn list_queued_jobs(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.list_queued_jobs().await?)
}

/// Execute the submit-training-job command.
///
/// `sbatch` prints the job id itself; this adds where the log will land.
pub async fn submit_training_job(ctx: &OpsContext) -> anyhow::Result<()> {
    let log = ctx.submit_training_job().await?;
    if !ctx.is_dry_run() {
        println!("  {} {}", "Log:".bold(), log.display().to_string().dimmed());
    }
    Ok(())
}
