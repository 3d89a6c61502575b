//! Model driver and dependency commands.

use sfops_core::{HostMode, OpsContext};
use tracing::info;

/// Execute the run-example command, dispatching on the hostname.
pub async fn run_example(ctx: &OpsContext, host: Option<&str>) -> anyhow::Result<()> {
    let mode = ctx.run_example(host).await?;
    info!(%mode, "example finished");
    Ok(())
}

pub async fn run_example_cluster(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.run_example_in(HostMode::Cluster).await?)
}

pub async fn run_example_local(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.run_example_in(HostMode::Local).await?)
}

pub async fn run_training(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.run_training().await?)
}

pub async fn sync_dependencies(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.sync_dependencies().await?)
}

pub async fn reinstall_model_dependency(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.reinstall_model_dependency().await?)
}

pub async fn reinstall_and_retrain(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.reinstall_and_retrain().await?)
}
