//! Python quality gates.

use sfops_core::OpsContext;

pub async fn run_quality_checks(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.run_quality_checks().await?)
}

pub async fn run_tests(ctx: &OpsContext) -> anyhow::Result<()> {
    Ok(ctx.run_tests().await?)
}
