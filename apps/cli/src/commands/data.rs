//! Dataset and weights commands.

use colored::Colorize;
use sfops_core::OpsContext;

/// Execute the provision-data command.
pub async fn provision(ctx: &OpsContext, json_output: bool) -> anyhow::Result<()> {
    let report = ctx.provision_data().await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for name in &report.present {
        println!("  {} {} {}", "•".dimmed(), name, "(already present)".dimmed());
    }
    for name in &report.added {
        println!("  {} {}", "✓".green(), name);
    }
    if report.added.is_empty() {
        println!("{}", "✓ All datasets already provisioned".green().bold());
    } else {
        println!("{}", format!("✓ Registered {} dataset(s)", report.added.len()).green().bold());
    }

    Ok(())
}

/// Execute the fetch-weights command.
pub async fn fetch_weights(ctx: &OpsContext) -> anyhow::Result<()> {
    if let Some(written) = ctx.fetch_weights(true).await? {
        println!(
            "{} {} ({} bytes)",
            "✓ Saved".green().bold(),
            ctx.layout().weights_path().display(),
            written
        );
    }
    Ok(())
}

/// Execute the sync-and-update command.
pub async fn sync_and_update(ctx: &OpsContext) -> anyhow::Result<()> {
    ctx.sync_and_update().await?;
    Ok(())
}
