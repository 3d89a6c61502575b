//! Config command implementation.

use sfops_core::OpsContext;

/// Print the effective configuration after layering.
pub fn execute(ctx: &OpsContext, json_output: bool) -> anyhow::Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
    } else {
        print!("{}", ctx.config.to_toml_string()?);
    }
    Ok(())
}
