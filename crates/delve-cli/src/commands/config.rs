use anyhow::Context;
use delve_config::DelveConfig;

/// Handle `delve config`: print the effective configuration as TOML.
pub fn handle(config: &DelveConfig) -> anyhow::Result<()> {
    let rendered = toml::to_string_pretty(config).context("failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
