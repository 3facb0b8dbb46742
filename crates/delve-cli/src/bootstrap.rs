use delve_config::DelveConfig;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config() -> anyhow::Result<DelveConfig> {
    let config = DelveConfig::load_with_dotenv()?;
    tracing::debug!(
        min_subquestions = config.workflow.min_subquestions,
        max_subquestions = config.workflow.max_subquestions,
        server = %config.server.name,
        "configuration loaded"
    );
    Ok(config)
}
