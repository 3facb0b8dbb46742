use std::sync::Arc;

use anyhow::Context;
use delve_config::DelveConfig;
use delve_engine::{Dispatcher, PhaseEngine, SessionStore};
use delve_mcp::McpServer;
use delve_mcp::transport::StdioTransport;

/// Handle `delve serve`: run the MCP server on stdin/stdout until EOF.
pub async fn handle(config: &DelveConfig) -> anyhow::Result<()> {
    let dispatcher = Dispatcher::new(
        Arc::new(SessionStore::new()),
        PhaseEngine::new(config.workflow),
    );
    let mut server = McpServer::new(Arc::new(dispatcher), config.server.name.clone())
        .context("failed to build MCP server")?;

    tracing::info!(server = %config.server.name, "serving on stdio");
    let mut transport = StdioTransport::new();
    server
        .run(&mut transport)
        .await
        .context("MCP server terminated with an error")
}
