//! # delve-mcp
//!
//! Model Context Protocol server for the Delve research workflow.
//!
//! Speaks JSON-RPC 2.0 over a [`Transport`](transport::Transport) and exposes:
//!
//! - the `deep_research` tool, one workflow step per call;
//! - the `deep-research` prompt, the opening research brief;
//! - `research://sessions/...` resources for inspecting session state.
//!
//! ```text
//! Client <-> Transport (stdio/channel) <-> McpServer <-> RequestHandler
//!                                                          |-- Dispatcher -> SessionStore
//!                                                          |-- SchemaRegistry
//!                                                          +-- SessionResources
//! ```

pub mod error;
pub mod handlers;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod transport;

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use delve_engine::Dispatcher;

use crate::error::McpError;
use crate::handlers::RequestHandler;
use crate::protocol::{IncomingMessage, JSONRPC_VERSION, JsonRpcResponse, RequestId};
use crate::transport::Transport;

pub struct McpServer {
    handler: RequestHandler,
}

impl McpServer {
    pub fn new(dispatcher: Arc<Dispatcher>, server_name: impl Into<String>) -> Result<Self, McpError> {
        Ok(Self {
            handler: RequestHandler::new(dispatcher, server_name)?,
        })
    }

    /// Serve messages from `transport` until the peer closes it.
    pub async fn run<T: Transport>(&mut self, transport: &mut T) -> Result<(), McpError> {
        info!("MCP server starting");

        loop {
            let message = match transport.read_message().await {
                Ok(Some(message)) => message,
                Ok(None) => {
                    info!("transport closed, shutting down");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "transport read failed");
                    break;
                }
            };

            if message.trim().is_empty() {
                continue;
            }
            debug!(%message, "received message");

            let Some(response) = self.process_message(&message) else {
                continue;
            };
            let response_json = serde_json::to_string(&response)
                .map_err(|e| McpError::internal("serialize response", e))?;
            debug!(response = %response_json, "sending response");
            transport.write_message(&response_json).await?;
        }

        transport.close().await?;
        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one raw message. Returns `None` for notifications.
    ///
    /// Messages that cannot be parsed get an error response with a null id.
    pub fn process_message(&mut self, raw: &str) -> Option<JsonRpcResponse> {
        let incoming: IncomingMessage = match serde_json::from_str(raw) {
            Ok(incoming) => incoming,
            Err(e) => {
                let err = McpError::ParseError {
                    message: format!("Invalid JSON-RPC message: {e}"),
                };
                warn!(error = %err, "rejecting unparseable message");
                return Some(JsonRpcResponse::from_mcp_error(RequestId::Null, &err));
            }
        };

        if incoming.jsonrpc != JSONRPC_VERSION {
            let err = McpError::InvalidRequest {
                message: format!("Expected jsonrpc version 2.0, got: {}", incoming.jsonrpc),
            };
            let id = incoming.id.unwrap_or(RequestId::Null);
            return Some(JsonRpcResponse::from_mcp_error(id, &err));
        }

        let outcome = self.handler.route(&incoming.method, incoming.params);
        match (incoming.id, outcome) {
            (None, Ok(_)) => None,
            (None, Err(e)) => {
                warn!(method = %incoming.method, error = %e, "notification handler failed");
                None
            }
            (Some(id), Ok(result)) => Some(JsonRpcResponse::success(id, result)),
            (Some(id), Err(e)) => {
                debug!(method = %incoming.method, error = %e, "request failed");
                Some(JsonRpcResponse::from_mcp_error(id, &e))
            }
        }
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.handler.is_initialized()
    }
}
