//! Routes MCP methods to the workflow dispatcher, prompts, and resources.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use delve_core::errors::WorkflowError;
use delve_core::responses::ErrorResponse;
use delve_engine::Dispatcher;
use delve_schema::{DISPATCH_REQUEST, SchemaRegistry};

use crate::error::McpError;
use crate::prompts::{self, ARG_RESEARCH_QUESTION, PROMPT_NAME};
use crate::protocol::{
    CallToolParams, CallToolResult, GetPromptParams, GetPromptResult, InitializeParams,
    InitializeResult, ListChanged, ListPromptsResult, ListResourcesResult, ListToolsResult,
    MCP_PROTOCOL_VERSION, McpTool, PromptMessage, ReadResourceParams, ReadResourceResult,
    ResourcesCapability, ServerCapabilities, ServerInfo, TextContent,
};
use crate::resources::SessionResources;

/// Name of the single workflow tool.
pub const TOOL_NAME: &str = "deep_research";

const TOOL_DESCRIPTION: &str = "Run a structured deep-research workflow. Call with \
{\"question\": \"...\"} to start a session; the response gives the session_id, the current \
phase, and the instruction for the next step. Continue with {\"session_id\": \"...\", \
\"phase_input\": {\"phase\": \"...\", ...}} through elaboration, decomposition into \
subquestions, per-subquestion research findings, synthesis, and the final report. Omit \
phase_input to get the session status.";

pub struct RequestHandler {
    dispatcher: Arc<Dispatcher>,
    schemas: SchemaRegistry,
    resources: SessionResources,
    server_info: ServerInfo,
    initialized: bool,
}

impl RequestHandler {
    pub fn new(dispatcher: Arc<Dispatcher>, server_name: impl Into<String>) -> Result<Self, McpError> {
        let schemas =
            SchemaRegistry::new().map_err(|e| McpError::internal("build schema registry", e))?;
        let resources = SessionResources::new(Arc::clone(dispatcher.store()));
        Ok(Self {
            dispatcher,
            schemas,
            resources,
            server_info: ServerInfo {
                name: server_name.into(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            initialized: false,
        })
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Dispatch one method call. Notifications return `Value::Null`.
    pub fn route(&mut self, method: &str, params: Value) -> Result<Value, McpError> {
        if !self.initialized && !matches!(method, "initialize" | "ping") {
            return Err(McpError::NotInitialized);
        }

        match method {
            "initialize" => self.handle_initialize(parse_params(method, params)?),
            "notifications/initialized" => {
                info!("MCP client finished initialization");
                Ok(Value::Null)
            }
            "ping" => Ok(Value::Object(Map::new())),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(parse_params(method, params)?),
            "prompts/list" => to_value(&ListPromptsResult {
                prompts: vec![prompts::descriptor()],
            }),
            "prompts/get" => self.handle_prompts_get(parse_params(method, params)?),
            "resources/list" => to_value(&ListResourcesResult {
                resources: self.resources.list(),
            }),
            "resources/read" => {
                let params: ReadResourceParams = parse_params(method, params)?;
                debug!(uri = %params.uri, "reading resource");
                to_value(&ReadResourceResult {
                    contents: self.resources.read(&params.uri)?,
                })
            }
            _ => Err(McpError::MethodNotFound {
                method: method.to_string(),
            }),
        }
    }

    fn handle_initialize(&mut self, params: InitializeParams) -> Result<Value, McpError> {
        info!(
            client = %params.client_info.name,
            client_version = ?params.client_info.version,
            protocol_version = %params.protocol_version,
            "MCP client connecting"
        );
        self.initialized = true;

        to_value(&InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ListChanged {
                    list_changed: false,
                }),
                prompts: Some(ListChanged {
                    list_changed: false,
                }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
            },
            server_info: self.server_info.clone(),
        })
    }

    fn handle_tools_list(&self) -> Result<Value, McpError> {
        let input_schema = self
            .schemas
            .get(DISPATCH_REQUEST)
            .cloned()
            .ok_or_else(|| McpError::internal("tools/list", "dispatch schema missing"))?;

        to_value(&ListToolsResult {
            tools: vec![McpTool {
                name: TOOL_NAME.to_string(),
                description: TOOL_DESCRIPTION.to_string(),
                input_schema,
            }],
        })
    }

    /// Run one workflow step. Workflow failures are reported as tool results
    /// with `isError` set, carrying the structured [`ErrorResponse`].
    fn handle_tools_call(&self, params: CallToolParams) -> Result<Value, McpError> {
        if params.name != TOOL_NAME {
            return Err(McpError::UnknownTool { name: params.name });
        }
        let arguments = params
            .arguments
            .unwrap_or_else(|| Value::Object(Map::new()));
        debug!(args = %arguments, "deep_research call");

        if let Err(e) = self.schemas.validate(DISPATCH_REQUEST, &arguments) {
            warn!(error = %e, "deep_research arguments failed schema validation");
            let error = WorkflowError::validation("arguments", e.to_string());
            return error_result(&ErrorResponse::from_error(&error, None));
        }

        let starts_session = arguments.get("session_id").is_none_or(Value::is_null);

        match self.dispatcher.dispatch_value(arguments) {
            Ok(step) => {
                let mut content = Vec::with_capacity(2);
                if starts_session {
                    let limits = self.dispatcher.engine().limits();
                    content.push(TextContent::new(prompts::opening_prompt(
                        &step.state.question,
                        limits,
                    )));
                }
                content.push(TextContent::new(to_pretty(&step)?));
                to_value(&CallToolResult {
                    content,
                    is_error: false,
                })
            }
            Err(error) => error_result(&error),
        }
    }

    fn handle_prompts_get(&self, params: GetPromptParams) -> Result<Value, McpError> {
        if params.name != PROMPT_NAME {
            return Err(McpError::InvalidParams {
                message: format!("Unknown prompt: {}", params.name),
            });
        }
        let question = params
            .arguments
            .get(ARG_RESEARCH_QUESTION)
            .map(String::as_str)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| McpError::InvalidParams {
                message: format!("Missing required argument: {ARG_RESEARCH_QUESTION}"),
            })?;

        let text = prompts::opening_prompt(question, self.dispatcher.engine().limits());
        to_value(&GetPromptResult {
            description: format!("Deep research brief for: {question}"),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: TextContent::new(text),
            }],
        })
    }
}

fn parse_params<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, McpError> {
    serde_json::from_value(params).map_err(|e| McpError::InvalidParams {
        message: format!("Invalid {method} params: {e}"),
    })
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::internal("serialize result", e))
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal("serialize result", e))
}

fn error_result(error: &ErrorResponse) -> Result<Value, McpError> {
    to_value(&CallToolResult {
        content: vec![TextContent::new(to_pretty(error)?)],
        is_error: true,
    })
}
