//! MCP server error types.

/// Protocol-level failures. Workflow errors are not represented here: they
/// travel back to the client inside a successful `tools/call` result.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("JSON-RPC parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Method not found: {method}")]
    MethodNotFound { method: String },

    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },

    #[error("Transport error: {message}")]
    TransportError { message: String },

    #[error("Server not initialized")]
    NotInitialized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl McpError {
    /// JSON-RPC error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> i64 {
        match self {
            Self::ParseError { .. } => -32700,
            Self::InvalidRequest { .. } => -32600,
            Self::MethodNotFound { .. } => -32601,
            Self::InvalidParams { .. } => -32602,
            Self::InternalError { .. } | Self::Io(_) => -32603,
            Self::UnknownTool { .. } => -32000,
            Self::ResourceNotFound { .. } => -32001,
            Self::TransportError { .. } => -32002,
            Self::NotInitialized => -32003,
        }
    }

    pub(crate) fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        Self::InternalError {
            message: format!("{context}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_json_rpc() {
        let cases = [
            (McpError::ParseError { message: "x".into() }, -32700),
            (McpError::InvalidRequest { message: "x".into() }, -32600),
            (McpError::MethodNotFound { method: "x".into() }, -32601),
            (McpError::InvalidParams { message: "x".into() }, -32602),
            (McpError::InternalError { message: "x".into() }, -32603),
            (McpError::UnknownTool { name: "x".into() }, -32000),
            (McpError::ResourceNotFound { uri: "x".into() }, -32001),
            (McpError::TransportError { message: "x".into() }, -32002),
            (McpError::NotInitialized, -32003),
        ];
        for (err, code) in cases {
            assert_eq!(err.error_code(), code, "{err}");
        }
    }

    #[test]
    fn io_errors_are_internal() {
        let err: McpError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone").into();
        assert_eq!(err.error_code(), -32603);
    }

    #[test]
    fn internal_carries_context() {
        let err = McpError::internal("serialize tools", "boom");
        assert_eq!(err.to_string(), "Internal error: serialize tools: boom");
    }
}
