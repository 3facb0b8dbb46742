//! MCP server identity configuration.

use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "deep-research-server".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server name reported to MCP clients during `initialize`.
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_matches_published_server() {
        assert_eq!(ServerConfig::default().name, "deep-research-server");
    }
}
