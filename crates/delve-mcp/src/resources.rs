//! Research sessions exposed as MCP resources.
//!
//! | URI | Content |
//! |-----|---------|
//! | `research://sessions` | JSON list of session summaries |
//! | `research://sessions/{id}` | full session as JSON |
//! | `research://sessions/{id}/notes` | plain-text process log |

use std::sync::Arc;

use serde::Serialize;

use delve_engine::SessionStore;

use crate::error::McpError;
use crate::protocol::{McpResource, ResourceContent};

pub const SESSIONS_URI: &str = "research://sessions";

const MIME_JSON: &str = "application/json";
const MIME_TEXT: &str = "text/plain";

/// What a resource URI points at.
#[derive(Debug, PartialEq, Eq)]
enum Target<'a> {
    Index,
    Session(&'a str),
    Notes(&'a str),
}

fn parse(uri: &str) -> Option<Target<'_>> {
    let rest = uri.strip_prefix(SESSIONS_URI)?;
    if rest.is_empty() {
        return Some(Target::Index);
    }
    let rest = rest.strip_prefix('/')?;
    match rest.split_once('/') {
        None if !rest.is_empty() => Some(Target::Session(rest)),
        Some((id, "notes")) if !id.is_empty() => Some(Target::Notes(id)),
        _ => None,
    }
}

pub struct SessionResources {
    store: Arc<SessionStore>,
}

impl SessionResources {
    #[must_use]
    pub const fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// The index resource plus a session and notes resource per live session.
    #[must_use]
    pub fn list(&self) -> Vec<McpResource> {
        let mut resources = vec![McpResource {
            uri: SESSIONS_URI.to_string(),
            name: "Research sessions".to_string(),
            description: "Summaries of all research sessions".to_string(),
            mime_type: MIME_JSON.to_string(),
        }];

        for summary in self.store.list() {
            resources.push(McpResource {
                uri: format!("{SESSIONS_URI}/{}", summary.id),
                name: format!("Research data: {}", summary.question),
                description: format!("Full state of session {} ({})", summary.id, summary.phase),
                mime_type: MIME_JSON.to_string(),
            });
            resources.push(McpResource {
                uri: format!("{SESSIONS_URI}/{}/notes", summary.id),
                name: format!("Research notes: {}", summary.question),
                description: format!("Process log of session {}", summary.id),
                mime_type: MIME_TEXT.to_string(),
            });
        }

        resources
    }

    pub fn read(&self, uri: &str) -> Result<Vec<ResourceContent>, McpError> {
        let not_found = || McpError::ResourceNotFound {
            uri: uri.to_string(),
        };

        let (mime_type, text) = match parse(uri).ok_or_else(not_found)? {
            Target::Index => (MIME_JSON, to_json(&self.store.list())?),
            Target::Session(id) => {
                let session = self.store.get(id).map_err(|_| not_found())?;
                (MIME_JSON, to_json(&session)?)
            }
            Target::Notes(id) => {
                let session = self.store.get(id).map_err(|_| not_found())?;
                (MIME_TEXT, session.notes_text())
            }
        };

        Ok(vec![ResourceContent {
            uri: uri.to_string(),
            mime_type: mime_type.to_string(),
            text,
        }])
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal("serialize resource", e))
}
