use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A source gathered by the client while researching one subquestion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Finding {
    pub source_url: String,
    pub source_title: String,
    pub extracted_content: String,
    pub relevance_note: String,
    pub recorded_at: DateTime<Utc>,
}
