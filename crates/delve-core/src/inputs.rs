//! Typed phase inputs accepted by the workflow dispatcher.
//!
//! Each phase operation has its own payload shape. `PhaseInput` is tagged by
//! the `phase` field, so a request like
//! `{"phase": "decompose", "subquestions": ["a", "b", "c"]}` deserializes
//! straight into the matching variant and anything loosely shaped is rejected
//! before a session is touched.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Operation;

/// One source the client found for a subquestion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FindingInput {
    /// Source URL.
    pub url: String,
    /// Source title.
    #[serde(default)]
    pub title: String,
    /// Content extracted from the source (paraphrased or short quotes).
    pub content: String,
    /// Why this source matters for the subquestion.
    #[serde(default)]
    pub relevance_note: String,
}

/// Phase-specific input, discriminated by `phase`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseInput {
    /// Submit the expanded/clarified research question.
    Elaborate { elaboration: String },
    /// Submit the ordered subquestions.
    Decompose { subquestions: Vec<String> },
    /// Submit the findings batch for one subquestion.
    RecordFindings {
        subquestion_index: usize,
        #[serde(default)]
        findings: Vec<FindingInput>,
    },
    /// Submit synthesis notes correlating findings across subquestions.
    Synthesize { synthesis: String },
    /// Submit the final report.
    FinalizeReport { report: String },
    /// Stop the research and record why.
    Abandon { reason: String },
    /// Read-only status query.
    Status,
}

impl PhaseInput {
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Elaborate { .. } => Operation::Elaborate,
            Self::Decompose { .. } => Operation::Decompose,
            Self::RecordFindings { .. } => Operation::RecordFindings,
            Self::Synthesize { .. } => Operation::Synthesize,
            Self::FinalizeReport { .. } => Operation::FinalizeReport,
            Self::Abandon { .. } => Operation::Abandon,
            Self::Status => Operation::Status,
        }
    }
}

/// Start-or-advance request for the research workflow.
///
/// Omit `session_id` and pass `question` to start a new session. Pass
/// `session_id` with a `phase_input` to advance it; omit `phase_input` for a
/// status query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DispatchRequest {
    /// Existing session to advance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Research question; required when starting a new session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Input for the session's current phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_input: Option<PhaseInput>,
}

impl DispatchRequest {
    #[must_use]
    pub fn start(question: impl Into<String>) -> Self {
        Self {
            session_id: None,
            question: Some(question.into()),
            phase_input: None,
        }
    }

    #[must_use]
    pub fn advance(session_id: impl Into<String>, input: PhaseInput) -> Self {
        Self {
            session_id: Some(session_id.into()),
            question: None,
            phase_input: Some(input),
        }
    }
}
