//! Workflow error taxonomy.
//!
//! Every variant is recoverable by the caller: the message names the offending
//! field or the current and expected phases so the client can correct its
//! request and retry the same phase.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::enums::{Operation, ResearchPhase};

/// Errors raised while resolving a session or applying a phase operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// No session with this ID exists in the store.
    #[error("Research session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// The operation is not valid in the session's current phase.
    #[error(
        "Cannot {operation} while session is in phase '{current}' (expected: {})",
        join_phases(.expected)
    )]
    InvalidPhase {
        operation: Operation,
        current: ResearchPhase,
        expected: Vec<ResearchPhase>,
    },

    /// Phase input failed validation.
    #[error("Validation error on '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Findings referenced a subquestion index that does not exist.
    #[error("Unknown subquestion index {index} (session has {count} subquestions)")]
    UnknownSubquestion { index: usize, count: usize },

    /// Findings for this subquestion were already recorded.
    #[error("Subquestion {index} has already been researched")]
    AlreadyResearched { index: usize },

    /// A report was submitted while subquestions were still pending.
    #[error("Research incomplete: subquestions {pending:?} are still pending")]
    IncompleteResearch { pending: Vec<usize> },
}

impl WorkflowError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Build an `InvalidPhase` error for `operation` attempted in `current`.
    #[must_use]
    pub fn invalid_phase(operation: Operation, current: ResearchPhase) -> Self {
        Self::InvalidPhase {
            operation,
            current,
            expected: operation.valid_phases().to_vec(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SessionNotFound { .. } => ErrorKind::SessionNotFound,
            Self::InvalidPhase { .. } => ErrorKind::InvalidPhase,
            Self::Validation { .. } => ErrorKind::ValidationError,
            Self::UnknownSubquestion { .. } => ErrorKind::UnknownSubquestion,
            Self::AlreadyResearched { .. } => ErrorKind::AlreadyResearched,
            Self::IncompleteResearch { .. } => ErrorKind::IncompleteResearch,
        }
    }
}

fn join_phases(phases: &[ResearchPhase]) -> String {
    phases
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Wire discriminator for [`WorkflowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    SessionNotFound,
    InvalidPhase,
    ValidationError,
    UnknownSubquestion,
    AlreadyResearched,
    IncompleteResearch,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SessionNotFound => "session_not_found",
            Self::InvalidPhase => "invalid_phase",
            Self::ValidationError => "validation_error",
            Self::UnknownSubquestion => "unknown_subquestion",
            Self::AlreadyResearched => "already_researched",
            Self::IncompleteResearch => "incomplete_research",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
