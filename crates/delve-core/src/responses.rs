//! Response shapes returned to workflow clients.
//!
//! Every successful operation yields a [`StepResponse`]: the phase the session
//! is now in, the instruction for the next step, and the slice of session
//! state needed to carry it out. Failures yield an [`ErrorResponse`].

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Finding, ResearchSession, Subquestion};
use crate::enums::ResearchPhase;
use crate::errors::{ErrorKind, WorkflowError};

/// Payload returned after every successful operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StepResponse {
    pub session_id: String,
    pub phase: ResearchPhase,
    /// What the client must do next.
    pub instruction: String,
    pub state: StateSnapshot,
}

/// The part of a session the client needs for its next step.
///
/// Fields irrelevant to the current phase are left out, so a client in the
/// research phase gets the subquestion list and pending indices but not the
/// findings gathered so far.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StateSnapshot {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elaboration: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subquestions: Vec<Subquestion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pending_subquestions: Vec<usize>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub findings: BTreeMap<usize, Vec<Finding>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl StateSnapshot {
    /// Slice `session` according to its current phase.
    #[must_use]
    pub fn for_phase(session: &ResearchSession) -> Self {
        let mut snapshot = Self {
            question: session.question.clone(),
            elaboration: None,
            subquestions: Vec::new(),
            pending_subquestions: Vec::new(),
            findings: BTreeMap::new(),
            synthesis: None,
            report: None,
            failure_reason: None,
        };

        match session.phase {
            ResearchPhase::Elaboration => {}
            ResearchPhase::Decomposition => {
                snapshot.elaboration.clone_from(&session.elaboration);
            }
            ResearchPhase::Research => {
                snapshot.elaboration.clone_from(&session.elaboration);
                snapshot.subquestions.clone_from(&session.subquestions);
                snapshot.pending_subquestions = session.pending_indices();
            }
            ResearchPhase::Synthesis => {
                snapshot.elaboration.clone_from(&session.elaboration);
                snapshot.subquestions.clone_from(&session.subquestions);
                snapshot.findings.clone_from(&session.findings);
            }
            ResearchPhase::Report | ResearchPhase::Complete => {
                snapshot.elaboration.clone_from(&session.elaboration);
                snapshot.subquestions.clone_from(&session.subquestions);
                snapshot.findings.clone_from(&session.findings);
                snapshot.synthesis.clone_from(&session.synthesis);
                snapshot.report.clone_from(&session.report);
            }
            ResearchPhase::Failed => {
                snapshot.subquestions.clone_from(&session.subquestions);
                snapshot.failure_reason.clone_from(&session.failure_reason);
            }
        }

        snapshot
    }
}

/// Structured error returned to workflow clients.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Offending input field, for validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<ResearchPhase>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expected_phases: Vec<ResearchPhase>,
}

impl ErrorResponse {
    /// Translate a workflow error, attaching the session it concerns if known.
    #[must_use]
    pub fn from_error(error: &WorkflowError, session_id: Option<&str>) -> Self {
        let mut response = Self {
            kind: error.kind(),
            message: error.to_string(),
            session_id: session_id.map(str::to_string),
            field: None,
            current_phase: None,
            expected_phases: Vec::new(),
        };

        match error {
            WorkflowError::SessionNotFound { session_id } => {
                response.session_id = Some(session_id.clone());
            }
            WorkflowError::InvalidPhase {
                current, expected, ..
            } => {
                response.current_phase = Some(*current);
                response.expected_phases.clone_from(expected);
            }
            WorkflowError::Validation { field, .. } => {
                response.field = Some(field.clone());
            }
            WorkflowError::UnknownSubquestion { .. }
            | WorkflowError::AlreadyResearched { .. } => {
                response.field = Some("subquestion_index".to_string());
            }
            WorkflowError::IncompleteResearch { .. } => {}
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::enums::{Operation, SubquestionStatus};

    fn session_in(phase: ResearchPhase) -> ResearchSession {
        let mut session =
            ResearchSession::new("rsn-0000abcd".into(), "why is the sky blue".into(), Utc::now());
        session.phase = phase;
        session.elaboration = Some("scattering".into());
        session.subquestions = vec![
            Subquestion::new(0, "what is rayleigh scattering".into()),
            Subquestion {
                index: 1,
                text: "why not violet".into(),
                status: SubquestionStatus::Researched,
            },
        ];
        session
    }

    #[test]
    fn elaboration_snapshot_has_only_question() {
        let snapshot = StateSnapshot::for_phase(&session_in(ResearchPhase::Elaboration));
        assert_eq!(snapshot.question, "why is the sky blue");
        assert!(snapshot.elaboration.is_none());
        assert!(snapshot.subquestions.is_empty());
    }

    #[test]
    fn research_snapshot_lists_pending() {
        let snapshot = StateSnapshot::for_phase(&session_in(ResearchPhase::Research));
        assert_eq!(snapshot.subquestions.len(), 2);
        assert_eq!(snapshot.pending_subquestions, vec![0]);
        assert!(snapshot.findings.is_empty());
    }

    #[test]
    fn failed_snapshot_carries_reason() {
        let mut session = session_in(ResearchPhase::Failed);
        session.failure_reason = Some("out of time".into());
        let snapshot = StateSnapshot::for_phase(&session);
        assert_eq!(snapshot.failure_reason.as_deref(), Some("out of time"));
        assert!(snapshot.elaboration.is_none());
    }

    #[test]
    fn empty_fields_are_not_serialized() {
        let snapshot = StateSnapshot::for_phase(&session_in(ResearchPhase::Elaboration));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json, serde_json::json!({"question": "why is the sky blue"}));
    }

    #[test]
    fn error_response_from_invalid_phase() {
        let err = WorkflowError::invalid_phase(Operation::RecordFindings, ResearchPhase::Elaboration);
        let response = ErrorResponse::from_error(&err, Some("rsn-0000abcd"));
        assert_eq!(response.kind, ErrorKind::InvalidPhase);
        assert_eq!(response.current_phase, Some(ResearchPhase::Elaboration));
        assert_eq!(response.expected_phases, vec![ResearchPhase::Research]);
        assert_eq!(response.session_id.as_deref(), Some("rsn-0000abcd"));
    }

    #[test]
    fn error_response_from_session_not_found() {
        let err = WorkflowError::SessionNotFound {
            session_id: "rsn-deadbeef".into(),
        };
        let response = ErrorResponse::from_error(&err, None);
        assert_eq!(response.kind, ErrorKind::SessionNotFound);
        assert_eq!(response.session_id.as_deref(), Some("rsn-deadbeef"));
    }

    #[test]
    fn error_response_from_validation_names_field() {
        let err = WorkflowError::validation("subquestions", "expected 3-5 items, got 2");
        let response = ErrorResponse::from_error(&err, None);
        assert_eq!(response.field.as_deref(), Some("subquestions"));
    }
}
