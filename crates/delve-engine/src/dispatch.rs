//! The single entry point for workflow requests.
//!
//! A [`DispatchRequest`] either starts a session (no `session_id`, a
//! `question`) or continues one (`session_id`, optional `phase_input`). The
//! dispatcher resolves the session, hands the input to the [`PhaseEngine`]
//! under that session's lock, and turns failures into [`ErrorResponse`]s.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use delve_core::errors::WorkflowError;
use delve_core::inputs::{DispatchRequest, PhaseInput};
use delve_core::responses::{ErrorResponse, StepResponse};

use crate::engine::PhaseEngine;
use crate::store::SessionStore;

pub struct Dispatcher {
    store: Arc<SessionStore>,
    engine: PhaseEngine,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(store: Arc<SessionStore>, engine: PhaseEngine) -> Self {
        Self { store, engine }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    #[must_use]
    pub const fn engine(&self) -> &PhaseEngine {
        &self.engine
    }

    /// Process one request, returning the typed workflow error on failure.
    pub fn dispatch(&self, request: DispatchRequest) -> Result<StepResponse, WorkflowError> {
        let (session_id, input) = self.resolve(request)?;
        self.apply(&session_id, input)
    }

    /// Process one request, translating failures into an [`ErrorResponse`].
    ///
    /// If the request created a session before failing, the error response
    /// carries the new session's ID so the client can retry against it.
    pub fn handle(&self, request: DispatchRequest) -> Result<StepResponse, ErrorResponse> {
        let (session_id, input) = self
            .resolve(request)
            .map_err(|err| reject(&err, None))?;
        self.apply(&session_id, input)
            .map_err(|err| reject(&err, Some(&session_id)))
    }

    /// Process a request given as untyped JSON, as received from a tool call.
    pub fn dispatch_value(&self, arguments: Value) -> Result<StepResponse, ErrorResponse> {
        let request: DispatchRequest = serde_json::from_value(arguments).map_err(|e| {
            reject(&WorkflowError::validation("arguments", e.to_string()), None)
        })?;
        self.handle(request)
    }

    /// Find or create the target session and pick the operation to run.
    fn resolve(&self, request: DispatchRequest) -> Result<(String, PhaseInput), WorkflowError> {
        let input = request.phase_input.unwrap_or(PhaseInput::Status);

        if let Some(session_id) = request.session_id {
            return Ok((session_id, input));
        }

        let question = request
            .question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| {
                WorkflowError::validation("question", "required when session_id is absent")
            })?;

        Ok((self.store.create(question), input))
    }

    fn apply(&self, session_id: &str, input: PhaseInput) -> Result<StepResponse, WorkflowError> {
        self.store
            .with_session(session_id, |session| self.engine.apply(session, input))
    }
}

fn reject(err: &WorkflowError, session_id: Option<&str>) -> ErrorResponse {
    warn!(kind = %err.kind(), session_id, error = %err, "workflow request rejected");
    ErrorResponse::from_error(err, session_id)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use delve_core::enums::ResearchPhase;
    use delve_core::errors::ErrorKind;

    use super::*;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(SessionStore::new()), PhaseEngine::default())
    }

    #[test]
    fn start_returns_elaboration_instruction() {
        let d = dispatcher();
        let response = d.dispatch(DispatchRequest::start("impact of AI")).unwrap();

        assert_eq!(response.phase, ResearchPhase::Elaboration);
        assert_eq!(response.state.question, "impact of AI");
        assert!(response.instruction.contains(&response.session_id));
        assert_eq!(d.store().len(), 1);
    }

    #[test]
    fn start_with_input_applies_it_to_new_session() {
        let d = dispatcher();
        let request = DispatchRequest {
            session_id: None,
            question: Some("impact of AI".into()),
            phase_input: Some(PhaseInput::Elaborate {
                elaboration: "scope".into(),
            }),
        };

        let response = d.dispatch(request).unwrap();

        assert_eq!(response.phase, ResearchPhase::Decomposition);
    }

    #[test]
    fn missing_question_is_validation_error() {
        let d = dispatcher();
        for question in [None, Some("   ".to_string())] {
            let request = DispatchRequest {
                question,
                ..DispatchRequest::default()
            };
            let err = d.dispatch(request).unwrap_err();
            assert!(
                matches!(err, WorkflowError::Validation { ref field, .. } if field == "question")
            );
        }
        assert!(d.store().is_empty());
    }

    #[test]
    fn existing_session_without_input_is_status() {
        let d = dispatcher();
        let opened = d.dispatch(DispatchRequest::start("q")).unwrap();

        let status = d
            .dispatch(DispatchRequest {
                session_id: Some(opened.session_id.clone()),
                ..DispatchRequest::default()
            })
            .unwrap();

        assert_eq!(status, opened);
    }

    #[test]
    fn unknown_session_is_not_found() {
        let d = dispatcher();
        let err = d
            .handle(DispatchRequest::advance("rsn-ffffffff", PhaseInput::Status))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SessionNotFound);
        assert_eq!(err.session_id.as_deref(), Some("rsn-ffffffff"));
    }

    #[test]
    fn failed_input_on_new_session_reports_its_id() {
        let d = dispatcher();
        let request = DispatchRequest {
            session_id: None,
            question: Some("q".into()),
            phase_input: Some(PhaseInput::Elaborate {
                elaboration: String::new(),
            }),
        };

        let err = d.handle(request).unwrap_err();

        assert_eq!(err.kind, ErrorKind::ValidationError);
        assert_eq!(err.field.as_deref(), Some("elaboration"));
        let session_id = err.session_id.expect("new session id");
        assert_eq!(
            d.store().get(&session_id).unwrap().phase,
            ResearchPhase::Elaboration
        );
    }

    #[test]
    fn dispatch_value_rejects_malformed_arguments() {
        let d = dispatcher();
        let err = d
            .dispatch_value(json!({"session_id": "rsn-1", "phase_input": {"phase": "teleport"}}))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValidationError);
        assert_eq!(err.field.as_deref(), Some("arguments"));
    }

    #[test]
    fn dispatch_value_accepts_wire_json() {
        let d = dispatcher();
        let opened = d.dispatch_value(json!({"question": "q"})).unwrap();
        let next = d
            .dispatch_value(json!({
                "session_id": opened.session_id,
                "phase_input": {"phase": "elaborate", "elaboration": "scope"}
            }))
            .unwrap();
        assert_eq!(next.phase, ResearchPhase::Decomposition);
    }

    #[test]
    fn invalid_phase_error_carries_phases() {
        let d = dispatcher();
        let opened = d.dispatch(DispatchRequest::start("q")).unwrap();

        let err = d
            .handle(DispatchRequest::advance(
                opened.session_id,
                PhaseInput::Synthesize {
                    synthesis: "early".into(),
                },
            ))
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidPhase);
        assert_eq!(err.current_phase, Some(ResearchPhase::Elaboration));
        assert_eq!(err.expected_phases, vec![ResearchPhase::Synthesis]);
    }
}
