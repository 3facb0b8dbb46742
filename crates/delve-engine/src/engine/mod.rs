//! The research-phase state machine.
//!
//! [`PhaseEngine`] is the only code that mutates a [`ResearchSession`]. Every
//! operation checks the session's phase and validates its input before
//! touching the session, so a rejected call leaves the session exactly as it
//! was. Operations are split across submodules by phase, each adding methods
//! to `PhaseEngine`.

mod decompose;
mod elaborate;
mod findings;
mod report;

use chrono::Utc;
use tracing::{debug, info};

use delve_config::WorkflowConfig;
use delve_core::entities::{ResearchSession, SessionNote};
use delve_core::enums::{Operation, ResearchPhase};
use delve_core::errors::WorkflowError;
use delve_core::inputs::PhaseInput;
use delve_core::responses::{StateSnapshot, StepResponse};

use crate::instructions;

/// Applies phase inputs to sessions under a fixed set of workflow limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseEngine {
    limits: WorkflowConfig,
}

impl PhaseEngine {
    #[must_use]
    pub const fn new(limits: WorkflowConfig) -> Self {
        Self { limits }
    }

    #[must_use]
    pub const fn limits(&self) -> &WorkflowConfig {
        &self.limits
    }

    /// Route a typed phase input to its operation.
    pub fn apply(
        &self,
        session: &mut ResearchSession,
        input: PhaseInput,
    ) -> Result<StepResponse, WorkflowError> {
        debug!(
            session_id = %session.id,
            operation = %input.operation(),
            phase = %session.phase,
            "applying phase input"
        );

        match input {
            PhaseInput::Elaborate { elaboration } => self.elaborate(session, &elaboration),
            PhaseInput::Decompose { subquestions } => self.decompose(session, &subquestions),
            PhaseInput::RecordFindings {
                subquestion_index,
                findings,
            } => self.record_findings(session, subquestion_index, &findings),
            PhaseInput::Synthesize { synthesis } => self.synthesize(session, &synthesis),
            PhaseInput::FinalizeReport { report } => self.finalize_report(session, &report),
            PhaseInput::Abandon { reason } => self.abandon(session, &reason),
            PhaseInput::Status => Ok(self.status(session)),
        }
    }

    /// Current phase, next instruction, and state slice. Never mutates.
    #[must_use]
    pub fn status(&self, session: &ResearchSession) -> StepResponse {
        StepResponse {
            session_id: session.id.clone(),
            phase: session.phase,
            instruction: instructions::instruction_for(session, &self.limits),
            state: StateSnapshot::for_phase(session),
        }
    }

    /// Move a non-terminal session to `Failed`, recording why.
    pub fn abandon(
        &self,
        session: &mut ResearchSession,
        reason: &str,
    ) -> Result<StepResponse, WorkflowError> {
        require_phase(session, Operation::Abandon)?;
        let reason = required_text("reason", reason)?;

        let note = format!("Research abandoned: {reason}");
        session.failure_reason = Some(reason);
        advance(session, Operation::Abandon, ResearchPhase::Failed, note)?;

        Ok(self.status(session))
    }
}

/// Reject `operation` unless the session is in one of its valid phases.
fn require_phase(session: &ResearchSession, operation: Operation) -> Result<(), WorkflowError> {
    if operation.is_valid_in(session.phase) {
        Ok(())
    } else {
        Err(WorkflowError::invalid_phase(operation, session.phase))
    }
}

/// Trimmed copy of `value`, or a validation error naming `field` if blank.
fn required_text(field: &str, value: &str) -> Result<String, WorkflowError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WorkflowError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Append a note without changing phase.
fn record_note(session: &mut ResearchSession, note: String) {
    let now = Utc::now();
    session.notes.push(SessionNote {
        phase: session.phase,
        note,
        at: now,
    });
    session.updated_at = now;
}

/// Transition to `next` and log the event in the session's notes.
fn advance(
    session: &mut ResearchSession,
    operation: Operation,
    next: ResearchPhase,
    note: String,
) -> Result<(), WorkflowError> {
    let from = session.phase;
    if !from.can_transition_to(next) {
        return Err(WorkflowError::invalid_phase(operation, from));
    }

    session.phase = next;
    record_note(session, note);

    info!(
        session_id = %session.id,
        %operation,
        from = %from,
        to = %next,
        "research phase advanced"
    );
    Ok(())
}
