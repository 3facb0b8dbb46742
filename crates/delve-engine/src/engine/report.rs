use delve_core::entities::ResearchSession;
use delve_core::enums::{Operation, ResearchPhase};
use delve_core::errors::WorkflowError;
use delve_core::responses::StepResponse;

use super::{PhaseEngine, advance, require_phase, required_text};

impl PhaseEngine {
    /// Store the cross-subquestion synthesis and move to `Report`.
    pub fn synthesize(
        &self,
        session: &mut ResearchSession,
        synthesis: &str,
    ) -> Result<StepResponse, WorkflowError> {
        require_phase(session, Operation::Synthesize)?;
        let synthesis = required_text("synthesis", synthesis)?;

        session.synthesis = Some(synthesis);
        advance(
            session,
            Operation::Synthesize,
            ResearchPhase::Report,
            "Findings synthesized".to_string(),
        )?;

        Ok(self.status(session))
    }

    /// Store the final report and complete the session.
    ///
    /// Refuses to complete while any subquestion is still pending, even if
    /// the session somehow reached `Report` without finishing research.
    pub fn finalize_report(
        &self,
        session: &mut ResearchSession,
        report: &str,
    ) -> Result<StepResponse, WorkflowError> {
        require_phase(session, Operation::FinalizeReport)?;
        if !session.all_researched() {
            return Err(WorkflowError::IncompleteResearch {
                pending: session.pending_indices(),
            });
        }
        let report = required_text("report", report)?;

        session.report = Some(report);
        advance(
            session,
            Operation::FinalizeReport,
            ResearchPhase::Complete,
            "Final report delivered".to_string(),
        )?;

        Ok(self.status(session))
    }
}
