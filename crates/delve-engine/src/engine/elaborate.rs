use delve_core::entities::ResearchSession;
use delve_core::enums::{Operation, ResearchPhase};
use delve_core::errors::WorkflowError;
use delve_core::responses::StepResponse;

use super::{PhaseEngine, advance, require_phase, required_text};

impl PhaseEngine {
    /// Store the expanded framing of the question and move to `Decomposition`.
    pub fn elaborate(
        &self,
        session: &mut ResearchSession,
        elaboration: &str,
    ) -> Result<StepResponse, WorkflowError> {
        require_phase(session, Operation::Elaborate)?;
        let elaboration = required_text("elaboration", elaboration)?;

        session.elaboration = Some(elaboration);
        advance(
            session,
            Operation::Elaborate,
            ResearchPhase::Decomposition,
            "Research question elaborated".to_string(),
        )?;

        Ok(self.status(session))
    }
}
