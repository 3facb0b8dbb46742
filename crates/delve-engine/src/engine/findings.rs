use chrono::Utc;

use delve_core::entities::{Finding, ResearchSession};
use delve_core::enums::{Operation, ResearchPhase, SubquestionStatus};
use delve_core::errors::WorkflowError;
use delve_core::inputs::FindingInput;
use delve_core::responses::StepResponse;

use super::{PhaseEngine, advance, record_note, require_phase};

impl PhaseEngine {
    /// Attach findings to one subquestion and mark it researched.
    ///
    /// Each subquestion accepts exactly one batch; an empty batch is allowed
    /// and still counts. When the last pending subquestion is recorded the
    /// session moves to `Synthesis` in the same call.
    pub fn record_findings(
        &self,
        session: &mut ResearchSession,
        subquestion_index: usize,
        findings: &[FindingInput],
    ) -> Result<StepResponse, WorkflowError> {
        require_phase(session, Operation::RecordFindings)?;

        let count = session.subquestions.len();
        let subquestion = session
            .subquestions
            .get(subquestion_index)
            .ok_or(WorkflowError::UnknownSubquestion {
                index: subquestion_index,
                count,
            })?;
        if !subquestion.status.can_transition_to(SubquestionStatus::Researched) {
            return Err(WorkflowError::AlreadyResearched {
                index: subquestion_index,
            });
        }

        let batch = self.validate_findings(findings)?;
        let recorded = batch.len();

        session.findings.insert(subquestion_index, batch);
        if let Some(subquestion) = session.subquestions.get_mut(subquestion_index) {
            subquestion.status = SubquestionStatus::Researched;
        }
        record_note(
            session,
            format!("Recorded {recorded} findings for subquestion {subquestion_index}"),
        );

        if session.all_researched() {
            advance(
                session,
                Operation::RecordFindings,
                ResearchPhase::Synthesis,
                format!(
                    "All {count} subquestions researched ({} findings)",
                    session.total_findings()
                ),
            )?;
        }

        Ok(self.status(session))
    }

    fn validate_findings(&self, findings: &[FindingInput]) -> Result<Vec<Finding>, WorkflowError> {
        let max = self.limits.max_findings_per_subquestion;
        if findings.len() > max {
            return Err(WorkflowError::validation(
                "findings",
                format!("at most {max} findings per subquestion, got {}", findings.len()),
            ));
        }

        let now = Utc::now();
        findings
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let url = input.url.trim();
                if url.is_empty() {
                    return Err(WorkflowError::validation(
                        format!("findings[{i}].url"),
                        "must not be empty",
                    ));
                }
                let content = input.content.trim();
                if content.is_empty() {
                    return Err(WorkflowError::validation(
                        format!("findings[{i}].content"),
                        "must not be empty",
                    ));
                }
                Ok(Finding {
                    source_url: url.to_string(),
                    source_title: input.title.trim().to_string(),
                    extracted_content: content.to_string(),
                    relevance_note: input.relevance_note.trim().to_string(),
                    recorded_at: now,
                })
            })
            .collect()
    }
}
