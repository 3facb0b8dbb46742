use std::collections::HashMap;

use delve_core::entities::{ResearchSession, Subquestion};
use delve_core::enums::{Operation, ResearchPhase};
use delve_core::errors::WorkflowError;
use delve_core::responses::StepResponse;

use super::{PhaseEngine, advance, require_phase};

impl PhaseEngine {
    /// Replace the session's subquestions and move to `Research`.
    ///
    /// The list must hold between the configured minimum and maximum number
    /// of non-blank, mutually distinct entries. Distinctness ignores case and
    /// surrounding whitespace. Order is kept and defines each subquestion's
    /// index.
    pub fn decompose(
        &self,
        session: &mut ResearchSession,
        subquestions: &[String],
    ) -> Result<StepResponse, WorkflowError> {
        require_phase(session, Operation::Decompose)?;
        let texts = self.validate_subquestions(subquestions)?;

        let count = texts.len();
        session.subquestions = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Subquestion::new(index, text))
            .collect();
        session.findings.clear();

        advance(
            session,
            Operation::Decompose,
            ResearchPhase::Research,
            format!("Question decomposed into {count} subquestions"),
        )?;

        Ok(self.status(session))
    }

    fn validate_subquestions(&self, subquestions: &[String]) -> Result<Vec<String>, WorkflowError> {
        let min = self.limits.min_subquestions;
        let max = self.limits.max_subquestions;
        let count = subquestions.len();
        if count < min || count > max {
            return Err(WorkflowError::validation(
                "subquestions",
                format!("expected between {min} and {max} subquestions, got {count}"),
            ));
        }

        let mut seen: HashMap<String, usize> = HashMap::with_capacity(count);
        let mut texts = Vec::with_capacity(count);
        for (i, raw) in subquestions.iter().enumerate() {
            let text = raw.trim();
            if text.is_empty() {
                return Err(WorkflowError::validation(
                    format!("subquestions[{i}]"),
                    "must not be empty",
                ));
            }
            if let Some(first) = seen.insert(text.to_lowercase(), i) {
                return Err(WorkflowError::validation(
                    format!("subquestions[{i}]"),
                    format!("duplicates subquestions[{first}]"),
                ));
            }
            texts.push(text.to_string());
        }

        Ok(texts)
    }
}
