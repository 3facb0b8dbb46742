//! Next-step instructions for each research phase.
//!
//! Each instruction is self-contained: it names the session, says what to do,
//! and shows the exact `phase_input` shape to submit, so a client never needs
//! an earlier response to make progress.

use std::fmt::Write as _;

use delve_config::WorkflowConfig;
use delve_core::entities::ResearchSession;
use delve_core::enums::ResearchPhase;

/// Instruction text for the session's current phase.
#[must_use]
pub fn instruction_for(session: &ResearchSession, limits: &WorkflowConfig) -> String {
    let id = &session.id;
    match session.phase {
        ResearchPhase::Elaboration => format!(
            "Elaborate the research question. Define its key terms, state what is in and out \
             of scope, note constraints such as time period or geography, and list the domains \
             and stakeholders involved. Submit with {{\"session_id\": \"{id}\", \"phase_input\": \
             {{\"phase\": \"elaborate\", \"elaboration\": \"...\"}}}}."
        ),
        ResearchPhase::Decomposition => format!(
            "Break the elaborated question into {min} to {max} distinct, specific subquestions, \
             ordered as they should be researched. Together they should cover the whole \
             question. Submit with {{\"session_id\": \"{id}\", \"phase_input\": {{\"phase\": \
             \"decompose\", \"subquestions\": [\"...\", \"...\"]}}}}.",
            min = limits.min_subquestions,
            max = limits.max_subquestions,
        ),
        ResearchPhase::Research => research_instruction(session, limits),
        ResearchPhase::Synthesis => format!(
            "All {count} subquestions are researched ({findings} findings). Synthesize across \
             them: identify where sources agree and where they conflict, note gaps, and assess \
             overall confidence. Submit with {{\"session_id\": \"{id}\", \"phase_input\": \
             {{\"phase\": \"synthesize\", \"synthesis\": \"...\"}}}}.",
            count = session.subquestions.len(),
            findings = session.total_findings(),
        ),
        ResearchPhase::Report => format!(
            "Write the final report: an executive summary, the findings for each subquestion \
             with citations, the synthesis, conclusions, limitations, and a reference list. \
             Submit with {{\"session_id\": \"{id}\", \"phase_input\": {{\"phase\": \
             \"finalize_report\", \"report\": \"...\"}}}}."
        ),
        ResearchPhase::Complete => {
            "Research is complete. Present the final report to the user.".to_string()
        }
        ResearchPhase::Failed => format!(
            "Research was abandoned: {}. Start a new session to research this question again.",
            session.failure_reason.as_deref().unwrap_or("no reason recorded")
        ),
    }
}

fn research_instruction(session: &ResearchSession, limits: &WorkflowConfig) -> String {
    let pending = session.pending_indices();
    let mut text = format!(
        "Research the pending subquestions, in any order. For each one, search for sources, \
         judge their credibility, and extract the relevant content. Submit one batch of at most \
         {max} findings per subquestion with {{\"session_id\": \"{id}\", \"phase_input\": \
         {{\"phase\": \"record_findings\", \"subquestion_index\": N, \"findings\": [{{\"url\": \
         \"...\", \"title\": \"...\", \"content\": \"...\", \"relevance_note\": \"...\"}}]}}}}. \
         {done} of {total} researched. Pending:",
        max = limits.max_findings_per_subquestion,
        id = session.id,
        done = session.researched_count(),
        total = session.subquestions.len(),
    );
    for index in pending {
        if let Some(sq) = session.subquestions.get(index) {
            let _ = write!(text, "\n{index}. {}", sq.text);
        }
    }
    text
}
