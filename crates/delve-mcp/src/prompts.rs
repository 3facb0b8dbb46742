//! The `deep-research` prompt: the opening brief for a research session.

use delve_config::WorkflowConfig;

use crate::protocol::{McpPrompt, PromptArgument};

pub const PROMPT_NAME: &str = "deep-research";
pub const ARG_RESEARCH_QUESTION: &str = "research_question";

#[must_use]
pub fn descriptor() -> McpPrompt {
    McpPrompt {
        name: PROMPT_NAME.to_string(),
        description: "Brief for conducting structured deep research on a question".to_string(),
        arguments: vec![PromptArgument {
            name: ARG_RESEARCH_QUESTION.to_string(),
            description: "The research question to investigate".to_string(),
            required: true,
        }],
    }
}

/// Opening brief for `question`, describing every phase and how to report
/// progress through the `deep_research` tool.
#[must_use]
pub fn opening_prompt(question: &str, limits: &WorkflowConfig) -> String {
    format!(
        r#"You are a research analyst producing an evidence-based report on the question below.

<research_question>
{question}
</research_question>

The research runs in five phases. A `deep_research` tool tracks the session: after each phase, submit your work to it and follow the instruction it returns. Each response includes the session state you need for the next step.

1. ELABORATION
   Define the key terms, set the scope (what is in and what is out), note time, place and other constraints, and identify the domains and stakeholders involved.
   Submit: {{"phase": "elaborate", "elaboration": "..."}}

2. DECOMPOSITION
   Split the question into {min} to {max} specific, non-overlapping subquestions that together cover it. Order them as they should be researched.
   Submit: {{"phase": "decompose", "subquestions": ["...", "..."]}}

3. RESEARCH
   For each subquestion, search for sources and judge their credibility by authority, venue, recency and possible bias. Extract what is relevant. Record one batch of at most {findings} findings per subquestion; an empty batch means nothing useful was found.
   Submit: {{"phase": "record_findings", "subquestion_index": 0, "findings": [{{"url": "...", "title": "...", "content": "...", "relevance_note": "..."}}]}}

4. SYNTHESIS
   Once every subquestion is researched, analyse the findings together. Note where sources agree or conflict, which claims have strong or weak evidence, what is missing, and how confident each conclusion can be.
   Submit: {{"phase": "synthesize", "synthesis": "..."}}

5. REPORT
   Write the final report with an executive summary, findings per subquestion with citations, the synthesis, conclusions with confidence levels, limitations, and references.
   Submit: {{"phase": "finalize_report", "report": "..."}}

Every submission after the first carries the session ID: {{"session_id": "...", "phase_input": {{...}}}}. Omit `phase_input` to get the current status. If the research cannot continue, submit {{"phase": "abandon", "reason": "..."}}.
If a submission is rejected, the tool explains why; correct it and resubmit."#,
        min = limits.min_subquestions,
        max = limits.max_subquestions,
        findings = limits.max_findings_per_subquestion,
    )
}
