use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Finding, Subquestion};
use crate::enums::ResearchPhase;

/// The full workflow state of one research question.
///
/// Owned by the session store and mutated only by the phase engine.
/// `findings` is keyed by subquestion index; a `BTreeMap` keeps iteration
/// in index order regardless of the order subquestions were researched in.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchSession {
    pub id: String,
    pub question: String,
    pub phase: ResearchPhase,
    pub elaboration: Option<String>,
    pub subquestions: Vec<Subquestion>,
    pub findings: BTreeMap<usize, Vec<Finding>>,
    pub synthesis: Option<String>,
    pub report: Option<String>,
    pub failure_reason: Option<String>,
    pub notes: Vec<SessionNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResearchSession {
    /// A fresh session in the `Elaboration` phase.
    #[must_use]
    pub fn new(id: String, question: String, now: DateTime<Utc>) -> Self {
        let opening = SessionNote {
            phase: ResearchPhase::Elaboration,
            note: format!("Research initiated on question: {question}"),
            at: now,
        };
        Self {
            id,
            question,
            phase: ResearchPhase::Elaboration,
            elaboration: None,
            subquestions: Vec::new(),
            findings: BTreeMap::new(),
            synthesis: None,
            report: None,
            failure_reason: None,
            notes: vec![opening],
            created_at: now,
            updated_at: now,
        }
    }

    /// Indices of subquestions still awaiting findings, in index order.
    #[must_use]
    pub fn pending_indices(&self) -> Vec<usize> {
        self.subquestions
            .iter()
            .filter(|sq| !sq.is_researched())
            .map(|sq| sq.index)
            .collect()
    }

    /// True once decomposition has happened and no subquestion is pending.
    #[must_use]
    pub fn all_researched(&self) -> bool {
        !self.subquestions.is_empty() && self.subquestions.iter().all(Subquestion::is_researched)
    }

    #[must_use]
    pub fn researched_count(&self) -> usize {
        self.subquestions.iter().filter(|sq| sq.is_researched()).count()
    }

    /// Findings recorded for one subquestion, empty if none were recorded.
    #[must_use]
    pub fn findings_for(&self, index: usize) -> &[Finding] {
        self.findings.get(&index).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn total_findings(&self) -> usize {
        self.findings.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            question: self.question.clone(),
            phase: self.phase,
            subquestion_count: self.subquestions.len(),
            researched_count: self.researched_count(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Render the note log as newline-separated text.
    #[must_use]
    pub fn notes_text(&self) -> String {
        self.notes
            .iter()
            .map(|n| format!("[{}] ({}) {}", n.at.to_rfc3339(), n.phase, n.note))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One line of a session's process log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionNote {
    /// Phase the session was in after the event.
    pub phase: ResearchPhase,
    pub note: String,
    pub at: DateTime<Utc>,
}

/// Compact listing entry for a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: String,
    pub question: String,
    pub phase: ResearchPhase,
    pub subquestion_count: usize,
    pub researched_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
