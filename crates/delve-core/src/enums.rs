//! Phase, status, and operation enums for Delve.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Enums with state machines provide `allowed_next_states()` so the phase
//! engine can reject transitions that skip or revisit a phase.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ResearchPhase
// ---------------------------------------------------------------------------

/// Workflow phase of a research session.
///
/// ```text
/// elaboration → decomposition → research → synthesis → report → complete
///      │              │             │           │         │
///      └──────────────┴─────────────┴───────────┴─────────┴──→ failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResearchPhase {
    Elaboration,
    Decomposition,
    Research,
    Synthesis,
    Report,
    Complete,
    Failed,
}

impl ResearchPhase {
    /// Every phase, in workflow order with `Failed` last.
    pub const ALL: [Self; 7] = [
        Self::Elaboration,
        Self::Decomposition,
        Self::Research,
        Self::Synthesis,
        Self::Report,
        Self::Complete,
        Self::Failed,
    ];

    /// Phases from which a session can still be abandoned.
    pub const NON_TERMINAL: [Self; 5] = [
        Self::Elaboration,
        Self::Decomposition,
        Self::Research,
        Self::Synthesis,
        Self::Report,
    ];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Elaboration => &[Self::Decomposition, Self::Failed],
            Self::Decomposition => &[Self::Research, Self::Failed],
            Self::Research => &[Self::Synthesis, Self::Failed],
            Self::Synthesis => &[Self::Report, Self::Failed],
            Self::Report => &[Self::Complete, Self::Failed],
            Self::Complete | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// `Complete` and `Failed` accept no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Elaboration => "elaboration",
            Self::Decomposition => "decomposition",
            Self::Research => "research",
            Self::Synthesis => "synthesis",
            Self::Report => "report",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ResearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SubquestionStatus
// ---------------------------------------------------------------------------

/// Research status of a single subquestion.
///
/// ```text
/// pending → researched
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubquestionStatus {
    Pending,
    Researched,
}

impl SubquestionStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Researched],
            Self::Researched => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Researched => "researched",
        }
    }
}

impl fmt::Display for SubquestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// A workflow operation a client can request against a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Elaborate,
    Decompose,
    RecordFindings,
    Synthesize,
    FinalizeReport,
    Abandon,
    Status,
}

impl Operation {
    /// Phases in which this operation is accepted.
    #[must_use]
    pub const fn valid_phases(self) -> &'static [ResearchPhase] {
        match self {
            Self::Elaborate => &[ResearchPhase::Elaboration],
            Self::Decompose => &[ResearchPhase::Decomposition],
            Self::RecordFindings => &[ResearchPhase::Research],
            Self::Synthesize => &[ResearchPhase::Synthesis],
            Self::FinalizeReport => &[ResearchPhase::Report],
            Self::Abandon => &ResearchPhase::NON_TERMINAL,
            Self::Status => &ResearchPhase::ALL,
        }
    }

    #[must_use]
    pub fn is_valid_in(self, phase: ResearchPhase) -> bool {
        self.valid_phases().contains(&phase)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Elaborate => "elaborate",
            Self::Decompose => "decompose",
            Self::RecordFindings => "record_findings",
            Self::Synthesize => "synthesize",
            Self::FinalizeReport => "finalize_report",
            Self::Abandon => "abandon",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
