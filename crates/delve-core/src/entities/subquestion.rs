use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SubquestionStatus;

/// One slice of the research question, researched independently.
///
/// `index` is the 0-based position given at decomposition and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Subquestion {
    pub index: usize,
    pub text: String,
    pub status: SubquestionStatus,
}

impl Subquestion {
    #[must_use]
    pub const fn new(index: usize, text: String) -> Self {
        Self {
            index,
            text,
            status: SubquestionStatus::Pending,
        }
    }

    #[must_use]
    pub fn is_researched(&self) -> bool {
        self.status == SubquestionStatus::Researched
    }
}
