//! Research workflow limits.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_min_subquestions() -> usize {
    3
}

const fn default_max_subquestions() -> usize {
    5
}

const fn default_max_findings() -> usize {
    50
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Fewest subquestions accepted at decomposition.
    #[serde(default = "default_min_subquestions")]
    pub min_subquestions: usize,

    /// Most subquestions accepted at decomposition.
    #[serde(default = "default_max_subquestions")]
    pub max_subquestions: usize,

    /// Largest findings batch accepted for one subquestion.
    #[serde(default = "default_max_findings")]
    pub max_findings_per_subquestion: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            min_subquestions: default_min_subquestions(),
            max_subquestions: default_max_subquestions(),
            max_findings_per_subquestion: default_max_findings(),
        }
    }
}

impl WorkflowConfig {
    /// Reject limits the phase engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_subquestions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "workflow.min_subquestions".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_subquestions > self.max_subquestions {
            return Err(ConfigError::InvalidValue {
                field: "workflow.max_subquestions".to_string(),
                reason: format!(
                    "must be >= min_subquestions ({}), got {}",
                    self.min_subquestions, self.max_subquestions
                ),
            });
        }
        if self.max_findings_per_subquestion == 0 {
            return Err(ConfigError::InvalidValue {
                field: "workflow.max_findings_per_subquestion".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
