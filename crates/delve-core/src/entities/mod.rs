//! Entity structs for Delve's research workflow.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so sessions
//! can be exported as MCP resources and validated against their schemas.

mod finding;
mod session;
mod subquestion;

pub use finding::Finding;
pub use session::{ResearchSession, SessionNote, SessionSummary};
pub use subquestion::Subquestion;
