//! # delve-engine
//!
//! The research-session state machine and the pieces around it.
//!
//! - [`SessionStore`] owns every [`ResearchSession`](delve_core::entities::ResearchSession)
//!   and serializes transitions per session.
//! - [`PhaseEngine`] validates phase inputs and is the only code that mutates
//!   a session.
//! - [`Dispatcher`] is the boundary entry point: it resolves or creates the
//!   session, routes the typed input to the engine, and translates errors
//!   into structured responses.
//!
//! Everything here is synchronous and in-memory.
//!
//! ```
//! use std::sync::Arc;
//!
//! use delve_core::enums::ResearchPhase;
//! use delve_core::inputs::{DispatchRequest, PhaseInput};
//! use delve_engine::{Dispatcher, PhaseEngine, SessionStore};
//!
//! let dispatcher = Dispatcher::new(Arc::new(SessionStore::new()), PhaseEngine::default());
//! let opened = dispatcher.handle(DispatchRequest::start("impact of AI in healthcare")).unwrap();
//! assert_eq!(opened.phase, ResearchPhase::Elaboration);
//!
//! let next = dispatcher
//!     .handle(DispatchRequest::advance(
//!         opened.session_id,
//!         PhaseInput::Elaborate { elaboration: "Clinical and operational impact".into() },
//!     ))
//!     .unwrap();
//! assert_eq!(next.phase, ResearchPhase::Decomposition);
//! ```

pub mod dispatch;
pub mod engine;
pub mod instructions;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatch::Dispatcher;
pub use engine::PhaseEngine;
pub use store::SessionStore;
