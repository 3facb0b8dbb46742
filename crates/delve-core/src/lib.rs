//! # delve-core
//!
//! Core types shared across all Delve crates:
//! - Research session entities (session, subquestion, finding, transition log)
//! - Phase and status enums with state machine transitions
//! - Typed phase inputs accepted by the workflow dispatcher
//! - Step and error response shapes returned to clients
//! - The workflow error taxonomy
//! - Session ID generation

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod inputs;
pub mod responses;
