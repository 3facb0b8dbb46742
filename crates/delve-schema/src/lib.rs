//! # delve-schema
//!
//! JSON Schema generation and validation for Delve.
//!
//! Wire types are defined in `delve-core` with `#[derive(JsonSchema)]`. This
//! crate builds their schemas once and provides:
//! - the `inputSchema` advertised for the MCP research tool
//! - validation of raw tool arguments before they reach the dispatcher
//! - schema export for `delve schema`

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{SchemaRegistry, DISPATCH_REQUEST};
