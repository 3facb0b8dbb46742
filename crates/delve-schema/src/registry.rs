//! Central schema registry for Delve wire types.
//!
//! The `SchemaRegistry` builds JSON Schemas from delve-core types at
//! construction time using [`schemars::schema_for!`] and validates instances
//! with `jsonschema`. Validators are compiled once per schema.

use std::collections::HashMap;

use jsonschema::Validator;
use schemars::schema_for;
use serde_json::Value;

use crate::error::SchemaError;

/// Registry name of the research tool's input schema.
pub const DISPATCH_REQUEST: &str = "dispatch_request";

struct Entry {
    schema: Value,
    validator: Validator,
}

/// Central store of Delve's JSON Schemas.
pub struct SchemaRegistry {
    entries: HashMap<&'static str, Entry>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {{
        let schema = serde_json::to_value(schema_for!($ty))
            .map_err(|e| SchemaError::Generation(format!("{}: {e}", $name)))?;
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| SchemaError::Generation(format!("{}: {e}", $name)))?;
        $map.insert($name, Entry { schema, validator });
    }};
}

impl SchemaRegistry {
    /// Build a registry containing every entity, input, and response schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if a generated schema fails to
    /// serialize or compile.
    pub fn new() -> Result<Self, SchemaError> {
        let mut entries = HashMap::new();

        // --- Entities ---
        register!(entries, "research_session", delve_core::entities::ResearchSession);
        register!(entries, "session_summary", delve_core::entities::SessionSummary);
        register!(entries, "subquestion", delve_core::entities::Subquestion);
        register!(entries, "finding", delve_core::entities::Finding);

        // --- Inputs ---
        register!(entries, DISPATCH_REQUEST, delve_core::inputs::DispatchRequest);
        register!(entries, "phase_input", delve_core::inputs::PhaseInput);
        register!(entries, "finding_input", delve_core::inputs::FindingInput);

        // --- Responses ---
        register!(entries, "step_response", delve_core::responses::StepResponse);
        register!(entries, "state_snapshot", delve_core::responses::StateSnapshot);
        register!(entries, "error_response", delve_core::responses::ErrorResponse);

        Ok(Self { entries })
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|entry| &entry.schema)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` listing every violation.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let errors: Vec<String> = entry
            .validator
            .iter_errors(instance)
            .map(|e| format!("{e} at '{}'", e.instance_path))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.entries.len()
    }
}
