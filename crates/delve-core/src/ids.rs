//! ID prefixes and generation.
//!
//! IDs are `{prefix}-{8 lowercase hex chars}`, e.g. `rsn-a3f8b2c1`.

use chrono::Utc;

/// Prefix for research session IDs.
pub const PREFIX_SESSION: &str = "rsn";

/// All known prefixes.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_SESSION];

/// Generate a new ID with the given prefix.
///
/// Uniqueness is not guaranteed here; the session store rejects collisions
/// and asks for another ID.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let mut bytes = [0u8; 4];
    if getrandom::fill(&mut bytes).is_err() {
        bytes = Utc::now().timestamp_subsec_nanos().to_le_bytes();
    }
    let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{suffix}")
}

/// Check whether `id` has the shape produced by [`generate_id`] for `prefix`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
