//! The schema table: per (statement, schema_version), the statement-type
//! and statement-version tags the public-inputs header must carry, and the
//! name of the verifier entry point that performs the pairing check.
//!
//! Grounded on the Python `snark/backend.py` `_SCHEMAS` table, reproduced
//! as a compile-time `match` per REDESIGN FLAGS rather than a nested dict.

/// One (statement, schema_version) entry.
#[derive(Debug, Clone, Copy)]
pub struct SchemaInfo {
    pub statement: &'static str,
    pub schema_version: u16,
    /// `None` for schema_v=1, which carries no statement/version tags in
    /// its header (just the single `0x01` byte).
    pub statement_type: Option<u16>,
    pub statement_version: Option<u16>,
    /// Name of the verifier entry point this schema dispatches to. Not a
    /// function pointer: the actual pairing-check implementation is an
    /// external collaborator, registered at runtime via
    /// [`crate::verify::VerifierRegistry`].
    pub verifier_entry_point: &'static str,
}

/// Look up the schema entry for `(statement, schema_version)`. A `None`
/// return is a hard reject for every caller in this crate.
pub fn lookup(statement: &str, schema_version: u16) -> Option<SchemaInfo> {
    match (statement, schema_version) {
        ("membership", 1) => Some(SchemaInfo {
            statement: "membership",
            schema_version: 1,
            statement_type: None,
            statement_version: None,
            verifier_entry_point: "verify_membership_v1",
        }),
        ("membership", 2) => Some(SchemaInfo {
            statement: "membership",
            schema_version: 2,
            statement_type: Some(1),
            statement_version: Some(2),
            verifier_entry_point: "verify_membership_v2",
        }),
        ("unlinkability", 2) => Some(SchemaInfo {
            statement: "unlinkability",
            schema_version: 2,
            statement_type: Some(2),
            statement_version: Some(2),
            verifier_entry_point: "verify_unlinkability_v2",
        }),
        ("continuity", 1) => Some(SchemaInfo {
            statement: "continuity",
            schema_version: 1,
            statement_type: None,
            statement_version: None,
            verifier_entry_point: "verify_continuity_v1",
        }),
        ("continuity", 2) => Some(SchemaInfo {
            statement: "continuity",
            schema_version: 2,
            statement_type: Some(3),
            statement_version: Some(2),
            verifier_entry_point: "verify_continuity_v2",
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pairs_resolve() {
        assert!(lookup("membership", 2).is_some());
        assert!(lookup("unlinkability", 2).is_some());
        assert!(lookup("continuity", 1).is_some());
    }

    #[test]
    fn unknown_pair_is_none() {
        assert!(lookup("membership", 99).is_none());
        assert!(lookup("unlinkability", 1).is_none());
        assert!(lookup("bogus", 2).is_none());
    }
}
