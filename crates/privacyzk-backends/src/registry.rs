//! Statement registry: a compile-time table mapping `(statement_type,
//! statement_version)` to the schema a decoded `ZkProof`'s `public_inputs`
//! must satisfy.
//!
//! Grounded on the Python `statements.py` `STATEMENT_REGISTRY`, re-architected
//! per REDESIGN FLAGS as a plain `match` rather than a dynamic schema
//! language: there is no registration step, so an unknown statement type is
//! a compile-time-closed `None`, not a runtime lookup miss against mutable
//! state.

use privacyzk_core::{PublicInputValue, ZkProof};

use crate::error::{BackendError, Result};

/// One field a statement's `public_inputs` must carry, and the `PublicInputValue`
/// variant it must carry it as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bytes,
    Str,
    U64,
    Bool,
}

/// The schema for one `(statement_type, statement_version)` pair.
#[derive(Debug, Clone, Copy)]
pub struct StatementSpec {
    pub statement_type: &'static str,
    pub version: u64,
    pub required_fields: &'static [(&'static str, FieldKind)],
    pub description: &'static str,
}

const MEMBERSHIP_FIELDS: &[(&str, FieldKind)] = &[
    ("statement_type", FieldKind::Str),
    ("statement_version", FieldKind::U64),
    ("root", FieldKind::Bytes),
    ("commitment", FieldKind::Bytes),
    ("ctx_hash", FieldKind::Bytes),
    ("auth_path", FieldKind::Bytes),
];

const UNLINKABILITY_FIELDS: &[(&str, FieldKind)] = &[
    ("statement_type", FieldKind::Str),
    ("statement_version", FieldKind::U64),
    ("tag", FieldKind::Bytes),
    ("commitment", FieldKind::Bytes),
    ("ctx_hash", FieldKind::Bytes),
];

const CONTINUITY_FIELDS: &[(&str, FieldKind)] = &[
    ("statement_type", FieldKind::Str),
    ("statement_version", FieldKind::U64),
    ("commitment_1", FieldKind::Bytes),
    ("commitment_2", FieldKind::Bytes),
    ("ctx_hash", FieldKind::Bytes),
];

const COMMITMENT_OPENING_FIELDS: &[(&str, FieldKind)] = &[
    ("statement_type", FieldKind::Str),
    ("statement_version", FieldKind::U64),
    ("claim_only", FieldKind::Bool),
    ("commitment", FieldKind::Bytes),
    ("ctx_hash", FieldKind::Bytes),
];

/// Look up the `StatementSpec` for a `(statement_type, version)` pair. A
/// `None` return means the statement or its version is unknown — callers
/// must treat that as a hard reject, never a default schema.
pub fn lookup(statement_type: &str, version: u64) -> Option<StatementSpec> {
    match (statement_type, version) {
        ("membership", 2) => Some(StatementSpec {
            statement_type: "membership",
            version: 2,
            required_fields: MEMBERSHIP_FIELDS,
            description: "Prove commitment is a leaf of a Merkle-root anonymity set",
        }),
        ("unlinkability", 2) => Some(StatementSpec {
            statement_type: "unlinkability",
            version: 2,
            required_fields: UNLINKABILITY_FIELDS,
            description: "Prove a deterministic session tag without revealing identity",
        }),
        ("continuity", 2) => Some(StatementSpec {
            statement_type: "continuity",
            version: 2,
            required_fields: CONTINUITY_FIELDS,
            description: "Prove two commitments open to the same identity value",
        }),
        ("anonymity_set_membership", 1) => Some(StatementSpec {
            statement_type: "anonymity_set_membership",
            version: 1,
            required_fields: COMMITMENT_OPENING_FIELDS,
            description: "Commitment-opening PoK (claim-only, not a membership proof)",
        }),
        _ => None,
    }
}

/// Validate that `proof.public_inputs` satisfies the schema registered for
/// its declared `(statement_type, statement_version)`. A version mismatch
/// against the looked-up spec, or any missing/mistyped field, is a hard
/// reject.
pub fn validate_public_inputs(proof: &ZkProof) -> Result<()> {
    let statement_type = proof
        .statement_type()
        .ok_or_else(|| BackendError::SchemaError("missing statement_type".into()))?;
    let version = proof
        .statement_version()
        .ok_or_else(|| BackendError::SchemaError("missing statement_version".into()))?;

    let spec = lookup(statement_type, version).ok_or_else(|| {
        tracing::debug!(statement_type, version, "unknown statement in registry lookup");
        BackendError::SchemaError(format!(
            "unknown statement {statement_type:?} version {version}"
        ))
    })?;

    if spec.version != version {
        return Err(BackendError::SchemaError(format!(
            "statement version mismatch: registry has {}, proof declares {version}",
            spec.version
        )));
    }

    for (field, kind) in spec.required_fields {
        let value = proof
            .public_inputs
            .get(*field)
            .ok_or_else(|| BackendError::SchemaError(format!("missing required field {field:?}")))?;
        let matches = matches!(
            (kind, value),
            (FieldKind::Bytes, PublicInputValue::Bytes(_))
                | (FieldKind::Str, PublicInputValue::Str(_))
                | (FieldKind::U64, PublicInputValue::U64(_))
                | (FieldKind::Bool, PublicInputValue::Bool(_))
        );
        if !matches {
            tracing::debug!(statement_type, field, "public_inputs field has the wrong type");
            return Err(BackendError::SchemaError(format!(
                "field {field:?} has the wrong type for statement {statement_type:?}"
            )));
        }
    }

    Ok(())
}
