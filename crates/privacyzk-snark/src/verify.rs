//! The typed `verify()` facade (§4.4).
//!
//! The actual pairing check is an external collaborator — this core
//! specifies only the header-validated, table-driven dispatch around it.
//! Rather than hand-roll a stand-in circuit check (which would fabricate
//! cryptography this crate has no business claiming), callers register a
//! [`VerifierEntryPoint`] per schema's `verifier_entry_point` name; `verify`
//! never runs without one.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::artifacts::{self, ArtifactPaths, PROOF_SIZE_CAP, PUBLIC_INPUTS_SIZE_CAP, VK_SIZE_CAP};
use crate::header::validate_header;
use crate::schema;

/// The pairing-check contract the SNARK circuits satisfy. Implementations
/// live outside this crate (PyO3 bindings, an FFI shim, a pure-Rust prover
/// crate); this crate only promises to call one correctly.
pub trait VerifierEntryPoint: Send + Sync {
    fn verify(&self, vk: &[u8], public_inputs: &[u8], proof: &[u8]) -> bool;
}

/// A name-keyed table of verifier entry points, populated by the host
/// before any `verify` call. An empty registry is valid; every lookup
/// against it simply fails closed.
#[derive(Clone, Default)]
pub struct VerifierRegistry {
    entries: HashMap<&'static str, Arc<dyn VerifierEntryPoint>>,
}

impl VerifierRegistry {
    pub fn new() -> Self {
        VerifierRegistry {
            entries: HashMap::new(),
        }
    }

    pub fn register(&mut self, entry_point: &'static str, verifier: Arc<dyn VerifierEntryPoint>) {
        self.entries.insert(entry_point, verifier);
    }

    pub fn get(&self, entry_point: &str) -> Option<&Arc<dyn VerifierEntryPoint>> {
        self.entries.get(entry_point)
    }
}

/// `verify(statement, schema_v, vk, public_inputs, proof) -> bool`.
///
/// Steps, per §4.4: look up the schema; validate the public-inputs header;
/// dispatch to the registered verifier entry point. Any failure at any
/// step — unknown schema, header mismatch, missing entry point, or the
/// entry point itself returning false — collapses to `false`. This
/// function never panics and never surfaces a typed error to the caller,
/// matching §4.6's "verifier failures at any level return false."
pub fn verify(
    registry: &VerifierRegistry,
    statement: &str,
    schema_version: u16,
    vk: &[u8],
    public_inputs: &[u8],
    proof: &[u8],
) -> bool {
    let Some(schema) = schema::lookup(statement, schema_version) else {
        debug!(statement, schema_version, "unknown snark schema");
        return false;
    };

    if !validate_header(&schema, public_inputs) {
        debug!(statement, schema_version, "public-inputs header mismatch");
        return false;
    }

    let Some(verifier) = registry.get(schema.verifier_entry_point) else {
        warn!(
            entry_point = schema.verifier_entry_point,
            "no verifier registered for entry point"
        );
        return false;
    };

    verifier.verify(vk, public_inputs, proof)
}

/// Resolve the canonical artifacts for `(statement, schema_version,
/// depth)` under `base`, enforce size caps before reading, then dispatch
/// through [`verify`]. A missing or oversized artifact is a `false`
/// result, not a propagated error — matching §4.4's "file missing is a
/// schema error, not a crash" once collapsed to the boundary.
pub fn verify_from_artifacts(
    registry: &VerifierRegistry,
    base: &Path,
    statement: &str,
    schema_version: u16,
    depth: u32,
) -> bool {
    let ArtifactPaths { vk, public_inputs, proof, .. } =
        artifacts::resolve(base, statement, schema_version, depth);

    let vk_bytes = match artifacts::read_capped(&vk, VK_SIZE_CAP) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "failed to read vk artifact");
            return false;
        }
    };
    let public_inputs_bytes = match artifacts::read_capped(&public_inputs, PUBLIC_INPUTS_SIZE_CAP) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "failed to read public_inputs artifact");
            return false;
        }
    };
    let proof_bytes = match artifacts::read_capped(&proof, PROOF_SIZE_CAP) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "failed to read proof artifact");
            return false;
        }
    };

    verify(
        registry,
        statement,
        schema_version,
        &vk_bytes,
        &public_inputs_bytes,
        &proof_bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysTrue;
    impl VerifierEntryPoint for AlwaysTrue {
        fn verify(&self, _vk: &[u8], _public_inputs: &[u8], _proof: &[u8]) -> bool {
            true
        }
    }

    fn v2_header(statement_type: u16, statement_version: u16) -> Vec<u8> {
        let mut buf = vec![2u8, 0];
        buf.extend_from_slice(&statement_type.to_le_bytes());
        buf.extend_from_slice(&statement_version.to_le_bytes());
        buf
    }

    #[test]
    fn dispatches_to_registered_verifier_on_valid_header() {
        let mut registry = VerifierRegistry::new();
        registry.register("verify_membership_v2", Arc::new(AlwaysTrue));
        let public_inputs = v2_header(1, 2);
        assert!(verify(&registry, "membership", 2, &[], &public_inputs, &[]));
    }

    #[test]
    fn unknown_schema_is_false() {
        let registry = VerifierRegistry::new();
        assert!(!verify(&registry, "membership", 99, &[], &[], &[]));
    }

    #[test]
    fn header_mismatch_is_false_even_with_registered_verifier() {
        let mut registry = VerifierRegistry::new();
        registry.register("verify_membership_v2", Arc::new(AlwaysTrue));
        let public_inputs = v2_header(9, 2); // wrong statement_type
        assert!(!verify(&registry, "membership", 2, &[], &public_inputs, &[]));
    }

    #[test]
    fn missing_entry_point_is_false() {
        let registry = VerifierRegistry::new();
        let public_inputs = v2_header(1, 2);
        assert!(!verify(&registry, "membership", 2, &[], &public_inputs, &[]));
    }
}
