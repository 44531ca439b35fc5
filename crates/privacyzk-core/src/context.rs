//! Session context bound to every proof.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// An addressable session context bound to every proof. Its canonical byte
/// encoding is the Fiat-Shamir input that ties a proof to a particular
/// (peer, session) pair; two contexts with identical fields always encode to
/// identical bytes, and any field difference changes the encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofContext {
    peer_id: String,
    session_id: String,
    metadata: BTreeMap<String, String>,
    timestamp: Option<u64>,
}

impl ProofContext {
    /// Build a context from a peer and session identifier, with no optional
    /// metadata or timestamp.
    pub fn new(peer_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        ProofContext {
            peer_id: peer_id.into(),
            session_id: session_id.into(),
            metadata: BTreeMap::new(),
            timestamp: None,
        }
    }

    /// Attach a metadata entry. Keys are stored sorted so that the
    /// canonical encoding is independent of insertion order.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach a timestamp.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn peer_id(&self) -> &str {
        &self.peer_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Canonical byte encoding: every field is length-prefixed so that
    /// concatenating the fields remains injective (no field's content can be
    /// confused with a field boundary).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        push_field(&mut out, self.peer_id.as_bytes());
        push_field(&mut out, self.session_id.as_bytes());

        out.extend_from_slice(&(self.metadata.len() as u32).to_be_bytes());
        for (key, value) in &self.metadata {
            push_field(&mut out, key.as_bytes());
            push_field(&mut out, value.as_bytes());
        }

        match self.timestamp {
            Some(ts) => {
                out.push(1);
                out.extend_from_slice(&ts.to_be_bytes());
            }
            None => out.push(0),
        }
        out
    }

    /// SHA-256 over the canonical encoding; the value bound into every
    /// statement's Fiat-Shamir transcript.
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.to_bytes());
        hasher.finalize().into()
    }

    /// Hex-encoded ctx-hash, for log lines and error messages — never the
    /// raw fields, which may carry caller-supplied metadata.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash())
    }
}

fn push_field(out: &mut Vec<u8>, field: &[u8]) {
    out.extend_from_slice(&(field.len() as u32).to_be_bytes());
    out.extend_from_slice(field);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_fields_produce_identical_bytes() {
        let a = ProofContext::new("peer-1", "s1");
        let b = ProofContext::new("peer-1", "s1");
        assert_eq!(a.to_bytes(), b.to_bytes());
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn different_session_changes_bytes() {
        let a = ProofContext::new("peer-1", "s1");
        let b = ProofContext::new("peer-1", "s2");
        assert_ne!(a.to_bytes(), b.to_bytes());
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn metadata_order_does_not_affect_encoding() {
        let a = ProofContext::new("peer-1", "s1")
            .with_metadata("a", "1")
            .with_metadata("b", "2");
        let b = ProofContext::new("peer-1", "s1")
            .with_metadata("b", "2")
            .with_metadata("a", "1");
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn length_prefixing_prevents_field_boundary_confusion() {
        let a = ProofContext::new("ab", "cd");
        let b = ProofContext::new("a", "bcd");
        assert_ne!(a.to_bytes(), b.to_bytes());
    }
}
