//! The `ZKProof` envelope: the common shape every statement proof is
//! serialized into before it is handed to a backend, a wire message, or a
//! test assertion.

use std::collections::BTreeMap;

/// The closed set of statement kinds a `ZKProof` can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProofType {
    AnonymitySetMembership,
    SessionUnlinkability,
    IdentityContinuity,
    /// The commitment-opening proof of knowledge used by the real-ZK CLI
    /// helper. Always carries `claim_only = true` in `public_inputs` so a
    /// downstream consumer never mistakes it for a membership proof with an
    /// implicit Merkle root.
    CommitmentOpening,
}

impl ProofType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofType::AnonymitySetMembership => "membership",
            ProofType::SessionUnlinkability => "unlinkability",
            ProofType::IdentityContinuity => "continuity",
            ProofType::CommitmentOpening => "commitment_opening",
        }
    }
}

/// A typed public-input value. The registry in `privacyzk-backends`
/// constrains which keys and value kinds are legal per statement type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicInputValue {
    Bytes(Vec<u8>),
    Str(String),
    U64(u64),
    Bool(bool),
}

/// The envelope stored and transported for every proof type.
///
/// All byte fields are fixed-length per statement (see each statement
/// module for the exact layout); `public_inputs` must carry
/// `statement_type` and `statement_version` for any proof routed through
/// the Phase-2B statement registry.
#[derive(Debug, Clone)]
pub struct ZkProof {
    pub proof_type: ProofType,
    pub commitment: Vec<u8>,
    pub challenge: [u8; 32],
    pub response: Vec<u8>,
    pub public_inputs: BTreeMap<String, PublicInputValue>,
    pub timestamp: Option<u64>,
}

impl ZkProof {
    pub fn statement_type(&self) -> Option<&str> {
        match self.public_inputs.get("statement_type") {
            Some(PublicInputValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn statement_version(&self) -> Option<u64> {
        match self.public_inputs.get("statement_version") {
            Some(PublicInputValue::U64(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn is_claim_only(&self) -> bool {
        matches!(
            self.public_inputs.get("claim_only"),
            Some(PublicInputValue::Bool(true))
        )
    }

    /// Hex-encoded Fiat-Shamir challenge, for log lines — proofs carry no
    /// secret material in `challenge`, so this is safe to print in full.
    pub fn challenge_hex(&self) -> String {
        hex::encode(self.challenge)
    }
}
