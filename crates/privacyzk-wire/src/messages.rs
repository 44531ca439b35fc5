//! CBOR message schemas for privacy proof exchange (§3, §4.5).
//!
//! Grounded on the Python `messages.py` dataclass pair; `validate()`
//! reproduces its field-by-field checks exactly, and `encode_*`/`decode_*`
//! reproduce its size-cap-before-and-after-serialization discipline.

use serde::{Deserialize, Serialize};

use crate::constants::{
    is_valid_statement_type, MAX_META_BYTES, MAX_PROOF_BYTES, MAX_PUBLIC_INPUTS_BYTES, MSG_V,
    REQUEST_MAX_BYTES, RESPONSE_MAX_BYTES, SNARK_SCHEMA_V,
};
use crate::error::{Result, WireError};

/// `{msg_v, t, schema_v, d, nonce}` — a request to generate a proof of
/// statement `t` at `schema_v`, with Merkle depth `d` (meaningful only for
/// `membership`) and a fresh client nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRequest {
    pub msg_v: u64,
    pub t: String,
    pub schema_v: u64,
    pub d: u64,
    #[serde(with = "serde_bytes")]
    pub nonce: Vec<u8>,
}

impl ProofRequest {
    pub fn validate(&self) -> Result<()> {
        if self.msg_v != MSG_V {
            return Err(WireError::SchemaError("unsupported msg_v".into()));
        }
        if !is_valid_statement_type(&self.t) {
            return Err(WireError::SchemaError("unsupported statement type".into()));
        }
        if self.schema_v != SNARK_SCHEMA_V {
            return Err(WireError::SchemaError("unsupported schema_v".into()));
        }
        validate_statement_depth(&self.t, self.d)?;
        let nonce_len = self.nonce.len();
        if !(16..=64).contains(&nonce_len) {
            return Err(WireError::SchemaError("nonce length out of bounds".into()));
        }
        Ok(())
    }
}

/// `{msg_v, ok, t, schema_v, d, public_inputs, proof, meta, err}` — the
/// response to a [`ProofRequest`]. When `ok`, `public_inputs`/`proof` are
/// non-empty and `err` is absent; when not `ok`, the reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofResponse {
    pub msg_v: u64,
    pub ok: bool,
    pub t: String,
    pub schema_v: u64,
    pub d: u64,
    #[serde(with = "serde_bytes")]
    pub public_inputs: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub proof: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub meta: Vec<u8>,
    pub err: Option<String>,
}

impl ProofResponse {
    pub fn validate(&self) -> Result<()> {
        if self.msg_v != MSG_V {
            return Err(WireError::SchemaError("unsupported msg_v".into()));
        }
        if !is_valid_statement_type(&self.t) {
            return Err(WireError::SchemaError("unsupported statement type".into()));
        }
        if self.schema_v != SNARK_SCHEMA_V {
            return Err(WireError::SchemaError("unsupported schema_v".into()));
        }
        validate_statement_depth(&self.t, self.d)?;

        if self.public_inputs.len() > MAX_PUBLIC_INPUTS_BYTES {
            return Err(WireError::SizeLimitError("public_inputs too large".into()));
        }
        if self.proof.len() > MAX_PROOF_BYTES {
            return Err(WireError::SizeLimitError("proof too large".into()));
        }
        if self.meta.len() > MAX_META_BYTES {
            return Err(WireError::SizeLimitError("meta too large".into()));
        }

        if self.ok {
            if self.public_inputs.is_empty() {
                return Err(WireError::SchemaError("public_inputs required when ok=true".into()));
            }
            if self.proof.is_empty() {
                return Err(WireError::SchemaError("proof required when ok=true".into()));
            }
            if self.err.as_ref().is_some_and(|e| !e.is_empty()) {
                return Err(WireError::SchemaError("err must be empty when ok=true".into()));
            }
        } else {
            if !self.public_inputs.is_empty() || !self.proof.is_empty() {
                return Err(WireError::SchemaError(
                    "public_inputs/proof must be empty when ok=false".into(),
                ));
            }
            let Some(err) = self.err.as_ref().filter(|e| !e.is_empty()) else {
                return Err(WireError::SchemaError("err required when ok=false".into()));
            };
            if err.len() > 256 {
                return Err(WireError::SchemaError("err too long".into()));
            }
        }
        Ok(())
    }
}

fn validate_statement_depth(statement_type: &str, depth: u64) -> Result<()> {
    if statement_type == "membership" {
        if depth < 1 {
            return Err(WireError::SchemaError("membership depth must be >= 1".into()));
        }
    } else if depth != 0 {
        return Err(WireError::SchemaError("non-membership depth must be 0".into()));
    }
    Ok(())
}

/// Encode a validated request to CBOR, enforcing [`REQUEST_MAX_BYTES`].
pub fn encode_request(req: &ProofRequest) -> Result<Vec<u8>> {
    req.validate()?;
    let mut blob = Vec::new();
    ciborium::into_writer(req, &mut blob).map_err(|e| WireError::CborEncode(e.to_string()))?;
    if blob.len() > REQUEST_MAX_BYTES {
        return Err(WireError::SizeLimitError("request too large".into()));
    }
    Ok(blob)
}

/// Decode and validate a request from CBOR.
pub fn decode_request(blob: &[u8]) -> Result<ProofRequest> {
    if blob.len() > REQUEST_MAX_BYTES {
        return Err(WireError::SizeLimitError("request too large".into()));
    }
    let req: ProofRequest =
        ciborium::from_reader(blob).map_err(|e| WireError::CborDecode(e.to_string()))?;
    req.validate()?;
    Ok(req)
}

/// Encode a validated response to CBOR, enforcing [`RESPONSE_MAX_BYTES`].
pub fn encode_response(resp: &ProofResponse) -> Result<Vec<u8>> {
    resp.validate()?;
    let mut blob = Vec::new();
    ciborium::into_writer(resp, &mut blob).map_err(|e| WireError::CborEncode(e.to_string()))?;
    if blob.len() > RESPONSE_MAX_BYTES {
        return Err(WireError::SizeLimitError("response too large".into()));
    }
    Ok(blob)
}

/// Decode and validate a response from CBOR.
pub fn decode_response(blob: &[u8]) -> Result<ProofResponse> {
    if blob.len() > RESPONSE_MAX_BYTES {
        return Err(WireError::SizeLimitError("response too large".into()));
    }
    let resp: ProofResponse =
        ciborium::from_reader(blob).map_err(|e| WireError::CborDecode(e.to_string()))?;
    resp.validate()?;
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> ProofRequest {
        ProofRequest {
            msg_v: MSG_V,
            t: "membership".into(),
            schema_v: SNARK_SCHEMA_V,
            d: 16,
            nonce: vec![0x11; 16],
        }
    }

    #[test]
    fn request_round_trips_and_is_deterministic() {
        let req = sample_request();
        let blob = encode_request(&req).unwrap();
        let blob_again = encode_request(&req).unwrap();
        assert_eq!(blob, blob_again);
        let decoded = decode_request(&blob).unwrap();
        assert_eq!(decoded, req);
    }

    #[test]
    fn request_rejects_short_nonce() {
        let mut req = sample_request();
        req.nonce = vec![0u8; 8];
        assert!(req.validate().is_err());
    }

    #[test]
    fn request_rejects_membership_with_zero_depth() {
        let mut req = sample_request();
        req.d = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn request_rejects_non_membership_with_nonzero_depth() {
        let req = ProofRequest {
            msg_v: MSG_V,
            t: "unlinkability".into(),
            schema_v: SNARK_SCHEMA_V,
            d: 1,
            nonce: vec![0u8; 16],
        };
        assert!(req.validate().is_err());
    }

    fn sample_ok_response() -> ProofResponse {
        ProofResponse {
            msg_v: MSG_V,
            ok: true,
            t: "membership".into(),
            schema_v: SNARK_SCHEMA_V,
            d: 16,
            public_inputs: vec![1, 2, 3],
            proof: vec![4, 5, 6],
            meta: vec![],
            err: None,
        }
    }

    #[test]
    fn response_round_trips_and_is_deterministic() {
        let resp = sample_ok_response();
        let blob = encode_response(&resp).unwrap();
        let blob_again = encode_response(&resp).unwrap();
        assert_eq!(blob, blob_again);
        let decoded = decode_response(&blob).unwrap();
        assert_eq!(decoded, resp);
    }

    #[test]
    fn ok_response_requires_non_empty_payload() {
        let mut resp = sample_ok_response();
        resp.proof = vec![];
        assert!(resp.validate().is_err());
    }

    #[test]
    fn err_response_requires_empty_payload_and_nonempty_err() {
        let resp = ProofResponse {
            msg_v: MSG_V,
            ok: false,
            t: "membership".into(),
            schema_v: SNARK_SCHEMA_V,
            d: 16,
            public_inputs: vec![],
            proof: vec![],
            meta: vec![],
            err: Some("provider error".into()),
        };
        assert!(resp.validate().is_ok());

        let mut bad = resp.clone();
        bad.public_inputs = vec![1];
        assert!(bad.validate().is_err());

        let mut missing_err = resp;
        missing_err.err = None;
        assert!(missing_err.validate().is_err());
    }

    #[test]
    fn oversized_public_inputs_is_size_limit_error() {
        let mut resp = sample_ok_response();
        resp.public_inputs = vec![0u8; MAX_PUBLIC_INPUTS_BYTES + 1];
        assert!(matches!(resp.validate(), Err(WireError::SizeLimitError(_))));
    }
}
