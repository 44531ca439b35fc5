//! The responder side of the protocol: decode a request frame, obtain proof
//! material from a [`ProofProvider`], and write back a response frame.
//!
//! State machine (§4.6): `ReadingHeader -> ReadingBody -> DecodeReq ->
//! BuildingResponse -> WritingResponse -> Closed`, with any failure along
//! the way short-circuiting to `WritingErrorResponse -> Closed` instead of
//! propagating to the peer as a transport error. The stream is always
//! closed on the way out, success or failure.

use crate::constants::TOTAL_STREAM_TIMEOUT;
use crate::error::{Result, WireError};
use crate::framing::{read_frame, write_frame};
use crate::messages::{decode_request, encode_response, ProofResponse};
use crate::provider::{validate_provided, ProofProvider};
use crate::stream::Stream;

/// Decode a request frame, run it against `provider`, and produce the
/// `ProofResponse` to send back — pure (no I/O), so it can be tested without
/// an actual stream.
pub async fn handle_proof_request_bytes(
    request_blob: &[u8],
    provider: &dyn ProofProvider,
) -> ProofResponse {
    match handle_request_inner(request_blob, provider).await {
        Ok(resp) => resp,
        Err(err) => error_response(&err),
    }
}

async fn handle_request_inner(
    request_blob: &[u8],
    provider: &dyn ProofProvider,
) -> Result<ProofResponse> {
    let req = decode_request(request_blob)?;
    let provided = provider.get_proof(&req).await?;
    validate_provided(&req, &provided)?;

    let meta_bytes = encode_meta(&provided.meta)?;
    Ok(ProofResponse {
        msg_v: req.msg_v,
        ok: true,
        t: req.t,
        schema_v: req.schema_v,
        d: req.d,
        public_inputs: provided.public_inputs,
        proof: provided.proof,
        meta: meta_bytes,
        err: None,
    })
}

fn encode_meta(meta: &crate::provider::Meta) -> Result<Vec<u8>> {
    if meta.is_empty() {
        return Ok(Vec::new());
    }
    let mut blob = Vec::new();
    ciborium::into_writer(meta, &mut blob).map_err(|e| WireError::CborEncode(e.to_string()))?;
    Ok(blob)
}

/// Requests that fail validation or provider lookup get a `ok=false`
/// response with a bounded error string — never the raw I/O or internal
/// error text, since that could leak fixture paths or prover internals.
fn error_response(err: &WireError) -> ProofResponse {
    let mut message = err.to_string();
    message.truncate(200);
    ProofResponse {
        msg_v: crate::constants::MSG_V,
        ok: false,
        t: "membership".into(),
        schema_v: crate::constants::SNARK_SCHEMA_V,
        d: 0,
        public_inputs: Vec::new(),
        proof: Vec::new(),
        meta: Vec::new(),
        err: Some(message),
    }
}

/// Serves a single proof request over `stream`: read one frame, handle it,
/// write back one frame, always close — the whole exchange bounded by
/// [`TOTAL_STREAM_TIMEOUT`].
pub async fn handle_proof_stream(stream: &mut dyn Stream, provider: &dyn ProofProvider) -> Result<()> {
    let result = tokio::time::timeout(TOTAL_STREAM_TIMEOUT, async {
        let request_blob = read_frame(stream).await?;
        let response = handle_proof_request_bytes(&request_blob, provider).await;
        let response_blob = encode_response(&response).unwrap_or_else(|_| {
            encode_response(&error_response(&WireError::SchemaError(
                "failed to encode response".into(),
            )))
            .expect("a minimal error response always encodes")
        });
        write_frame(stream, &response_blob).await
    })
    .await;

    let _ = stream.close().await;
    result?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::encode_request;
    use crate::messages::ProofRequest;
    use crate::provider::{ProvidedProof, Meta, MetaValue};
    use async_trait::async_trait;

    struct StubProvider {
        result: Result<ProvidedProof>,
    }

    #[async_trait]
    impl ProofProvider for StubProvider {
        async fn get_proof(&self, _req: &ProofRequest) -> Result<ProvidedProof> {
            match &self.result {
                Ok(p) => Ok(ProvidedProof {
                    public_inputs: p.public_inputs.clone(),
                    proof: p.proof.clone(),
                    meta: p.meta.clone(),
                }),
                Err(_) => Err(WireError::ProofGenerationError("stub failure".into())),
            }
        }
    }

    fn sample_request_blob() -> Vec<u8> {
        encode_request(&ProofRequest {
            msg_v: crate::constants::MSG_V,
            t: "membership".into(),
            schema_v: crate::constants::SNARK_SCHEMA_V,
            d: 16,
            nonce: vec![0u8; 16],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn successful_provider_yields_ok_response() {
        let mut meta = Meta::new();
        meta.insert("source".into(), MetaValue::Str("fixture".into()));
        let provider = StubProvider {
            result: Ok(ProvidedProof { public_inputs: vec![1, 2], proof: vec![3, 4], meta }),
        };
        let resp = handle_proof_request_bytes(&sample_request_blob(), &provider).await;
        assert!(resp.ok);
        assert_eq!(resp.public_inputs, vec![1, 2]);
        assert!(resp.validate().is_ok());
    }

    #[tokio::test]
    async fn provider_failure_yields_err_response_not_a_panic() {
        let provider = StubProvider { result: Err(WireError::ProofGenerationError("x".into())) };
        let resp = handle_proof_request_bytes(&sample_request_blob(), &provider).await;
        assert!(!resp.ok);
        assert!(resp.err.is_some());
        assert!(resp.validate().is_ok());
    }

    #[tokio::test]
    async fn malformed_request_yields_err_response() {
        let provider = StubProvider {
            result: Ok(ProvidedProof { public_inputs: vec![1], proof: vec![1], meta: Meta::new() }),
        };
        let resp = handle_proof_request_bytes(b"not cbor", &provider).await;
        assert!(!resp.ok);
    }
}
