//! The requester side of the protocol: open a stream to a peer, send a
//! request frame, read back a response frame, always close.

use crate::constants::{PROTOCOL_ID, TOTAL_STREAM_TIMEOUT};
use crate::error::Result;
use crate::framing::{read_frame, write_frame};
use crate::messages::{decode_response, encode_request, ProofRequest, ProofResponse};
use crate::stream::StreamOpener;

/// Opens a stream to `peer`, sends `req`, and returns the decoded response.
/// The stream is closed on every exit path, including error ones.
pub async fn request_proof<O: StreamOpener>(
    opener: &O,
    peer: &str,
    req: &ProofRequest,
) -> Result<ProofResponse> {
    let request_blob = encode_request(req)?;
    let mut stream = opener.open(peer, PROTOCOL_ID).await?;

    let result = tokio::time::timeout(TOTAL_STREAM_TIMEOUT, async {
        write_frame(&mut stream, &request_blob).await?;
        let response_blob = read_frame(&mut stream).await?;
        decode_response(&response_blob)
    })
    .await;

    let _ = stream.close().await;
    result?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handle_proof_stream;
    use crate::provider::{FixtureProvider, ProofProvider};
    use crate::stream::Stream;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Pipe {
        inbound: Arc<Mutex<VecDeque<u8>>>,
        outbound: Arc<Mutex<VecDeque<u8>>>,
    }

    #[async_trait]
    impl Stream for Pipe {
        async fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            // Poll rather than returning 0 on a momentary empty queue: 0
            // means EOF to the framing layer, which would be wrong here
            // since the peer task may simply not have written yet.
            loop {
                {
                    let mut inbound = self.inbound.lock().unwrap();
                    if !inbound.is_empty() {
                        let n = std::cmp::min(buf.len(), inbound.len());
                        for slot in buf.iter_mut().take(n) {
                            *slot = inbound.pop_front().unwrap();
                        }
                        return Ok(n);
                    }
                }
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        }

        async fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
            self.outbound.lock().unwrap().extend(buf.iter().copied());
            Ok(())
        }

        async fn close(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct LoopbackOpener {
        server_provider: Arc<dyn ProofProvider>,
    }

    #[async_trait]
    impl StreamOpener for LoopbackOpener {
        type Stream = Pipe;

        async fn open(&self, _peer: &str, _protocol: &str) -> std::io::Result<Pipe> {
            let client_to_server = Arc::new(Mutex::new(VecDeque::new()));
            let server_to_client = Arc::new(Mutex::new(VecDeque::new()));

            let mut server_stream = Pipe {
                inbound: client_to_server.clone(),
                outbound: server_to_client.clone(),
            };
            let provider = self.server_provider.clone();
            tokio::spawn(async move {
                // Give the client a beat to write its request frame first.
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                let _ = handle_proof_stream(&mut server_stream, provider.as_ref()).await;
            });

            Ok(Pipe { inbound: server_to_client, outbound: client_to_server })
        }
    }

    fn fixture_dir() -> std::path::PathBuf {
        let base = std::env::temp_dir()
            .join(format!("privacyzk-wire-client-{}-{}", std::process::id(), line!()));
        let dir = base.join("membership").join("v2").join("depth-16");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("public_inputs.bin"), b"pub").unwrap();
        std::fs::write(dir.join("proof.bin"), b"proof").unwrap();
        base
    }

    #[tokio::test]
    async fn round_trips_through_a_loopback_stream() {
        let base = fixture_dir();
        let opener = LoopbackOpener {
            server_provider: Arc::new(FixtureProvider::new(&base)),
        };
        let req = ProofRequest {
            msg_v: crate::constants::MSG_V,
            t: "membership".into(),
            schema_v: crate::constants::SNARK_SCHEMA_V,
            d: 16,
            nonce: vec![0u8; 16],
        };
        let resp = request_proof(&opener, "peer-1", &req).await.unwrap();
        assert!(resp.ok);
        assert_eq!(resp.public_inputs, b"pub");
        let _ = std::fs::remove_dir_all(&base);
    }
}
