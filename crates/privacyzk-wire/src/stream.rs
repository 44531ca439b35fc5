//! Abstract byte stream used by framing, the responder, and the client.
//!
//! Real deployments back this with a libp2p/QUIC substream (as
//! `aingle_minimal::quic` does concretely); tests back it with an in-memory
//! duplex pipe. Keeping the abstraction narrow (open/read/write/close) lets
//! the rest of the crate stay transport-agnostic.

use async_trait::async_trait;

/// A single bidirectional proof-exchange stream to one peer.
#[async_trait]
pub trait Stream: Send + Sync {
    /// Read up to `buf.len()` bytes, returning the number read (0 on EOF).
    async fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;

    /// Write the entirety of `buf`.
    async fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()>;

    /// Flush and half-close the write side.
    async fn close(&mut self) -> std::io::Result<()>;
}

/// Opens outbound streams to a peer under [`crate::constants::PROTOCOL_ID`].
#[async_trait]
pub trait StreamOpener: Send + Sync {
    type Stream: Stream;

    async fn open(&self, peer: &str, protocol: &str) -> std::io::Result<Self::Stream>;
}
