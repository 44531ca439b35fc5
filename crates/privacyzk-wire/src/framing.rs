//! Length-prefixed framing over a [`Stream`], generalizing the 4-byte
//! big-endian length prefix used by `aingle_minimal::quic` to an
//! enforced maximum frame size and read/write deadlines (§4.5).

use crate::constants::{MAX_FRAME_BYTES, READ_TIMEOUT, WRITE_TIMEOUT};
use crate::error::{Result, WireError};
use crate::stream::Stream;

/// Write `payload` as a single frame: a 4-byte big-endian length prefix
/// followed by the bytes, each write bounded by [`WRITE_TIMEOUT`].
pub async fn write_frame(stream: &mut dyn Stream, payload: &[u8]) -> Result<()> {
    let len = payload.len();
    if len > MAX_FRAME_BYTES as usize {
        return Err(WireError::SizeLimitError("frame exceeds maximum size".into()));
    }
    let prefix = (len as u32).to_be_bytes();
    tokio::time::timeout(WRITE_TIMEOUT, stream.write_all(&prefix)).await??;
    tokio::time::timeout(WRITE_TIMEOUT, stream.write_all(payload)).await??;
    Ok(())
}

/// Read a single frame, enforcing [`MAX_FRAME_BYTES`] on the declared
/// length before allocating, and [`READ_TIMEOUT`] on each read.
pub async fn read_frame(stream: &mut dyn Stream) -> Result<Vec<u8>> {
    let mut prefix = [0u8; 4];
    read_exact(stream, &mut prefix).await?;
    let len = u32::from_be_bytes(prefix);
    if len > MAX_FRAME_BYTES {
        return Err(WireError::SizeLimitError("declared frame length exceeds maximum".into()));
    }
    let mut payload = vec![0u8; len as usize];
    read_exact(stream, &mut payload).await?;
    Ok(payload)
}

async fn read_exact(stream: &mut dyn Stream, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = tokio::time::timeout(READ_TIMEOUT, stream.read(&mut buf[filled..])).await??;
        if n == 0 {
            return Err(WireError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stream closed mid-frame",
            )));
        }
        filled += n;
    }
    Ok(())
}
