//! Protocol constants for privacy proof exchange (§4.5, §6).

use std::time::Duration;

pub const PROTOCOL_ID: &str = "/privacyzk/1.0.0";
pub const MSG_V: u64 = 1;
pub const STATEMENT_TYPES: &[&str] = &["membership", "continuity", "unlinkability"];
pub const SNARK_SCHEMA_V: u64 = 2;
pub const DEFAULT_MEMBERSHIP_DEPTH: u64 = 16;

pub const MAX_PROOF_BYTES: usize = 4096;
pub const MAX_PUBLIC_INPUTS_BYTES: usize = 65536;
pub const MAX_META_BYTES: usize = 4096;

pub const REQUEST_MAX_BYTES: usize = 8192;
const RESPONSE_OVERHEAD_BYTES: usize = 2048;
pub const RESPONSE_MAX_BYTES: usize =
    MAX_PUBLIC_INPUTS_BYTES + MAX_PROOF_BYTES + MAX_META_BYTES + RESPONSE_OVERHEAD_BYTES;

pub const MAX_FRAME_BYTES: u32 = 131072;

pub const READ_TIMEOUT: Duration = Duration::from_secs(5);
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(5);
pub const TOTAL_STREAM_TIMEOUT: Duration = Duration::from_secs(120);

pub fn is_valid_statement_type(statement_type: &str) -> bool {
    STATEMENT_TYPES.contains(&statement_type)
}
