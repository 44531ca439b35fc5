//! Public-inputs header validation (§4.4 step 2, §6).
//!
//! - schema_v=1: the first byte must equal `1`.
//! - schema_v=2: the first six bytes are three little-endian `u16` fields —
//!   `schema_version`, `statement_type`, `statement_version` — each of
//!   which must match the looked-up [`crate::schema::SchemaInfo`].

use crate::schema::SchemaInfo;

/// Validate `public_inputs`'s header against `schema`. Any mismatch,
/// including a too-short buffer, is a hard reject.
pub fn validate_header(schema: &SchemaInfo, public_inputs: &[u8]) -> bool {
    match schema.schema_version {
        1 => public_inputs.first() == Some(&1),
        2 => match parse_v2_header(public_inputs) {
            Some((schema_version, statement_type, statement_version)) => {
                schema_version == 2
                    && schema.statement_type.map_or(true, |t| t == statement_type)
                    && schema
                        .statement_version
                        .map_or(true, |v| v == statement_version)
            }
            None => false,
        },
        _ => false,
    }
}

/// Parse the three little-endian `u16` header fields of a schema_v=2
/// public-inputs buffer. `None` if the buffer is shorter than 6 bytes.
pub fn parse_v2_header(data: &[u8]) -> Option<(u16, u16, u16)> {
    if data.len() < 6 {
        return None;
    }
    let schema_version = u16::from_le_bytes([data[0], data[1]]);
    let statement_type = u16::from_le_bytes([data[2], data[3]]);
    let statement_version = u16::from_le_bytes([data[4], data[5]]);
    Some((schema_version, statement_type, statement_version))
}
