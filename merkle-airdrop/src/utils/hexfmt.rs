use super::hasher::Hash32;
use crate::error::{MerkleError, Result};

/// Renders a hash as lowercase hex with a `0x` prefix, the form in which
/// roots are published and persisted.
pub fn to_hex(h: &Hash32) -> String {
    format!("0x{}", hex::encode(h))
}

/// Parses a 32-byte hash from 64 hex characters, with or without `0x`.
pub fn parse_hash32(s: &str) -> Result<Hash32> {
    let trimmed = s.trim();
    let cleaned = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if cleaned.len() != 64 {
        return Err(MerkleError::EncodingError(format!(
            "expected 64 hex chars, got {}",
            cleaned.len()
        )));
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(cleaned, &mut out)
        .map_err(|e| MerkleError::EncodingError(format!("invalid hex: {}", e)))?;
    Ok(out)
}
