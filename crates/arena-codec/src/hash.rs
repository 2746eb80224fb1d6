//! State digests over canonical bytes

use crate::{to_bytes, Value};
use sha2::{Digest, Sha256};

/// Compute SHA-256 of raw bytes
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Digest of a value's canonical bytes
pub fn digest(value: &Value) -> [u8; 32] {
    sha256(&to_bytes(value))
}

/// Digest of a value's canonical bytes as hex
pub fn digest_hex(value: &Value) -> String {
    hex::encode(digest(value))
}
