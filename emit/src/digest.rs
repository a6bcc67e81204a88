//! Content digests for emitted fixtures.

use blake3::Hasher;

/// Hex-encoded BLAKE3 digest of `bytes`.
#[must_use]
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize().to_hex().to_string()
}

/// First eight digest bytes as a little-endian integer, for compact logging.
#[must_use]
pub fn content_fingerprint(bytes: &[u8]) -> u64 {
    let hash = blake3::hash(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(head)
}
