//! SHA-256 fingerprints via `ring::digest`.

use ring::digest::SHA256;

/// Compute the SHA-256 of raw DER bytes, lowercase hex.
///
/// Used to key trust anchors and to mark visited certificates during
/// path building.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = ring::digest::digest(&SHA256, data);
    hex::encode(digest.as_ref())
}
