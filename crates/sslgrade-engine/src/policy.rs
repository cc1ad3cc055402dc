//! Grading policy.
//!
//! A fixed, ordered rule set evaluated over certificate attributes, the
//! negotiated session, and the chain-validation outcome. Every firing
//! rule appends exactly one finding and subtracts a fixed penalty; no
//! rule ever adds points, and the score is not clamped on the way down.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::types::{ChainVerificationResult, GradeResult, ParsedCertificate, SessionDescriptor};

/// The single signature algorithm accepted without penalty
pub const ACCEPTED_SIG_ALG: &str = "sha256WithRSAEncryption";

/// Minimum acceptable public key size in bits
pub const MIN_PUBKEY_BITS: u32 = 2048;

/// Marker a cipher name must carry to avoid the cipher penalty
const CIPHER_REQUIRED_MARKER: &str = "RSA";

/// Markers that disqualify a cipher name outright
const CIPHER_FORBIDDEN_MARKERS: &[&str] = &["ADH", "CBC", "RC4", "TLS-RSA"];

/// Protocol markers flagged as legacy, checked as substrings. `TLSv1`
/// deliberately also matches longer labels such as `TLSv1.2`.
const SSLV3_MARKER: &str = "SSLv3";
const TLSV1_MARKER: &str = "TLSv1";

const PENALTY_SIG_ALG: i32 = 10;
const PENALTY_CIPHER: i32 = 10;
const PENALTY_PUBKEY: i32 = 10;
const PENALTY_EXPIRED: i32 = 10;
const PENALTY_SSLV3: i32 = 10;
const PENALTY_TLSV1: i32 = 10;
const PENALTY_CHAIN: i32 = 20;

/// Fixed note attached to the weak-cipher finding
const CBC_ADVISORY: &str = "Cipher Block Chaining (CBC) ciphers were marked weak around March \
     2019; many sites still enable them and some are exploitable via the Zombie POODLE and \
     GOLDENDOODLE downgrade attacks";

/// Fixed finding for a failed chain of trust
const CHAIN_FINDING: &str = "failed chain of trust validation";

/// Evaluate the rule set against one host record.
///
/// Rules run in a fixed order; the chain-of-trust rule is always
/// evaluated last and is never short-circuited by earlier findings.
/// The returned score may be negative.
#[must_use]
pub fn grade(
    cert: &ParsedCertificate,
    session: &SessionDescriptor,
    chain: &ChainVerificationResult,
    now: DateTime<Utc>,
) -> GradeResult {
    let mut result = GradeResult::new();

    // 1. signature algorithm
    if cert.signature_algorithm != ACCEPTED_SIG_ALG {
        result.penalize(
            PENALTY_SIG_ALG,
            format!("weak signature algorithm {}", cert.signature_algorithm),
        );
    }

    // 2. negotiated cipher
    if is_weak_cipher(&session.cipher_name) {
        result.penalize(
            PENALTY_CIPHER,
            format!("weak cipher {}; {CBC_ADVISORY}", session.cipher_name),
        );
    }

    // 3. public key size
    if cert.public_key_bits < MIN_PUBKEY_BITS {
        result.penalize(
            PENALTY_PUBKEY,
            format!("public key too small: {} bits", cert.public_key_bits),
        );
    }

    // 4. expiry
    if cert.expired_at(now) {
        result.penalize(
            PENALTY_EXPIRED,
            format!("certificate expired {}", cert.not_after.to_rfc3339()),
        );
    }

    // 5. legacy protocol SSLv3
    if supports_marker(session, SSLV3_MARKER) {
        result.penalize(PENALTY_SSLV3, "SSLv3 supported".to_string());
    }

    // 6. legacy protocol TLSv1 (substring match, catches TLSv1.x labels)
    if supports_marker(session, TLSV1_MARKER) {
        result.penalize(PENALTY_TLSV1, "TLSv1 supported".to_string());
    }

    // 7. chain of trust, always last
    if let ChainVerificationResult::Untrusted(reason) = chain {
        debug!(%reason, "chain-of-trust validation failed");
        result.penalize(PENALTY_CHAIN, CHAIN_FINDING.to_string());
    }

    result
}

/// A cipher is weak unless it carries the RSA marker and none of the
/// forbidden markers.
fn is_weak_cipher(name: &str) -> bool {
    !name.contains(CIPHER_REQUIRED_MARKER)
        || CIPHER_FORBIDDEN_MARKERS
            .iter()
            .any(|marker| name.contains(marker))
}

fn supports_marker(session: &SessionDescriptor, marker: &str) -> bool {
    session
        .supported_protocols
        .iter()
        .any(|proto| proto.contains(marker))
}
