//! Chain-of-trust verification outcome.

use serde::{Deserialize, Serialize};

/// Outcome of validating one leaf + intermediates against the root store.
///
/// An untrusted chain is a normal grading input, not an error; only the
/// grading policy consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainVerificationResult {
    /// A complete path reached a trust anchor with no failing hop
    Trusted,
    /// No acceptable path exists
    Untrusted(UntrustedReason),
}

impl ChainVerificationResult {
    /// Returns true for [`ChainVerificationResult::Trusted`]
    #[must_use]
    pub const fn is_trusted(&self) -> bool {
        matches!(self, Self::Trusted)
    }
}

/// Why no trust path was accepted, most specific failure first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UntrustedReason {
    /// A certificate on the attempted path was outside its validity window
    ExpiredLink,
    /// A certificate's signature did not verify against its issuer's key
    SignatureMismatch,
    /// No issuer chain leads to a trust anchor
    NoPathToRoot,
    /// A supplied intermediate did not decode
    MalformedIntermediate,
}

impl std::fmt::Display for UntrustedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExpiredLink => write!(f, "expired certificate in chain"),
            Self::SignatureMismatch => write!(f, "signature mismatch in chain"),
            Self::NoPathToRoot => write!(f, "no path to a trusted root"),
            Self::MalformedIntermediate => write!(f, "malformed intermediate certificate"),
        }
    }
}
