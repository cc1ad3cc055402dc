//! Decoded certificate view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only view of one decoded X.509 certificate.
///
/// Produced by [`crate::parse::parse_certificate`]; never mutated after
/// creation. The raw DER is retained so the chain validator can check
/// signatures without re-decoding the PEM text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedCertificate {
    /// Subject distinguished name (display form)
    pub subject: String,
    /// Issuer distinguished name (display form)
    pub issuer: String,
    /// Start of the validity window
    pub not_before: DateTime<Utc>,
    /// End of the validity window (always >= `not_before`)
    pub not_after: DateTime<Utc>,
    /// Public key size in bits (0 when the key type is unrecognized)
    pub public_key_bits: u32,
    /// Signature algorithm: conventional name for known OIDs, the
    /// dotted OID string otherwise
    pub signature_algorithm: String,
    /// DNS entries of the subjectAltName extension, declared order;
    /// empty when the extension is absent
    pub subject_alt_names: Vec<String>,
    /// Raw DER encoding
    #[serde(skip)]
    pub der: Vec<u8>,
}

impl ParsedCertificate {
    /// Returns true if the validity window contains `at`
    #[must_use]
    pub fn valid_at(&self, at: DateTime<Utc>) -> bool {
        self.not_before <= at && at <= self.not_after
    }

    /// Returns true if the certificate is expired at `at`
    #[must_use]
    pub fn expired_at(&self, at: DateTime<Utc>) -> bool {
        self.not_after < at
    }
}
