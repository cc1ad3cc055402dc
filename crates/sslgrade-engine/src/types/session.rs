//! Negotiated-session descriptor.

use serde::{Deserialize, Serialize};

/// Cipher/protocol context of one scan observation. Immutable, one per
/// host record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDescriptor {
    /// OpenSSL-style cipher suite name
    pub cipher_name: String,
    /// Protocol label the cipher was negotiated under
    pub cipher_version: String,
    /// Protocol versions the host accepts (deduplicated, record order)
    pub supported_protocols: Vec<String>,
    /// Ephemeral DH prime strength
    pub dh_param_bits: DhStrength,
}

/// Diffie-Hellman parameter strength.
///
/// Absent dhparams map to [`DhStrength::Unbounded`], never to zero bits,
/// so a key exchange without DH params can never read as a weak key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DhStrength {
    /// Observed prime size in bits
    Bits(u32),
    /// No DH parameters in the exchange
    Unbounded,
}

impl Default for DhStrength {
    fn default() -> Self {
        Self::Unbounded
    }
}
