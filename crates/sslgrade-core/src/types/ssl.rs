use crate::error::{GradeError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire format of certificate timestamps in scan records
pub const SCAN_TIME_FORMAT: &str = "%Y%m%d%H%M%SZ";

/// Parse a scan-record timestamp (`YYYYMMDDHHMMSSZ`, always UTC)
pub fn parse_scan_time(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, SCAN_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| GradeError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// TLS banner of one scan observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SslBanner {
    /// Leaf certificate summary fields
    #[serde(default)]
    pub cert: Option<CertSummary>,

    /// Negotiated cipher
    #[serde(default)]
    pub cipher: Option<CipherInfo>,

    /// Protocol versions probed by the scanner. Entries prefixed with
    /// `-` mean the protocol was tested and rejected by the host.
    #[serde(default)]
    pub versions: Vec<String>,

    /// Ephemeral Diffie-Hellman parameters, absent when the key
    /// exchange does not use them
    #[serde(default)]
    pub dhparams: Option<DhParams>,

    /// Certificate chain as presented, leaf first, PEM encoded
    #[serde(default)]
    pub chain: Vec<String>,
}

/// Summary fields of the leaf certificate as reported by the scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertSummary {
    /// Subject distinguished-name components
    #[serde(default)]
    pub subject: Option<SubjectInfo>,

    /// Whether the scanner saw the certificate as expired
    #[serde(default)]
    pub expired: Option<bool>,

    /// Expiry instant, `YYYYMMDDHHMMSSZ`
    #[serde(default)]
    pub expires: Option<String>,

    /// Issue instant, `YYYYMMDDHHMMSSZ`
    #[serde(default)]
    pub issued: Option<String>,

    /// Public key parameters
    #[serde(default)]
    pub pubkey: Option<PubKeyInfo>,

    /// Signature algorithm name, e.g. `sha256WithRSAEncryption`
    #[serde(default)]
    pub sig_alg: Option<String>,
}

impl CertSummary {
    /// Expiry instant parsed from the wire format, `None` if absent
    pub fn expires_at(&self) -> Result<Option<DateTime<Utc>>> {
        self.expires.as_deref().map(parse_scan_time).transpose()
    }

    /// Issue instant parsed from the wire format, `None` if absent
    pub fn issued_at(&self) -> Result<Option<DateTime<Utc>>> {
        self.issued.as_deref().map(parse_scan_time).transpose()
    }
}

/// Subject distinguished-name components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectInfo {
    /// Common name
    #[serde(rename = "CN", default)]
    pub cn: Option<String>,
}

/// Public key parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubKeyInfo {
    /// Modulus / curve size in bits
    #[serde(default)]
    pub bits: Option<u32>,

    /// Key type, e.g. `rsa`
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
}

/// Negotiated cipher descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherInfo {
    /// OpenSSL-style cipher suite name
    #[serde(default)]
    pub name: Option<String>,

    /// Protocol label the cipher was negotiated under
    #[serde(default)]
    pub version: Option<String>,

    /// Symmetric key strength in bits
    #[serde(default)]
    pub bits: Option<u32>,
}

/// Ephemeral Diffie-Hellman parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DhParams {
    /// Prime size in bits
    #[serde(default)]
    pub bits: Option<u32>,

    /// Parameter-set fingerprint (well-known primes have names)
    #[serde(default)]
    pub fingerprint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_timestamps() {
        let ts = parse_scan_time("20250316094512Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-16T09:45:12+00:00");
    }

    #[test]
    fn rejects_malformed_timestamps() {
        for bad in ["2025-03-16T09:45:12Z", "20250316", "", "not-a-time"] {
            let err = parse_scan_time(bad).unwrap_err();
            assert!(matches!(err, GradeError::InvalidTimestamp { .. }));
        }
    }

    #[test]
    fn banner_deserializes_from_scan_json() {
        let banner: SslBanner = serde_json::from_value(serde_json::json!({
            "cert": {
                "subject": {"CN": "example.net"},
                "expired": false,
                "expires": "20270101000000Z",
                "issued": "20250101000000Z",
                "pubkey": {"bits": 2048, "type": "rsa"},
                "sig_alg": "sha256WithRSAEncryption"
            },
            "cipher": {"name": "ECDHE-RSA-AES128-GCM-SHA256", "version": "TLSv1.2", "bits": 128},
            "versions": ["TLSv1.2", "TLSv1.3", "-SSLv3"],
            "chain": ["-----BEGIN CERTIFICATE-----\n...\n-----END CERTIFICATE-----"]
        }))
        .unwrap();

        let cert = banner.cert.unwrap();
        assert_eq!(cert.sig_alg.as_deref(), Some("sha256WithRSAEncryption"));
        assert_eq!(cert.pubkey.as_ref().unwrap().bits, Some(2048));
        assert!(cert
            .expires_at()
            .unwrap()
            .is_some_and(|t| t.to_rfc3339().starts_with("2027")));
        assert_eq!(banner.versions.len(), 3);
        assert_eq!(banner.chain.len(), 1);
    }

    #[test]
    fn dhparams_default_to_absent() {
        let banner: SslBanner = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(banner.dhparams.is_none());
        assert!(banner.cert.is_none());
        assert!(banner.chain.is_empty());
    }
}
