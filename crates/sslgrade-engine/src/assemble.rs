//! Host record assembly.
//!
//! Maps one raw scan record into the inputs the engine needs, rejecting
//! records that are missing required fields up front instead of failing
//! at first use.

use chrono::{DateTime, Utc};

use crate::types::{DhStrength, SessionDescriptor};
use sslgrade_core::{GradeError, Result, ScanRecord};

/// Engine inputs assembled from one scan record.
#[derive(Debug, Clone)]
pub struct HostInputs {
    /// IP address of the observed host
    pub ip: String,
    /// Known hostnames
    pub hostnames: Vec<String>,
    /// Internet Service Provider, when reported
    pub isp: Option<String>,
    /// Subject common name from the record's certificate summary
    pub subject_cn: String,
    /// Leaf certificate PEM (first chain entry)
    pub leaf_pem: String,
    /// Intermediate certificate PEMs (rest of the chain, possibly empty)
    pub intermediate_pems: Vec<String>,
    /// Negotiated-session descriptor
    pub session: SessionDescriptor,
    /// Certificate issue instant, when reported
    pub issued: Option<DateTime<Utc>>,
    /// Certificate expiry instant, when reported
    pub expires: Option<DateTime<Utc>>,
}

/// Assemble engine inputs from one scan record.
///
/// # Errors
///
/// Returns [`GradeError::IncompleteRecord`] naming the first missing
/// required field, or [`GradeError::InvalidTimestamp`] when a present
/// timestamp field does not match the wire format. Both skip the record;
/// the run continues.
pub fn assemble(record: &ScanRecord) -> Result<HostInputs> {
    let ssl = record
        .ssl
        .as_ref()
        .ok_or_else(|| GradeError::incomplete("ssl"))?;
    let cert = ssl
        .cert
        .as_ref()
        .ok_or_else(|| GradeError::incomplete("ssl.cert"))?;

    let subject_cn = cert
        .subject
        .as_ref()
        .and_then(|subject| subject.cn.clone())
        .ok_or_else(|| GradeError::incomplete("ssl.cert.subject.CN"))?;
    cert.expired
        .ok_or_else(|| GradeError::incomplete("ssl.cert.expired"))?;
    cert.pubkey
        .as_ref()
        .and_then(|key| key.bits)
        .ok_or_else(|| GradeError::incomplete("ssl.cert.pubkey.bits"))?;
    cert.sig_alg
        .as_deref()
        .ok_or_else(|| GradeError::incomplete("ssl.cert.sig_alg"))?;

    let cipher = ssl
        .cipher
        .as_ref()
        .ok_or_else(|| GradeError::incomplete("ssl.cipher"))?;
    let cipher_name = cipher
        .name
        .clone()
        .ok_or_else(|| GradeError::incomplete("ssl.cipher.name"))?;

    let leaf_pem = ssl
        .chain
        .first()
        .cloned()
        .ok_or_else(|| GradeError::incomplete("ssl.chain"))?;
    let intermediate_pems = ssl.chain.get(1..).unwrap_or_default().to_vec();

    let cipher_version = cipher.version.clone().unwrap_or_default();
    let supported_protocols = supported_protocols(&cipher_version, &ssl.versions);
    let dh_param_bits = ssl
        .dhparams
        .as_ref()
        .and_then(|dh| dh.bits)
        .map_or(DhStrength::Unbounded, DhStrength::Bits);

    Ok(HostInputs {
        ip: record.ip_str.clone(),
        hostnames: record.hostnames.clone(),
        isp: record.isp.clone(),
        subject_cn,
        leaf_pem,
        intermediate_pems,
        session: SessionDescriptor {
            cipher_name,
            cipher_version,
            supported_protocols,
            dh_param_bits,
        },
        issued: cert.issued_at()?,
        expires: cert.expires_at()?,
    })
}

/// The protocols the host accepts: the negotiated version plus every
/// probed version not rejected by the host (scanners mark rejected
/// protocols with a leading `-`).
fn supported_protocols(negotiated: &str, probed: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    if !negotiated.is_empty() {
        out.push(negotiated.to_string());
    }
    for version in probed {
        if version.starts_with('-') {
            continue;
        }
        if !out.contains(version) {
            out.push(version.clone());
        }
    }
    out
}
