//! Chain-of-trust validation.
//!
//! Each call builds its own path context from the shared read-only
//! [`RootStore`] plus the intermediates supplied with the record, so
//! repeated or concurrent verifications never observe another call's
//! intermediates. A failed validation is a normal outcome reported as
//! [`ChainVerificationResult::Untrusted`]; nothing here returns an error.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, warn};
use x509_parser::prelude::*;

use crate::fingerprint::sha256_hex;
use crate::roots::RootStore;
use crate::types::{ChainVerificationResult, ParsedCertificate, UntrustedReason};

/// Validate `leaf` against the root store at the instant `at`.
///
/// `intermediates` are the PEM texts presented alongside the leaf, in
/// chain order. The walk checks, at every hop, that the child's issuer
/// matches the parent's subject, that the child is inside its validity
/// window, and that the child's signature verifies against the parent's
/// public key; it returns [`ChainVerificationResult::Trusted`] only when
/// a hop lands on a trust anchor that is itself valid at `at`. The most
/// specific failure wins: an expired or mis-signed link is reported over
/// a generic missing path.
#[must_use]
pub fn verify_chain(
    leaf: &ParsedCertificate,
    intermediates: &[String],
    roots: &RootStore,
    at: DateTime<Utc>,
) -> ChainVerificationResult {
    // Per-call overlay: decode the supplied intermediates into owned DER.
    let mut inter_ders = Vec::with_capacity(intermediates.len());
    for (idx, text) in intermediates.iter().enumerate() {
        match ::pem::parse(text) {
            Ok(block) if block.tag() == "CERTIFICATE" => {
                inter_ders.push(block.contents().to_vec());
            }
            Ok(block) => {
                debug!(idx, tag = block.tag(), "intermediate has non-certificate tag");
                return ChainVerificationResult::Untrusted(
                    UntrustedReason::MalformedIntermediate,
                );
            }
            Err(e) => {
                debug!(idx, error = %e, "intermediate failed PEM decode");
                return ChainVerificationResult::Untrusted(
                    UntrustedReason::MalformedIntermediate,
                );
            }
        }
    }

    let mut inter_certs = Vec::with_capacity(inter_ders.len());
    for (idx, der) in inter_ders.iter().enumerate() {
        match X509Certificate::from_der(der) {
            Ok((_, cert)) => inter_certs.push(cert),
            Err(e) => {
                debug!(idx, error = %e, "intermediate failed X.509 decode");
                return ChainVerificationResult::Untrusted(
                    UntrustedReason::MalformedIntermediate,
                );
            }
        }
    }

    let Ok((_, leaf_cert)) = X509Certificate::from_der(&leaf.der) else {
        // The leaf parsed once already; a re-decode failure is an
        // internal inconsistency, reported as an untrusted path.
        warn!(subject = %leaf.subject, "leaf DER no longer decodes");
        return ChainVerificationResult::Untrusted(UntrustedReason::NoPathToRoot);
    };

    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(sha256_hex(&leaf.der));

    let mut current = &leaf_cert;
    let mut saw_signature_mismatch = false;

    // Each iteration either terminates or consumes one unvisited
    // intermediate, so the walk is bounded by the overlay size.
    loop {
        if !time_valid(current, at) {
            debug!(subject = %current.subject(), "certificate outside validity window");
            return ChainVerificationResult::Untrusted(UntrustedReason::ExpiredLink);
        }

        let issuer = current.issuer().to_string();

        // Trust anchors first: a valid hop onto an anchor completes the path.
        for anchor in roots.anchors_for_subject(&issuer) {
            let Ok((_, anchor_cert)) = X509Certificate::from_der(&anchor.der) else {
                warn!(subject = %anchor.subject, "trust anchor DER no longer decodes");
                continue;
            };
            if current
                .verify_signature(Some(anchor_cert.public_key()))
                .is_ok()
            {
                if !time_valid(&anchor_cert, at) {
                    debug!(anchor = %anchor.subject, "trust anchor outside validity window");
                    return ChainVerificationResult::Untrusted(UntrustedReason::ExpiredLink);
                }
                debug!(anchor = %anchor.subject, "path anchored to trusted root");
                return ChainVerificationResult::Trusted;
            }
            saw_signature_mismatch = true;
        }

        // Then the per-call intermediates.
        let mut next = None;
        for (idx, candidate) in inter_certs.iter().enumerate() {
            if candidate.subject() != current.issuer() {
                continue;
            }
            if visited.contains(&sha256_hex(&inter_ders[idx])) {
                continue;
            }
            if current
                .verify_signature(Some(candidate.public_key()))
                .is_ok()
            {
                next = Some(idx);
                break;
            }
            saw_signature_mismatch = true;
        }

        match next {
            Some(idx) => {
                visited.insert(sha256_hex(&inter_ders[idx]));
                current = &inter_certs[idx];
            }
            None => {
                let reason = if saw_signature_mismatch {
                    UntrustedReason::SignatureMismatch
                } else {
                    UntrustedReason::NoPathToRoot
                };
                debug!(subject = %leaf.subject, %reason, "no acceptable trust path");
                return ChainVerificationResult::Untrusted(reason);
            }
        }
    }
}

/// Validate at the current instant.
#[must_use]
pub fn verify_chain_now(
    leaf: &ParsedCertificate,
    intermediates: &[String],
    roots: &RootStore,
) -> ChainVerificationResult {
    verify_chain(leaf, intermediates, roots, Utc::now())
}

fn time_valid(cert: &X509Certificate<'_>, at: DateTime<Utc>) -> bool {
    let t = at.timestamp();
    cert.validity().not_before.timestamp() <= t && t <= cert.validity().not_after.timestamp()
}
