//! # sslgrade-engine
//!
//! Certificate evaluation engine for TLS exposure data: parse X.509
//! certificates out of scan records, independently validate the chain of
//! trust against a trusted root set, and apply a deterministic grading
//! policy over certificate and negotiated-session attributes.
//!
//! The engine is pure computation over supplied bytes: the only I/O is
//! the one-time trust-store load. Untrusted chains and fired rules are
//! expected outcomes; only an unusable trust store aborts a run.
//!
//! ## Data Flow
//!
//! ```text
//! ScanRecord
//!   -> assemble()           leaf PEM + intermediates + SessionDescriptor
//!   -> parse_certificate()  ParsedCertificate
//!   -> verify_chain()       ChainVerificationResult   (RootStore, per-call overlay)
//!   -> grade()              GradeResult
//!   -> HostReport
//! ```
//!
//! Every step is pure given its inputs plus the shared read-only
//! [`RootStore`], so records can be graded sequentially or in parallel;
//! the provided driver is a sequential loop.

pub mod assemble;
pub mod chain;
pub mod fingerprint;
pub mod parse;
pub mod policy;
pub mod roots;
pub mod types;

pub use assemble::{assemble, HostInputs};
pub use chain::{verify_chain, verify_chain_now};
pub use parse::parse_certificate;
pub use policy::grade;
pub use roots::{RootStore, TrustAnchor};
pub use types::*;

use chrono::{DateTime, Utc};
use tracing::warn;

use sslgrade_core::{Result, ScanRecord};

/// Grade one scan record against the shared root store.
///
/// # Errors
///
/// Returns a record-scoped error ([`sslgrade_core::GradeError`]
/// `IncompleteRecord` / `MalformedCertificate` / `InvalidTimestamp`)
/// when the record cannot be graded; callers skip such records and
/// continue the run.
pub fn grade_record(
    record: &ScanRecord,
    roots: &RootStore,
    now: DateTime<Utc>,
) -> Result<HostReport> {
    let inputs = assemble(record)?;
    let leaf = parse_certificate(&inputs.leaf_pem)?;
    let chain_result = verify_chain(&leaf, &inputs.intermediate_pems, roots, now);
    let graded = grade(&leaf, &inputs.session, &chain_result, now);

    Ok(HostReport {
        ip: inputs.ip,
        hostnames: inputs.hostnames,
        isp: inputs.isp,
        subject_cn: inputs.subject_cn,
        score: graded.score,
        findings: graded.findings,
    })
}

/// Grade a whole scan run.
///
/// Records that fail assembly or leaf parsing are logged and skipped;
/// the run continues across the rest.
#[must_use]
pub fn grade_records(
    records: &[ScanRecord],
    roots: &RootStore,
    now: DateTime<Utc>,
) -> Vec<HostReport> {
    records
        .iter()
        .filter_map(|record| match grade_record(record, roots, now) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(host = record.host_label(), error = %e, "skipping record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ROOT_PEM: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/root.pem"));
    const INTERMEDIATE_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/testdata/intermediate.pem"
    ));
    const LEAF_PEM: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/leaf.pem"));
    const LEAF_WEAK_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/testdata/leaf-weak.pem"
    ));

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    fn scan_record(chain: &[&str], cipher_name: &str, pubkey_bits: u32) -> ScanRecord {
        serde_json::from_value(serde_json::json!({
            "ip_str": "203.0.113.7",
            "hostnames": ["grader.example.net"],
            "isp": "Example ISP",
            "ssl": {
                "cert": {
                    "subject": {"CN": "grader.example.net"},
                    "expired": false,
                    "expires": "20370701000000Z",
                    "issued": "20260808000000Z",
                    "pubkey": {"bits": pubkey_bits, "type": "rsa"},
                    "sig_alg": "sha256WithRSAEncryption"
                },
                "cipher": {"name": cipher_name, "bits": 128},
                "chain": chain
            }
        }))
        .unwrap()
    }

    #[test]
    fn clean_host_grades_100() {
        let roots = RootStore::from_pem(ROOT_PEM).unwrap();
        let record = scan_record(
            &[LEAF_PEM, INTERMEDIATE_PEM],
            "ECDHE-RSA-AES128-GCM-SHA256",
            2048,
        );

        let report = grade_record(&record, &roots, now()).unwrap();
        assert_eq!(report.score, 100);
        assert!(report.findings.is_empty());
        assert_eq!(report.subject_cn, "grader.example.net");
        assert_eq!(report.ip, "203.0.113.7");
    }

    #[test]
    fn weak_key_and_broken_chain_grade_70_in_rule_order() {
        let roots = RootStore::from_pem(ROOT_PEM).unwrap();
        // weak leaf presented without its intermediate: weak key (-10)
        // plus chain-of-trust failure (-20)
        let record = scan_record(&[LEAF_WEAK_PEM], "ECDHE-RSA-AES128-GCM-SHA256", 1024);

        let report = grade_record(&record, &roots, now()).unwrap();
        assert_eq!(report.score, 70);
        assert_eq!(report.findings.len(), 2);
        assert!(report.findings[0].contains("public key too small"));
        assert!(report.findings[1].contains("chain of trust"));
    }

    #[test]
    fn run_skips_bad_records_and_continues() {
        let roots = RootStore::from_pem(ROOT_PEM).unwrap();
        let incomplete: ScanRecord =
            serde_json::from_value(serde_json::json!({"ip_str": "203.0.113.9"})).unwrap();
        let malformed = scan_record(
            &["not a certificate"],
            "ECDHE-RSA-AES128-GCM-SHA256",
            2048,
        );
        let good = scan_record(
            &[LEAF_PEM, INTERMEDIATE_PEM],
            "ECDHE-RSA-AES128-GCM-SHA256",
            2048,
        );

        let reports = grade_records(&[incomplete, malformed, good], &roots, now());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].score, 100);
    }

    #[test]
    fn reports_serialize_per_host() {
        let roots = RootStore::from_pem(ROOT_PEM).unwrap();
        let record = scan_record(
            &[LEAF_PEM, INTERMEDIATE_PEM],
            "ECDHE-RSA-AES128-GCM-SHA256",
            2048,
        );

        let reports = grade_records(&[record], &roots, now());
        let json = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["ip"], "203.0.113.7");
        assert_eq!(json[0]["score"], 100);
    }
}
