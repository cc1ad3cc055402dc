//! Trust-anchor store.
//!
//! Loaded once at run start from a PEM bundle and never mutated again.
//! Per-verification intermediates live in a per-call context built by
//! the chain validator; they are never added here, so concurrent
//! verifications cannot observe each other's intermediates.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;
use x509_parser::prelude::*;

use crate::fingerprint::sha256_hex;
use sslgrade_core::{GradeError, Result};

/// One trusted root certificate held by the store.
#[derive(Debug, Clone)]
pub struct TrustAnchor {
    /// Raw DER encoding
    pub der: Vec<u8>,
    /// Subject distinguished name (display form)
    pub subject: String,
    /// SHA-256 of the DER bytes (hex)
    pub fingerprint: String,
}

/// Immutable set of trust anchors, keyed by fingerprint and indexed by
/// subject for issuer lookup during path building.
#[derive(Debug, Clone)]
pub struct RootStore {
    anchors: Vec<TrustAnchor>,
    by_subject: HashMap<String, Vec<usize>>,
}

impl RootStore {
    /// Load the store from a PEM bundle on disk.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError::TrustStoreUnavailable`] if the bundle cannot
    /// be read or contains zero parseable certificates. Individually
    /// unparseable entries are logged and skipped.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let content = tokio::fs::read(path.as_ref()).await.map_err(|e| {
            GradeError::TrustStoreUnavailable {
                path: path_str.clone(),
                reason: e.to_string(),
            }
        })?;
        Self::from_pem_bytes(&content, &path_str)
    }

    /// Build the store from in-memory PEM text (bundled anchors, tests).
    ///
    /// # Errors
    ///
    /// Same contract as [`RootStore::load`].
    pub fn from_pem(text: &str) -> Result<Self> {
        Self::from_pem_bytes(text.as_bytes(), "<inline>")
    }

    fn from_pem_bytes(content: &[u8], source: &str) -> Result<Self> {
        let pems =
            ::pem::parse_many(content).map_err(|e| GradeError::TrustStoreUnavailable {
                path: source.to_string(),
                reason: e.to_string(),
            })?;

        let mut anchors = Vec::new();
        let mut seen = HashSet::new();
        for block in &pems {
            if block.tag() != "CERTIFICATE" {
                continue;
            }
            match X509Certificate::from_der(block.contents()) {
                Ok((_, cert)) => {
                    let fingerprint = sha256_hex(block.contents());
                    if !seen.insert(fingerprint.clone()) {
                        continue;
                    }
                    let subject = cert.subject().to_string();
                    debug!(subject = %subject, "loaded trust anchor");
                    anchors.push(TrustAnchor {
                        der: block.contents().to_vec(),
                        subject,
                        fingerprint,
                    });
                }
                Err(e) => debug!(source, error = %e, "skipping unparseable trust anchor"),
            }
        }

        if anchors.is_empty() {
            return Err(GradeError::TrustStoreUnavailable {
                path: source.to_string(),
                reason: "no parseable certificates in bundle".to_string(),
            });
        }

        let mut by_subject: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, anchor) in anchors.iter().enumerate() {
            by_subject.entry(anchor.subject.clone()).or_default().push(idx);
        }

        Ok(Self { anchors, by_subject })
    }

    /// Number of anchors held
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns true if the store holds no anchors (never after a
    /// successful load)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// All anchors, load order
    #[must_use]
    pub fn anchors(&self) -> &[TrustAnchor] {
        &self.anchors
    }

    /// Anchors whose subject matches `subject` exactly
    pub fn anchors_for_subject<'a>(
        &'a self,
        subject: &str,
    ) -> impl Iterator<Item = &'a TrustAnchor> {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.anchors[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ROOT_PEM: &str =
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/root.pem"));
    const INTERMEDIATE_PEM: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/testdata/intermediate.pem"
    ));

    #[test]
    fn builds_from_inline_bundle() {
        let bundle = format!("{ROOT_PEM}{INTERMEDIATE_PEM}");
        let store = RootStore::from_pem(&bundle).unwrap();
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn dedups_by_fingerprint() {
        let bundle = format!("{ROOT_PEM}{ROOT_PEM}");
        let store = RootStore::from_pem(&bundle).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn subject_index_finds_anchor() {
        let store = RootStore::from_pem(ROOT_PEM).unwrap();
        let subject = store.anchors()[0].subject.clone();
        assert_eq!(store.anchors_for_subject(&subject).count(), 1);
        assert_eq!(store.anchors_for_subject("CN=nobody").count(), 0);
    }

    #[test]
    fn empty_bundle_is_unavailable() {
        let err = RootStore::from_pem("").unwrap_err();
        assert!(matches!(err, GradeError::TrustStoreUnavailable { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn garbage_only_bundle_is_unavailable() {
        let err = RootStore::from_pem("not a pem bundle at all").unwrap_err();
        assert!(matches!(err, GradeError::TrustStoreUnavailable { .. }));
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "{ROOT_PEM}").unwrap();
        tmp.flush().unwrap();

        let store = RootStore::load(tmp.path()).await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn missing_bundle_is_unavailable() {
        let err = RootStore::load("/nonexistent/ca-bundle.pem")
            .await
            .unwrap_err();
        assert!(matches!(err, GradeError::TrustStoreUnavailable { .. }));
    }
}
