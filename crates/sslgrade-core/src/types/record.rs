use super::ssl::SslBanner;
use serde::{Deserialize, Serialize};

/// One raw scan observation: a single host/service as reported by the
/// scanning source, with its TLS exposure data attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    /// IP address as string
    pub ip_str: String,

    /// Hostnames associated with this IP
    #[serde(default)]
    pub hostnames: Vec<String>,

    /// Internet Service Provider
    #[serde(default)]
    pub isp: Option<String>,

    /// Organization that owns the IP
    #[serde(default)]
    pub org: Option<String>,

    /// Port the service was observed on
    #[serde(default)]
    pub port: Option<u16>,

    /// When the banner was collected
    #[serde(default)]
    pub timestamp: Option<String>,

    /// TLS data if the service negotiated TLS
    #[serde(default)]
    pub ssl: Option<SslBanner>,
}

impl ScanRecord {
    /// Returns the best human-readable identity for this host:
    /// the first hostname if one is known, the IP otherwise.
    #[must_use]
    pub fn host_label(&self) -> &str {
        self.hostnames.first().map_or(&self.ip_str, String::as_str)
    }

    /// Returns true if the record carries any TLS data at all
    #[must_use]
    pub const fn has_ssl(&self) -> bool {
        self.ssl.is_some()
    }
}
