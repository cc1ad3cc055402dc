use thiserror::Error;

/// Result type alias for grading operations
pub type Result<T> = std::result::Result<T, GradeError>;

/// Errors that can occur while grading a scan run
#[derive(Error, Debug)]
pub enum GradeError {
    /// Trust-anchor bundle could not be loaded - no grading can proceed
    #[error("trust store unavailable at {path}: {reason}")]
    TrustStoreUnavailable {
        /// Bundle path or source description
        path: String,
        /// Why the bundle could not be used
        reason: String,
    },

    /// Certificate text did not decode into a well-formed X.509 certificate
    #[error("malformed certificate: {reason}")]
    MalformedCertificate {
        /// Decoder failure detail
        reason: String,
    },

    /// A scan record is missing a field required for grading
    #[error("incomplete record: missing {field}")]
    IncompleteRecord {
        /// Dotted path of the first missing field
        field: String,
    },

    /// A certificate timestamp field did not match the scan wire format
    #[error("invalid timestamp {value:?}, expected YYYYMMDDHHMMSSZ")]
    InvalidTimestamp {
        /// The offending field value
        value: String,
    },

    /// I/O failure while reading the trust-anchor bundle
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GradeError {
    /// Shorthand for [`GradeError::IncompleteRecord`]
    #[must_use]
    pub fn incomplete(field: &str) -> Self {
        Self::IncompleteRecord {
            field: field.to_string(),
        }
    }

    /// Shorthand for [`GradeError::MalformedCertificate`]
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCertificate {
            reason: reason.into(),
        }
    }

    /// Returns true if the error aborts the whole run.
    ///
    /// Only trust-store availability is a run precondition; everything
    /// else is scoped to a single record.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::TrustStoreUnavailable { .. } | Self::Io(_))
    }

    /// Returns true if the error skips one record and the run continues
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::MalformedCertificate { .. }
                | Self::IncompleteRecord { .. }
                | Self::InvalidTimestamp { .. }
        )
    }
}
