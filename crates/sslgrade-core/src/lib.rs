//! Core types for the sslgrade workspace.
//!
//! This crate provides the shapes shared by the rest of the workspace:
//!
//! - **Types**: Strongly-typed representations of one raw scan observation
//!   (host identity plus its `ssl` banner) as supplied by an internet-wide
//!   scanning source
//! - **Errors**: The grading-run error taxonomy with [`GradeError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use sslgrade_core::{GradeError, Result, ScanRecord};
//!
//! fn leaf_pem(record: &ScanRecord) -> Result<&str> {
//!     let ssl = record.ssl.as_ref().ok_or(GradeError::incomplete("ssl"))?;
//!     ssl.chain.first().map(String::as_str)
//!         .ok_or(GradeError::incomplete("ssl.chain"))
//! }
//! ```

mod error;
pub mod types;

pub use error::{GradeError, Result};
pub use types::*;
