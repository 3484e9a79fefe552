//! Engine-wide base error type.
//!
//! Sub-crates define their own error enums and either convert into `DsError`
//! or wrap it as one variant; prefer whichever keeps error sites clean.

use thiserror::Error;

/// The base error type for `ds-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum DsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `ds-*` crates.
pub type DsResult<T> = Result<T, DsError>;
