//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` via `From`
//! where configuration problems can surface.

use thiserror::Error;

/// Errors raised while validating or parsing core configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `ks-core`.
pub type CoreResult<T> = Result<T, CoreError>;
