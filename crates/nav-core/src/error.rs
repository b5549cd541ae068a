//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` only covers parsing
//! of the primitive types defined here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `nav-core`.
pub type CoreResult<T> = Result<T, CoreError>;
