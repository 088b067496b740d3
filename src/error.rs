//! Error types for bbami
//!
//! Every fallible operation in the crate returns [`BbamiError`]. Malformed
//! manifest lines are never errors; they are dropped by the loader.

use crate::schema::AttributeId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bbami operations
pub type Result<T> = std::result::Result<T, BbamiError>;

/// Error type for bbami operations
#[derive(Error, Debug)]
pub enum BbamiError {
    /// Bad attribute id or attribute name supplied by a caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation on a disposed store or handle
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// No value at the requested slot/index
    #[error("No value for {attribute} at index {index}")]
    NotFound { attribute: AttributeId, index: i64 },

    /// API version negotiation failed
    #[error("Unsupported API version {requested} (supported: {supported})")]
    Unsupported { requested: u32, supported: u32 },

    /// Manifest location could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),

    /// Manifest file could not be opened or read
    #[error("Failed to read manifest {}: {source}", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Line source errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Allocation failure while copying a value
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BbamiError {
    /// True when the error only means "no value here"
    pub fn is_not_found(&self) -> bool {
        matches!(self, BbamiError::NotFound { .. })
    }

    pub(crate) fn disposed() -> Self {
        BbamiError::InvalidState("attribute store has been disposed".to_string())
    }
}

impl From<std::collections::TryReserveError> for BbamiError {
    fn from(e: std::collections::TryReserveError) -> Self {
        BbamiError::ResourceExhausted(e.to_string())
    }
}
