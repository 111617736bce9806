//! Error types for store operations

use thiserror::Error;

/// Errors that can occur while mutating the configuration store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A keyed lookup found no matching entity
    #[error("no {kind} found with key {key:?}")]
    NotFound {
        /// Entity kind, e.g. "vpc" or "network acl"
        kind: &'static str,
        /// Key that failed to resolve
        key: String,
    },

    /// An edge network has already been generated for this configuration
    #[error("edge network already exists with prefix {0:?}")]
    EdgeNetworkExists(String),

    /// Imported configuration failed schema validation
    #[error("invalid configuration import: {0}")]
    InvalidImport(String),

    /// Imported configuration contains overlapping CIDR blocks
    #[error("overlapping CIDR blocks: {0} and {1}")]
    OverlappingCidr(String, String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Shorthand for a keyed lookup failure
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            key: key.into(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidImport(err.to_string())
    }
}
