//! Shared error plumbing.
//!
//! Each concern owns its own `thiserror` enum; all of them expose a stable
//! machine-readable code through [`ErrorCode`] so the CLI and page scripts
//! can branch on failures without matching display strings.

use crate::storage::StorageError;

/// Stable error code + retry hint for every error type in the crate.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Errors produced when persisting a value through a [`crate::Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected the read or write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value is not a list of records and would be lost by a
    /// read-modify-write.
    #[error("stored `{key}` cannot be updated in place: {reason}")]
    Corrupt { key: &'static str, reason: String },

    /// The value could not be serialized to JSON.
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Corrupt { .. } => "E_STORE_CORRUPT",
            Self::Encode { .. } => "E_ENCODE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Storage(e) if e.retryable())
    }
}
