//! String-keyed, JSON-valued storage backends.
//!
//! DESIGN
//! ======
//! Callers hold an explicit [`Storage`] handle instead of reaching for a
//! browser global. Backends only move strings in and
//! out, and all JSON parsing, defaulting and migration happens in
//! [`crate::store`]. Writes are last-write-wins with no conflict detection.

pub mod file;
#[cfg(feature = "hydrate")]
pub mod local;
pub mod memory;

pub use file::FileStorage;
#[cfg(feature = "hydrate")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

use crate::error::ErrorCode;

/// Fixed keys under which each value is persisted.
pub mod keys {
    pub const SETTINGS: &str = "websiteSettings";
    pub const LEAVE_REQUESTS: &str = "leaveRequests";
    pub const DELIVERY_HISTORY: &str = "deliveryHistory";
    pub const REPORT_HISTORY: &str = "reportHistory";
    pub const FINE_HISTORY: &str = "fineHistory";
    pub const HOUSE_LIST: &str = "houseList";

    pub const ALL: [&str; 6] = [SETTINGS, LEAVE_REQUESTS, DELIVERY_HISTORY, REPORT_HISTORY, FINE_HISTORY, HOUSE_LIST];
}

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend is not reachable (no window, storage disabled by the browser).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed for `{key}`: {message}")]
    Io { key: String, message: String },

    /// The browser refused the write, usually because the quota is exhausted.
    #[error("storage write rejected for `{key}`: {message}")]
    Rejected { key: String, message: String },
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "E_STORAGE_UNAVAILABLE",
            Self::InvalidKey(_) => "E_STORAGE_KEY",
            Self::Io { .. } => "E_STORAGE_IO",
            Self::Rejected { .. } => "E_STORAGE_REJECTED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Key-value medium holding serialized JSON strings.
pub trait Storage {
    /// Read the raw value for `key`; `Ok(None)` when it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend itself cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend refuses or fails the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails the removal.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
