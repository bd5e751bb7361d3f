//! Cycle Store Port - Interface for persisting the serialized cycle record.
//!
//! The store holds a single opaque document. Encoding, schema versions and
//! restore rules live in the domain; the store only moves bytes.

use async_trait::async_trait;

use crate::domain::foundation::ErrorCode;

/// Errors that can occur during cycle store operations
#[derive(Debug, thiserror::Error)]
pub enum CycleStoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Stored record is not valid UTF-8: {0}")]
    InvalidEncoding(String),
}

impl CycleStoreError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::StorageError
    }
}

/// Port for saving and loading the persisted cycle record
#[async_trait]
pub trait CycleStore: Send + Sync {
    /// Load the stored record
    ///
    /// # Returns
    /// `None` when nothing was saved yet
    ///
    /// # Errors
    /// Returns `CycleStoreError` if the store cannot be read
    async fn load(&self) -> Result<Option<String>, CycleStoreError>;

    /// Replace the stored record
    ///
    /// # Errors
    /// Returns `CycleStoreError` if save fails
    async fn save(&self, record: &str) -> Result<(), CycleStoreError>;
}
