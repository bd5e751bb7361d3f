//! In-Memory Cycle Store Adapter
//!
//! Holds the cycle record in memory. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{CycleStore, CycleStoreError};

/// In-memory storage for the cycle record
#[derive(Debug, Clone, Default)]
pub struct InMemoryCycleStore {
    record: Arc<RwLock<Option<String>>>,
    saves: Arc<RwLock<usize>>,
}

impl InMemoryCycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `record`
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(record.into()))),
            saves: Arc::new(RwLock::new(0)),
        }
    }

    /// The record as last saved
    pub async fn current(&self) -> Option<String> {
        self.record.read().await.clone()
    }

    /// Number of successful saves
    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }
}

#[async_trait]
impl CycleStore for InMemoryCycleStore {
    async fn load(&self) -> Result<Option<String>, CycleStoreError> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: &str) -> Result<(), CycleStoreError> {
        *self.record.write().await = Some(record.to_string());
        *self.saves.write().await += 1;
        Ok(())
    }
}
