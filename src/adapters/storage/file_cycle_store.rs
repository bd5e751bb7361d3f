//! File-based Cycle Store Adapter
//!
//! Keeps the cycle record as a single JSON file. Writes go to a sibling
//! temporary file first and are renamed into place, so a crash mid-write
//! leaves the previous record intact.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{CycleStore, CycleStoreError};

/// File-based storage for the cycle record
#[derive(Debug, Clone)]
pub struct FileCycleStore {
    path: PathBuf,
}

impl FileCycleStore {
    /// Create a store writing to `path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileCycleStore::new("./data/decision-board-state.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Ensure the parent directory exists
    async fn ensure_parent(&self) -> Result<(), CycleStoreError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .await
                .map_err(|e| CycleStoreError::Io(e.to_string())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CycleStore for FileCycleStore {
    async fn load(&self) -> Result<Option<String>, CycleStoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CycleStoreError::Io(e.to_string())),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| CycleStoreError::InvalidEncoding(e.to_string()))
    }

    async fn save(&self, record: &str) -> Result<(), CycleStoreError> {
        self.ensure_parent().await?;

        let temp = self.temp_path();
        fs::write(&temp, record)
            .await
            .map_err(|e| CycleStoreError::Io(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| CycleStoreError::Io(e.to_string()))?;

        Ok(())
    }
}
