//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the cycle record lives on disk
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_record_file")]
    pub record_file: String,
}

impl StorageConfig {
    pub fn record_path(&self) -> PathBuf {
        self.data_dir.join(&self.record_file)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.record_file.trim().is_empty() {
            return Err(ValidationError::EmptyRecordFile);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            record_file: default_record_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_record_file() -> String {
    "decision-board-state.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_path_joins_dir_and_file() {
        let config = StorageConfig::default();
        assert_eq!(
            config.record_path(),
            PathBuf::from("./data").join("decision-board-state.json")
        );
    }

    #[test]
    fn blank_file_name_is_rejected() {
        let config = StorageConfig {
            record_file: "  ".to_string(),
            ..StorageConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyRecordFile));
    }
}
