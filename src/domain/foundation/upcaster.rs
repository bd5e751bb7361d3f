//! Record upcaster infrastructure for schema evolution.
//!
//! Persisted records carry a schema version. Older records are brought to
//! the current shape by applying single-step upcasters in sequence, so a
//! schema change adds one step to the chain instead of another branch in
//! the decoder.
//!
//! # Architecture
//!
//! - `Upcaster` trait - Transforms a record by a single version step (v1 → v2)
//! - `UpcasterChain` - Chains upcasters to reach the current version
//! - `UpcastError` - Error types for failed transformations
//!
//! # Example
//!
//! ```ignore
//! struct RenameRootText;
//!
//! impl Upcaster for RenameRootText {
//!     fn source_version(&self) -> u32 { 1 }
//!
//!     fn upcast(&self, mut record: JsonValue) -> Result<JsonValue, UpcastError> {
//!         let text = record["rootText"].take();
//!         record["situationText"] = text;
//!         Ok(record)
//!     }
//! }
//! ```

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during record upcasting.
#[derive(Debug, Error)]
pub enum UpcastError {
    /// Required field is missing from the source record.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Field value is invalid or cannot be converted.
    #[error("invalid field value: {0}")]
    InvalidValue(String),

    /// Record claims a version this build does not know how to read.
    #[error("unsupported schema version {found} (current is {current})")]
    UnsupportedVersion { found: u32, current: u32 },

    /// No upcaster is registered for an intermediate version.
    #[error("no upcaster registered for schema version {0}")]
    MissingStep(u32),
}

/// Transforms a record from one schema version to the next.
///
/// - Transformations MUST be deterministic (same input → same output)
/// - If transformation fails, return UpcastError (don't panic)
pub trait Upcaster: Send + Sync {
    /// Version this upcaster reads. It produces `source_version() + 1`.
    fn source_version(&self) -> u32;

    /// Transform the record from source to target schema.
    ///
    /// The chain stamps the new version afterwards; implementors only
    /// reshape fields.
    fn upcast(&self, record: JsonValue) -> Result<JsonValue, UpcastError>;
}

/// Chains record upcasters up to the current schema version.
pub struct UpcasterChain {
    /// Map from source version to upcaster.
    steps: HashMap<u32, Arc<dyn Upcaster>>,

    /// Field holding the schema version inside a record.
    version_field: &'static str,

    /// Version assumed when the record carries no version field.
    unversioned: u32,

    current_version: u32,
}

impl UpcasterChain {
    /// Creates an empty chain whose records are already at `current_version`.
    pub fn new(version_field: &'static str, current_version: u32) -> Self {
        Self {
            steps: HashMap::new(),
            version_field,
            unversioned: 1,
            current_version,
        }
    }

    /// Sets the version assumed for records without a version field.
    pub fn with_unversioned(mut self, version: u32) -> Self {
        self.unversioned = version;
        self
    }

    /// Registers an upcaster for a single version step.
    pub fn register(mut self, upcaster: Arc<dyn Upcaster>) -> Self {
        self.steps.insert(upcaster.source_version(), upcaster);
        self
    }

    /// Returns the version records are upcast to.
    pub fn current_version(&self) -> u32 {
        self.current_version
    }

    /// Reads the schema version of a raw record.
    pub fn version_of(&self, record: &JsonValue) -> Result<u32, UpcastError> {
        match record.get(self.version_field) {
            None | Some(JsonValue::Null) => Ok(self.unversioned),
            Some(value) => value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    UpcastError::InvalidValue(format!("{} = {}", self.version_field, value))
                }),
        }
    }

    /// Upcasts a record to the current version.
    ///
    /// Records already at the current version are returned untouched.
    /// Records from a newer version are rejected.
    pub fn upcast_to_current(&self, record: JsonValue) -> Result<JsonValue, UpcastError> {
        let mut version = self.version_of(&record)?;

        if version > self.current_version {
            return Err(UpcastError::UnsupportedVersion {
                found: version,
                current: self.current_version,
            });
        }

        let mut current = record;
        while version < self.current_version {
            let step = self
                .steps
                .get(&version)
                .ok_or(UpcastError::MissingStep(version))?;

            current = step.upcast(current)?;
            version += 1;

            if let JsonValue::Object(map) = &mut current {
                map.insert(self.version_field.to_string(), JsonValue::from(version));
            }
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // v1 → v2: renames a field
    struct RenameTitle;

    impl Upcaster for RenameTitle {
        fn source_version(&self) -> u32 {
            1
        }

        fn upcast(&self, mut record: JsonValue) -> Result<JsonValue, UpcastError> {
            let title = record
                .get_mut("title")
                .ok_or_else(|| UpcastError::MissingField("title".to_string()))?
                .take();
            record["name"] = title;
            Ok(record)
        }
    }

    // v2 → v3: adds an optional field
    struct AddNote;

    impl Upcaster for AddNote {
        fn source_version(&self) -> u32 {
            2
        }

        fn upcast(&self, mut record: JsonValue) -> Result<JsonValue, UpcastError> {
            record["note"] = JsonValue::Null;
            Ok(record)
        }
    }

    fn chain() -> UpcasterChain {
        UpcasterChain::new("schemaVersion", 3)
            .register(Arc::new(RenameTitle))
            .register(Arc::new(AddNote))
    }

    #[test]
    fn unversioned_record_runs_whole_chain() {
        let upgraded = chain()
            .upcast_to_current(json!({ "title": "first" }))
            .unwrap();

        assert_eq!(upgraded["name"], "first");
        assert!(upgraded["note"].is_null());
        assert_eq!(upgraded["schemaVersion"], 3);
    }

    #[test]
    fn intermediate_version_runs_remaining_steps() {
        let upgraded = chain()
            .upcast_to_current(json!({ "schemaVersion": 2, "name": "kept" }))
            .unwrap();

        assert_eq!(upgraded["name"], "kept");
        assert_eq!(upgraded["schemaVersion"], 3);
    }

    #[test]
    fn current_record_is_returned_unchanged() {
        let record = json!({ "schemaVersion": 3, "name": "same" });
        let upgraded = chain().upcast_to_current(record.clone()).unwrap();
        assert_eq!(upgraded, record);
    }

    #[test]
    fn newer_version_is_rejected() {
        let result = chain().upcast_to_current(json!({ "schemaVersion": 9 }));
        assert!(matches!(
            result,
            Err(UpcastError::UnsupportedVersion { found: 9, current: 3 })
        ));
    }

    #[test]
    fn non_numeric_version_is_invalid() {
        let result = chain().upcast_to_current(json!({ "schemaVersion": "two" }));
        assert!(matches!(result, Err(UpcastError::InvalidValue(_))));
    }

    #[test]
    fn gap_in_chain_is_reported() {
        let chain = UpcasterChain::new("schemaVersion", 3).register(Arc::new(RenameTitle));
        let result = chain.upcast_to_current(json!({ "title": "x" }));
        assert!(matches!(result, Err(UpcastError::MissingStep(2))));
    }

    #[test]
    fn failing_step_propagates_error() {
        let result = chain().upcast_to_current(json!({ "schemaVersion": 1 }));
        assert!(matches!(result, Err(UpcastError::MissingField(_))));
    }

    #[test]
    fn unversioned_default_can_be_overridden() {
        let chain = UpcasterChain::new("schemaVersion", 3)
            .with_unversioned(2)
            .register(Arc::new(AddNote));
        let upgraded = chain.upcast_to_current(json!({ "name": "x" })).unwrap();
        assert_eq!(upgraded["schemaVersion"], 3);
    }
}
