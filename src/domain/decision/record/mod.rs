//! Persisted form of a decision cycle.
//!
//! The record is the JSON document written after every accepted change.
//! Field names are camelCase and `lockStartedAt` is epoch milliseconds.
//! The stored `phase` is informational; restore re-derives it.

mod migrations;

pub use migrations::record_chain;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::{CycleState, DecisionOption, Phase, Selection};
use crate::domain::foundation::{ErrorCode, Timestamp, UpcastError};

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Name of the version field inside a record.
pub const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

/// Errors reading or writing a persisted record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed persisted record: {0}")]
    Malformed(String),

    #[error("failed to encode record: {0}")]
    Encode(String),
}

impl RecordError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RecordError::Malformed(_) => ErrorCode::MalformedPersistedRecord,
            RecordError::Encode(_) => ErrorCode::InternalError,
        }
    }
}

impl From<UpcastError> for RecordError {
    fn from(err: UpcastError) -> Self {
        RecordError::Malformed(err.to_string())
    }
}

/// Current-schema record, as read after upcasting.
///
/// Every field is optional on input; `DecisionEngine::restore` decides
/// what an absent or contradictory field means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedRecord {
    pub schema_version: u32,
    pub situation_text: String,
    #[serde(deserialize_with = "lenient_phase")]
    pub phase: Option<Phase>,
    pub options_generated: Option<bool>,
    pub options: Vec<DecisionOption>,
    pub custom_text: String,
    pub selection: Option<Selection>,
    pub lock_started_at: Option<i64>,
    pub reveal_displayed: bool,
    pub next_cycle_options_generated: bool,
}

impl Default for PersistedRecord {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            situation_text: String::new(),
            phase: None,
            options_generated: None,
            options: Vec::new(),
            custom_text: String::new(),
            selection: None,
            lock_started_at: None,
            reveal_displayed: false,
            next_cycle_options_generated: false,
        }
    }
}

impl PersistedRecord {
    /// Captures a cycle in its persisted form.
    pub fn from_state(state: &CycleState) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            situation_text: state.situation_text().to_string(),
            phase: Some(state.phase()),
            options_generated: Some(state.options_generated()),
            options: state.options().to_vec(),
            custom_text: state.custom_text().to_string(),
            selection: state.selection().cloned(),
            lock_started_at: state.lock_started_at().map(|t| t.as_unix_millis()),
            reveal_displayed: state.reveal_displayed(),
            next_cycle_options_generated: state.next_cycle_options_generated(),
        }
    }
}

/// Serializes a cycle to the current record schema.
pub fn encode(state: &CycleState) -> Result<String, RecordError> {
    serde_json::to_string(&PersistedRecord::from_state(state))
        .map_err(|e| RecordError::Encode(e.to_string()))
}

/// Parses a stored record of any known schema version.
///
/// Older records are upcast first. Anything that is not a JSON object of
/// the expected shape is `RecordError::Malformed`.
pub fn decode(raw: &str) -> Result<PersistedRecord, RecordError> {
    let value: JsonValue =
        serde_json::from_str(raw).map_err(|e| RecordError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(RecordError::Malformed("record is not a JSON object".to_string()));
    }

    let upcast = record_chain().upcast_to_current(value)?;
    let record: PersistedRecord =
        serde_json::from_value(upcast).map_err(|e| RecordError::Malformed(e.to_string()))?;

    if let Some(millis) = record.lock_started_at {
        if Timestamp::from_unix_millis(millis).is_none() {
            return Err(RecordError::Malformed(format!(
                "lockStartedAt out of range: {}",
                millis
            )));
        }
    }
    Ok(record)
}

/// Unknown phase labels are treated as absent.
fn lenient_phase<'de, D>(deserializer: D) -> Result<Option<Phase>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.and_then(|label| serde_json::from_value(JsonValue::String(label)).ok()))
}
