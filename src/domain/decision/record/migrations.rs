//! Upcasters for older record schemas.

use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

use super::{CURRENT_SCHEMA_VERSION, SCHEMA_VERSION_FIELD};
use crate::domain::decision::remap_legacy_choice_id;
use crate::domain::foundation::{UpcastError, Upcaster, UpcasterChain};

/// Chain bringing any known record version to the current schema.
///
/// Records without a version field are v1.
pub fn record_chain() -> UpcasterChain {
    UpcasterChain::new(SCHEMA_VERSION_FIELD, CURRENT_SCHEMA_VERSION)
        .with_unversioned(1)
        .register(Arc::new(V1ToV2))
}

/// v1 → v2.
///
/// v1 wrote `rootText`, `nextOptionsGenerated` and `selection.type`, used
/// several choice id formats and stored `lockStartedAt` as a JS number.
struct V1ToV2;

impl Upcaster for V1ToV2 {
    fn source_version(&self) -> u32 {
        1
    }

    fn upcast(&self, record: JsonValue) -> Result<JsonValue, UpcastError> {
        let JsonValue::Object(mut fields) = record else {
            return Err(UpcastError::InvalidValue("record is not an object".to_string()));
        };

        rename(&mut fields, "rootText", "situationText");
        rename(&mut fields, "nextOptionsGenerated", "nextCycleOptionsGenerated");

        if let Some(selection) = fields.get_mut("selection") {
            upcast_selection(selection)?;
        }

        if let Some(lock) = fields.get_mut("lockStartedAt") {
            *lock = whole_millis(lock)?;
        }

        Ok(JsonValue::Object(fields))
    }
}

/// Moves `from` to `to` unless `to` is already present.
fn rename(fields: &mut Map<String, JsonValue>, from: &str, to: &str) {
    if let Some(value) = fields.remove(from) {
        fields.entry(to.to_string()).or_insert(value);
    }
}

fn upcast_selection(selection: &mut JsonValue) -> Result<(), UpcastError> {
    let fields = match selection {
        JsonValue::Object(fields) => fields,
        JsonValue::Null => return Ok(()),
        other => return Err(UpcastError::InvalidValue(format!("selection = {}", other))),
    };

    rename(fields, "type", "kind");

    let raw_id = fields
        .get("choiceId")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| UpcastError::MissingField("selection.choiceId".to_string()))?;
    let choice_id = remap_legacy_choice_id(raw_id);

    if !fields.contains_key("kind") {
        let kind = if choice_id == "custom" { "custom" } else { "option" };
        fields.insert("kind".to_string(), JsonValue::from(kind));
    }
    fields.insert("choiceId".to_string(), JsonValue::from(choice_id));
    Ok(())
}

/// JS numbers may carry a fraction; milliseconds are whole.
fn whole_millis(value: &JsonValue) -> Result<JsonValue, UpcastError> {
    match value {
        JsonValue::Null => Ok(JsonValue::Null),
        JsonValue::Number(n) if n.is_i64() => Ok(value.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| JsonValue::from(f.floor() as i64))
            .ok_or_else(|| UpcastError::InvalidValue(format!("lockStartedAt = {}", value))),
        other => Err(UpcastError::InvalidValue(format!("lockStartedAt = {}", other))),
    }
}
