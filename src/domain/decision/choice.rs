//! Options, choice identifiers and selections.

use serde::{Deserialize, Serialize};
use std::fmt;

const SLOT_PREFIX: &str = "option-";
const PREVIEW_PREFIX: &str = "next-option-";
const CUSTOM_ID: &str = "custom";

/// One generated option of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOption {
    pub label: String,
    #[serde(default)]
    pub philosophy_line: String,
}

impl DecisionOption {
    pub fn new(label: impl Into<String>, philosophy_line: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            philosophy_line: philosophy_line.into(),
        }
    }
}

/// Identifier of a selectable slot on the board.
///
/// Generated slots are `option-1` … `option-N` (1-based), the free-text
/// slot is `custom`. Ids outside this scheme are carried as-is so that a
/// restored record never loses what the user picked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceId(String);

impl ChoiceId {
    /// Id of the generated slot at 1-based `position`.
    pub fn slot(position: usize) -> Self {
        Self(format!("{}{}", SLOT_PREFIX, position))
    }

    /// Id of the free-text slot.
    pub fn custom() -> Self {
        Self(CUSTOM_ID.to_string())
    }

    /// Id of a next-cycle preview slot. Display only.
    pub fn preview(position: usize) -> Self {
        Self(format!("{}{}", PREVIEW_PREFIX, position))
    }

    /// Wraps a raw id without interpretation.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses an id, remapping legacy formats to the current scheme.
    pub fn parse(raw: &str) -> Self {
        Self(remap_legacy_choice_id(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_custom(&self) -> bool {
        self.0 == CUSTOM_ID
    }

    /// 1-based position of a generated slot, if this is one.
    pub fn slot_position(&self) -> Option<usize> {
        self.0
            .strip_prefix(SLOT_PREFIX)
            .and_then(parse_position)
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a choice id written by an earlier board version onto the
/// current scheme.
///
/// Pure lookup; never fails. Ids it does not recognise, including ids
/// already in the current scheme, come back trimmed but otherwise unchanged.
pub fn remap_legacy_choice_id(raw: &str) -> String {
    let id = raw.trim();

    if matches!(
        id,
        "custom-option" | "custom_option" | "customOption" | "custom-decision"
            | "custom_decision" | "customDecision"
    ) {
        return CUSTOM_ID.to_string();
    }

    if let Some(position) = parse_position(id) {
        return ChoiceId::slot(position).0;
    }

    const LEGACY_SLOT_PREFIXES: [&str; 8] = [
        "option_", "option", "opt-", "opt_", "choice-", "choice_", "slot-", "slot_",
    ];
    for prefix in LEGACY_SLOT_PREFIXES {
        if let Some(position) = id.strip_prefix(prefix).and_then(parse_position) {
            return ChoiceId::slot(position).0;
        }
    }

    id.to_string()
}

/// Parses a 1-based position made of ASCII digits only.
fn parse_position(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok().filter(|p| *p >= 1)
}

/// Whether a selection names a generated option or the custom slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Option,
    Custom,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Option => write!(f, "option"),
            SelectionKind::Custom => write!(f, "custom"),
        }
    }
}

/// The user's pick for the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub choice_id: ChoiceId,
    /// The option's label, or the trimmed custom text.
    pub text: String,
    pub kind: SelectionKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_ids_are_one_based() {
        assert_eq!(ChoiceId::slot(1).as_str(), "option-1");
        assert_eq!(ChoiceId::slot(4).slot_position(), Some(4));
    }

    #[test]
    fn custom_and_preview_are_not_slots() {
        assert!(ChoiceId::custom().is_custom());
        assert_eq!(ChoiceId::custom().slot_position(), None);
        assert_eq!(ChoiceId::preview(2).as_str(), "next-option-2");
        assert_eq!(ChoiceId::preview(2).slot_position(), None);
    }

    #[test]
    fn slot_position_rejects_zero_and_garbage() {
        assert_eq!(ChoiceId::from_string("option-0").slot_position(), None);
        assert_eq!(ChoiceId::from_string("option-x").slot_position(), None);
        assert_eq!(ChoiceId::from_string("option-+2").slot_position(), None);
    }

    #[test]
    fn current_ids_pass_through_remap() {
        assert_eq!(remap_legacy_choice_id("option-2"), "option-2");
        assert_eq!(remap_legacy_choice_id("custom"), "custom");
    }

    #[test]
    fn positional_legacy_ids_map_to_slots() {
        assert_eq!(remap_legacy_choice_id("2"), "option-2");
        assert_eq!(remap_legacy_choice_id("option_2"), "option-2");
        assert_eq!(remap_legacy_choice_id("option2"), "option-2");
        assert_eq!(remap_legacy_choice_id("opt-3"), "option-3");
        assert_eq!(remap_legacy_choice_id("choice_4"), "option-4");
        assert_eq!(remap_legacy_choice_id("slot-1"), "option-1");
    }

    #[test]
    fn legacy_custom_ids_map_to_custom() {
        assert_eq!(remap_legacy_choice_id("custom-option"), "custom");
        assert_eq!(remap_legacy_choice_id("customDecision"), "custom");
    }

    #[test]
    fn unknown_ids_pass_through_unchanged() {
        assert_eq!(remap_legacy_choice_id("mystery"), "mystery");
        assert_eq!(remap_legacy_choice_id("option-0"), "option-0");
        assert_eq!(remap_legacy_choice_id("next-option-1"), "next-option-1");
        assert_eq!(remap_legacy_choice_id(""), "");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_on_every_path() {
        assert_eq!(remap_legacy_choice_id(" 2 "), "option-2");
        assert_eq!(remap_legacy_choice_id(" option-2 "), "option-2");
        assert_eq!(ChoiceId::parse(" option-2 ").slot_position(), Some(2));
    }

    #[test]
    fn parse_applies_remap() {
        assert_eq!(ChoiceId::parse("opt_1"), ChoiceId::slot(1));
    }

    #[test]
    fn selection_serializes_camel_case() {
        let selection = Selection {
            choice_id: ChoiceId::slot(1),
            text: "Bold Quest".to_string(),
            kind: SelectionKind::Option,
        };
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["choiceId"], "option-1");
        assert_eq!(json["kind"], "option");
    }

    #[test]
    fn option_deserializes_without_philosophy_line() {
        let option: DecisionOption = serde_json::from_str(r#"{"label":"Solo"}"#).unwrap();
        assert_eq!(option, DecisionOption::new("Solo", ""));
    }
}
