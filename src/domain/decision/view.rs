//! Read-only board views handed to the presentation layer.

use serde::Serialize;

use super::{ChoiceId, DecisionOption, Phase, Selection, TimerView};
use crate::domain::foundation::Timestamp;

/// Which operations the engine would accept right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordances {
    pub can_edit_situation: bool,
    pub can_generate_options: bool,
    pub can_edit_custom_text: bool,
    pub can_select: bool,
    pub can_select_custom: bool,
    pub can_generate_next_preview: bool,
    pub can_start_fresh_cycle: bool,
}

/// One rendered option with the id used to select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSlot {
    pub choice_id: ChoiceId,
    pub label: String,
    pub philosophy_line: String,
    pub is_selected: bool,
}

impl OptionSlot {
    pub fn new(choice_id: ChoiceId, option: &DecisionOption, is_selected: bool) -> Self {
        Self {
            choice_id,
            label: option.label.clone(),
            philosophy_line: option.philosophy_line.clone(),
            is_selected,
        }
    }
}

/// Everything a board renders for one cycle at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub phase: Phase,
    pub situation_text: String,
    pub options: Vec<OptionSlot>,
    pub custom_text: String,
    pub selection: Option<Selection>,
    pub lock_started_at: Option<Timestamp>,
    pub reveal_displayed: bool,
    pub next_cycle_options_generated: bool,
    pub timers: TimerView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_window_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_label: Option<String>,
    pub next_preview: Vec<OptionSlot>,
    pub affordances: Affordances,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affordances_serialize_camel_case() {
        let affordances = Affordances {
            can_select_custom: true,
            ..Affordances::default()
        };
        let json = serde_json::to_value(affordances).unwrap();

        assert_eq!(json["canSelectCustom"], true);
        assert_eq!(json["canStartFreshCycle"], false);
    }

    #[test]
    fn option_slot_copies_option_fields() {
        let option = DecisionOption::new("Quiet Study", "Pause to learn");
        let slot = OptionSlot::new(ChoiceId::slot(4), &option, true);

        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["choiceId"], "option-4");
        assert_eq!(json["philosophyLine"], "Pause to learn");
        assert_eq!(json["isSelected"], true);
    }
}
