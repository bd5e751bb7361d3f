//! Decision domain events.

use serde::{Deserialize, Serialize};

use super::{ChoiceId, Phase, SelectionKind};
use crate::domain::foundation::Timestamp;

/// What an accepted operation or a tick changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionEvent {
    /// The situation text was edited while in Draft.
    SituationEdited { length: usize },

    /// A new set of options replaced the Draft.
    OptionsGenerated { count: usize },

    /// The custom slot's draft text changed.
    CustomTextEdited { length: usize },

    /// A choice was made or switched inside the change window.
    ChoiceSelected {
        choice_id: ChoiceId,
        kind: SelectionKind,
        previous: Option<ChoiceId>,
        lock_started_at: Timestamp,
    },

    /// The next cycle's preview was authorised.
    NextPreviewGenerated,

    /// The revealed cycle was replaced with an empty Draft.
    CycleReset,

    /// Time moved the derived phase.
    PhaseChanged { from: Phase, to: Phase },
}

impl DecisionEvent {
    /// Short name used as a log field.
    pub fn name(&self) -> &'static str {
        match self {
            DecisionEvent::SituationEdited { .. } => "situation_edited",
            DecisionEvent::OptionsGenerated { .. } => "options_generated",
            DecisionEvent::CustomTextEdited { .. } => "custom_text_edited",
            DecisionEvent::ChoiceSelected { .. } => "choice_selected",
            DecisionEvent::NextPreviewGenerated => "next_preview_generated",
            DecisionEvent::CycleReset => "cycle_reset",
            DecisionEvent::PhaseChanged { .. } => "phase_changed",
        }
    }
}
