//! DecisionEngine - phase derivation and the guarded operations on a cycle.
//!
//! The engine owns no clock, timer or storage. Every operation takes the
//! cycle and, where time matters, the instant to evaluate at. Rejected
//! operations leave the cycle untouched.

use tracing::warn;

use super::record::PersistedRecord;
use super::{
    Affordances, BoardSnapshot, ChoiceId, CycleState, DecisionEvent, DecisionOption,
    LockTimings, Operation, OptionSlot, Phase, Rejection, Selection, SelectionKind, TimerView,
};
use crate::domain::foundation::{StateMachine, Timestamp};

/// Pure lifecycle rules for a decision cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionEngine {
    timings: LockTimings,
}

impl DecisionEngine {
    pub fn new(timings: LockTimings) -> Self {
        Self { timings }
    }

    pub fn timings(&self) -> &LockTimings {
        &self.timings
    }

    // ───────────────────────────────────────────────────────────────
    // Derivation
    // ───────────────────────────────────────────────────────────────

    /// Phase of `state` at `now`, computed from its inputs only.
    pub fn derive_phase(&self, state: &CycleState, now: Timestamp) -> Phase {
        if state.selection.is_none() {
            return if state.options_generated {
                Phase::Generated
            } else {
                Phase::Draft
            };
        }

        if state.reveal_displayed {
            return Phase::Revealed;
        }

        let elapsed = self.timings.elapsed(state.lock_started_at, now);
        if elapsed >= self.timings.lock() {
            Phase::Revealed
        } else if elapsed >= self.timings.change_window() {
            Phase::Locked
        } else {
            Phase::Selected
        }
    }

    /// Recomputes the phase at `now`, latching the reveal once it is due.
    ///
    /// Level-triggered: calling it again with the same `now` changes
    /// nothing, and a late call lands on the same phase a timely one would.
    pub fn tick(&self, state: &mut CycleState, now: Timestamp) -> Option<DecisionEvent> {
        let previous = state.phase;
        let next = self.settle(state, now);

        if previous == next {
            return None;
        }
        if !previous.can_transition_to(&next) {
            warn!(from = %previous, to = %next, "derived phase moved outside the transition table");
        }
        Some(DecisionEvent::PhaseChanged {
            from: previous,
            to: next,
        })
    }

    fn settle(&self, state: &mut CycleState, now: Timestamp) -> Phase {
        let phase = self.derive_phase(state, now);
        if phase == Phase::Revealed {
            state.reveal_displayed = true;
        }
        state.phase = phase;
        phase
    }

    pub fn timers(&self, state: &CycleState, now: Timestamp) -> TimerView {
        if state.selection.is_none() {
            return TimerView::idle();
        }
        self.timings.view(state.lock_started_at, now)
    }

    // ───────────────────────────────────────────────────────────────
    // Operations
    // ───────────────────────────────────────────────────────────────

    /// Replaces the situation text. Draft only.
    ///
    /// No length limit is imposed here.
    pub fn set_situation_text(
        &self,
        state: &mut CycleState,
        text: impl Into<String>,
    ) -> Result<DecisionEvent, Rejection> {
        check_situation_editable(state)?;
        state.situation_text = text.into();
        Ok(DecisionEvent::SituationEdited {
            length: state.situation_text.chars().count(),
        })
    }

    /// Checks whether `generate_options` would be accepted.
    ///
    /// Lets the caller skip the option source for a call that would be
    /// rejected anyway.
    pub fn ensure_can_generate(&self, state: &CycleState) -> Result<(), Rejection> {
        if state.selection.is_some() || state.phase.transition_to(Phase::Generated).is_err() {
            return Err(Rejection::WrongPhase {
                operation: Operation::GenerateOptions,
                phase: state.phase,
            });
        }
        if state.situation_text.trim().is_empty() {
            return Err(Rejection::EmptyInput {
                operation: Operation::GenerateOptions,
                field: "situation_text",
            });
        }
        Ok(())
    }

    /// Starts the cycle proper with a fresh set of options.
    ///
    /// Everything that belongs to a selection episode is reset.
    pub fn generate_options(
        &self,
        state: &mut CycleState,
        options: Vec<DecisionOption>,
    ) -> Result<DecisionEvent, Rejection> {
        self.ensure_can_generate(state)?;

        let count = options.len();
        state.options = options;
        state.options_generated = true;
        state.selection = None;
        state.lock_started_at = None;
        state.reveal_displayed = false;
        state.next_cycle_options_generated = false;
        state.phase = Phase::Generated;

        Ok(DecisionEvent::OptionsGenerated { count })
    }

    /// Edits the custom slot's draft text while the change window is open.
    pub fn set_custom_text(
        &self,
        state: &mut CycleState,
        text: impl Into<String>,
        now: Timestamp,
    ) -> Result<DecisionEvent, Rejection> {
        let phase = self.derive_phase(state, now);
        check_window_open(phase, Operation::SetCustomText)?;

        state.custom_text = text.into();
        self.settle(state, now);
        Ok(DecisionEvent::CustomTextEdited {
            length: state.custom_text.chars().count(),
        })
    }

    /// Makes or switches the cycle's choice.
    ///
    /// The first selection of a cycle starts the lock clock at `now`;
    /// switching inside the change window keeps that start instant. For a
    /// generated slot the stored text is the slot's label; for the custom
    /// slot it is `text`, trimmed.
    pub fn select(
        &self,
        state: &mut CycleState,
        choice_id: ChoiceId,
        text: &str,
        kind: SelectionKind,
        now: Timestamp,
    ) -> Result<DecisionEvent, Rejection> {
        let phase = self.derive_phase(state, now);
        let selection = check_select(state, phase, choice_id, text, kind)?;

        let lock_started_at = *state
            .lock_started_at
            .get_or_insert_with(|| now.truncated_to_millis());
        let choice_id = selection.choice_id.clone();
        let previous = state
            .selection
            .replace(selection)
            .map(|previous| previous.choice_id);
        state.reveal_displayed = false;
        state.next_cycle_options_generated = false;
        self.settle(state, now);

        Ok(DecisionEvent::ChoiceSelected {
            choice_id,
            kind,
            previous,
            lock_started_at,
        })
    }

    /// Authorises the preview of the following cycle's options.
    ///
    /// Accepted once the reveal has latched. The current cycle stays as is.
    pub fn generate_next_preview(&self, state: &mut CycleState) -> Result<DecisionEvent, Rejection> {
        check_next_preview(state)?;
        state.next_cycle_options_generated = true;
        state.reveal_displayed = true;
        Ok(DecisionEvent::NextPreviewGenerated)
    }

    /// Replaces a revealed cycle with an empty Draft.
    pub fn start_fresh_cycle(&self, state: &mut CycleState) -> Result<DecisionEvent, Rejection> {
        check_fresh_cycle(state)?;
        *state = CycleState::new();
        Ok(DecisionEvent::CycleReset)
    }

    // ───────────────────────────────────────────────────────────────
    // Restore and views
    // ───────────────────────────────────────────────────────────────

    /// Rebuilds a cycle from a decoded record, deriving its phase at `now`.
    ///
    /// Fields that contradict each other are dropped rather than trusted;
    /// the stored phase label is only a hint for the pre-selection part.
    pub fn restore(&self, record: PersistedRecord, now: Timestamp) -> CycleState {
        let PersistedRecord {
            situation_text,
            phase,
            options_generated,
            options,
            custom_text,
            selection,
            lock_started_at,
            reveal_displayed,
            next_cycle_options_generated,
            ..
        } = record;

        let generated_hint = options_generated.unwrap_or_else(|| match phase {
            Some(label) => label != Phase::Draft,
            None => !options.is_empty(),
        });
        let has_selection = selection.is_some();

        let lock_started_at = match (has_selection, lock_started_at) {
            (true, Some(millis)) => Timestamp::from_unix_millis(millis),
            (true, None) => {
                warn!("restored selection has no lock start; starting the lock now");
                Some(now.truncated_to_millis())
            }
            (false, _) => None,
        };

        let mut state = CycleState {
            situation_text,
            options_generated: generated_hint || !options.is_empty() || has_selection,
            options,
            custom_text,
            selection,
            lock_started_at,
            reveal_displayed: reveal_displayed && has_selection,
            next_cycle_options_generated: next_cycle_options_generated && has_selection,
            phase: Phase::Draft,
        };
        self.settle(&mut state, now);

        if state.next_cycle_options_generated && !state.reveal_displayed {
            state.next_cycle_options_generated = false;
        }
        state
    }

    /// Which operations would be accepted at `now`.
    pub fn affordances(&self, state: &CycleState, now: Timestamp) -> Affordances {
        let phase = self.derive_phase(state, now);
        let any_slot = (!state.options.is_empty()).then(|| ChoiceId::slot(1));

        Affordances {
            can_edit_situation: check_situation_editable(state).is_ok(),
            can_generate_options: self.ensure_can_generate(state).is_ok(),
            can_edit_custom_text: check_window_open(phase, Operation::SetCustomText).is_ok(),
            can_select: any_slot
                .map(|slot| check_select(state, phase, slot, "", SelectionKind::Option).is_ok())
                .unwrap_or(false),
            can_select_custom: check_select(
                state,
                phase,
                ChoiceId::custom(),
                &state.custom_text,
                SelectionKind::Custom,
            )
            .is_ok(),
            can_generate_next_preview: check_next_preview(state).is_ok(),
            can_start_fresh_cycle: check_fresh_cycle(state).is_ok(),
        }
    }

    /// Read-only view of the cycle at `now` for the presentation layer.
    ///
    /// `preview` is shown only once the next cycle's preview was authorised.
    pub fn snapshot(
        &self,
        state: &CycleState,
        now: Timestamp,
        preview: &[DecisionOption],
    ) -> BoardSnapshot {
        let phase = self.derive_phase(state, now);
        let timers = self.timers(state, now);
        let selected = state.selection.as_ref().map(|s| &s.choice_id);

        let options = state
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let choice_id = ChoiceId::slot(index + 1);
                let is_selected = selected == Some(&choice_id);
                OptionSlot::new(choice_id, option, is_selected)
            })
            .collect();

        let next_preview = if state.next_cycle_options_generated && state.reveal_displayed {
            preview
                .iter()
                .enumerate()
                .map(|(index, option)| OptionSlot::new(ChoiceId::preview(index + 1), option, false))
                .collect()
        } else {
            Vec::new()
        };

        BoardSnapshot {
            phase,
            situation_text: state.situation_text.clone(),
            options,
            custom_text: state.custom_text.clone(),
            selection: state.selection.clone(),
            lock_started_at: state.lock_started_at,
            reveal_displayed: state.reveal_displayed || phase == Phase::Revealed,
            next_cycle_options_generated: state.next_cycle_options_generated,
            change_window_label: selected.map(|_| timers.change_window_label()),
            lock_label: selected.map(|_| timers.lock_label()),
            timers,
            next_preview,
            affordances: self.affordances(state, now),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Guards shared by operations and affordances
// ───────────────────────────────────────────────────────────────

fn check_situation_editable(state: &CycleState) -> Result<(), Rejection> {
    if state.phase != Phase::Draft || state.selection.is_some() {
        return Err(Rejection::WrongPhase {
            operation: Operation::SetSituationText,
            phase: state.phase,
        });
    }
    Ok(())
}

fn check_window_open(phase: Phase, operation: Operation) -> Result<(), Rejection> {
    if phase.is_window_closed() {
        return Err(Rejection::WindowClosed { operation });
    }
    Ok(())
}

fn check_select(
    state: &CycleState,
    phase: Phase,
    choice_id: ChoiceId,
    text: &str,
    kind: SelectionKind,
) -> Result<Selection, Rejection> {
    let operation = Operation::Select;
    if phase == Phase::Draft {
        return Err(Rejection::WrongPhase { operation, phase });
    }
    check_window_open(phase, operation)?;

    let text = match kind {
        SelectionKind::Custom => {
            if !choice_id.is_custom() {
                return Err(Rejection::UnknownChoice {
                    operation,
                    choice_id,
                });
            }
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(Rejection::EmptyInput {
                    operation,
                    field: "custom_text",
                });
            }
            trimmed.to_string()
        }
        SelectionKind::Option => {
            let option = choice_id
                .slot_position()
                .and_then(|position| state.options.get(position - 1));
            match option {
                Some(option) => option.label.clone(),
                None => {
                    return Err(Rejection::UnknownChoice {
                        operation,
                        choice_id,
                    })
                }
            }
        }
    };

    Ok(Selection {
        choice_id,
        text,
        kind,
    })
}

fn check_next_preview(state: &CycleState) -> Result<(), Rejection> {
    if !state.reveal_displayed || state.selection.is_none() {
        return Err(Rejection::WrongPhase {
            operation: Operation::GenerateNextPreview,
            phase: state.phase,
        });
    }
    Ok(())
}

fn check_fresh_cycle(state: &CycleState) -> Result<(), Rejection> {
    if !state.reveal_displayed || state.phase.transition_to(Phase::Draft).is_err() {
        return Err(Rejection::WrongPhase {
            operation: Operation::StartFreshCycle,
            phase: state.phase,
        });
    }
    Ok(())
}
