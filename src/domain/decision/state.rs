//! CycleState - the single per-cycle aggregate.

use super::{DecisionOption, Phase, Selection};
use crate::domain::foundation::Timestamp;

/// Everything one decision cycle knows.
///
/// Only `DecisionEngine` mutates a cycle. `phase` is a cache of the value
/// derived from the other fields and the last `tick` instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CycleState {
    pub(super) situation_text: String,
    pub(super) options_generated: bool,
    pub(super) options: Vec<DecisionOption>,
    pub(super) custom_text: String,
    pub(super) selection: Option<Selection>,
    pub(super) lock_started_at: Option<Timestamp>,
    pub(super) reveal_displayed: bool,
    pub(super) next_cycle_options_generated: bool,
    pub(super) phase: Phase,
}

impl CycleState {
    /// Creates an empty Draft cycle.
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn situation_text(&self) -> &str {
        &self.situation_text
    }

    /// Returns true once options were generated for this cycle.
    pub fn options_generated(&self) -> bool {
        self.options_generated
    }

    pub fn options(&self) -> &[DecisionOption] {
        &self.options
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Instant of the first selection of this cycle.
    pub fn lock_started_at(&self) -> Option<Timestamp> {
        self.lock_started_at
    }

    pub fn reveal_displayed(&self) -> bool {
        self.reveal_displayed
    }

    pub fn next_cycle_options_generated(&self) -> bool {
        self.next_cycle_options_generated
    }

    /// Phase as of the most recent tick or operation.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Refills the option list of a cycle past Draft whose options were lost.
    ///
    /// Returns false and changes nothing otherwise.
    pub fn restore_missing_options(&mut self, options: Vec<DecisionOption>) -> bool {
        if !self.options_generated || !self.options.is_empty() {
            return false;
        }
        self.options = options;
        true
    }

    /// Checks the cross-field invariants of a cycle.
    ///
    /// Returns the first violated rule, if any.
    pub fn invariant_violation(&self) -> Option<&'static str> {
        if self.selection.is_some() && self.lock_started_at.is_none() {
            return Some("selection without lock start");
        }
        if self.phase.has_selection() && self.selection.is_none() {
            return Some("phase requires a selection");
        }
        if self.phase == Phase::Draft && (!self.options.is_empty() || self.selection.is_some()) {
            return Some("draft with options or selection");
        }
        if self.reveal_displayed && self.phase != Phase::Revealed {
            return Some("reveal latched outside Revealed");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{ChoiceId, SelectionKind};

    #[test]
    fn new_cycle_is_empty_draft() {
        let state = CycleState::new();

        assert_eq!(state.phase(), Phase::Draft);
        assert!(state.options().is_empty());
        assert!(state.selection().is_none());
        assert!(state.lock_started_at().is_none());
        assert!(!state.reveal_displayed());
        assert!(state.invariant_violation().is_none());
    }

    #[test]
    fn restore_missing_options_only_fills_generated_cycles() {
        let mut draft = CycleState::new();
        assert!(!draft.restore_missing_options(vec![DecisionOption::new("A", "a")]));
        assert!(draft.options().is_empty());

        let mut generated = CycleState {
            options_generated: true,
            phase: Phase::Generated,
            ..CycleState::default()
        };
        assert!(generated.restore_missing_options(vec![DecisionOption::new("A", "a")]));
        assert_eq!(generated.options().len(), 1);
        assert!(!generated.restore_missing_options(vec![]));
    }

    #[test]
    fn invariant_violation_detects_selection_without_lock() {
        let state = CycleState {
            options_generated: true,
            selection: Some(Selection {
                choice_id: ChoiceId::slot(1),
                text: "A".to_string(),
                kind: SelectionKind::Option,
            }),
            phase: Phase::Selected,
            ..CycleState::default()
        };
        assert_eq!(
            state.invariant_violation(),
            Some("selection without lock start")
        );
    }

    #[test]
    fn invariant_violation_detects_stray_reveal() {
        let state = CycleState {
            reveal_displayed: true,
            ..CycleState::default()
        };
        assert!(state.invariant_violation().is_some());
    }
}
