//! Phase enum for tracking where a decision cycle stands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle phase of a decision cycle.
///
/// Phase is always derived from the cycle's inputs and the current time;
/// it is never read back from storage as truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Situation text editable, no options yet.
    #[default]
    Draft,
    /// Options visible, nothing chosen.
    Generated,
    /// A choice is made and the change window is open.
    Selected,
    /// Change window closed, reveal not yet due.
    Locked,
    /// Lock elapsed or reveal latched.
    Revealed,
}

impl Phase {
    /// Returns true if a selection must exist in this phase.
    pub fn has_selection(&self) -> bool {
        matches!(self, Phase::Selected | Phase::Locked | Phase::Revealed)
    }

    /// Returns true once the choice can no longer be switched.
    pub fn is_window_closed(&self) -> bool {
        matches!(self, Phase::Locked | Phase::Revealed)
    }
}

impl StateMachine for Phase {
    fn valid_transitions(&self) -> Vec<Self> {
        use Phase::*;
        match self {
            Draft => vec![Generated],
            Generated => vec![Selected],
            // Revealed directly when ticks were missed across the lock boundary.
            Selected => vec![Locked, Revealed],
            Locked => vec![Revealed],
            Revealed => vec![Draft],
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Draft => "Draft",
            Phase::Generated => "Generated",
            Phase::Selected => "Selected",
            Phase::Locked => "Locked",
            Phase::Revealed => "Revealed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Phase; 5] = [
        Phase::Draft,
        Phase::Generated,
        Phase::Selected,
        Phase::Locked,
        Phase::Revealed,
    ];

    #[test]
    fn default_is_draft() {
        assert_eq!(Phase::default(), Phase::Draft);
    }

    #[test]
    fn has_selection_works_correctly() {
        assert!(!Phase::Draft.has_selection());
        assert!(!Phase::Generated.has_selection());
        assert!(Phase::Selected.has_selection());
        assert!(Phase::Locked.has_selection());
        assert!(Phase::Revealed.has_selection());
    }

    #[test]
    fn window_closes_at_locked() {
        assert!(!Phase::Selected.is_window_closed());
        assert!(Phase::Locked.is_window_closed());
        assert!(Phase::Revealed.is_window_closed());
    }

    #[test]
    fn forward_path_is_legal() {
        assert!(Phase::Draft.can_transition_to(&Phase::Generated));
        assert!(Phase::Generated.can_transition_to(&Phase::Selected));
        assert!(Phase::Selected.can_transition_to(&Phase::Locked));
        assert!(Phase::Locked.can_transition_to(&Phase::Revealed));
    }

    #[test]
    fn selected_may_skip_locked() {
        assert!(Phase::Selected.can_transition_to(&Phase::Revealed));
    }

    #[test]
    fn revealed_returns_to_draft_only() {
        assert_eq!(Phase::Revealed.valid_transitions(), vec![Phase::Draft]);
    }

    #[test]
    fn no_backward_moves_within_a_cycle() {
        assert!(!Phase::Locked.can_transition_to(&Phase::Selected));
        assert!(!Phase::Revealed.can_transition_to(&Phase::Locked));
        assert!(!Phase::Generated.can_transition_to(&Phase::Draft));
    }

    #[test]
    fn no_phase_transitions_to_itself() {
        for phase in ALL {
            assert!(!phase.can_transition_to(&phase), "{} -> {}", phase, phase);
        }
    }

    #[test]
    fn serializes_to_lowercase_json() {
        assert_eq!(serde_json::to_string(&Phase::Locked).unwrap(), "\"locked\"");
        let phase: Phase = serde_json::from_str("\"revealed\"").unwrap();
        assert_eq!(phase, Phase::Revealed);
    }

    #[test]
    fn display_works_correctly() {
        assert_eq!(format!("{}", Phase::Generated), "Generated");
    }
}
