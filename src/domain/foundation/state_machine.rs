//! State machine trait for lifecycle enums.
//!
//! Gives lifecycle enums a single place to declare which moves are legal,
//! and a validated transition helper built on top of that table.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for Phase {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Draft => vec![Generated],
///             Generated => vec![Selected],
///             // ... etc
///         }
///     }
/// }
///
/// let next = Phase::Draft.transition_to(Phase::Generated)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Amber,
    }

    impl StateMachine for Light {
        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Light::Red => vec![Light::Green],
                Light::Green => vec![Light::Amber],
                Light::Amber => vec![Light::Red],
            }
        }
    }

    #[test]
    fn can_transition_to_follows_table() {
        assert!(Light::Red.can_transition_to(&Light::Green));
        assert!(!Light::Red.can_transition_to(&Light::Amber));
        assert!(!Light::Red.can_transition_to(&Light::Red));
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Light::Green.transition_to(Light::Amber), Ok(Light::Amber));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Light::Green.transition_to(Light::Red).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Green to Red"));
    }
}
