//! Option Source Port - Where a cycle's options come from.

use crate::domain::decision::DecisionOption;

/// Produces the options offered for a situation.
///
/// Implementations must be deterministic enough for a restored cycle to
/// get its lost options back from the same situation text.
pub trait OptionSource: Send + Sync {
    /// Options for `situation`. May be empty.
    fn generate(&self, situation: &str) -> Vec<DecisionOption>;
}
