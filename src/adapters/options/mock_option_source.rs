//! Mock Option Source.
//!
//! Returns a fixed list of options regardless of the situation, so the
//! board can be exercised without a real generator.
//!
//! # Example
//!
//! ```ignore
//! let source = MockOptionSource::new();
//! assert_eq!(source.generate("anything").len(), 4);
//!
//! let custom = MockOptionSource::with_options(vec![DecisionOption::new("Solo", "")]);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::decision::DecisionOption;
use crate::ports::OptionSource;

/// Option source returning pre-configured options.
#[derive(Debug, Clone)]
pub struct MockOptionSource {
    options: Vec<DecisionOption>,
    /// Number of `generate` calls, shared across clones.
    calls: Arc<AtomicUsize>,
}

impl MockOptionSource {
    /// Source returning the four default options.
    pub fn new() -> Self {
        Self::with_options(default_options())
    }

    pub fn with_options(options: Vec<DecisionOption>) -> Self {
        Self {
            options,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockOptionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionSource for MockOptionSource {
    fn generate(&self, _situation: &str) -> Vec<DecisionOption> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.options.clone()
    }
}

/// The board's stock options.
pub fn default_options() -> Vec<DecisionOption> {
    vec![
        DecisionOption::new("Bold Quest", "Charge ahead with daring confidence"),
        DecisionOption::new(
            "Careful Path",
            "Proceed step by step while guarding resources",
        ),
        DecisionOption::new(
            "Allies First",
            "Build support before taking your next move",
        ),
        DecisionOption::new("Quiet Study", "Pause to learn and map the unknowns ahead"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_returns_four_options() {
        let source = MockOptionSource::new();
        let options = source.generate("new job offer");

        assert_eq!(options.len(), 4);
        assert_eq!(options[0].label, "Bold Quest");
        assert_eq!(options[3].label, "Quiet Study");
    }

    #[test]
    fn output_does_not_depend_on_situation() {
        let source = MockOptionSource::new();
        assert_eq!(source.generate("a"), source.generate("b"));
    }

    #[test]
    fn calls_are_counted_across_clones() {
        let source = MockOptionSource::with_options(vec![]);
        let clone = source.clone();

        clone.generate("x");
        source.generate("y");

        assert_eq!(source.call_count(), 2);
    }
}
