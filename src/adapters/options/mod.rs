//! Option Source Adapters
//!
//! - **MockOptionSource** - Fixed options for development and tests

mod mock_option_source;

pub use mock_option_source::{default_options, MockOptionSource};
