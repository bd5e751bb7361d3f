//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, error types and the schema-evolution
//! plumbing that the decision domain builds on.

mod errors;
mod state_machine;
mod timestamp;
mod upcaster;

pub use errors::{ErrorCode, ValidationError};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use upcaster::{UpcastError, Upcaster, UpcasterChain};
