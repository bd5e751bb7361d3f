//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, errors, state machine, upcasting)
//! - `decision` - Decision cycle aggregate, engine and persisted record

pub mod decision;
pub mod foundation;
