//! Decision domain - the lifecycle of one decision cycle.
//!
//! A cycle moves Draft → Generated → Selected → Locked → Revealed. The
//! phase is never stored as truth: `DecisionEngine` derives it from the
//! cycle's inputs and the current time, and `tick` latches the reveal.
//!
//! # Module Organization
//!
//! - `phase` - Phase enum and its transition table
//! - `choice` - Options, choice ids and selections
//! - `timing` - Change window and lock durations, timer views
//! - `state` - The `CycleState` aggregate
//! - `engine` - Guarded operations, tick and restore
//! - `record` - Persisted record schema and migrations
//! - `view` - Snapshots and affordances for the presentation layer

mod choice;
mod engine;
mod events;
mod phase;
mod rejection;
pub mod record;
mod state;
mod timing;
mod view;

pub use choice::{remap_legacy_choice_id, ChoiceId, DecisionOption, Selection, SelectionKind};
pub use engine::DecisionEngine;
pub use events::DecisionEvent;
pub use phase::Phase;
pub use record::{PersistedRecord, RecordError};
pub use rejection::{Operation, Rejection};
pub use state::CycleState;
pub use timing::{format_countdown, LockTimings, TimerView};
pub use view::{Affordances, BoardSnapshot, OptionSlot};
