//! Application layer - services that drive the decision domain.
//!
//! - `DecisionBoardService` - Owns the live cycle, persists every change
//! - `TickScheduler` - Periodic tick so timers advance without user input

mod board_service;
mod tick_scheduler;

pub use board_service::{BoardError, DecisionBoardService};
pub use tick_scheduler::{TickScheduler, TickSchedulerConfig};
