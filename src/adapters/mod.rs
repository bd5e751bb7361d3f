//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Cycle record persistence (file, in-memory)
//! - `options` - Option sources
//! - `clock` - System and manual clocks
//! - `console` - Line protocol of the interactive binary

pub mod clock;
pub mod console;
pub mod options;
pub mod storage;

pub use clock::{ManualClock, SystemClock};
pub use console::{ConsoleCommand, ConsoleError};
pub use options::MockOptionSource;
pub use storage::{FileCycleStore, InMemoryCycleStore};
