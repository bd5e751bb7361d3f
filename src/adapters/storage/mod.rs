//! Storage Adapters
//!
//! Implementations of the CycleStore port for persisting the cycle record.
//!
//! ## Available Adapters
//!
//! - **FileCycleStore** - Stores the record as a JSON file on disk
//! - **InMemoryCycleStore** - Stores the record in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileCycleStore, InMemoryCycleStore};
//!
//! // Production: file-based storage
//! let store = FileCycleStore::new("./data/decision-board-state.json");
//!
//! // Testing: in-memory storage
//! let store = InMemoryCycleStore::new();
//! ```

mod file_cycle_store;
mod in_memory_cycle_store;

pub use file_cycle_store::FileCycleStore;
pub use in_memory_cycle_store::InMemoryCycleStore;
