//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CycleStore` - Persistence of the serialized cycle record
//! - `OptionSource` - Generation of a cycle's options
//! - `Clock` - Current time

mod clock;
mod cycle_store;
mod option_source;

pub use clock::Clock;
pub use cycle_store::{CycleStore, CycleStoreError};
pub use option_source::OptionSource;
