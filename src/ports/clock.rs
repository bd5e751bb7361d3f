//! Clock Port - The single source of "now" for the application layer.

use crate::domain::foundation::Timestamp;

/// Wall clock abstraction so timers can be driven in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
