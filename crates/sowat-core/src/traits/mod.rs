//! Capability traits the client facade depends on.
//!
//! The facade never touches storage, notifications or navigation directly;
//! each is reached through one of these narrow interfaces so the same
//! client runs under a CLI, a daemon, or a test harness.

mod navigator;
mod notifier;
mod store;

pub use navigator::Navigator;
pub use notifier::Notifier;
pub use store::KeyValueStore;
