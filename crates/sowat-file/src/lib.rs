//! sowat-file - File-backed token storage for the Sowat admin toolkit.
//!
//! [`FileStore`] keeps the session slots in a single JSON object on disk so
//! a login survives across CLI invocations, the way browser local storage
//! does for the web console.

mod store;

pub use store::FileStore;

/// File name used inside a data directory.
pub const SESSION_FILE: &str = "session.json";
