//! Durable key-value store trait.

use crate::Result;

/// A durable string key-value store.
///
/// This is the client's equivalent of browser local storage: slots survive
/// process restarts and are read synchronously before every request.
/// Implementations must be safe to share across tasks.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. A missing slot is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Apply several writes and removals as one operation.
    ///
    /// The default applies them one by one; stores that can commit atomically
    /// should override it.
    fn apply(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<()> {
        for (key, value) in set {
            self.set(key, value)?;
        }
        for key in remove {
            self.remove(key)?;
        }
        Ok(())
    }
}
