//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::Result;
use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// A process-local [`KeyValueStore`].
///
/// Nothing survives the process; useful for short-lived tools and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.read().map_err(|_| StorageError::Poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        slots.remove(key);
        Ok(())
    }

    fn apply(&self, set: &[(&str, &str)], remove: &[&str]) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        for (key, value) in set {
            slots.insert(key.to_string(), value.to_string());
        }
        for key in remove {
            slots.remove(*key);
        }
        Ok(())
    }
}
