//! In-memory plugin data store for unit and integration tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::data_store::{PluginDataStore, StorageError};

/// A [`PluginDataStore`] holding the object in memory and counting saves.
#[derive(Debug, Default)]
pub struct MemoryDataStore {
    data: Mutex<Option<Value>>,
    save_count: Mutex<u32>,
}

impl MemoryDataStore {
    /// An empty store, as on first activation.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `data`.
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Mutex::new(Some(data)),
            save_count: Mutex::new(0),
        }
    }

    /// The currently stored object.
    pub fn data(&self) -> Option<Value> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times [`PluginDataStore::save_data`] was called.
    pub fn save_count(&self) -> u32 {
        *self.save_count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PluginDataStore for MemoryDataStore {
    async fn load_data(&self) -> Result<Option<Value>, StorageError> {
        Ok(self.data())
    }

    async fn save_data(&self, data: &Value) -> Result<(), StorageError> {
        *self.data.lock().unwrap_or_else(PoisonError::into_inner) = Some(data.clone());
        *self.save_count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
