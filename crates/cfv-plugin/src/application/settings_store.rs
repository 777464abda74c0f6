//! SettingsStore: the plugin's configuration store.
//!
//! Holds the one [`ViewerSettings`] value shared by the click interceptor and
//! the settings panel.  Both receive it explicitly as `Arc<SettingsStore>`;
//! there is no global.
//!
//! # Persistence model
//!
//! Every save serializes the whole settings object and overwrites the stored
//! data.  There is no batching and no version check, so when two edits race
//! the last save to complete wins.
//!
//! # Locking
//!
//! The value sits behind a `std::sync::RwLock`.  Guards are confined to
//! synchronous blocks and never held across an `.await`.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use cfv_core::{PersistedSettings, ViewerSettings};
use tracing::{debug, info};

use crate::infrastructure::storage::{PluginDataStore, StorageError};

/// The configuration store.
pub struct SettingsStore {
    settings: RwLock<ViewerSettings>,
    data: Arc<dyn PluginDataStore>,
}

impl SettingsStore {
    /// Wraps an already-built settings value.
    pub fn new(settings: ViewerSettings, data: Arc<dyn PluginDataStore>) -> Self {
        Self {
            settings: RwLock::new(settings),
            data,
        }
    }

    /// Loads the stored object and shallow-merges it over the defaults.
    ///
    /// No stored data yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the data cannot be read or is not an
    /// object of the expected shape.
    pub async fn load(data: Arc<dyn PluginDataStore>) -> Result<Self, StorageError> {
        let settings = match data.load_data().await? {
            Some(value) => serde_json::from_value::<PersistedSettings>(value)?.merged_over_defaults(),
            None => {
                info!("no stored settings; using defaults");
                ViewerSettings::default()
            }
        };
        Ok(Self::new(settings, data))
    }

    /// A copy of the current settings.
    pub fn snapshot(&self) -> ViewerSettings {
        self.read(ViewerSettings::clone)
    }

    /// Runs `f` against the current settings under a read lock.
    pub fn read<R>(&self, f: impl FnOnce(&ViewerSettings) -> R) -> R {
        let guard = self.settings.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Mutates the settings in memory only.  Call [`Self::save`] to persist.
    pub fn edit<R>(&self, f: impl FnOnce(&mut ViewerSettings) -> R) -> R {
        let mut guard = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Overwrites the stored data with the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the data store rejects the write.
    pub async fn save(&self) -> Result<(), StorageError> {
        let value = serde_json::to_value(self.snapshot())?;
        self.data.save_data(&value).await?;
        debug!("settings saved");
        Ok(())
    }

    /// Mutates the settings in place, then persists them.
    ///
    /// The mutation stays in memory even if the save fails.
    pub async fn update<R>(&self, f: impl FnOnce(&mut ViewerSettings) -> R) -> Result<R, StorageError> {
        let result = self.edit(f);
        self.save().await?;
        Ok(result)
    }

    /// Replaces the extension map and persists.
    pub async fn set_app_map(&self, app_map: BTreeMap<String, String>) -> Result<(), StorageError> {
        self.update(|settings| settings.app_map = app_map).await
    }

    /// Replaces the default application path and persists.
    pub async fn set_default_app(&self, path: impl Into<String>) -> Result<(), StorageError> {
        let path = path.into();
        self.update(|settings| settings.set_default_app(path)).await
    }

    /// Replaces the ignore list and persists.
    pub async fn set_ignored_extensions(&self, extensions: Vec<String>) -> Result<(), StorageError> {
        self.update(|settings| settings.set_ignored_extensions(extensions))
            .await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
