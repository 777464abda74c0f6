//! Per-plugin data storage.
//!
//! The host gives every plugin one opaque JSON object.  It is read once when
//! the plugin activates and overwritten in full on every save; there is no
//! versioning and no partial write.  When no data has been saved yet, the
//! store reports `None` and the caller falls back to its defaults.
//!
//! The on-disk location follows the host's convention:
//!
//! ```text
//! <vault>/.obsidian/plugins/<plugin id>/data.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Name of the data file inside a plugin's directory.
pub const DATA_FILE_NAME: &str = "data.json";

/// Error type for plugin data operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing plugin data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored data is not valid JSON or has the wrong shape.
    #[error("failed to parse plugin data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Host facility that loads and saves a plugin's data object.
#[async_trait]
pub trait PluginDataStore: Send + Sync {
    /// Returns the stored object, or `None` if nothing has been saved yet.
    async fn load_data(&self) -> Result<Option<Value>, StorageError>;

    /// Replaces the stored object with `data`.
    async fn save_data(&self, data: &Value) -> Result<(), StorageError>;
}

/// Plugin data kept as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store using `path` as the data file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store using `data.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DATA_FILE_NAME))
    }

    /// The host's default location for `plugin_id` inside `vault_root`.
    pub fn for_plugin(vault_root: impl AsRef<Path>, plugin_id: &str) -> Self {
        Self::in_dir(
            vault_root
                .as_ref()
                .join(".obsidian")
                .join("plugins")
                .join(plugin_id),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PluginDataStore for JsonFileStore {
    async fn load_data(&self) -> Result<Option<Value>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let value: Value = serde_json::from_str(&content)?;
                Ok((!value.is_null()).then_some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn save_data(&self, data: &Value) -> Result<(), StorageError> {
        // Ensure directory exists before writing.
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let content = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
