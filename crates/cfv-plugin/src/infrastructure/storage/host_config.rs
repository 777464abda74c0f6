//! TOML-based configuration for the command-line host.
//!
//! The `cfv-host` binary plays the part of the note-taking application: it
//! knows where the vault lives and where the plugin's data object is kept.
//! Those facts come from `host.toml` in the platform-appropriate directory:
//! - Windows:  `%APPDATA%\CustomFileViewer\host.toml`
//! - Linux:    `~/.config/custom-file-viewer/host.toml`
//! - macOS:    `~/Library/Application Support/CustomFileViewer/host.toml`
//!
//! ```toml
//! [vault]
//! root = "/home/me/notes"
//!
//! [plugin]
//! id = "custom-file-viewer"
//! # data_dir = "/home/me/.local/share/cfv"   # overrides <vault>/.obsidian/plugins/<id>
//!
//! [logging]
//! level = "info"
//! ```
//!
//! # Serde default values
//!
//! Every section and field has a default, so an empty or missing file is a
//! valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::data_store::JsonFileStore;

/// Error type for host configuration file operations.
#[derive(Debug, Error)]
pub enum HostConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level host configuration stored on disk.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HostConfig {
    #[serde(default)]
    pub vault: VaultConfig,
    #[serde(default)]
    pub plugin: PluginConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location of the vault on disk.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VaultConfig {
    /// Vault root directory.  Relative paths resolve against the working directory.
    #[serde(default = "default_vault_root")]
    pub root: PathBuf,
}

/// Plugin identity and data location.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PluginConfig {
    /// Plugin id; names the plugin's directory inside the vault.
    #[serde(default = "default_plugin_id")]
    pub id: String,
    /// Directory holding `data.json`.  Absent → `<vault>/.obsidian/plugins/<id>`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_vault_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_plugin_id() -> String {
    "custom-file-viewer".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            root: default_vault_root(),
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            id: default_plugin_id(),
            data_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl HostConfig {
    /// The data store for the configured plugin.
    pub fn data_store(&self) -> JsonFileStore {
        match &self.plugin.data_dir {
            Some(dir) => JsonFileStore::in_dir(dir),
            None => JsonFileStore::for_plugin(&self.vault.root, &self.plugin.id),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`HostConfigError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, HostConfigError> {
    platform_config_dir().ok_or(HostConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`HostConfigError::NoPlatformConfigDir`] if the base directory
/// cannot be determined.
pub fn config_file_path() -> Result<PathBuf, HostConfigError> {
    Ok(config_dir()?.join("host.toml"))
}

/// Loads `HostConfig` from `path`, returning `HostConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`HostConfigError::Io`] for file-system errors other than "not
/// found", and [`HostConfigError::Parse`] if the TOML is malformed.
pub fn load_host_config(path: &Path) -> Result<HostConfig, HostConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HostConfig::default()),
        Err(source) => Err(HostConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("CustomFileViewer"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("custom-file-viewer"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("CustomFileViewer")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
