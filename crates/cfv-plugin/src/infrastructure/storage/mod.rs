//! Storage infrastructure: plugin data and host configuration persistence.
//!
//! - `data_store` – the host's per-plugin data object (JSON), read once at
//!   activation and overwritten wholesale on every settings edit.
//! - `memory` – an in-memory data store for tests.
//! - `host_config` – the TOML configuration of the command-line host (vault
//!   location, data directory, log level).

pub mod data_store;
pub mod host_config;
pub mod memory;

pub use data_store::{JsonFileStore, PluginDataStore, StorageError};
pub use memory::MemoryDataStore;
