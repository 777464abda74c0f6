//! Application layer use cases for the plugin.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer sits between the domain in `cfv_core` (pure
//! rules) and the infrastructure (host facilities, processes, files).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "open this
//!   Python file in my editor instead of the built-in viewer").
//! - **Depend on abstractions** (traits such as `ProcessLauncher`,
//!   `PluginDataStore`, `Notifier`) rather than concrete implementations, so
//!   tests can substitute recording doubles.
//!
//! # Sub-modules
//!
//! - **`settings_store`** – The single owned settings value: loaded once at
//!   activation, mutated in place, persisted wholesale after every edit.
//!
//! - **`intercept_click`** – Runs on every explorer click; decides whether
//!   to take the click away from the host and launches the external program.
//!
//! - **`settings_panel`** – The settings form: renders the current settings
//!   and applies each field edit back to the store.

pub mod intercept_click;
pub mod settings_panel;
pub mod settings_store;
