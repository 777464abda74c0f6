//! Domain entities for the custom file viewer.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the plugin.  Domain code:
//!
//! - Holds the rules that make the plugin what it is: which clicks are taken
//!   away from the host and which program gets them.
//! - Has **no** imports from the host application, process APIs or storage.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! The application and infrastructure layers in `cfv-plugin` depend on this
//! module; it never depends on them.

/// File-extension extraction from vault-relative paths.
pub mod extension;

/// Comma-separated text form of the ignored-extensions list.
pub mod ignore_list;

/// The ordered launch decision.
///
/// See [`policy::decide`] for the main entry point.
pub mod policy;

/// The persisted settings object and its edit operations.
pub mod settings;
