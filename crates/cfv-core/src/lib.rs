//! # cfv-core
//!
//! Shared library for the custom file viewer plugin containing the settings
//! model, file-extension matching and the launch decision policy.
//!
//! It has zero dependencies on OS APIs, host UI toolkits, process spawning or
//! the file system.
//!
//! # Architecture overview (for beginners)
//!
//! The plugin sits inside a note-taking application.  When the user clicks a
//! file in the application's file explorer, the plugin may decide to open the
//! file in an external program (for example a code editor for `.py` files)
//! instead of the application's built-in viewer.
//!
//! This crate (`cfv-core`) is the pure foundation.  It defines:
//!
//! - **`domain::settings`** – The persisted configuration: which program opens
//!   which extension, the fallback program, and the extensions the host keeps
//!   handling itself.  Also the in-place edit operations the settings panel
//!   performs on it.
//!
//! - **`domain::extension`** – How an extension is read out of a vault path.
//!
//! - **`domain::policy`** – The ordered decision: pass the click through to
//!   the host, or launch a program.
//!
//! - **`domain::ignore_list`** – The comma-separated text form of the ignore
//!   list used by the settings text area.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `cfv_core::ViewerSettings` instead of `cfv_core::domain::settings::ViewerSettings`.
pub use domain::extension::extension_of;
pub use domain::ignore_list::{format_ignored_extensions, parse_ignored_extensions};
pub use domain::policy::{decide, LaunchDecision, PassReason};
pub use domain::settings::{PersistedSettings, ViewerSettings, DEFAULT_IGNORED_EXTENSIONS};
