//! Launch decision policy.
//!
//! Given the current settings and the vault-relative path of a clicked file,
//! decides whether the host keeps the click or an external program gets it.
//! The rules are evaluated in order and the first match wins:
//!
//! 1. No extension → pass through.
//! 2. Extension (lower-cased) in the ignore list → pass through.  The ignore
//!    list always wins over the mapping.
//! 3. Mapped program, else the default program; both empty → pass through.
//! 4. Otherwise → launch that program.

use super::extension::extension_of;
use super::settings::ViewerSettings;

/// Why a click was left to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    /// The file name has no extension.
    NoExtension,
    /// The extension is on the ignore list.
    Ignored,
    /// Neither a mapping nor a default program is configured.
    NoApplication,
}

/// Outcome of [`decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchDecision {
    /// The host handles the click with its built-in viewer.
    PassThrough(PassReason),
    /// The click is taken over and `app_path` is launched.
    Launch {
        /// The lower-cased extension that matched.
        extension: String,
        /// Program to launch.
        app_path: String,
    },
}

impl LaunchDecision {
    /// Returns `true` for [`LaunchDecision::Launch`].
    pub fn is_launch(&self) -> bool {
        matches!(self, LaunchDecision::Launch { .. })
    }
}

/// Evaluates the ordered policy for the file at `relative_path`.
///
/// # Example
///
/// ```rust
/// use cfv_core::{decide, LaunchDecision, PassReason, ViewerSettings};
///
/// let mut settings = ViewerSettings::default();
/// settings.set_mapping_app("py", "/usr/bin/code");
///
/// assert!(decide(&settings, "notes/script.py").is_launch());
/// assert_eq!(
///     decide(&settings, "notes/readme.md"),
///     LaunchDecision::PassThrough(PassReason::Ignored),
/// );
/// ```
pub fn decide(settings: &ViewerSettings, relative_path: &str) -> LaunchDecision {
    let Some(extension) = extension_of(relative_path) else {
        return LaunchDecision::PassThrough(PassReason::NoExtension);
    };
    let extension = extension.to_lowercase();

    if settings.is_ignored(&extension) {
        return LaunchDecision::PassThrough(PassReason::Ignored);
    }

    match settings.application_for(&extension) {
        Some(app_path) => LaunchDecision::Launch {
            app_path: app_path.to_string(),
            extension,
        },
        None => LaunchDecision::PassThrough(PassReason::NoApplication),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
