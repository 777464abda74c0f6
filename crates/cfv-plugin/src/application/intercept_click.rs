//! InterceptClickUseCase: hands explorer clicks to external programs.
//!
//! Runs once per click on the document-level click signal.  The decision is
//! synchronous so the click can be suppressed before the host's own handling
//! sees it; the launch that follows is a separate async step the caller fires
//! and forgets.
//!
//! # Flow
//!
//! ```text
//! click ─► resolve path ─► decide ─┬─ pass through ──► host opens the file
//!                                  └─ launch ─► prevent default + stop propagation
//!                                              └─► spawn program (async)
//!                                                   └─ error ─► one notice
//! ```
//!
//! There is no debouncing and no re-entrancy guard: each click produces its
//! own independent launch.

use std::path::PathBuf;
use std::sync::Arc;

use cfv_core::{decide, LaunchDecision};
use tracing::{debug, info, warn};

use crate::application::settings_store::SettingsStore;
use crate::infrastructure::explorer::{resolve_file_path, ClickEvent};
use crate::infrastructure::launcher::ProcessLauncher;
use crate::infrastructure::notice::{Notice, Notifier};
use crate::infrastructure::vault::{join_vault_path, VaultAdapter};

/// A launch the interceptor committed to after suppressing a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Vault-relative path, as shown in the explorer.
    pub relative_path: String,
    /// Program to start.
    pub app_path: PathBuf,
    /// The program's only argument.
    pub absolute_path: PathBuf,
}

/// The click interception use case.
#[derive(Clone)]
pub struct InterceptClickUseCase {
    settings: Arc<SettingsStore>,
    vault: Arc<dyn VaultAdapter>,
    launcher: Arc<dyn ProcessLauncher>,
    notifier: Arc<dyn Notifier>,
}

impl InterceptClickUseCase {
    /// Creates a new use case instance.
    pub fn new(
        settings: Arc<SettingsStore>,
        vault: Arc<dyn VaultAdapter>,
        launcher: Arc<dyn ProcessLauncher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            vault,
            launcher,
            notifier,
        }
    }

    /// Inspects a click and, when an external program should open the file,
    /// suppresses the click and returns the launch to perform.
    ///
    /// Returns `None` (leaving the event untouched) when the click is not on a
    /// file entry, the policy passes it through, or the vault has no local
    /// root directory.
    pub fn on_click(&self, event: &mut ClickEvent) -> Option<LaunchRequest> {
        let relative_path = resolve_file_path(event)?;

        let app_path = match self.settings.read(|settings| decide(settings, &relative_path)) {
            LaunchDecision::Launch { app_path, extension } => {
                debug!(path = %relative_path, %extension, "click matched external program");
                app_path
            }
            LaunchDecision::PassThrough(reason) => {
                debug!(path = %relative_path, ?reason, "click left to host");
                return None;
            }
        };

        let Some(root) = self.vault.base_path() else {
            debug!(path = %relative_path, "vault has no local root; click left to host");
            return None;
        };

        event.prevent_default();
        event.stop_immediate_propagation();

        Some(LaunchRequest {
            absolute_path: join_vault_path(&root, &relative_path),
            app_path: PathBuf::from(app_path),
            relative_path,
        })
    }

    /// Starts the program for `request`.
    ///
    /// A failed start raises exactly one notice naming the file and the error;
    /// nothing is returned to the caller and nothing is retried.
    pub async fn launch(&self, request: LaunchRequest) {
        info!(
            program = %request.app_path.display(),
            file = %request.absolute_path.display(),
            "opening file in external program"
        );
        if let Err(e) = self
            .launcher
            .launch(&request.app_path, &request.absolute_path)
            .await
        {
            warn!(path = %request.relative_path, "launch failed: {e}");
            self.notifier.notify(&Notice::new(format!(
                "Failed to open {}: {e}",
                request.relative_path
            )));
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
