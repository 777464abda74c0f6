//! Plugin lifecycle.
//!
//! The host talks to a plugin through the [`Plugin`] capability set: load,
//! unload, and an optional settings panel.  [`CustomFileViewerPlugin`] is the
//! only implementation; it owns the settings store and the click interceptor
//! for as long as it is loaded.

use std::sync::Arc;

use async_trait::async_trait;
use cfv_core::ViewerSettings;
use tracing::{info, warn};

use crate::application::intercept_click::InterceptClickUseCase;
use crate::application::settings_panel::SettingsPanel;
use crate::application::settings_store::SettingsStore;
use crate::infrastructure::explorer::{ClickEvent, ListenerId, ListenerPhase};
use crate::infrastructure::host::HostServices;

/// Identity the host shows for a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginManifest {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// What a host needs from a plugin.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn manifest(&self) -> PluginManifest;

    /// Loads state and registers click listeners.  The host removes every
    /// returned listener when the plugin is unloaded.
    async fn on_load(&mut self, host: &HostServices) -> anyhow::Result<Vec<ListenerId>>;

    fn on_unload(&mut self);

    /// A fresh settings form, or `None` while the plugin is not loaded.
    fn settings_panel(&self) -> Option<SettingsPanel>;
}

struct Loaded {
    store: Arc<SettingsStore>,
}

/// Opens explorer files in external programs chosen by extension.
#[derive(Default)]
pub struct CustomFileViewerPlugin {
    loaded: Option<Loaded>,
}

impl CustomFileViewerPlugin {
    pub const MANIFEST: PluginManifest = PluginManifest {
        id: "custom-file-viewer",
        name: "Custom File Viewer",
        version: env!("CARGO_PKG_VERSION"),
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }
}

#[async_trait]
impl Plugin for CustomFileViewerPlugin {
    fn manifest(&self) -> PluginManifest {
        Self::MANIFEST
    }

    async fn on_load(&mut self, host: &HostServices) -> anyhow::Result<Vec<ListenerId>> {
        let store = match SettingsStore::load(Arc::clone(&host.data_store)).await {
            Ok(store) => store,
            Err(e) => {
                warn!("could not load stored settings ({e}); using defaults");
                SettingsStore::new(ViewerSettings::default(), Arc::clone(&host.data_store))
            }
        };
        let store = Arc::new(store);

        let use_case = InterceptClickUseCase::new(
            Arc::clone(&store),
            Arc::clone(&host.vault),
            Arc::clone(&host.launcher),
            Arc::clone(&host.notifier),
        );
        let tasks = Arc::clone(&host.tasks);
        let listener = host.clicks.add_listener(
            ListenerPhase::Capture,
            Arc::new(move |event: &mut ClickEvent| {
                if let Some(request) = use_case.on_click(event) {
                    let use_case = use_case.clone();
                    tasks.spawn(async move { use_case.launch(request).await });
                }
            }),
        );

        self.loaded = Some(Loaded { store });
        info!(plugin = Self::MANIFEST.id, "plugin loaded");
        Ok(vec![listener])
    }

    fn on_unload(&mut self) {
        if self.loaded.take().is_some() {
            info!(plugin = Self::MANIFEST.id, "plugin unloaded");
        }
    }

    fn settings_panel(&self) -> Option<SettingsPanel> {
        self.loaded
            .as_ref()
            .map(|loaded| SettingsPanel::new(Arc::clone(&loaded.store)))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::notice::RecordingNotifier;
    use crate::infrastructure::storage::MemoryDataStore;
    use crate::infrastructure::vault::FsVault;
    use serde_json::json;

    fn services(data: MemoryDataStore) -> (HostServices, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let services = HostServices::new(Arc::new(FsVault::new("/vault")), Arc::new(data))
            .with_notifier(Arc::clone(&notifier) as _);
        (services, notifier)
    }

    #[tokio::test]
    async fn test_on_load_registers_one_capture_listener() {
        // Arrange
        let (host, _) = services(MemoryDataStore::new());
        let mut plugin = CustomFileViewerPlugin::new();

        // Act
        let listeners = plugin.on_load(&host).await.expect("load");

        // Assert
        assert_eq!(listeners.len(), 1);
        assert_eq!(host.clicks.listener_count(), 1);
        assert!(plugin.is_loaded());
    }

    #[tokio::test]
    async fn test_malformed_stored_data_falls_back_to_defaults() {
        let (host, _) = services(MemoryDataStore::with_data(json!("garbage")));
        let mut plugin = CustomFileViewerPlugin::new();

        plugin.on_load(&host).await.expect("load never fails on bad data");

        let mut panel = plugin.settings_panel().expect("loaded");
        let view = panel.render();
        assert_eq!(view.mapping_rows().count(), 0);
    }

    #[tokio::test]
    async fn test_settings_panel_absent_after_unload() {
        let (host, _) = services(MemoryDataStore::new());
        let mut plugin = CustomFileViewerPlugin::new();
        plugin.on_load(&host).await.expect("load");

        plugin.on_unload();

        assert!(plugin.settings_panel().is_none());
        assert!(!plugin.is_loaded());
    }

    #[test]
    fn test_manifest_identifies_plugin() {
        let plugin = CustomFileViewerPlugin::new();
        assert_eq!(plugin.manifest().id, "custom-file-viewer");
        assert_eq!(plugin.manifest().name, "Custom File Viewer");
    }
}
