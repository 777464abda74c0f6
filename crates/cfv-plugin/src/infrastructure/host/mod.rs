//! The plugin host.
//!
//! [`HostServices`] is the set of facilities a host hands to a plugin when it
//! loads: the document click signal, the vault, notices, per-plugin data
//! storage, process spawning and a place to park background tasks.
//!
//! [`PluginHost`] drives one plugin through its lifecycle.  It also plays the
//! host application's own part in a click: a bubble-phase listener that
//! "opens" the file internally whenever no plugin suppressed the click.
//!
//! ```text
//! PluginHost::click(path)
//!  └─ ClickDispatcher::dispatch
//!       ├─ capture: plugin listener  ──► may stop propagation
//!       └─ bubble:  host listener    ──► records the internal open
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::settings_panel::SettingsPanel;
use crate::infrastructure::explorer::{
    resolve_file_path, ClickDispatcher, ClickEvent, ListenerId, ListenerPhase,
};
use crate::infrastructure::launcher::{process::SystemLauncher, ProcessLauncher};
use crate::infrastructure::notice::{LogNotifier, Notifier};
use crate::infrastructure::storage::PluginDataStore;
use crate::infrastructure::vault::VaultAdapter;
use crate::plugin::Plugin;

/// Fire-and-forget tasks started on behalf of plugins.
///
/// Handles are kept so a short-lived host (the command line) can wait for
/// them before the runtime shuts down.
#[derive(Debug, Default)]
pub struct BackgroundTasks {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `task` on the current Tokio runtime.
    ///
    /// Outside a runtime the task is dropped with a warning.  Handles of
    /// tasks that already finished are released on every call.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = match Handle::try_current() {
            Ok(runtime) => runtime.spawn(task),
            Err(e) => {
                warn!("background task dropped: {e}");
                return;
            }
        };
        let mut handles = self.lock();
        handles.retain(|handle| !handle.is_finished());
        handles.push(handle);
    }

    /// Number of tasks still tracked: unfinished, or finished since the last spawn.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Waits for every task spawned so far.
    pub async fn wait_all(&self) {
        let handles = std::mem::take(&mut *self.lock());
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("background task ended abnormally: {e}");
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Facilities a host provides to a loaded plugin.
#[derive(Clone)]
pub struct HostServices {
    pub clicks: Arc<ClickDispatcher>,
    pub vault: Arc<dyn VaultAdapter>,
    pub notifier: Arc<dyn Notifier>,
    pub data_store: Arc<dyn PluginDataStore>,
    pub launcher: Arc<dyn ProcessLauncher>,
    pub tasks: Arc<BackgroundTasks>,
}

impl HostServices {
    /// Services backed by real processes and log-based notices.
    pub fn new(vault: Arc<dyn VaultAdapter>, data_store: Arc<dyn PluginDataStore>) -> Self {
        Self {
            clicks: Arc::new(ClickDispatcher::new()),
            vault,
            notifier: Arc::new(LogNotifier),
            data_store,
            launcher: Arc::new(SystemLauncher),
            tasks: Arc::new(BackgroundTasks::new()),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_launcher(mut self, launcher: Arc<dyn ProcessLauncher>) -> Self {
        self.launcher = launcher;
        self
    }
}

/// Who ended up handling a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A plugin suppressed the click and took over.
    Intercepted,
    /// The click reached the host's own handling.
    HandledByHost,
}

/// Hosts a single plugin.
pub struct PluginHost {
    services: HostServices,
    plugin: Box<dyn Plugin>,
    plugin_listeners: Vec<ListenerId>,
    active: bool,
    host_opened: Arc<Mutex<Vec<String>>>,
}

impl PluginHost {
    pub fn new(services: HostServices, plugin: Box<dyn Plugin>) -> Self {
        let host_opened = Arc::new(Mutex::new(Vec::new()));
        let opened = Arc::clone(&host_opened);
        services.clicks.add_listener(
            ListenerPhase::Bubble,
            Arc::new(move |event: &mut ClickEvent| {
                if let Some(path) = resolve_file_path(event) {
                    debug!(%path, "host opens file internally");
                    opened.lock().unwrap_or_else(PoisonError::into_inner).push(path);
                }
            }),
        );

        Self {
            services,
            plugin,
            plugin_listeners: Vec::new(),
            active: false,
            host_opened,
        }
    }

    /// Loads the plugin.  Activating an active plugin does nothing.
    ///
    /// # Errors
    ///
    /// Propagates the plugin's load error.
    pub async fn activate(&mut self) -> anyhow::Result<()> {
        if self.active {
            debug!("plugin already active");
            return Ok(());
        }
        let manifest = self.plugin.manifest();
        self.plugin_listeners = self.plugin.on_load(&self.services).await?;
        self.active = true;
        info!(
            plugin = manifest.id,
            listeners = self.plugin_listeners.len(),
            "plugin activated"
        );
        Ok(())
    }

    /// Unloads the plugin and removes every listener it registered.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        for id in self.plugin_listeners.drain(..) {
            self.services.clicks.remove_listener(id);
        }
        self.plugin.on_unload();
        self.active = false;
        info!(plugin = self.plugin.manifest().id, "plugin deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Clicks the explorer entry for `relative_path`.
    ///
    /// An intercepted click launches its program on the current Tokio
    /// runtime; called outside one, the launch is skipped.
    pub fn click(&self, relative_path: &str) -> ClickOutcome {
        let mut event = ClickEvent::on_explorer_file(relative_path);
        self.dispatch(&mut event)
    }

    /// Delivers an arbitrary click to every listener.
    pub fn dispatch(&self, event: &mut ClickEvent) -> ClickOutcome {
        self.services.clicks.dispatch(event);
        if event.default_prevented() {
            ClickOutcome::Intercepted
        } else {
            ClickOutcome::HandledByHost
        }
    }

    /// Files the host opened itself, in click order.
    pub fn host_opened(&self) -> Vec<String> {
        self.host_opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The plugin's settings form, while it is active.
    pub fn settings_panel(&self) -> Option<SettingsPanel> {
        self.plugin.settings_panel()
    }

    /// Waits for launches and other plugin tasks started so far.
    pub async fn wait_for_tasks(&self) {
        self.services.tasks.wait_all().await;
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
