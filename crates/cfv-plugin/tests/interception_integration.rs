//! Integration tests for click interception.
//!
//! These tests drive a full `PluginHost` with the custom file viewer plugin
//! loaded: stored settings on disk, the document click signal, the host's own
//! bubble-phase handling, and recording launcher/notifier doubles.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cfv_plugin::infrastructure::explorer::{ClickEvent, Element};
use cfv_plugin::infrastructure::host::{ClickOutcome, HostServices, PluginHost};
use cfv_plugin::infrastructure::launcher::mock::{LaunchCall, RecordingLauncher};
use cfv_plugin::infrastructure::launcher::process::SystemLauncher;
use cfv_plugin::infrastructure::launcher::ProcessLauncher;
use cfv_plugin::infrastructure::notice::{Notifier, RecordingNotifier};
use cfv_plugin::infrastructure::storage::{JsonFileStore, PluginDataStore};
use cfv_plugin::infrastructure::vault::FsVault;
use cfv_plugin::plugin::CustomFileViewerPlugin;
use serde_json::{json, Value};
use uuid::Uuid;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct TestVault {
    root: PathBuf,
}

impl TestVault {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("cfv_it_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("create vault dir");
        Self { root }
    }

    async fn with_settings(data: Value) -> Self {
        let vault = Self::new();
        vault.store().save_data(&data).await.expect("seed data.json");
        vault
    }

    fn store(&self) -> JsonFileStore {
        JsonFileStore::for_plugin(&self.root, "custom-file-viewer")
    }
}

impl Drop for TestVault {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.root).ok();
    }
}

struct Harness {
    host: PluginHost,
    launcher: Arc<RecordingLauncher>,
    notifier: Arc<RecordingNotifier>,
}

async fn activated_host(vault: &TestVault, launcher: RecordingLauncher) -> Harness {
    let launcher = Arc::new(launcher);
    let notifier = Arc::new(RecordingNotifier::new());
    let services = HostServices::new(
        Arc::new(FsVault::new(vault.root.clone())),
        Arc::new(vault.store()),
    )
    .with_launcher(Arc::clone(&launcher) as Arc<dyn ProcessLauncher>)
    .with_notifier(Arc::clone(&notifier) as Arc<dyn Notifier>);

    let mut host = PluginHost::new(services, Box::new(CustomFileViewerPlugin::new()));
    host.activate().await.expect("activate");
    Harness {
        host,
        launcher,
        notifier,
    }
}

fn scenario_settings() -> Value {
    json!({
        "appMap": { "py": "/usr/bin/code" },
        "defaultApp": "",
        "ignoredExtensions": ["md"]
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_mapped_extension_opens_in_external_program() {
    // Arrange
    let vault = TestVault::with_settings(scenario_settings()).await;
    let h = activated_host(&vault, RecordingLauncher::new()).await;

    // Act
    let outcome = h.host.click("notes/script.py");
    h.host.wait_for_tasks().await;

    // Assert
    assert_eq!(outcome, ClickOutcome::Intercepted);
    assert!(h.host.host_opened().is_empty(), "host must not also open the file");
    assert_eq!(
        h.launcher.calls(),
        vec![LaunchCall {
            program: PathBuf::from("/usr/bin/code"),
            argument: vault.root.join("notes").join("script.py"),
        }]
    );
    assert!(h.notifier.notices().is_empty());
}

#[tokio::test]
async fn test_ignored_and_unmapped_files_stay_with_host() {
    let vault = TestVault::with_settings(scenario_settings()).await;
    let h = activated_host(&vault, RecordingLauncher::new()).await;

    assert_eq!(h.host.click("notes/readme.md"), ClickOutcome::HandledByHost);
    assert_eq!(h.host.click("notes/data.csv"), ClickOutcome::HandledByHost);
    h.host.wait_for_tasks().await;

    assert_eq!(
        h.host.host_opened(),
        vec!["notes/readme.md".to_string(), "notes/data.csv".to_string()]
    );
    assert!(h.launcher.calls().is_empty());
}

#[tokio::test]
async fn test_uppercase_extension_matches_lowercase_mapping() {
    let vault = TestVault::with_settings(scenario_settings()).await;
    let h = activated_host(&vault, RecordingLauncher::new()).await;

    assert_eq!(h.host.click("Scripts/MAIN.PY"), ClickOutcome::Intercepted);
    h.host.wait_for_tasks().await;

    assert_eq!(h.launcher.calls().len(), 1);
}

#[tokio::test]
async fn test_default_app_catches_unmapped_extensions() {
    let vault = TestVault::with_settings(json!({ "defaultApp": "/usr/bin/xdg-open" })).await;
    let h = activated_host(&vault, RecordingLauncher::new()).await;

    assert_eq!(h.host.click("docs/report.docx"), ClickOutcome::Intercepted);
    assert_eq!(h.host.click("docs/index.md"), ClickOutcome::HandledByHost);
    h.host.wait_for_tasks().await;

    assert_eq!(h.launcher.calls()[0].program, Path::new("/usr/bin/xdg-open"));
}

#[tokio::test]
async fn test_file_without_extension_stays_with_host() {
    let vault = TestVault::with_settings(json!({ "defaultApp": "/usr/bin/xdg-open" })).await;
    let h = activated_host(&vault, RecordingLauncher::new()).await;

    assert_eq!(h.host.click("Makefile"), ClickOutcome::HandledByHost);
    assert_eq!(h.host.click(".gitignore"), ClickOutcome::HandledByHost);
}

#[tokio::test]
async fn test_click_outside_explorer_entry_is_not_intercepted() {
    let vault = TestVault::with_settings(json!({ "defaultApp": "/usr/bin/xdg-open" })).await;
    let h = activated_host(&vault, RecordingLauncher::new()).await;
    let mut event = ClickEvent::new(vec![
        Element::new("span").with_class("nav-folder-title-content"),
        Element::new("div").with_class("nav-folder-title"),
    ]);

    let outcome = h.host.dispatch(&mut event);

    assert_eq!(outcome, ClickOutcome::HandledByHost);
    assert!(!event.default_prevented());
    assert!(h.launcher.calls().is_empty());
}

#[tokio::test]
async fn test_launch_failure_raises_single_notice() {
    // Arrange
    let vault = TestVault::with_settings(scenario_settings()).await;
    let h = activated_host(
        &vault,
        RecordingLauncher::failing(std::io::ErrorKind::PermissionDenied, "Permission denied"),
    )
    .await;

    // Act
    let outcome = h.host.click("notes/script.py");
    h.host.wait_for_tasks().await;

    // Assert
    assert_eq!(outcome, ClickOutcome::Intercepted);
    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("notes/script.py"));
    assert!(notices[0].message.contains("Permission denied"));
}

#[tokio::test]
async fn test_missing_program_reports_notice_through_real_launcher() {
    // Arrange
    let vault = TestVault::with_settings(json!({
        "appMap": { "py": "/definitely/not/a/real/program" }
    }))
    .await;
    let notifier = Arc::new(RecordingNotifier::new());
    let services = HostServices::new(
        Arc::new(FsVault::new(vault.root.clone())),
        Arc::new(vault.store()),
    )
    .with_launcher(Arc::new(SystemLauncher))
    .with_notifier(Arc::clone(&notifier) as Arc<dyn Notifier>);
    let mut host = PluginHost::new(services, Box::new(CustomFileViewerPlugin::new()));
    host.activate().await.expect("activate");

    // Act
    host.click("a.py");
    host.wait_for_tasks().await;

    // Assert
    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.starts_with("Failed to open a.py: "));
}

#[tokio::test]
async fn test_each_click_launches_independently() {
    let vault = TestVault::with_settings(scenario_settings()).await;
    let h = activated_host(&vault, RecordingLauncher::new()).await;

    for _ in 0..5 {
        h.host.click("notes/script.py");
    }
    h.host.wait_for_tasks().await;

    assert_eq!(h.launcher.calls().len(), 5);
}

#[tokio::test]
async fn test_deactivated_plugin_no_longer_intercepts() {
    // Arrange
    let vault = TestVault::with_settings(scenario_settings()).await;
    let mut h = activated_host(&vault, RecordingLauncher::new()).await;

    // Act
    h.host.deactivate();
    let outcome = h.host.click("notes/script.py");

    // Assert
    assert_eq!(outcome, ClickOutcome::HandledByHost);
    assert!(h.launcher.calls().is_empty());
}

#[tokio::test]
async fn test_first_activation_without_data_uses_defaults() {
    let vault = TestVault::new();
    let h = activated_host(&vault, RecordingLauncher::new()).await;

    // No mappings and no default app: nothing is intercepted.
    assert_eq!(h.host.click("notes/script.py"), ClickOutcome::HandledByHost);
    assert!(!vault.store().path().exists(), "activation must not write data");
}

#[tokio::test]
async fn test_corrupt_data_file_falls_back_to_defaults() {
    let vault = TestVault::new();
    let path = vault.store().path().to_path_buf();
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, "{ not json").expect("write");

    let h = activated_host(&vault, RecordingLauncher::new()).await;

    assert!(h.host.is_active());
    assert_eq!(h.host.click("notes/script.py"), ClickOutcome::HandledByHost);
}
