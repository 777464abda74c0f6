//! `cfv-host`: a command-line stand-in for the note-taking application.
//!
//! Loads the custom file viewer plugin against a vault directory, then either
//! clicks one explorer entry or drives the settings panel.
//!
//! # Usage
//!
//! ```text
//! cfv-host [OPTIONS] <COMMAND>
//!
//! Commands:
//!   open <RELATIVE_PATH>        Click the explorer entry for a file
//!   settings show               Print the settings panel
//!   settings default-app <PATH>
//!   settings add-mapping
//!   settings rename <ROW> <EXTENSION>
//!   settings set-app <ROW> <PATH>
//!   settings remove <ROW>
//!   settings ignored <TEXT>
//!
//! Options:
//!   --config   <FILE>  Host configuration [default: platform config dir]
//!   --vault    <DIR>   Vault root            [env: CFV_VAULT]
//!   --data-dir <DIR>   Plugin data directory [env: CFV_DATA_DIR]
//! ```
//!
//! Rows are numbered as printed by `settings show`.  Logs go to stderr;
//! `RUST_LOG` overrides the level from the host configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cfv_plugin::infrastructure::host::{ClickOutcome, HostServices, PluginHost};
use cfv_plugin::infrastructure::storage::host_config::{
    config_file_path, load_host_config, HostConfig,
};
use cfv_plugin::infrastructure::vault::FsVault;
use cfv_plugin::plugin::CustomFileViewerPlugin;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Opens vault files in external programs chosen by extension.
#[derive(Debug, Parser)]
#[command(name = "cfv-host", version)]
struct Cli {
    /// Host configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Vault root directory.  Overrides `[vault] root`.
    #[arg(long, global = true, env = "CFV_VAULT")]
    vault: Option<PathBuf>,

    /// Directory holding the plugin's `data.json`.  Overrides `[plugin] data_dir`.
    #[arg(long, global = true, env = "CFV_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Click the explorer entry for a vault-relative file path.
    Open { relative_path: String },

    /// Show or edit the plugin settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    /// Print the settings panel.
    Show,
    /// Set the program used when no mapping matches.
    DefaultApp { path: String },
    /// Append an empty mapping row.
    AddMapping,
    /// Change the extension of a mapping row.
    Rename { row: usize, extension: String },
    /// Change the program of a mapping row.
    SetApp { row: usize, path: String },
    /// Remove a mapping row.
    Remove { row: usize },
    /// Replace the ignored extensions with a comma-separated list.
    Ignored { text: String },
}

impl Cli {
    /// Loads the host configuration and applies command-line overrides.
    fn host_config(&self) -> anyhow::Result<HostConfig> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => config_file_path().ok(),
        };
        let mut config = match path {
            Some(path) => load_host_config(&path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => HostConfig::default(),
        };

        if let Some(vault) = &self.vault {
            config.vault.root = vault.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.plugin.data_dir = Some(dir.clone());
        }
        config.vault.root = absolute(&config.vault.root)?;
        Ok(config)
    }
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot resolve the working directory")?;
    Ok(cwd.join(path))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.host_config()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(vault = %config.vault.root.display(), "cfv-host starting");

    let data_store = config.data_store();
    info!(data = %data_store.path().display(), "plugin data location");
    let services = HostServices::new(
        Arc::new(FsVault::new(config.vault.root.clone())),
        Arc::new(data_store),
    );
    let mut host = PluginHost::new(services, Box::new(CustomFileViewerPlugin::new()));
    host.activate().await?;

    let result = run(&host, cli.command).await;

    host.wait_for_tasks().await;
    host.deactivate();
    result
}

async fn run(host: &PluginHost, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Open { relative_path } => {
            match host.click(&relative_path) {
                ClickOutcome::Intercepted => {
                    println!("{relative_path}: opening in external program");
                }
                ClickOutcome::HandledByHost => {
                    println!("{relative_path}: left to the host");
                }
            }
            Ok(())
        }
        Command::Settings(command) => run_settings(host, command).await,
    }
}

async fn run_settings(host: &PluginHost, command: SettingsCommand) -> anyhow::Result<()> {
    let mut panel = host
        .settings_panel()
        .context("plugin is not active")?;
    panel.render();

    match command {
        SettingsCommand::Show => {}
        SettingsCommand::DefaultApp { path } => panel.set_default_app(&path).await?,
        SettingsCommand::AddMapping => {
            panel.add_mapping().await?;
        }
        SettingsCommand::Rename { row, extension } => {
            panel.rename_extension(row, &extension).await?;
        }
        SettingsCommand::SetApp { row, path } => panel.set_app_path(row, &path).await?,
        SettingsCommand::Remove { row } => {
            panel.remove_mapping(row).await?;
        }
        SettingsCommand::Ignored { text } => panel.set_ignored_text(&text).await?,
    }

    print!("{}", panel.render());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
