//! Process launcher backed by `tokio::process`.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{LaunchError, ProcessLauncher};

/// Spawns real programs, detached from the host's standard streams.
///
/// The child handle is dropped right after a successful spawn; the Tokio
/// runtime reaps the process in the background once it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

#[async_trait]
impl ProcessLauncher for SystemLauncher {
    async fn launch(&self, program: &Path, argument: &Path) -> Result<(), LaunchError> {
        let child = Command::new(program)
            .arg(argument)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;
        debug!(pid = ?child.id(), program = %program.display(), "external program started");
        Ok(())
    }
}
