//! External process launching.
//!
//! A launch is a single spawn of `program` with exactly one argument: the
//! absolute path of the clicked file.  Only the spawn itself is checked; what
//! the program does afterwards (including its exit status) is not tracked.
//!
//! # Testability
//!
//! The [`ProcessLauncher`] trait allows unit tests to record launches (see
//! [`mock::RecordingLauncher`]) without starting real processes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub mod mock;
pub mod process;

/// Error type for launch operations.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The operating system refused to start the program.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait abstracting process spawning.
///
/// The production implementation is [`process::SystemLauncher`].
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Starts `program` with `argument` as its only argument.
    async fn launch(&self, program: &Path, argument: &Path) -> Result<(), LaunchError>;
}
