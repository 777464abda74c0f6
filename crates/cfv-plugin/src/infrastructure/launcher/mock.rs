//! Recording launcher for unit and integration tests.
//!
//! Records every launch request without starting a process, and can be told
//! to fail so the launch-failure path can be exercised.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{LaunchError, ProcessLauncher};

/// One recorded call to [`ProcessLauncher::launch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCall {
    pub program: PathBuf,
    pub argument: PathBuf,
}

/// A [`ProcessLauncher`] that records calls instead of spawning.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    calls: Mutex<Vec<LaunchCall>>,
    failure: Option<(io::ErrorKind, String)>,
}

impl RecordingLauncher {
    /// A launcher whose launches all succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A launcher whose launches all fail with an I/O error of `kind`.
    pub fn failing(kind: io::ErrorKind, message: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some((kind, message.into())),
        }
    }

    /// Every launch attempted so far, oldest first.
    pub fn calls(&self) -> Vec<LaunchCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ProcessLauncher for RecordingLauncher {
    async fn launch(&self, program: &Path, argument: &Path) -> Result<(), LaunchError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LaunchCall {
                program: program.to_path_buf(),
                argument: argument.to_path_buf(),
            });
        match &self.failure {
            Some((kind, message)) => Err(LaunchError::Spawn {
                program: program.to_path_buf(),
                source: io::Error::new(*kind, message.clone()),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_launcher_records_program_and_argument() {
        // Arrange
        let launcher = RecordingLauncher::new();

        // Act
        let result = tokio_test::block_on(
            launcher.launch(Path::new("/usr/bin/code"), Path::new("/vault/a.py")),
        );

        // Assert
        assert!(result.is_ok());
        assert_eq!(
            launcher.calls(),
            vec![LaunchCall {
                program: PathBuf::from("/usr/bin/code"),
                argument: PathBuf::from("/vault/a.py"),
            }]
        );
    }

    #[test]
    fn test_failing_launcher_records_and_returns_error() {
        let launcher = RecordingLauncher::failing(io::ErrorKind::PermissionDenied, "denied");

        let result = tokio_test::block_on(launcher.launch(Path::new("/x"), Path::new("/y")));

        let err = result.expect_err("configured to fail");
        assert!(err.to_string().contains("denied"));
        assert_eq!(launcher.calls().len(), 1);
    }
}
