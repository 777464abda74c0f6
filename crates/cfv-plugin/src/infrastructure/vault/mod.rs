//! Vault adapter: where the managed file collection lives on disk.
//!
//! Explorer entries carry paths relative to the vault root with `/`
//! separators.  Launching an external program needs the absolute path, so
//! the root is joined with each relative component in turn, which yields the
//! native separator on every platform.

use std::path::{Path, PathBuf};

/// Host facility exposing the vault's absolute root directory.
pub trait VaultAdapter: Send + Sync {
    /// Absolute root directory, or `None` when the vault is not backed by a
    /// local directory.
    fn base_path(&self) -> Option<PathBuf>;
}

/// A vault rooted at a directory on the local file system.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl VaultAdapter for FsVault {
    fn base_path(&self) -> Option<PathBuf> {
        Some(self.root.clone())
    }
}

/// Joins a vault-relative path onto `root`.
///
/// Empty and `.` components are skipped; `..` pops one level.
pub fn join_vault_path(root: &Path, relative: &str) -> PathBuf {
    let mut full = root.to_path_buf();
    for component in relative.split(['/', '\\']) {
        match component {
            "" | "." => {}
            ".." => {
                full.pop();
            }
            name => full.push(name),
        }
    }
    full
}
