// src/fetch/scratch.rs
// =============================================================================
// Clones the source repo into a scratch directory and copies one directory
// out of it.
//
// The scratch directory is a tempfile::TempDir. It is removed when the
// ScratchWorkspace is dropped, which happens on every exit path of the run:
// success, an early `?` return, or a panic unwinding through it.
// =============================================================================

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

use crate::error::{CopyError, Result};
use crate::process;
use crate::remote::RepoRef;

/// A temporary directory holding a full clone, owned by one run
#[derive(Debug)]
pub struct ScratchWorkspace {
    dir: TempDir,
}

impl ScratchWorkspace {
    /// Creates an empty scratch directory under the system temp dir
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("go_")
            .tempdir()
            .map_err(|e| CopyError::io(std::env::temp_dir(), e))?;
        debug!("Scratch workspace at {}", dir.path().display());
        Ok(ScratchWorkspace { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a repo-relative directory inside the clone
    pub fn join(&self, dir: &str) -> PathBuf {
        self.dir.path().join(dir)
    }

    /// Clones `repo` at `branch` into the workspace
    pub async fn clone_repo(&self, repo: &RepoRef, branch: &str) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("clone")
            .args(["--branch", branch])
            .arg(&repo.remote_url)
            .arg(self.path());
        process::run(&mut cmd).await?;
        Ok(())
    }
}

/// Fails if `dest` exists, so `cp -r` never nests the copy inside it
pub fn ensure_destination_free(dest: &Path) -> Result<()> {
    if dest.exists() {
        return Err(CopyError::DestinationExists(dest.to_path_buf()));
    }
    Ok(())
}

/// Recursively copies `from` to `dest` with `cp -r`, creating parents of `dest`
pub async fn copy_directory(from: &Path, dest: &Path) -> Result<()> {
    ensure_destination_free(dest)?;
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CopyError::io(parent, e))?;
    }

    let mut cmd = Command::new("cp");
    cmd.arg("-r").arg(from).arg(dest);
    process::run(&mut cmd).await?;
    Ok(())
}
