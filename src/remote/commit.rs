// src/remote/commit.rs
// =============================================================================
// Resolves the commit at the tip of a branch on the remote.
//
// `git ls-remote <remote> refs/heads/<branch>` prints one line per matching
// ref:
//   <40-hex-hash>\trefs/heads/master
// The short commit is the first 8 characters of that hash.
//
// Any failure here is a RemoteQuery error. The binary treats it as fatal,
// but it is still returned normally so the scratch clone gets removed.
// =============================================================================

use tokio::process::Command;

use super::urls::RepoRef;
use crate::error::{CopyError, Result};
use crate::process;

pub const SHORT_COMMIT_LEN: usize = 8;

/// Returns the short (8 character) hash of the tip of `branch`
pub async fn resolve_branch_tip(repo: &RepoRef, branch: &str) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.arg("ls-remote")
        .arg(&repo.remote_url)
        .arg(format!("refs/heads/{}", branch));

    let output = process::run(&mut cmd).await.map_err(|e| CopyError::RemoteQuery {
        remote: repo.remote_url.clone(),
        reason: e.to_string(),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_short_commit(&stdout).map_err(|reason| CopyError::RemoteQuery {
        remote: repo.remote_url.clone(),
        reason,
    })
}

/// Pulls the short commit out of ls-remote output.
/// Expects exactly two fields on the first line, the first being a hex hash.
fn parse_short_commit(output: &str) -> std::result::Result<String, String> {
    let first = output
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| "branch not found on remote (empty ls-remote output)".to_string())?;

    let fields: Vec<&str> = first.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(format!("unexpected output: {:?}", output));
    }

    let hash = fields[0];
    if hash.len() < SHORT_COMMIT_LEN || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("unexpected hash {:?}", hash));
    }

    Ok(hash[..SHORT_COMMIT_LEN].to_string())
}
