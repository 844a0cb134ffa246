// src/remote/urls.rs
// =============================================================================
// Builds every URL the tool talks to.
//
// A Gitiles-style host (like go.googlesource.com) serves the git remote and
// a browsable view from the same base:
//   <base>/<repo>                              git remote
//   <base>/<repo>/+/refs/heads/<branch>/<dir>  directory at the branch tip
//   <base>/<repo>/+/<commit>/<dir>             directory at a fixed commit
//
// The git base and the browse base are configured separately so a local
// repository can stand in for the remote.
// =============================================================================

use serde::Serialize;
use url::Url;

/// A repository by name, with the remote it is cloned from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    pub name: String,
    pub remote_url: String,
}

impl RepoRef {
    pub fn new(git_base: &str, name: &str) -> Self {
        RepoRef {
            name: name.to_string(),
            remote_url: format!("{}/{}", git_base.trim_end_matches('/'), name),
        }
    }
}

/// <base>/<repo>
pub fn repo_browse_url(browse_base: &Url, repo: &str) -> Url {
    with_segments(browse_base, &[repo])
}

/// URL probed to check that <dir> exists at the tip of <branch>
pub fn directory_head_url(browse_base: &Url, repo: &str, branch: &str, dir: &str) -> Url {
    let mut segments = vec!["+", "refs", "heads"];
    segments.extend(branch.split('/'));
    segments.extend(dir.split('/'));
    with_segments(&repo_browse_url(browse_base, repo), &segments)
}

/// URL of <dir> at an exact commit, written into the provenance header
pub fn directory_commit_url(browse_base: &Url, repo: &str, commit: &str, dir: &str) -> Url {
    let mut segments = vec!["+", commit];
    segments.extend(dir.split('/'));
    with_segments(&repo_browse_url(browse_base, repo), &segments)
}

fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Settings rejects cannot-be-a-base URLs, so this only fails for
    // hand-built values; those are returned unchanged.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        path.extend(segments.iter().filter(|s| !s.is_empty()));
    }
    url
}
