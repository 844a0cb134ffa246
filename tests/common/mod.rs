//! Shared fixtures: a local git repository standing in for the remote
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub const FETCH_GO: &str = "package fetch

import (
\t\"context\"

\t\"golang.org/x/pkgsite/internal/derrors\"
\tmw \"golang.org/x/pkgsite/internal/middleware\"
)

// See golang.org/x/pkgsite/internal/derrors for error kinds.
func Fetch(ctx context.Context) error { return nil }
";

pub const DOC_GO: &str = "// Package fetch fetches modules.
package fetch
";

pub const NOTES_TXT: &str = "golang.org/x/pkgsite/internal/derrors is not Go code\n";

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "init.defaultBranch=master",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git runs");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Creates `<root>/pkgsite` with internal/fetch and returns the full head hash
pub fn init_pkgsite(root: &Path) -> String {
    let repo = root.join("pkgsite");
    std::fs::create_dir_all(repo.join("internal/fetch/testdata")).unwrap();
    std::fs::write(repo.join("internal/fetch/fetch.go"), FETCH_GO).unwrap();
    std::fs::write(repo.join("internal/fetch/doc.go"), DOC_GO).unwrap();
    std::fs::write(repo.join("internal/fetch/testdata/notes.txt"), NOTES_TXT).unwrap();
    std::fs::write(repo.join("go.mod"), "module golang.org/x/pkgsite\n").unwrap();

    git(&repo, &["init", "--quiet"]);
    git(&repo, &["add", "."]);
    git(&repo, &["commit", "--quiet", "-m", "initial"]);
    git(&repo, &["branch", "-M", "master"]);
    git(&repo, &["rev-parse", "HEAD"])
}

/// A remotes directory holding pkgsite, plus the head hash
pub fn remotes() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let head = init_pkgsite(dir.path());
    (dir, head)
}
