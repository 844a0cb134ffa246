// src/request.rs
// =============================================================================
// The copy request: which directory of which repo goes where.
//
// Two command-line shapes produce a request:
//   copy <new-repo> <new-dir> <old-repo> <old-dir>   (Explicit)
//   copy <new-repo> <old-repo> <dir>                 (SameDir)
//
// The shape matters for the import rewrite. An explicit destination gets the
// full destination path as its new prefix, the same-dir shape only swaps the
// repo name in front of "internal".
// =============================================================================

use serde::Serialize;
use std::path::{Component, Path};

use crate::error::{CopyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestForm {
    SameDir,
    Explicit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyRequest {
    pub new_repo: String,
    pub new_dir: String,
    pub old_repo: String,
    pub old_dir: String,
    pub form: RequestForm,
}

impl CopyRequest {
    /// 4-arg form
    pub fn explicit(new_repo: &str, new_dir: &str, old_repo: &str, old_dir: &str) -> Result<Self> {
        Ok(CopyRequest {
            new_repo: check_repo(new_repo)?,
            new_dir: check_dir(new_dir)?,
            old_repo: check_repo(old_repo)?,
            old_dir: check_dir(old_dir)?,
            form: RequestForm::Explicit,
        })
    }

    /// 3-arg form: the same directory name on both sides
    pub fn same_dir(new_repo: &str, old_repo: &str, dir: &str) -> Result<Self> {
        let dir = check_dir(dir)?;
        Ok(CopyRequest {
            new_repo: check_repo(new_repo)?,
            new_dir: dir.clone(),
            old_repo: check_repo(old_repo)?,
            old_dir: dir,
            form: RequestForm::SameDir,
        })
    }

    /// Builds a request from positional arguments, picking the form by count
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [new_repo, old_repo, dir] => Self::same_dir(new_repo, old_repo, dir),
            [new_repo, new_dir, old_repo, old_dir] => {
                Self::explicit(new_repo, new_dir, old_repo, old_dir)
            }
            _ => Err(CopyError::InvalidRequest(format!(
                "expected 3 or 4 arguments, got {}",
                args.len()
            ))),
        }
    }

    /// Import prefix that marks internal packages of the source repo,
    /// e.g. golang.org/x/pkgsite/internal
    pub fn old_internal_prefix(&self, module_prefix: &str) -> String {
        format!("{}/{}/internal", module_prefix, self.old_repo)
    }

    /// What the old internal prefix becomes in the destination repo
    pub fn new_import_prefix(&self, module_prefix: &str) -> String {
        match self.form {
            RequestForm::Explicit => format!("{}/{}/{}", module_prefix, self.new_repo, self.new_dir),
            RequestForm::SameDir => format!("{}/{}/internal", module_prefix, self.new_repo),
        }
    }
}

fn check_repo(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() || name.contains('/') || name == "." || name == ".." {
        return Err(CopyError::InvalidRequest(format!(
            "{:?} is not a repository name",
            name
        )));
    }
    Ok(name.to_string())
}

// Directories are repo-relative, slash-separated and may not climb out of the repo.
fn check_dir(dir: &str) -> Result<String> {
    let dir = dir.trim().trim_end_matches('/');
    if dir.is_empty() {
        return Err(CopyError::InvalidRequest("directory must not be empty".to_string()));
    }
    let escapes = Path::new(dir)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(CopyError::InvalidRequest(format!(
            "{:?} must be a relative path inside the repository",
            dir
        )));
    }
    Ok(dir.trim_start_matches("./").to_string())
}
