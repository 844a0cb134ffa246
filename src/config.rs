// src/config.rs
// =============================================================================
// Run configuration.
//
// Everything the run needs to know about the outside world lives here:
// where the remotes are, what the import paths look like, which files count
// as source code and where the destination tree is. The CLI builds one of
// these once; nothing below it looks at the current directory or the
// environment again.
// =============================================================================

use std::path::PathBuf;
use url::Url;

use crate::error::{CopyError, Result};

pub const DEFAULT_HOST: &str = "https://go.googlesource.com";
pub const DEFAULT_MODULE_PREFIX: &str = "golang.org/x";
pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_EXTENSIONS: &[&str] = &["go"];

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base for `git clone` and `git ls-remote`. May be a local path in tests.
    pub git_base: String,
    /// Base for the existence probe and the provenance link
    pub browse_base: Url,
    /// Import path prefix shared by all repos, e.g. golang.org/x
    pub module_prefix: String,
    /// Branch whose tip is probed and stamped
    pub branch: String,
    /// File extensions (without the dot) that get annotated
    pub extensions: Vec<String>,
    /// Directory the destination path is relative to
    pub dest_root: PathBuf,
}

impl Settings {
    /// Settings with every default, rooted at `dest_root`
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Settings {
            git_base: DEFAULT_HOST.to_string(),
            browse_base: Url::parse(DEFAULT_HOST).expect("default host is a valid URL"),
            module_prefix: DEFAULT_MODULE_PREFIX.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            dest_root: dest_root.into(),
        }
    }

    /// Sets the git base. Anything with a `://` scheme separator must parse as
    /// a URL that can carry a path; other values are taken as local paths.
    pub fn with_git_base(mut self, git_base: &str) -> Result<Self> {
        let trimmed = git_base.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(CopyError::InvalidRequest("git base must not be empty".to_string()));
        }
        if trimmed.contains("://") {
            let url = Url::parse(trimmed).map_err(|source| CopyError::InvalidUrl {
                input: git_base.to_string(),
                source,
            })?;
            if url.cannot_be_a_base() {
                return Err(CopyError::InvalidRequest(format!(
                    "{} cannot be used as a base URL",
                    git_base
                )));
            }
        }
        self.git_base = trimmed.to_string();
        Ok(self)
    }

    /// Parses and sets the browse base. Rejects URLs that cannot carry a path.
    pub fn with_browse_base(mut self, browse_base: &str) -> Result<Self> {
        let url = Url::parse(browse_base).map_err(|source| CopyError::InvalidUrl {
            input: browse_base.to_string(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(CopyError::InvalidRequest(format!(
                "{} cannot be used as a base URL",
                browse_base
            )));
        }
        self.browse_base = url;
        Ok(self)
    }

    pub fn with_module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.module_prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Replaces the recognized extensions. A leading dot is accepted and dropped.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Whether a file with this extension gets annotated
    pub fn is_source_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}
