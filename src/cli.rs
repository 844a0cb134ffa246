// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two positional shapes are accepted:
//   copy <new-repo> <new-dir> <old-repo> <old-dir>
//   copy <new-repo> <old-repo> <dir>
// clap enforces the count (3 or 4) and prints usage otherwise. Everything
// else is an option with a default, and each option can also come from a
// REPO_COPY_* environment variable.
//
// This is the only place that looks at the process's current directory:
// it becomes the default destination root and is passed down explicitly.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use repo_copy::config::{Settings, DEFAULT_BRANCH, DEFAULT_HOST, DEFAULT_MODULE_PREFIX};
use repo_copy::error::{CopyError, Result};
use repo_copy::request::CopyRequest;

#[derive(Parser, Debug)]
#[command(
    name = "copy",
    version,
    about = "Copy a package inside a Go repo into another repo",
    long_about = "copy clones a Go repository, copies one of its directories into the current repo, \
                  rewrites imports of the source repo's internal packages and marks every copied \
                  file with the commit it came from.",
    override_usage = "copy [OPTIONS] <NEW_REPO> <NEW_DIR> <OLD_REPO> <OLD_DIR>\n       \
                      copy [OPTIONS] <NEW_REPO> <OLD_REPO> <DIR>"
)]
pub struct Cli {
    /// Repos and directories, in one of two shapes:
    ///
    ///   new-repo new-dir old-repo old-dir
    ///   new-repo old-repo dir
    ///
    ///   new-repo: name of the repo to copy into, for example, metrics
    ///   new-dir:  directory to create in it, for example, internal/pkgsite
    ///   old-repo: name of the repo to copy from, for example, pkgsite
    ///   old-dir:  directory inside old-repo to copy, for example, internal/fetch
    ///   dir:      the same directory on both sides, for example, internal/fetch
    #[arg(num_args = 3..=4, required = true, value_name = "ARGS", verbatim_doc_comment)]
    pub args: Vec<String>,

    /// Directory the new-dir path is relative to (default: current directory)
    #[arg(long, env = "REPO_COPY_DEST_ROOT")]
    pub dest_root: Option<PathBuf>,

    /// Base URL of the git remotes (a local path also works)
    #[arg(long, env = "REPO_COPY_GIT_BASE", default_value = DEFAULT_HOST)]
    pub git_base: String,

    /// Base URL used for the existence probe and the provenance link
    #[arg(long, env = "REPO_COPY_BROWSE_BASE", default_value = DEFAULT_HOST)]
    pub browse_base: String,

    /// Import path prefix shared by the repos
    #[arg(long, env = "REPO_COPY_MODULE_PREFIX", default_value = DEFAULT_MODULE_PREFIX)]
    pub module_prefix: String,

    /// Branch to probe, clone and stamp
    #[arg(long, env = "REPO_COPY_BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// File extension to annotate; repeat or comma-separate for several
    #[arg(
        long = "ext",
        env = "REPO_COPY_EXTENSIONS",
        value_delimiter = ',',
        default_value = "go"
    )]
    pub extensions: Vec<String>,

    /// Print the run report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn request(&self) -> Result<CopyRequest> {
        CopyRequest::from_args(&self.args)
    }

    pub fn settings(&self) -> Result<Settings> {
        let dest_root = match &self.dest_root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(|e| CopyError::io(".", e))?,
        };

        Ok(Settings::new(dest_root)
            .with_git_base(&self.git_base)?
            .with_browse_base(&self.browse_base)?
            .with_module_prefix(self.module_prefix.as_str())
            .with_branch(self.branch.as_str())
            .with_extensions(&self.extensions))
    }
}
