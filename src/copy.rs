// src/copy.rs
// =============================================================================
// Runs one copy from start to finish.
//
// What happens here:
// 1. Probe the source directory on the remote (nothing is touched on 404)
// 2. Clone the source repo into a scratch workspace
// 3. Copy the requested directory into the destination tree
// 4. Resolve the branch tip commit for the provenance header
// 5. Rewrite imports and prepend the header in every source file
//
// The scratch workspace lives in this function's scope, so it is removed on
// every way out of it, including the `?` returns.
// =============================================================================

use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;

use crate::annotate::{self, FileReport, ImportRewrite, ProvenanceHeader};
use crate::config::Settings;
use crate::error::Result;
use crate::fetch::{self, ScratchWorkspace};
use crate::remote::{self, RepoRef};
use crate::request::CopyRequest;
use crate::validate;

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct CopyReport {
    pub request: CopyRequest,
    pub source: RepoRef,
    pub destination: PathBuf,
    pub commit: String,
    pub source_url: String,
    pub old_prefix: String,
    pub new_prefix: String,
    pub files: Vec<FileReport>,
    /// Internal packages of the source repo the copied code still imports
    pub internal_packages: BTreeSet<String>,
}

impl CopyReport {
    pub fn rewritten_lines(&self) -> usize {
        self.files.iter().map(|f| f.rewritten_lines).sum()
    }
}

/// Copies `request.old_dir` of `request.old_repo` into
/// `settings.dest_root/request.new_dir` and annotates it
pub async fn run(settings: &Settings, request: &CopyRequest) -> Result<CopyReport> {
    run_with_client(&Client::new(), settings, request).await
}

/// Same as [`run`] with a caller-provided HTTP client
pub async fn run_with_client(
    client: &Client,
    settings: &Settings,
    request: &CopyRequest,
) -> Result<CopyReport> {
    let source = RepoRef::new(&settings.git_base, &request.old_repo);
    let destination = settings.dest_root.join(&request.new_dir);

    // 1. Validate
    let head_url = remote::directory_head_url(
        &settings.browse_base,
        &request.old_repo,
        &settings.branch,
        &request.old_dir,
    );
    validate::probe_directory(client, &head_url).await?;
    fetch::ensure_destination_free(&destination)?;

    // 2-3. Fetch and copy
    let workspace = ScratchWorkspace::create()?;
    workspace.clone_repo(&source, &settings.branch).await?;
    fetch::copy_directory(&workspace.join(&request.old_dir), &destination).await?;

    // 4. Resolve commit
    let commit = remote::resolve_branch_tip(&source, &settings.branch).await?;
    info!("{} is at {}", source.remote_url, commit);

    // 5. Annotate
    let source_url = remote::directory_commit_url(
        &settings.browse_base,
        &request.old_repo,
        &commit,
        &request.old_dir,
    );
    let header = ProvenanceHeader::new(source_url.clone());
    let rewrite = ImportRewrite::new(
        request.old_internal_prefix(&settings.module_prefix),
        request.new_import_prefix(&settings.module_prefix),
    );
    let annotated = annotate::annotate_tree(
        &destination,
        |ext| settings.is_source_extension(ext),
        &rewrite,
        &header,
    )?;

    info!(
        files = annotated.files.len(),
        rewritten = annotated.rewritten_lines(),
        "Annotated {}",
        destination.display()
    );
    for pkg in &annotated.internal_packages {
        info!("References internal package {}", pkg);
    }

    drop(workspace);

    Ok(CopyReport {
        request: request.clone(),
        source,
        destination,
        commit,
        source_url: source_url.to_string(),
        old_prefix: rewrite.old_prefix().to_string(),
        new_prefix: rewrite.new_prefix().to_string(),
        files: annotated.files,
        internal_packages: annotated.internal_packages,
    })
}
