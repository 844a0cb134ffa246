// src/remote/mod.rs
// =============================================================================
// Everything about the source remote: where it lives, what its URLs look
// like, and which commit its branch currently points at.
// =============================================================================

mod commit;
mod urls;

pub use commit::{resolve_branch_tip, SHORT_COMMIT_LEN};
pub use urls::{directory_commit_url, directory_head_url, repo_browse_url, RepoRef};
