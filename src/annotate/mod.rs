// src/annotate/mod.rs
// =============================================================================
// This module edits the copied source files.
//
// Submodules:
// - rewrite: the provenance header and the import-prefix substitution
// - edit: applies them to files on disk, one atomic rename per file
// =============================================================================

mod edit;
mod rewrite;

pub use edit::{annotate_tree, edit_file, AnnotateReport, FileReport};
pub use rewrite::{ImportRewrite, ProvenanceHeader};
