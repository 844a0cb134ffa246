// src/fetch/mod.rs
// =============================================================================
// This module gets the source directory onto local disk.
//
// Currently implements:
// - A scratch workspace that cleans itself up
// - git clone of the source repo into it
// - cp -r of the requested directory into the destination tree
// =============================================================================

mod scratch;

pub use scratch::{copy_directory, ensure_destination_free, ScratchWorkspace};
