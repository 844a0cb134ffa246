// src/error.rs
// =============================================================================
// All the ways a copy run can fail.
//
// Every step of the run returns Result<T, CopyError>. Nothing inside the
// library exits the process: main.rs decides the exit code from the variant.
//
// Rust concepts:
// - thiserror: derives Display and Error for our enum
// - #[source]: keeps the underlying error so the chain can be printed
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopyError {
    /// The source directory could not be found on the remote
    #[error("{url} not found: {reason}")]
    NotFound { url: String, reason: String },

    /// git clone or cp exited non-zero (or could not be spawned)
    #[error("`{command}` failed: {stderr}")]
    ExternalCommand { command: String, stderr: String },

    /// Reading, writing, renaming or walking a file failed
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The branch tip could not be resolved. Treated as fatal by the binary.
    #[error("resolving branch tip of {remote}: {reason}")]
    RemoteQuery { remote: String, reason: String },

    #[error("destination {} already exists", .0.display())]
    DestinationExists(PathBuf),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

impl CopyError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CopyError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures that should end the process with the fatal exit code
    pub fn is_fatal(&self) -> bool {
        matches!(self, CopyError::RemoteQuery { .. })
    }
}

pub type Result<T> = std::result::Result<T, CopyError>;
