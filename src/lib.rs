//! repo-copy: vendor a directory of one Go repository into another.
//!
//! The run is strictly linear: probe the source directory, clone and copy it,
//! resolve the source commit, then rewrite internal imports and stamp every
//! copied file with a provenance header. See [`copy::run`].

pub mod annotate;
pub mod config;
pub mod copy;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod process;
pub mod remote;
pub mod request;
pub mod validate;

pub use config::Settings;
pub use copy::{run, CopyReport};
pub use error::{CopyError, Result};
pub use request::{CopyRequest, RequestForm};
