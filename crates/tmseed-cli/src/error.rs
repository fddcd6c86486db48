//! Error types for the `tmseed` front end.

use std::path::PathBuf;
use thiserror::Error;
use tmseed_align::AlignError;

/// Result alias for command execution.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that stop a run before output is written.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input named on the command line does not exist
    #[error("missing {flag}: {}", .path.display())]
    MissingInput {
        /// Flag the path was given with
        flag: &'static str,
        /// Path that was not found
        path: PathBuf,
    },

    /// Alignment or output failed
    #[error(transparent)]
    Align(#[from] AlignError),
}
