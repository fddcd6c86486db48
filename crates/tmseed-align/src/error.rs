//! Error types for alignment runs

use std::path::PathBuf;
use thiserror::Error;
use tmseed_formats::bsa::BsaError;

/// Alignment result type
pub type Result<T> = std::result::Result<T, AlignError>;

/// Errors that abort an alignment run
///
/// Problems local to one file pair (unreadable file, compressed entry) are
/// logged and skipped by the aligner and never surface here.
#[derive(Debug, Error)]
pub enum AlignError {
    /// Input path does not exist
    #[error("Missing input: {0}")]
    MissingInput(PathBuf),

    /// Archive could not be opened or indexed
    #[error("Archive error: {0}")]
    Archive(#[from] BsaError),

    /// Directory walk failed
    #[error("Failed to walk {root}: {source}")]
    Walk {
        /// Root being walked
        root: PathBuf,
        /// Underlying walk error
        #[source]
        source: walkdir::Error,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON in a configuration file
    #[error("Invalid configuration JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Source/target combination with no matching strategy
    #[error("Unsupported source pairing: {source_kind} -> {target_kind}")]
    UnsupportedPairing {
        /// Kind of the source side
        source_kind: &'static str,
        /// Kind of the target side
        target_kind: &'static str,
    },
}
