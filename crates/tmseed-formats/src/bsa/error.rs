//! Error types for BSA archive operations

use thiserror::Error;

/// BSA operation result type
pub type Result<T> = std::result::Result<T, BsaError>;

/// Errors raised while indexing or reading a BSA archive
#[derive(Debug, Error)]
pub enum BsaError {
    /// Magic tag is not `BSA\0`
    #[error("Invalid magic: expected 'BSA\\0', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Version other than 104 or 105
    #[error("Unsupported BSA version: {0}")]
    UnsupportedVersion(u32),

    /// Archive flags lack the folder-name bit
    #[error("Archive has no folder names (archive flags 0x{0:x})")]
    MissingFolderNames(u32),

    /// Archive flags lack the file-name bit
    #[error("Archive has no file name block (archive flags 0x{0:x})")]
    MissingFileNames(u32),

    /// Name block and file records disagree with the header
    #[error("Bad BSA index: file_count={expected} names={names} records={records}")]
    FileCountMismatch {
        /// File count declared in the header
        expected: u32,
        /// Names extracted from the file-name block
        names: usize,
        /// File records decoded from the folder blocks
        records: usize,
    },

    /// Header declares more index data than the archive holds
    #[error("BSA index field {field}={size} exceeds archive size {available}")]
    IndexTooLarge {
        /// Header field the size was derived from
        field: &'static str,
        /// Bytes the field claims
        size: u64,
        /// Bytes in the archive
        available: u64,
    },

    /// Entry payload is compressed
    #[error("Compressed BSA entries are not supported: {0}")]
    CompressedEntry(String),

    /// Archive stores names inside each payload
    #[error("BSA entries with embedded names are not supported: {0}")]
    EmbeddedNames(String),

    /// Binary read error
    #[error("Binary format error: {0}")]
    BinRead(String),

    /// I/O error, including short reads
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for BsaError {
    fn from(e: binrw::Error) -> Self {
        match e {
            binrw::Error::Io(io) => Self::Io(io),
            other => Self::BinRead(other.to_string()),
        }
    }
}

impl BsaError {
    /// Malformed or unsupported container; never retry, never guess
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic(_)
                | Self::UnsupportedVersion(_)
                | Self::MissingFolderNames(_)
                | Self::MissingFileNames(_)
                | Self::FileCountMismatch { .. }
                | Self::IndexTooLarge { .. }
                | Self::BinRead(_)
        )
    }

    /// Entry-level limitation; the caller skips the entry and carries on
    pub fn is_unsupported_entry(&self) -> bool {
        matches!(self, Self::CompressedEntry(_) | Self::EmbeddedNames(_))
    }
}
