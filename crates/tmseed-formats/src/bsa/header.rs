//! BSA header parsing and validation

use crate::bsa::error::{BsaError, Result};
use crate::bsa::version::BsaVersion;
use binrw::{BinRead, BinWrite};
use std::fmt;

/// Magic tag at the start of every BSA archive
pub const BSA_MAGIC: [u8; 4] = *b"BSA\0";

/// Fixed header size in bytes
pub const HEADER_SIZE: usize = 36;

/// Archive-wide flag bitset
#[derive(BinRead, BinWrite, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[brw(little)]
pub struct ArchiveFlags {
    /// Raw flag value
    pub value: u32,
}

impl ArchiveFlags {
    /// Folder names are stored before each file record block (bit 0)
    pub const INCLUDE_DIRECTORY_NAMES: u32 = 0x0001;

    /// A flat file-name block follows the folder blocks (bit 1)
    pub const INCLUDE_FILE_NAMES: u32 = 0x0002;

    /// Payloads are compressed unless a file's compressed bit inverts it (bit 2)
    pub const COMPRESSED_ARCHIVE: u32 = 0x0004;

    /// Each payload starts with its own full path (bit 8)
    pub const EMBED_FILE_NAMES: u32 = 0x0100;

    /// Create flags from a raw value
    pub const fn new(value: u32) -> Self {
        Self { value }
    }

    /// Check if a flag is set
    pub const fn has(&self, flag: u32) -> bool {
        (self.value & flag) != 0
    }

    /// Folder names are present
    pub const fn has_folder_names(&self) -> bool {
        self.has(Self::INCLUDE_DIRECTORY_NAMES)
    }

    /// File-name block is present
    pub const fn has_file_names(&self) -> bool {
        self.has(Self::INCLUDE_FILE_NAMES)
    }

    /// Names are embedded in the payloads
    pub const fn has_embedded_names(&self) -> bool {
        self.has(Self::EMBED_FILE_NAMES)
    }
}

impl fmt::Display for ArchiveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.value)
    }
}

/// BSA archive header (36 bytes, little-endian)
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct BsaHeader {
    /// Magic tag, always `BSA\0`
    pub magic: [u8; 4],

    /// Format version (104 or 105)
    pub version: u32,

    /// Offset of the folder records; always 36 in practice
    pub header_offset: u32,

    /// Archive-wide flags
    pub archive_flags: ArchiveFlags,

    /// Number of folders
    pub folder_count: u32,

    /// Number of files across all folders
    pub file_count: u32,

    /// Total length of all folder names
    pub total_folder_name_length: u32,

    /// Length of the flat file-name block
    pub total_file_name_length: u32,

    /// Content-type flags
    pub file_flags: u16,

    /// Padding
    pub padding: u16,
}

impl BsaHeader {
    /// Check magic, version and required flags
    ///
    /// Returns the decoded version so callers never re-check the raw value.
    pub fn validate(&self) -> Result<BsaVersion> {
        if self.magic != BSA_MAGIC {
            return Err(BsaError::InvalidMagic(self.magic));
        }

        let version = BsaVersion::from_raw(self.version)?;

        if !self.archive_flags.has_folder_names() {
            return Err(BsaError::MissingFolderNames(self.archive_flags.value));
        }
        if !self.archive_flags.has_file_names() {
            return Err(BsaError::MissingFileNames(self.archive_flags.value));
        }

        Ok(version)
    }
}
