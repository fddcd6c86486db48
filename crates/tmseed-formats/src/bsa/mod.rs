//! Bethesda Softworks Archive (BSA) reader, versions 104 and 105
//!
//! Only the index is decoded eagerly. Payloads are read one at a time on
//! request, so opening `Skyrim - Interface.bsa` to pull out a handful of
//! STRINGS tables never touches the rest of the archive.
//!
//! # Supported Layout
//!
//! - Magic `BSA\0`, little-endian throughout
//! - Version 104 (16-byte folder records) and 105 (24-byte folder records)
//! - Folder names and the file-name block must both be present
//!
//! Compressed payloads and archives that embed names inside each payload are
//! indexed but refused on read with [`BsaError::CompressedEntry`] and
//! [`BsaError::EmbeddedNames`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use tmseed_formats::bsa::BsaArchive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = BsaArchive::open("Skyrim - Interface.bsa")?;
//! for entry in archive.entries() {
//!     if entry.compressed {
//!         continue;
//!     }
//!     let bytes = archive.fetch(entry)?;
//!     println!("{}: {} bytes", entry.path, bytes.len());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod header;
mod index;
mod reader;
mod record;
mod version;

pub use error::{BsaError, Result};
pub use header::{ArchiveFlags, BSA_MAGIC, BsaHeader, HEADER_SIZE};
pub use index::{BsaEntry, BsaIndex, PathFilter, STRINGS_PREFIX, STRINGS_SUFFIXES};
pub use reader::{BsaArchive, BsaReader, read_entry};
pub use record::{COMPRESSED_BIT, FILE_RECORD_SIZE, FileRecord, FolderRecord, SIZE_MASK};
pub use version::BsaVersion;
