//! Localized STRINGS tables (`.strings`, `.dlstrings`, `.ilstrings`)
//!
//! Each table maps a 32-bit string identifier to text. The same identifier
//! names the same logical string in every language's copy of a table, which
//! is what makes two tables alignable.
//!
//! # Format Overview
//!
//! - 8-byte header: entry count, data size
//! - Directory of `(id, offset)` pairs, offsets relative to the data region
//! - Data region: NUL-terminated strings for `.strings`, u32 length-prefixed
//!   strings (length includes the trailing NUL) for `.dlstrings`/`.ilstrings`
//!
//! Decoding is lenient: a bad offset drops one entry, never the table.
//!
//! # Usage
//!
//! ```rust
//! use tmseed_formats::strings::{StringTable, StringsVariant};
//!
//! let mut data = Vec::new();
//! data.extend_from_slice(&1u32.to_le_bytes()); // count
//! data.extend_from_slice(&6u32.to_le_bytes()); // data size
//! data.extend_from_slice(&42u32.to_le_bytes()); // id
//! data.extend_from_slice(&0u32.to_le_bytes()); // offset
//! data.extend_from_slice(b"Hello\0");
//!
//! let variant = StringsVariant::from_file_name("Skyrim_English.STRINGS").unwrap();
//! let table = StringTable::decode(variant, &data);
//! assert_eq!(table.get(42), Some("Hello"));
//! ```

mod table;
mod text;
mod variant;

pub use table::{
    DIRECTORY_ENTRY_SIZE, DirectoryEntry, STRINGS_HEADER_SIZE, StringTable, StringsHeader,
};
pub use text::{decode_cp1252, decode_text};
pub use variant::{DataLayout, StringsVariant};
