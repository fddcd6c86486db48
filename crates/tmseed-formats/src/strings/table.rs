//! String table decoding
//!
//! ```text
//! u32 count
//! u32 data_size                      informational, not validated
//! [u32 id, u32 offset] x count       offset relative to the data region
//! data region                        NUL-terminated or length-prefixed
//! ```

use crate::strings::text::decode_text;
use crate::strings::variant::{DataLayout, StringsVariant};
use binrw::{BinRead, BinWrite};
use indexmap::IndexMap;
use std::io::Cursor;

/// Size of the fixed table header
pub const STRINGS_HEADER_SIZE: usize = 8;

/// Size of one directory entry
pub const DIRECTORY_ENTRY_SIZE: usize = 8;

/// Table header
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct StringsHeader {
    /// Number of directory entries
    pub count: u32,
    /// Byte size of the data region
    pub data_size: u32,
}

/// Directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct DirectoryEntry {
    /// String identifier
    pub id: u32,
    /// Offset of the string relative to the data region
    pub offset: u32,
}

/// Decoded localized string table
///
/// Iteration follows directory order. A repeated identifier replaces the
/// earlier text but keeps the earlier position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: IndexMap<u32, String>,
}

impl StringTable {
    /// Decode a table
    ///
    /// Never fails. Input shorter than the header yields an empty table;
    /// entries whose offset falls outside the buffer, or whose NUL terminator
    /// is missing, are skipped.
    pub fn decode(variant: StringsVariant, data: &[u8]) -> Self {
        let mut table = Self::default();
        if data.len() < STRINGS_HEADER_SIZE {
            return table;
        }

        let mut cursor = Cursor::new(data);
        let Ok(header) = StringsHeader::read(&mut cursor) else {
            return table;
        };

        let count = header.count as usize;
        let data_start =
            STRINGS_HEADER_SIZE.saturating_add(count.saturating_mul(DIRECTORY_ENTRY_SIZE));

        for _ in 0..count {
            // A directory running past the buffer also puts the data region past it
            let Ok(entry) = DirectoryEntry::read(&mut cursor) else {
                break;
            };
            if let Some(text) = read_text(variant.layout(), data, data_start, entry.offset) {
                table.entries.insert(entry.id, text);
            }
        }

        table
    }

    /// Text for an identifier
    pub fn get(&self, id: u32) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Number of decoded strings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was decoded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers and texts in directory order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(id, text)| (*id, text.as_str()))
    }
}

impl FromIterator<(u32, String)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn read_text(layout: DataLayout, data: &[u8], data_start: usize, offset: u32) -> Option<String> {
    let start = data_start.checked_add(offset as usize)?;
    if start >= data.len() {
        return None;
    }

    let raw = match layout {
        DataLayout::LengthPrefixed => {
            let prefix = data.get(start..start + 4)?;
            let length = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
            let begin = start + 4;
            // The stored length counts the trailing NUL
            let end = begin.saturating_add(length.saturating_sub(1)).min(data.len());
            data.get(begin..end).unwrap_or_default()
        }
        DataLayout::NulTerminated => {
            let tail = &data[start..];
            let end = tail.iter().position(|&b| b == 0)?;
            &tail[..end]
        }
    };

    Some(decode_text(raw))
}
