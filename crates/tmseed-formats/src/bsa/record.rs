//! Folder and file records

use crate::bsa::error::Result;
use binrw::{BinRead, BinWrite};
use std::io::Read;

/// Size bit marking a compressed payload
pub const COMPRESSED_BIT: u32 = 0x4000_0000;

/// Mask for the byte length stored alongside the flag bits
pub const SIZE_MASK: u32 = 0x3FFF_FFFF;

/// Size of an encoded file record in bytes
pub const FILE_RECORD_SIZE: u64 = 16;

/// Folder record, independent of the on-disk version layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderRecord {
    /// Hash of the folder name (not used for lookup)
    pub name_hash: u64,
    /// Number of file records in this folder's block
    pub file_count: u32,
    /// Offset of this folder's block
    pub offset: u32,
}

/// File record (16 bytes, little-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct FileRecord {
    /// Hash of the file name
    pub name_hash: u64,
    /// Byte length with the compressed flag in bit 30
    pub raw_size: u32,
    /// Absolute offset of the payload in the archive
    pub offset: u32,
}

impl FileRecord {
    /// Payload length in bytes
    pub const fn size(&self) -> u32 {
        self.raw_size & SIZE_MASK
    }

    /// Whether the compressed bit is set
    pub const fn is_compressed(&self) -> bool {
        (self.raw_size & COMPRESSED_BIT) != 0
    }
}

/// Read a byte-length prefixed folder name and normalize it
///
/// The payload includes a trailing NUL. Backslashes become forward slashes
/// and leading/trailing slashes are removed.
pub fn read_folder_name<R: Read>(reader: &mut R) -> Result<String> {
    let mut len = [0u8; 1];
    reader.read_exact(&mut len)?;

    let mut raw = vec![0u8; usize::from(len[0])];
    reader.read_exact(&mut raw)?;
    if raw.last() == Some(&0) {
        raw.pop();
    }

    Ok(normalize_folder_name(&String::from_utf8_lossy(&raw)))
}

/// Normalize a folder path to forward slashes without outer slashes
pub fn normalize_folder_name(name: &str) -> String {
    name.replace('\\', "/").trim_matches('/').to_string()
}

/// Split the flat file-name block on NUL, dropping empty segments
pub fn split_name_block(block: &[u8]) -> Vec<&[u8]> {
    block
        .split(|&b| b == 0)
        .filter(|part| !part.is_empty())
        .collect()
}
