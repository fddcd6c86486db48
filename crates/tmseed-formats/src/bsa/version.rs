//! BSA version handling
//!
//! The folder record layout is the only part of the format that changes
//! between the supported versions. Everything version-specific lives here.

use crate::bsa::error::{BsaError, Result};
use crate::bsa::record::FolderRecord;
use binrw::BinRead;
use std::io::{Read, Seek};

/// Supported BSA versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BsaVersion {
    /// Version 104 (Oblivion-era layout used by Fallout 3/NV and Skyrim LE)
    V104,
    /// Version 105 (Skyrim Special Edition): 64-bit folder offsets padded out
    V105,
}

impl BsaVersion {
    /// Map the raw header value to a supported version
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            104 => Ok(Self::V104),
            105 => Ok(Self::V105),
            other => Err(BsaError::UnsupportedVersion(other)),
        }
    }

    /// Raw header value
    pub const fn as_raw(self) -> u32 {
        match self {
            Self::V104 => 104,
            Self::V105 => 105,
        }
    }

    /// Size of one folder record in bytes
    pub const fn folder_record_size(self) -> usize {
        match self {
            Self::V104 => 16,
            Self::V105 => 24,
        }
    }

    /// Read one folder record in this version's layout
    pub fn read_folder_record<R: Read + Seek>(self, reader: &mut R) -> Result<FolderRecord> {
        let record = match self {
            Self::V104 => {
                let raw = FolderRecordV104::read(reader)?;
                FolderRecord {
                    name_hash: raw.name_hash,
                    file_count: raw.file_count,
                    offset: raw.offset,
                }
            }
            Self::V105 => {
                let raw = FolderRecordV105::read(reader)?;
                FolderRecord {
                    name_hash: raw.name_hash,
                    file_count: raw.file_count,
                    offset: raw.offset,
                }
            }
        };
        Ok(record)
    }
}

#[derive(BinRead)]
#[br(little)]
struct FolderRecordV104 {
    name_hash: u64,
    file_count: u32,
    offset: u32,
}

#[derive(BinRead)]
#[br(little)]
struct FolderRecordV105 {
    name_hash: u64,
    file_count: u32,
    _padding1: u32,
    offset: u32,
    _padding2: u32,
}
