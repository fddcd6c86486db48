//! Test utilities for tmseed
//!
//! Builds synthetic BSA archives and STRINGS tables in memory, writes them to
//! temporary directory trees, and locates real game data for the optional
//! tests that want it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variable pointing at a real `Skyrim - Interface.bsa`
pub const INTERFACE_BSA_ENV: &str = "TMSEED_INTERFACE_BSA";

/// Environment variable pointing at a real directory of localized STRINGS files
pub const STRINGS_ROOT_ENV: &str = "TMSEED_STRINGS_ROOT";

/// Size bit marking a compressed BSA payload
pub const COMPRESSED_BIT: u32 = 0x4000_0000;

/// One file inside a synthetic archive folder
#[derive(Debug, Clone)]
pub struct FixtureFile {
    /// File name without folder
    pub name: String,
    /// Raw payload bytes
    pub data: Vec<u8>,
    /// Whether the compressed bit is set in the size field
    pub compressed: bool,
}

impl FixtureFile {
    /// Create an uncompressed file
    pub fn new(name: &str, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            data: data.into(),
            compressed: false,
        }
    }

    /// Mark the payload as compressed
    #[must_use]
    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }
}

/// Builder for synthetic BSA (v104/v105) archives
///
/// The layout mirrors what the game tools produce: header, folder records,
/// per-folder name + file records, flat file-name block, then payloads.
#[derive(Debug, Clone)]
pub struct BsaFixture {
    magic: [u8; 4],
    version: u32,
    archive_flags: u32,
    folders: Vec<(String, Vec<FixtureFile>)>,
    names_written: Option<usize>,
}

impl BsaFixture {
    /// Start an archive of the given version with folder and file names enabled
    pub fn new(version: u32) -> Self {
        Self {
            magic: *b"BSA\0",
            version,
            archive_flags: 0x3,
            folders: Vec::new(),
            names_written: None,
        }
    }

    /// Override the magic tag
    #[must_use]
    pub fn magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    /// Override the archive flags
    #[must_use]
    pub fn archive_flags(mut self, flags: u32) -> Self {
        self.archive_flags = flags;
        self
    }

    /// Add a folder with its files
    #[must_use]
    pub fn folder(mut self, name: &str, files: Vec<FixtureFile>) -> Self {
        self.folders.push((name.to_string(), files));
        self
    }

    /// Only write the first `count` names into the file-name block
    #[must_use]
    pub fn truncate_names(mut self, count: usize) -> Self {
        self.names_written = Some(count);
        self
    }

    fn folder_record_size(&self) -> usize {
        if self.version == 105 { 24 } else { 16 }
    }

    /// Serialize the archive
    pub fn build(&self) -> Vec<u8> {
        let file_count: usize = self.folders.iter().map(|(_, files)| files.len()).sum();

        let mut folder_names_len = 0usize;
        let mut folder_blocks_len = 0usize;
        for (name, files) in &self.folders {
            folder_names_len += name.len() + 1;
            folder_blocks_len += 1 + name.len() + 1 + files.len() * 16;
        }

        let names: Vec<&str> = self
            .folders
            .iter()
            .flat_map(|(_, files)| files.iter().map(|f| f.name.as_str()))
            .take(self.names_written.unwrap_or(usize::MAX))
            .collect();
        let mut name_block = Vec::new();
        for name in &names {
            name_block.extend_from_slice(name.as_bytes());
            name_block.push(0);
        }

        let header_len = 36;
        let records_len = self.folders.len() * self.folder_record_size();
        let mut data_offset = header_len + records_len + folder_blocks_len + name_block.len();

        let mut out = Vec::new();
        out.extend_from_slice(&self.magic);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&36u32.to_le_bytes());
        out.extend_from_slice(&self.archive_flags.to_le_bytes());
        out.extend_from_slice(&(self.folders.len() as u32).to_le_bytes());
        out.extend_from_slice(&(file_count as u32).to_le_bytes());
        out.extend_from_slice(&(folder_names_len as u32).to_le_bytes());
        out.extend_from_slice(&(name_block.len() as u32).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());

        let mut block_offset = header_len + records_len;
        for (index, (name, files)) in self.folders.iter().enumerate() {
            out.extend_from_slice(&(index as u64).to_le_bytes());
            out.extend_from_slice(&(files.len() as u32).to_le_bytes());
            if self.version == 105 {
                out.extend_from_slice(&0u32.to_le_bytes());
            }
            out.extend_from_slice(&(block_offset as u32).to_le_bytes());
            if self.version == 105 {
                out.extend_from_slice(&0u32.to_le_bytes());
            }
            block_offset += 1 + name.len() + 1 + files.len() * 16;
        }

        let mut payloads = Vec::new();
        for (name, files) in &self.folders {
            out.push((name.len() + 1) as u8);
            out.extend_from_slice(name.as_bytes());
            out.push(0);
            for (index, file) in files.iter().enumerate() {
                let mut size = file.data.len() as u32;
                if file.compressed {
                    size |= COMPRESSED_BIT;
                }
                out.extend_from_slice(&(index as u64).to_le_bytes());
                out.extend_from_slice(&size.to_le_bytes());
                out.extend_from_slice(&(data_offset as u32).to_le_bytes());
                data_offset += file.data.len();
                payloads.extend_from_slice(&file.data);
            }
        }

        out.extend_from_slice(&name_block);
        out.extend_from_slice(&payloads);
        out
    }
}

/// Builder for STRINGS / DLSTRINGS / ILSTRINGS tables
#[derive(Debug, Clone, Default)]
pub struct StringsFixture {
    entries: Vec<(u32, Vec<u8>)>,
    dangling: Vec<(u32, u32)>,
}

impl StringsFixture {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text entry
    #[must_use]
    pub fn entry(mut self, id: u32, text: &str) -> Self {
        self.entries.push((id, text.as_bytes().to_vec()));
        self
    }

    /// Add an entry with raw (possibly non UTF-8) bytes
    #[must_use]
    pub fn raw_entry(mut self, id: u32, bytes: &[u8]) -> Self {
        self.entries.push((id, bytes.to_vec()));
        self
    }

    /// Add a directory entry whose offset points past the data region
    #[must_use]
    pub fn dangling(mut self, id: u32, offset: u32) -> Self {
        self.dangling.push((id, offset));
        self
    }

    /// Serialize as a NUL-terminated `.strings` table
    pub fn build_strings(&self) -> Vec<u8> {
        self.build_with(|bytes, data| {
            data.extend_from_slice(bytes);
            data.push(0);
        })
    }

    /// Serialize as a length-prefixed `.dlstrings` / `.ilstrings` table
    pub fn build_sized(&self) -> Vec<u8> {
        self.build_with(|bytes, data| {
            data.extend_from_slice(&(bytes.len() as u32 + 1).to_le_bytes());
            data.extend_from_slice(bytes);
            data.push(0);
        })
    }

    /// Serialize with the layout implied by a file name's suffix
    pub fn build_for(&self, file_name: &str) -> Vec<u8> {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".dlstrings") || lower.ends_with(".ilstrings") {
            self.build_sized()
        } else {
            self.build_strings()
        }
    }

    fn build_with(&self, mut write_entry: impl FnMut(&[u8], &mut Vec<u8>)) -> Vec<u8> {
        let count = self.entries.len() + self.dangling.len();
        let mut directory = Vec::with_capacity(count * 8);
        let mut data = Vec::new();

        for (id, bytes) in &self.entries {
            directory.extend_from_slice(&id.to_le_bytes());
            directory.extend_from_slice(&(data.len() as u32).to_le_bytes());
            write_entry(bytes, &mut data);
        }
        for (id, offset) in &self.dangling {
            directory.extend_from_slice(&id.to_le_bytes());
            directory.extend_from_slice(&offset.to_le_bytes());
        }

        let mut out = Vec::with_capacity(8 + directory.len() + data.len());
        out.extend_from_slice(&(count as u32).to_le_bytes());
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&directory);
        out.extend_from_slice(&data);
        out
    }
}

/// Write `files` (relative path, bytes) under a fresh temporary directory
pub fn write_tree(files: &[(&str, Vec<u8>)]) -> io::Result<TempDir> {
    let dir = TempDir::new()?;
    for (relative, bytes) in files {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
    }
    Ok(dir)
}

/// Write `bytes` to `name` inside `dir`, returning the full path
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Locate a real interface archive from the environment, if configured
pub fn find_interface_bsa() -> Option<PathBuf> {
    std::env::var(INTERFACE_BSA_ENV)
        .ok()
        .map(PathBuf::from)
        .filter(|path| path.is_file())
}

/// Locate a real STRINGS directory from the environment, if configured
pub fn find_strings_root() -> Option<PathBuf> {
    std::env::var(STRINGS_ROOT_ENV)
        .ok()
        .map(PathBuf::from)
        .filter(|path| path.is_dir())
}

/// Print instructions for running the real-data tests
pub fn print_setup_instructions() {
    println!("Real data tests are skipped unless these are set:");
    println!("  {INTERFACE_BSA_ENV} = /path/to/Skyrim - Interface.bsa");
    println!("  {STRINGS_ROOT_ENV} = /path/to/localized/Strings");
}
