//! Payload access for indexed archives

use crate::bsa::error::{BsaError, Result};
use crate::bsa::index::{BsaEntry, BsaIndex, PathFilter};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read one entry's raw payload
///
/// Compressed entries and archives with embedded names are refused.
/// Otherwise exactly `entry.size` bytes are read from `entry.offset`; a short
/// read is an `UnexpectedEof` I/O error.
pub fn read_entry<R: Read + Seek>(
    reader: &mut R,
    index: &BsaIndex,
    entry: &BsaEntry,
) -> Result<Vec<u8>> {
    if entry.compressed {
        return Err(BsaError::CompressedEntry(entry.path.clone()));
    }
    if index.has_embedded_names() {
        return Err(BsaError::EmbeddedNames(entry.path.clone()));
    }

    reader.seek(SeekFrom::Start(entry.offset))?;
    let mut data = Vec::new();
    reader
        .by_ref()
        .take(u64::from(entry.size))
        .read_to_end(&mut data)?;
    if data.len() != entry.size as usize {
        return Err(BsaError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{}: expected {} bytes, read {}", entry.path, entry.size, data.len()),
        )));
    }
    Ok(data)
}

/// Index plus an owned reader over the archive bytes
pub struct BsaReader<R: Read + Seek> {
    reader: R,
    index: BsaIndex,
}

impl<R: Read + Seek> BsaReader<R> {
    /// Parse the index of localized string tables from `reader`
    pub fn new(reader: R) -> Result<Self> {
        Self::with_filter(reader, &PathFilter::strings())
    }

    /// Parse the index with a custom entry filter
    pub fn with_filter(mut reader: R, filter: &PathFilter) -> Result<Self> {
        let index = BsaIndex::parse_with_filter(&mut reader, filter)?;
        Ok(Self { reader, index })
    }

    /// The decoded index
    pub fn index(&self) -> &BsaIndex {
        &self.index
    }

    /// Read an entry's payload
    pub fn fetch(&mut self, entry: &BsaEntry) -> Result<Vec<u8>> {
        read_entry(&mut self.reader, &self.index, entry)
    }
}

/// Archive on disk
///
/// Holds only the index; each `fetch` opens the file and performs a single
/// bounded read, so unrelated payloads are never loaded.
#[derive(Debug, Clone)]
pub struct BsaArchive {
    path: PathBuf,
    index: BsaIndex,
}

impl BsaArchive {
    /// Open an archive and index its localized string tables
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_filter(path, &PathFilter::strings())
    }

    /// Open an archive with a custom entry filter
    pub fn open_with_filter<P: AsRef<Path>>(path: P, filter: &PathFilter) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = BufReader::new(File::open(&path)?);
        let index = BsaIndex::parse_with_filter(&mut reader, filter)?;
        debug!("Opened {} ({} entries)", path.display(), index.len());
        Ok(Self { path, index })
    }

    /// Path the archive was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The decoded index
    pub fn index(&self) -> &BsaIndex {
        &self.index
    }

    /// Kept entries
    pub fn entries(&self) -> &[BsaEntry] {
        self.index.entries()
    }

    /// Read an entry's payload
    pub fn fetch(&self, entry: &BsaEntry) -> Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        read_entry(&mut file, &self.index, entry)
    }
}
