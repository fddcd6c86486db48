//! BSA index: folder records, folder blocks and the file-name block
//!
//! Layout after the 36-byte header:
//!
//! ```text
//! [folder records; folder_count]       16 or 24 bytes each (see BsaVersion)
//! [per folder: bzstring name + file records; file_count x 16 bytes]
//! [file-name block; total_file_name_length bytes, NUL separated]
//! [payloads]
//! ```
//!
//! File records are paired with names by position, folder-major.

use crate::bsa::error::{BsaError, Result};
use crate::bsa::header::{ArchiveFlags, BsaHeader};
use crate::bsa::record::{FILE_RECORD_SIZE, FileRecord, read_folder_name, split_name_block};
use crate::bsa::version::BsaVersion;
use binrw::BinRead;
use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

/// Folder prefix of localized string tables inside an archive
pub const STRINGS_PREFIX: &str = "strings/";

/// File suffixes of localized string tables
pub const STRINGS_SUFFIXES: [&str; 3] = [".strings", ".dlstrings", ".ilstrings"];

/// Located payload inside an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BsaEntry {
    /// Lower-cased `folder/file` path
    pub path: String,
    /// Absolute payload offset
    pub offset: u64,
    /// Payload length in bytes
    pub size: u32,
    /// Whether the payload is compressed
    ///
    /// The record's compressed bit, inverted when the archive-wide
    /// compressed flag is set.
    pub compressed: bool,
}

impl BsaEntry {
    /// File name without its folder
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Which entries an index keeps
///
/// Checked against the lower-cased `folder/file` path. Entries that fail are
/// dropped before a path string is allocated for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    prefix: String,
    suffixes: Vec<String>,
}

impl PathFilter {
    /// Filter on a lower-case prefix and a set of lower-case suffixes
    pub fn new(prefix: &str, suffixes: &[&str]) -> Self {
        Self {
            prefix: prefix.to_lowercase(),
            suffixes: suffixes.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Localized string tables under `strings/`
    pub fn strings() -> Self {
        Self::new(STRINGS_PREFIX, &STRINGS_SUFFIXES)
    }

    /// Whether a lower-cased path passes the filter
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix) && self.suffixes.iter().any(|s| path.ends_with(s))
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::strings()
    }
}

/// Decoded and filtered BSA index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BsaIndex {
    /// Archive header
    pub header: BsaHeader,
    /// Decoded format version
    pub version: BsaVersion,
    entries: Vec<BsaEntry>,
}

impl BsaIndex {
    /// Parse an index keeping only localized string tables
    pub fn parse<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        Self::parse_with_filter(reader, &PathFilter::strings())
    }

    /// Parse an index keeping entries accepted by `filter`
    ///
    /// Any disagreement between the header's file count, the file records and
    /// the name block is fatal; no partial index is returned. So is a header
    /// whose counts describe more index data than the whole archive holds.
    pub fn parse_with_filter<R: Read + Seek>(reader: &mut R, filter: &PathFilter) -> Result<Self> {
        let start = reader.stream_position()?;
        let end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(start))?;

        let header = BsaHeader::read(reader)?;
        let version = header.validate()?;
        check_index_sizes(&header, version, end.saturating_sub(start))?;

        let mut folders = Vec::with_capacity(header.folder_count as usize);
        for _ in 0..header.folder_count {
            folders.push(version.read_folder_record(reader)?);
        }

        let mut folder_names = Vec::with_capacity(folders.len());
        let mut records: Vec<(usize, FileRecord)> = Vec::new();
        for (folder_index, folder) in folders.iter().enumerate() {
            folder_names.push(read_folder_name(reader)?.to_lowercase());
            for _ in 0..folder.file_count {
                records.push((folder_index, FileRecord::read(reader)?));
            }
        }

        let mut name_block = vec![0u8; header.total_file_name_length as usize];
        reader.read_exact(&mut name_block)?;
        let names = split_name_block(&name_block);

        let expected = header.file_count as usize;
        if names.len() != expected || records.len() != expected {
            return Err(BsaError::FileCountMismatch {
                expected: header.file_count,
                names: names.len(),
                records: records.len(),
            });
        }

        let archive_compressed = header.archive_flags.has(ArchiveFlags::COMPRESSED_ARCHIVE);
        let mut entries = Vec::new();
        let mut path = String::new();
        for ((folder_index, record), name) in records.iter().zip(names) {
            path.clear();
            path.push_str(&folder_names[*folder_index]);
            path.push('/');
            for c in String::from_utf8_lossy(name).chars() {
                if c == '\\' {
                    path.push('/');
                } else {
                    path.extend(c.to_lowercase());
                }
            }

            if !filter.matches(&path) {
                continue;
            }

            entries.push(BsaEntry {
                path: path.clone(),
                offset: u64::from(record.offset),
                size: record.size(),
                compressed: archive_compressed != record.is_compressed(),
            });
        }

        debug!(
            "Indexed BSA v{}: {} folders, {} files, {} kept",
            version.as_raw(),
            header.folder_count,
            header.file_count,
            entries.len()
        );

        Ok(Self {
            header,
            version,
            entries,
        })
    }

    /// Kept entries in folder-major declaration order
    pub fn entries(&self) -> &[BsaEntry] {
        &self.entries
    }

    /// Number of kept entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry passed the filter
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its lower-cased relative path
    pub fn get(&self, path: &str) -> Option<&BsaEntry> {
        let path = path.to_lowercase();
        self.entries.iter().find(|e| e.path == path)
    }

    /// Whether payloads carry their own names (unsupported for reads)
    pub fn has_embedded_names(&self) -> bool {
        self.header.archive_flags.has_embedded_names()
    }
}

/// Reject header counts that cannot fit in an archive of `available` bytes
///
/// Runs before anything is allocated from those counts.
fn check_index_sizes(header: &BsaHeader, version: BsaVersion, available: u64) -> Result<()> {
    let record_size = version.folder_record_size() as u64;
    let fields = [
        ("folder_count", u64::from(header.folder_count) * record_size),
        ("file_count", u64::from(header.file_count) * FILE_RECORD_SIZE),
        ("total_file_name_length", u64::from(header.total_file_name_length)),
    ];
    for (field, size) in fields {
        if size > available {
            return Err(BsaError::IndexTooLarge {
                field,
                size,
                available,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tmseed_test_utils::{BsaFixture, FixtureFile};

    fn parse(data: &[u8]) -> Result<BsaIndex> {
        BsaIndex::parse(&mut Cursor::new(data))
    }

    #[test]
    fn test_path_filter() {
        let filter = PathFilter::strings();
        assert!(filter.matches("strings/skyrim_english.strings"));
        assert!(filter.matches("strings/skyrim_english.dlstrings"));
        assert!(filter.matches("strings/skyrim_english.ilstrings"));
        assert!(!filter.matches("interface/strings/a.strings"));
        assert!(!filter.matches("strings/readme.txt"));
        assert!(!filter.matches("/a.strings"));
    }

    #[test]
    fn test_parse_single_entry_v105() {
        let data = BsaFixture::new(105)
            .folder("strings", vec![FixtureFile::new("test.strings", b"abc".to_vec())])
            .build();
        let index = parse(&data).unwrap();

        assert_eq!(index.version, BsaVersion::V105);
        assert_eq!(index.len(), 1);
        let entry = &index.entries()[0];
        assert_eq!(entry.path, "strings/test.strings");
        assert_eq!(entry.file_name(), "test.strings");
        assert_eq!(entry.size, 3);
        assert!(!entry.compressed);
        assert_eq!(&data[entry.offset as usize..], b"abc");
    }

    #[test]
    fn test_parse_filters_and_lowercases() {
        let data = BsaFixture::new(104)
            .folder(
                "interface",
                vec![
                    FixtureFile::new("fontconfig.txt", b"x".to_vec()),
                    FixtureFile::new("other.strings", b"y".to_vec()),
                ],
            )
            .folder(
                "Strings",
                vec![
                    FixtureFile::new("Skyrim_English.STRINGS", b"1".to_vec()),
                    FixtureFile::new("Skyrim_English.DLSTRINGS", b"22".to_vec()),
                    FixtureFile::new("notes.txt", b"333".to_vec()),
                ],
            )
            .build();
        let index = parse(&data).unwrap();

        let paths: Vec<&str> = index.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "strings/skyrim_english.strings",
                "strings/skyrim_english.dlstrings"
            ]
        );
        assert!(index.get("Strings/Skyrim_English.strings").is_some());
        assert!(index.get("interface/other.strings").is_none());
    }

    #[test]
    fn test_compressed_bit_is_reported() {
        let data = BsaFixture::new(105)
            .folder(
                "strings",
                vec![FixtureFile::new("a.strings", b"zz".to_vec()).compressed()],
            )
            .build();
        let index = parse(&data).unwrap();
        assert!(index.entries()[0].compressed);
        assert_eq!(index.entries()[0].size, 2);
    }

    #[test]
    fn test_name_count_mismatch_is_fatal() {
        let files = (0..5)
            .map(|i| FixtureFile::new(&format!("f{i}.strings"), vec![0u8; 4]))
            .collect();
        let data = BsaFixture::new(105)
            .folder("strings", files)
            .truncate_names(4)
            .build();

        match parse(&data) {
            Err(BsaError::FileCountMismatch {
                expected,
                names,
                records,
            }) => {
                assert_eq!(expected, 5);
                assert_eq!(names, 4);
                assert_eq!(records, 5);
            }
            other => panic!("expected count mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let data = BsaFixture::new(105).magic(*b"BTDX").build();
        assert!(parse(&data).unwrap_err().is_format_error());

        let data = BsaFixture::new(103).build();
        assert!(matches!(parse(&data), Err(BsaError::UnsupportedVersion(103))));

        let data = BsaFixture::new(105).archive_flags(0x1).build();
        assert!(matches!(parse(&data), Err(BsaError::MissingFileNames(_))));
    }

    #[test]
    fn test_truncated_index_is_io_error() {
        let data = BsaFixture::new(104)
            .folder("strings", vec![FixtureFile::new("a.strings", b"abc".to_vec())])
            .build();
        // Cut inside the file-name block
        let result = parse(&data[..data.len() - 6]);
        assert!(matches!(result, Err(BsaError::Io(_))));
    }

    fn bare_header(folder_count: u32, file_count: u32, name_length: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"BSA\0");
        data.extend_from_slice(&105u32.to_le_bytes());
        data.extend_from_slice(&36u32.to_le_bytes());
        data.extend_from_slice(&0x3u32.to_le_bytes());
        data.extend_from_slice(&folder_count.to_le_bytes());
        data.extend_from_slice(&file_count.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&name_length.to_le_bytes());
        data.extend_from_slice(&[0u8; 4]);
        data
    }

    #[test]
    fn test_oversized_counts_are_format_errors() {
        let err = parse(&bare_header(u32::MAX, 0, 0)).unwrap_err();
        assert!(err.is_format_error());
        match err {
            BsaError::IndexTooLarge {
                field,
                size,
                available,
            } => {
                assert_eq!(field, "folder_count");
                assert_eq!(size, u64::from(u32::MAX) * 24);
                assert_eq!(available, 36);
            }
            other => panic!("expected oversized index, got {other:?}"),
        }

        assert!(matches!(
            parse(&bare_header(0, 0, u32::MAX)),
            Err(BsaError::IndexTooLarge {
                field: "total_file_name_length",
                ..
            })
        ));
        assert!(matches!(
            parse(&bare_header(0, 1 << 28, 0)),
            Err(BsaError::IndexTooLarge {
                field: "file_count",
                ..
            })
        ));
    }

    #[test]
    fn test_counts_within_archive_size_still_read() {
        // Small counts that merely overrun the data stay I/O errors
        assert!(matches!(parse(&bare_header(1, 0, 0)), Err(BsaError::Io(_))));
    }

    #[test]
    fn test_compressed_archive_flag_inverts_record_bit() {
        let data = BsaFixture::new(104)
            .archive_flags(0x7)
            .folder(
                "strings",
                vec![
                    FixtureFile::new("a.strings", b"zz".to_vec()),
                    FixtureFile::new("b.strings", b"raw".to_vec()).compressed(),
                ],
            )
            .build();
        let index = parse(&data).unwrap();
        assert!(index.entries()[0].compressed);
        assert!(!index.entries()[1].compressed);
        assert_eq!(index.entries()[1].size, 3);
    }

    #[test]
    fn test_embedded_names_flag_is_kept() {
        let data = BsaFixture::new(105)
            .archive_flags(0x103)
            .folder("strings", vec![FixtureFile::new("a.strings", b"abc".to_vec())])
            .build();
        let index = parse(&data).unwrap();
        assert!(index.has_embedded_names());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_custom_filter() {
        let data = BsaFixture::new(104)
            .folder("interface", vec![FixtureFile::new("a.swf", b"abc".to_vec())])
            .build();
        let filter = PathFilter::new("interface/", &[".swf"]);
        let index = BsaIndex::parse_with_filter(&mut Cursor::new(&data), &filter).unwrap();
        assert_eq!(index.entries()[0].path, "interface/a.swf");
    }
}
