//! Alignment of source and target string tables into a corpus
//!
//! Two strategies are supported:
//!
//! - **Directories**: files with the same name (case-insensitive) under two
//!   roots are paired. Only source files carrying the configured locale
//!   marker are considered.
//! - **Archive**: files under a target root are paired with archive entries
//!   of the same file name, wherever the entry sits in the archive. The
//!   archive is the source side.
//!
//! Within a pair, identifiers are visited in source-table order and files in
//! sorted path order, which fixes the first-seen-wins outcome of the corpus.

use crate::config::AlignConfig;
use crate::corpus::{TmCorpus, TmPair};
use crate::discover::{file_name_key, find_tables, index_by_file_name};
use crate::error::{AlignError, Result};
use crate::filter::check_pair;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tmseed_formats::bsa::{BsaArchive, BsaEntry};
use tmseed_formats::strings::{StringTable, StringsVariant};
use tracing::{debug, info, warn};

/// One side of an alignment
#[derive(Debug)]
pub enum StringSource {
    /// Directory tree of string-table files
    Directory(PathBuf),
    /// Opened archive
    Archive(BsaArchive),
}

impl StringSource {
    /// Directory source; the directory must exist
    pub fn directory<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AlignError::MissingInput(path.to_path_buf()));
        }
        Ok(Self::Directory(path.to_path_buf()))
    }

    /// Archive source; opens and indexes the archive
    pub fn archive<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AlignError::MissingInput(path.to_path_buf()));
        }
        Ok(Self::Archive(BsaArchive::open(path)?))
    }

    /// Short name of the source kind
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Directory(_) => "directory",
            Self::Archive(_) => "archive",
        }
    }
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignStats {
    /// File pairs that were found and decoded on both sides
    pub matched_files: usize,
    /// Files with no counterpart on the other side
    pub unmatched_files: usize,
    /// Files skipped because they could not be read
    pub skipped_files: usize,
    /// Pairs in the corpus
    pub pairs: usize,
}

impl fmt::Display for AlignStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matched_files={} unmatched_files={} pairs={}",
            self.matched_files, self.unmatched_files, self.pairs
        )
    }
}

/// Accumulates aligned pairs across any number of file pairs
#[derive(Debug, Default)]
pub struct Aligner {
    config: AlignConfig,
    corpus: TmCorpus,
    stats: AlignStats,
}

impl Aligner {
    /// Create an aligner with an empty corpus
    pub fn new(config: AlignConfig) -> Self {
        Self {
            config,
            corpus: TmCorpus::new(),
            stats: AlignStats::default(),
        }
    }

    /// Run configuration
    pub const fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Counters so far
    pub const fn stats(&self) -> &AlignStats {
        &self.stats
    }

    /// Corpus so far
    pub const fn corpus(&self) -> &TmCorpus {
        &self.corpus
    }

    /// Align two sources, picking the strategy from their kinds
    pub fn align(&mut self, source: &StringSource, target: &StringSource) -> Result<()> {
        match (source, target) {
            (StringSource::Directory(source_root), StringSource::Directory(target_root)) => {
                self.align_directories(source_root, target_root)
            }
            (StringSource::Archive(archive), StringSource::Directory(target_root)) => {
                self.align_archive(archive, target_root)
            }
            _ => Err(AlignError::UnsupportedPairing {
                source_kind: source.kind(),
                target_kind: target.kind(),
            }),
        }
    }

    /// Pair files with the same name under two directory roots
    pub fn align_directories(&mut self, source_root: &Path, target_root: &Path) -> Result<()> {
        for root in [source_root, target_root] {
            if !root.exists() {
                return Err(AlignError::MissingInput(root.to_path_buf()));
            }
        }
        self.config.validate()?;

        info!(
            "Aligning {} against {}",
            source_root.display(),
            target_root.display()
        );

        let targets = index_by_file_name(&find_tables(target_root, None)?);
        let marker = self.config.locale_marker();
        let sources = find_tables(source_root, marker.as_deref())?;

        for source_path in &sources {
            let Some(name) = file_name_key(source_path) else {
                continue;
            };
            let Some(target_path) = targets.get(&name) else {
                debug!("No target for {}", source_path.display());
                self.stats.unmatched_files += 1;
                continue;
            };
            let Some(variant) = StringsVariant::from_file_name(&name) else {
                continue;
            };

            let (source_bytes, target_bytes) = match (fs::read(source_path), fs::read(target_path))
            {
                (Ok(s), Ok(t)) => (s, t),
                (Err(e), _) | (_, Err(e)) => {
                    warn!(
                        "Failed to read {} / {}: {}",
                        source_path.display(),
                        target_path.display(),
                        e
                    );
                    self.stats.skipped_files += 1;
                    continue;
                }
            };

            self.align_bytes(&name, variant, &source_bytes, &target_bytes);
        }

        info!("Directory alignment done: {}", self.stats);
        Ok(())
    }

    /// Pair archive entries with same-named files under a target root
    pub fn align_archive(&mut self, archive: &BsaArchive, target_root: &Path) -> Result<()> {
        if !target_root.exists() {
            return Err(AlignError::MissingInput(target_root.to_path_buf()));
        }
        self.config.validate()?;

        info!(
            "Aligning {} ({} tables) against {}",
            archive.path().display(),
            archive.entries().len(),
            target_root.display()
        );

        // Folder is ignored; a later entry with the same name replaces an earlier one
        let by_name: HashMap<&str, &BsaEntry> = archive
            .entries()
            .iter()
            .map(|entry| (entry.file_name(), entry))
            .collect();

        for target_path in find_tables(target_root, None)? {
            let Some(name) = file_name_key(&target_path) else {
                continue;
            };
            let Some(entry) = by_name.get(name.as_str()) else {
                debug!("No archive entry for {}", target_path.display());
                self.stats.unmatched_files += 1;
                continue;
            };
            if entry.compressed {
                warn!("Skipping compressed entry {}", entry.path);
                self.stats.skipped_files += 1;
                continue;
            }
            let Some(variant) = StringsVariant::from_file_name(&name) else {
                continue;
            };
            if !self.config.keep_long && variant != StringsVariant::Strings {
                debug!("Skipping long-form table {}", entry.path);
                continue;
            }

            let source_bytes = match archive.fetch(entry) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Failed to read archive entry {}: {}", entry.path, e);
                    self.stats.skipped_files += 1;
                    continue;
                }
            };
            let target_bytes = match fs::read(&target_path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Failed to read {}: {}", target_path.display(), e);
                    self.stats.skipped_files += 1;
                    continue;
                }
            };

            self.align_bytes(&name, variant, &source_bytes, &target_bytes);
        }

        info!("Archive alignment done: {}", self.stats);
        Ok(())
    }

    fn align_bytes(
        &mut self,
        name: &str,
        variant: StringsVariant,
        source_bytes: &[u8],
        target_bytes: &[u8],
    ) {
        let source = StringTable::decode(variant, source_bytes);
        let target = StringTable::decode(variant, target_bytes);
        self.stats.matched_files += 1;

        let added = self.align_tables(&source, &target);
        debug!(
            "{}: {} source strings, {} target strings, {} new pairs",
            name,
            source.len(),
            target.len(),
            added
        );
    }

    /// Align two decoded tables and return how many pairs were added
    ///
    /// Does not touch the file counters.
    pub fn align_tables(&mut self, source: &StringTable, target: &StringTable) -> usize {
        if source.is_empty() || target.is_empty() {
            return 0;
        }

        let mut added = 0;
        for (id, source_text) in source.iter() {
            let Some(target_text) = target.get(id) else {
                continue;
            };
            if check_pair(source_text, target_text, &self.config).is_err() {
                continue;
            }
            if self.corpus.insert(TmPair::new(source_text, target_text)) {
                added += 1;
            }
        }

        self.stats.pairs = self.corpus.len();
        added
    }

    /// Finish the run, returning the corpus and final counters
    pub fn finish(self) -> (TmCorpus, AlignStats) {
        let mut stats = self.stats;
        stats.pairs = self.corpus.len();
        (self.corpus, stats)
    }
}
