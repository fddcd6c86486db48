//! Execution of a parsed command.

use crate::config::Command;
use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tmseed_align::{AlignConfig, AlignStats, Aligner, StringSource, write_tsv_file};
use tracing::{debug, info};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Alignment counters
    pub stats: AlignStats,
    /// Rows written to the TSV
    pub rows: usize,
    /// Output path
    pub out: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} out={}", self.stats, self.out.display())
    }
}

/// Run a command to completion.
///
/// Inputs are checked and every fatal error is raised before the output
/// file is created.
pub fn run(command: &Command) -> Result<RunSummary> {
    command.validate_inputs()?;
    let config = command.align_config()?;
    debug!("Alignment settings: {:?}", config);

    let (source, target) = match command {
        Command::Archive(args) => (
            StringSource::archive(&args.archive)?,
            StringSource::directory(&args.target_root)?,
        ),
        Command::Dirs(args) => (
            StringSource::directory(&args.source_root)?,
            StringSource::directory(&args.target_root)?,
        ),
    };

    align_and_write(config, &source, &target, &command.common().out)
}

fn align_and_write(
    config: AlignConfig,
    source: &StringSource,
    target: &StringSource,
    out: &Path,
) -> Result<RunSummary> {
    let mut aligner = Aligner::new(config);
    aligner.align(source, target)?;
    let (corpus, stats) = aligner.finish();

    if stats.skipped_files > 0 {
        info!("Skipped {} unreadable or unsupported files", stats.skipped_files);
    }

    let rows = write_tsv_file(out, corpus.pairs())?;
    Ok(RunSummary {
        stats,
        rows,
        out: out.to_path_buf(),
    })
}
