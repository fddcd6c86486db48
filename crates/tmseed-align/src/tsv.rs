//! Tab-separated corpus output
//!
//! UTF-8, `\n` line endings, a `Source\tTarget` header and one row per pair.

use crate::corpus::TmPair;
use crate::error::{AlignError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Header row
pub const TSV_HEADER: &str = "Source\tTarget";

/// Replace tabs and line breaks with spaces, then trim
pub fn sanitize_field(text: &str) -> String {
    text.replace(['\t', '\r', '\n'], " ").trim().to_string()
}

/// Write the header and one row per pair, returning the rows written
///
/// Pairs with a field that is empty after sanitizing are dropped.
pub fn write_tsv<'a, W, I>(writer: &mut W, pairs: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a TmPair>,
{
    writeln!(writer, "{TSV_HEADER}")?;

    let mut rows = 0;
    for pair in pairs {
        let source = sanitize_field(&pair.source);
        let target = sanitize_field(&pair.target);
        if source.is_empty() || target.is_empty() {
            continue;
        }
        writeln!(writer, "{source}\t{target}")?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

/// Write a TSV file, creating parent directories as needed
pub fn write_tsv_file<'a, I>(path: &Path, pairs: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a TmPair>,
{
    let io_err = |source| AlignError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    let rows = write_tsv(&mut writer, pairs).map_err(io_err)?;
    debug!("Wrote {} rows to {}", rows, path.display());
    Ok(rows)
}
