//! Discovery of string-table files on disk

use crate::error::{AlignError, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use tmseed_formats::strings::StringsVariant;
use tracing::debug;
use walkdir::WalkDir;

/// Recursively find string-table files under `root`, sorted by path
///
/// When `locale_marker` is set (e.g. `_english.`), only files whose
/// lower-cased name contains it are returned.
pub fn find_tables(root: &Path, locale_marker: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|source| AlignError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_lowercase();
        if StringsVariant::from_file_name(&name).is_none() {
            continue;
        }
        if let Some(marker) = locale_marker
            && !name.contains(marker)
        {
            continue;
        }

        paths.push(entry.into_path());
    }

    paths.sort();
    debug!("Found {} string tables under {}", paths.len(), root.display());
    Ok(paths)
}

/// Lower-cased file name of a path
pub fn file_name_key(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
}

/// Index paths by lower-cased file name, keeping the first path per name
pub fn index_by_file_name(paths: &[PathBuf]) -> HashMap<String, PathBuf> {
    let mut by_name = HashMap::with_capacity(paths.len());
    for path in paths {
        let Some(key) = file_name_key(path) else {
            continue;
        };
        match by_name.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(path.clone());
            }
            Entry::Occupied(existing) => {
                debug!(
                    "Ignoring {} (name already taken by {})",
                    path.display(),
                    existing.get().display()
                );
            }
        }
    }
    by_name
}
