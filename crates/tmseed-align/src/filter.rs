//! Content filter applied to every candidate pair

use crate::config::AlignConfig;
use std::fmt;

/// Why a candidate pair was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Source or target is empty
    Empty,
    /// Target is byte-for-byte the source
    Identical,
    /// Target has no character of the configured script
    NoTargetScript,
    /// Source or target contains a line break
    Multiline,
    /// Source or target exceeds its length limit
    TooLong,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Empty => "empty",
            Self::Identical => "identical",
            Self::NoTargetScript => "no target script",
            Self::Multiline => "multi-line",
            Self::TooLong => "too long",
        };
        f.write_str(reason)
    }
}

/// Check a candidate pair against the run configuration
///
/// Checks run in order: emptiness, identity, target script, then (unless
/// `keep_long`) line breaks and length limits counted in characters.
pub fn check_pair(source: &str, target: &str, config: &AlignConfig) -> Result<(), Rejection> {
    if source.is_empty() || target.is_empty() {
        return Err(Rejection::Empty);
    }
    if source == target {
        return Err(Rejection::Identical);
    }
    if !config.target_script.matches(target) {
        return Err(Rejection::NoTargetScript);
    }
    if !config.keep_long {
        if source.contains('\n') || target.contains('\n') {
            return Err(Rejection::Multiline);
        }
        if source.chars().count() > config.max_source_chars
            || target.chars().count() > config.max_target_chars
        {
            return Err(Rejection::TooLong);
        }
    }
    Ok(())
}
