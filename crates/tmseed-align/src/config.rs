//! Configuration for alignment runs

use crate::error::{AlignError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Longest source text kept unless `keep_long` is set
pub const DEFAULT_MAX_SOURCE_CHARS: usize = 120;

/// Longest target text kept unless `keep_long` is set
pub const DEFAULT_MAX_TARGET_CHARS: usize = 200;

/// Locale suffix the directory strategy looks for on source files
pub const DEFAULT_SOURCE_LOCALE: &str = "en";

/// Script a target text must contain at least one character of
///
/// This is how a run keeps only genuinely translated strings: an untranslated
/// target copied from the source has no character of the target script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetScript {
    /// Precomposed Hangul syllables (U+AC00 to U+D7A3)
    #[default]
    Hangul,
    /// Hiragana and Katakana
    Kana,
    /// CJK unified ideographs, including extension A
    Han,
    /// Basic Cyrillic
    Cyrillic,
    /// No script restriction
    Any,
    /// Explicit inclusive character ranges
    Custom(Vec<(char, char)>),
}

impl TargetScript {
    /// Whether `text` contains at least one character of this script
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Hangul => text.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c)),
            Self::Kana => text.chars().any(|c| ('\u{3040}'..='\u{30FF}').contains(&c)),
            Self::Han => text.chars().any(|c| {
                ('\u{4E00}'..='\u{9FFF}').contains(&c) || ('\u{3400}'..='\u{4DBF}').contains(&c)
            }),
            Self::Cyrillic => text.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c)),
            Self::Any => true,
            Self::Custom(ranges) => text
                .chars()
                .any(|c| ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c))),
        }
    }
}

/// Settings for one alignment run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Keep multi-line and over-length pairs, and align long-form tables
    pub keep_long: bool,

    /// Script the target text must contain
    pub target_script: TargetScript,

    /// Maximum source length in characters
    pub max_source_chars: usize,

    /// Maximum target length in characters
    pub max_target_chars: usize,

    /// Only align source files whose name contains `_<locale>.`
    pub source_locale: Option<String>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            keep_long: false,
            target_script: TargetScript::Hangul,
            max_source_chars: DEFAULT_MAX_SOURCE_CHARS,
            max_target_chars: DEFAULT_MAX_TARGET_CHARS,
            source_locale: Some(DEFAULT_SOURCE_LOCALE.to_string()),
        }
    }
}

impl AlignConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AlignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Keep long and multi-line pairs
    #[must_use]
    pub const fn with_keep_long(mut self, keep_long: bool) -> Self {
        self.keep_long = keep_long;
        self
    }

    /// Set the target script
    #[must_use]
    pub fn with_target_script(mut self, script: TargetScript) -> Self {
        self.target_script = script;
        self
    }

    /// Set the source locale filter; empty or `None` disables it
    #[must_use]
    pub fn with_source_locale(mut self, locale: Option<&str>) -> Self {
        self.source_locale = locale
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        self
    }

    /// Set the length limits
    #[must_use]
    pub const fn with_length_limits(mut self, max_source: usize, max_target: usize) -> Self {
        self.max_source_chars = max_source;
        self.max_target_chars = max_target;
        self
    }

    /// Filename fragment the locale filter looks for, e.g. `_english.`
    pub fn locale_marker(&self) -> Option<String> {
        self.source_locale
            .as_ref()
            .map(|l| format!("_{}.", l.to_lowercase()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_source_chars == 0 || self.max_target_chars == 0 {
            return Err(AlignError::InvalidConfig(
                "length limits must be greater than zero".to_string(),
            ));
        }

        if let Some(locale) = &self.source_locale
            && (locale.is_empty() || locale.contains(['/', '\\', '.']))
        {
            return Err(AlignError::InvalidConfig(format!(
                "invalid source locale: {locale:?}"
            )));
        }

        if let TargetScript::Custom(ranges) = &self.target_script {
            if ranges.is_empty() {
                return Err(AlignError::InvalidConfig(
                    "custom target script needs at least one range".to_string(),
                ));
            }
            if let Some((lo, hi)) = ranges.iter().find(|(lo, hi)| lo > hi) {
                return Err(AlignError::InvalidConfig(format!(
                    "empty character range {lo:?}..={hi:?}"
                )));
            }
        }

        Ok(())
    }
}
