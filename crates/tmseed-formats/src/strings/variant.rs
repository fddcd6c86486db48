//! STRINGS table variants and their data layouts

use std::fmt;
use std::path::Path;

/// How each string is stored in the data region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataLayout {
    /// Bytes up to the next NUL
    NulTerminated,
    /// u32 length (including the trailing NUL) followed by the bytes
    LengthPrefixed,
}

/// Localized string table kinds, chosen by file suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringsVariant {
    /// `.strings`: names and short labels
    Strings,
    /// `.dlstrings`: descriptions
    DlStrings,
    /// `.ilstrings`: dialogue
    IlStrings,
}

impl StringsVariant {
    /// All variants
    pub const ALL: [Self; 3] = [Self::Strings, Self::DlStrings, Self::IlStrings];

    /// Detect the variant from a file name (case-insensitive)
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".dlstrings") {
            Some(Self::DlStrings)
        } else if lower.ends_with(".ilstrings") {
            Some(Self::IlStrings)
        } else if lower.ends_with(".strings") {
            Some(Self::Strings)
        } else {
            None
        }
    }

    /// Detect the variant from a path's file name
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::from_file_name)
    }

    /// Lower-case file suffix including the dot
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Strings => ".strings",
            Self::DlStrings => ".dlstrings",
            Self::IlStrings => ".ilstrings",
        }
    }

    /// Data region layout
    pub const fn layout(self) -> DataLayout {
        match self {
            Self::Strings => DataLayout::NulTerminated,
            Self::DlStrings | Self::IlStrings => DataLayout::LengthPrefixed,
        }
    }
}

impl fmt::Display for StringsVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
