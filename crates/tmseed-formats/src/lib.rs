//! File format parsers for Bethesda game localization data
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::use_self)] // Type clarity
//! This crate reads the two formats needed to mine translation memory from
//! Bethesda games:
//!
//! - **BSA**: the archive container (versions 104 and 105) that ships the
//!   official STRINGS tables, e.g. `Skyrim - Interface.bsa`
//! - **STRINGS**: localized string tables mapping numeric identifiers to text
//!
//! The two modules are independent. An archive entry's bytes are fed into the
//! table decoder by the caller.
//!
//! # Design Principles
//!
//! - **Lazy payloads**: archives are indexed once, payloads read on demand
//! - **Fatal index errors**: a corrupt archive index is never partially used
//! - **Lenient tables**: a bad string entry is skipped, not the whole table

#![warn(missing_docs)]

/// BSA archive index and payload access
///
/// Parses the header, folder records, folder name blocks and file-name block
/// of a BSA archive into a filtered index of `folder/file` paths.
///
/// See the [`bsa`] module for the supported layout and usage.
pub mod bsa;
/// Localized STRINGS table decoding
pub mod strings;
