//! Translation-memory seeding from localized STRINGS tables
//!
//! Pairs the string tables of two locales by file name, joins them by string
//! identifier, filters the candidates down to genuinely translated text, and
//! collects the result into a deduplicated corpus sorted by normalized
//! source text.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tmseed_align::{AlignConfig, Aligner, StringSource, write_tsv_file};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = StringSource::archive("Skyrim - Interface.bsa")?;
//! let target = StringSource::directory("community/Strings")?;
//!
//! let mut aligner = Aligner::new(AlignConfig::default());
//! aligner.align(&source, &target)?;
//! let (corpus, stats) = aligner.finish();
//!
//! write_tsv_file("tm.tsv".as_ref(), corpus.pairs())?;
//! println!("{stats}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod aligner;
pub mod config;
pub mod corpus;
pub mod discover;
pub mod error;
pub mod filter;
pub mod tsv;

pub use aligner::{AlignStats, Aligner, StringSource};
pub use config::{AlignConfig, TargetScript};
pub use corpus::{TmCorpus, TmPair, normalize_key};
pub use error::{AlignError, Result};
pub use filter::{Rejection, check_pair};
pub use tsv::{sanitize_field, write_tsv, write_tsv_file};
