//! Command-line front end for seeding a translation memory.
//!
//! Two subcommands map to the two matching strategies of `tmseed-align`:
//!
//! - `tmseed archive`: official tables inside `Skyrim - Interface.bsa`
//!   against a directory of translated tables
//! - `tmseed dirs`: two directories of tables, matched by file name
//!
//! Both write a `Source\tTarget` TSV and report
//! `matched_files=.. unmatched_files=.. pairs=.. out=..` on completion.
//!
//! # Example
//!
//! ```no_run
//! use tmseed_cli::{Cli, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     let cli = Cli::from_args();
//!     let summary = run(&cli.command)?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod run;

pub use config::{ArchiveArgs, Cli, Command, CommonArgs, DirsArgs, ScriptArg};
pub use error::{CliError, Result};
pub use run::{RunSummary, run};
