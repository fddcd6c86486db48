//! Command-line configuration.
//!
//! Every flag can also be set through a `TMSEED_*` environment variable.
//! Alignment settings are resolved in three layers: built-in defaults, then
//! an optional JSON file (`--config`), then explicit flags.
//!
//! # Example
//!
//! ```no_run
//! use tmseed_cli::Cli;
//!
//! let cli = Cli::from_args();
//! let config = cli.command.align_config().expect("Invalid configuration");
//! println!("keep_long: {}", config.keep_long);
//! ```

use crate::error::{CliError, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tmseed_align::{AlignConfig, TargetScript};

/// Top-level arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tmseed",
    about = "Seed a translation memory from localized Bethesda STRINGS tables",
    version
)]
pub struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Matching strategy
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Default log filter when `RUST_LOG` is unset.
    #[must_use]
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Matching strategies.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Match official tables inside a BSA archive against a directory of
    /// translated tables
    Archive(ArchiveArgs),

    /// Match tables with the same name under two directory roots
    Dirs(DirsArgs),
}

impl Command {
    /// Shared options of either subcommand.
    #[must_use]
    pub const fn common(&self) -> &CommonArgs {
        match self {
            Self::Archive(args) => &args.common,
            Self::Dirs(args) => &args.common,
        }
    }

    /// Resolve the alignment settings for this run.
    pub fn align_config(&self) -> Result<AlignConfig> {
        let config = self.common().align_config()?;
        let config = match self {
            Self::Dirs(args) => match &args.source_locale {
                Some(locale) => config.with_source_locale(Some(locale.as_str())),
                None => config,
            },
            Self::Archive(_) => config,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every input path exists.
    pub fn validate_inputs(&self) -> Result<()> {
        match self {
            Self::Archive(args) => {
                require("--archive", &args.archive)?;
                require("--target-root", &args.target_root)?;
            }
            Self::Dirs(args) => {
                require("--source-root", &args.source_root)?;
                require("--target-root", &args.target_root)?;
            }
        }
        if let Some(path) = &self.common().config {
            require("--config", path)?;
        }
        Ok(())
    }
}

fn require(flag: &'static str, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::MissingInput {
            flag,
            path: path.to_path_buf(),
        })
    }
}

/// Arguments of `tmseed archive`.
#[derive(Debug, Clone, Args)]
pub struct ArchiveArgs {
    /// Archive holding the source-language tables, e.g. `Skyrim - Interface.bsa`
    #[arg(long, env = "TMSEED_ARCHIVE", alias = "interface-bsa")]
    pub archive: PathBuf,

    /// Directory holding the translated tables
    #[arg(long, env = "TMSEED_TARGET_ROOT", alias = "community-root")]
    pub target_root: PathBuf,

    /// Shared options
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments of `tmseed dirs`.
#[derive(Debug, Clone, Args)]
pub struct DirsArgs {
    /// Directory holding the source-language tables
    #[arg(long, env = "TMSEED_SOURCE_ROOT")]
    pub source_root: PathBuf,

    /// Directory holding the translated tables
    #[arg(long, env = "TMSEED_TARGET_ROOT")]
    pub target_root: PathBuf,

    /// Only use source files named `*_<locale>.*`; empty disables the filter
    /// [default: en]
    #[arg(long, env = "TMSEED_SOURCE_LOCALE")]
    pub source_locale: Option<String>,

    /// Shared options
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by both subcommands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Output TSV path
    #[arg(long, env = "TMSEED_OUT")]
    pub out: PathBuf,

    /// Keep multi-line and long entries, and align long-form tables
    #[arg(long, env = "TMSEED_KEEP_LONG", alias = "include-long")]
    pub keep_long: bool,

    /// Script every kept target must contain [default: hangul]
    #[arg(long, value_enum, env = "TMSEED_TARGET_SCRIPT")]
    pub target_script: Option<ScriptArg>,

    /// JSON file with alignment settings; flags override its values
    #[arg(long, env = "TMSEED_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    /// Alignment settings from the config file (if any) and these flags.
    pub fn align_config(&self) -> Result<AlignConfig> {
        let mut config = match &self.config {
            Some(path) => AlignConfig::from_json_file(path)?,
            None => AlignConfig::default(),
        };
        if self.keep_long {
            config = config.with_keep_long(true);
        }
        if let Some(script) = self.target_script {
            config = config.with_target_script(script.into());
        }
        Ok(config)
    }
}

/// Target scripts selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptArg {
    /// Korean Hangul syllables
    Hangul,
    /// Japanese Hiragana and Katakana
    Kana,
    /// CJK ideographs
    Han,
    /// Cyrillic
    Cyrillic,
    /// No restriction
    Any,
}

impl From<ScriptArg> for TargetScript {
    fn from(arg: ScriptArg) -> Self {
        match arg {
            ScriptArg::Hangul => Self::Hangul,
            ScriptArg::Kana => Self::Kana,
            ScriptArg::Han => Self::Han,
            ScriptArg::Cyrillic => Self::Cyrillic,
            ScriptArg::Any => Self::Any,
        }
    }
}
