//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`SourceKindArg`] - source selection as a clap value
//!
//! [`Args`] converts into the library's configuration types, so the binary
//! holds no export logic of its own:
//!
//! ```rust
//! use clap::Parser;
//! use postpack::cli::Args;
//!
//! let args = Args::parse_from(["postpack", "tg", "result.json", "--delimiter", ";"]);
//! let config = args.export_config()?;
//! assert_eq!(config.delimiter, b';');
//! # Ok::<(), postpack::PostpackError>(())
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::{DEFAULT_OUTPUT_PATH, ExportConfig, SourceConfig, parse_delimiter};
use crate::error::Result;
use crate::source::SourceKind;

/// Export a channel's post history to CSV with reaction and
/// engagement metrics.
#[derive(Parser, Debug, Clone)]
#[command(name = "postpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    postpack telegram result.json
    postpack tg result.json --channel @my_channel -o data/my_channel.csv
    postpack jsonl dump.jsonl --delimiter ';'
    POSTPACK_CHANNEL=my_channel postpack tg result.json -v")]
pub struct Args {
    /// Message source type
    #[arg(value_enum)]
    pub source: SourceKindArg,

    /// Path to input file
    pub input: PathBuf,

    /// Channel to export (title or numeric id; @handles and t.me links are
    /// accepted unverified for Telegram Desktop exports)
    #[arg(long, env = "POSTPACK_CHANNEL")]
    pub channel: Option<String>,

    /// Path to output CSV file
    #[arg(short, long, env = "POSTPACK_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Column delimiter (single character, or "tab")
    #[arg(long, default_value = ",")]
    pub delimiter: String,

    /// Fail on undecodable source records instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds and validates the exporter configuration.
    pub fn export_config(&self) -> Result<ExportConfig> {
        let config = ExportConfig::new()
            .with_output_path(&self.output)
            .with_delimiter(parse_delimiter(&self.delimiter)?);
        config.validate()?;
        Ok(config)
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::new().with_skip_invalid(!self.strict)
    }

    /// Default log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "postpack=warn",
            1 => "postpack=info",
            _ => "postpack=debug",
        }
    }
}

/// Source selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SourceKindArg {
    /// Telegram Desktop channel export (result.json)
    #[value(alias = "tg")]
    Telegram,

    /// JSON Lines dump, one message per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<SourceKindArg> for SourceKind {
    fn from(arg: SourceKindArg) -> SourceKind {
        match arg {
            SourceKindArg::Telegram => SourceKind::Telegram,
            SourceKindArg::Jsonl => SourceKind::Jsonl,
        }
    }
}

impl std::fmt::Display for SourceKindArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", SourceKind::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["postpack", "telegram", "result.json"]);
        assert_eq!(args.source, SourceKindArg::Telegram);
        assert_eq!(args.input, Path::new("result.json"));
        assert!(!args.strict);
        assert_eq!(args.verbose, 0);

        let config = args.export_config().unwrap();
        assert_eq!(config, ExportConfig::new());
        assert!(args.source_config().skip_invalid);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse(&["postpack", "tg", "a.json"]).source, SourceKindArg::Telegram);
        assert_eq!(parse(&["postpack", "ndjson", "a.jsonl"]).source, SourceKindArg::Jsonl);
        assert!(Args::try_parse_from(["postpack", "discord", "a.json"]).is_err());
    }

    #[test]
    fn test_flags() {
        let args = parse(&[
            "postpack",
            "jsonl",
            "dump.jsonl",
            "--channel",
            "@durov",
            "-o",
            "out.csv",
            "--delimiter",
            "tab",
            "--strict",
            "-vv",
        ]);
        assert_eq!(args.channel.as_deref(), Some("@durov"));
        assert!(!args.source_config().skip_invalid);
        assert_eq!(args.log_filter(), "postpack=debug");

        let config = args.export_config().unwrap();
        assert_eq!(config.output_path, Path::new("out.csv"));
        assert_eq!(config.delimiter, b'\t');
    }

    #[test]
    fn test_bad_delimiter() {
        let args = parse(&["postpack", "tg", "result.json", "--delimiter", ";;"]);
        assert!(args.export_config().is_err());

        let args = parse(&["postpack", "tg", "result.json", "--delimiter", "\""]);
        assert!(args.export_config().is_err());
    }

    #[test]
    fn test_source_kind_conversion() {
        assert_eq!(SourceKind::from(SourceKindArg::Jsonl), SourceKind::Jsonl);
        assert_eq!(SourceKindArg::Telegram.to_string(), "Telegram");
    }
}
