//! Configuration types for sources and export.
//!
//! Plain builder structs, usable from library code without any CLI
//! framework. The binary fills them from command-line flags and the
//! environment.
//!
//! # Example
//!
//! ```rust
//! use postpack::config::{ExportConfig, SourceConfig};
//!
//! let export = ExportConfig::new()
//!     .with_output_path("out/channel.csv")
//!     .with_delimiter(b';');
//!
//! let source = SourceConfig::new().with_skip_invalid(false);
//!
//! assert_eq!(export.delimiter, b';');
//! assert!(!source.skip_invalid);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PostpackError, Result};

/// Default destination of the CSV export.
pub const DEFAULT_OUTPUT_PATH: &str = "data/posts.csv";

/// Configuration for the CSV exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Destination file; overwritten if it exists (default: `data/posts.csv`)
    pub output_path: PathBuf,

    /// Column delimiter (default: `,`)
    pub delimiter: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            delimiter: b',',
        }
    }
}

impl ExportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the destination file.
    #[must_use]
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }

    /// Sets the column delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Checks that the configuration can produce a readable file.
    ///
    /// The delimiter must be a printable ASCII byte, space or tab, and not
    /// the quote character.
    pub fn validate(&self) -> Result<()> {
        let d = self.delimiter;
        let usable = d == b'\t' || d == b' ' || (d.is_ascii_graphic() && d != b'"');
        if !usable {
            return Err(PostpackError::invalid_config(format!(
                "unusable delimiter {:?}",
                char::from(d)
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(PostpackError::invalid_config("output path is empty"));
        }
        Ok(())
    }
}

/// Parses a delimiter given as text: a single character or `tab` / `\t`.
pub fn parse_delimiter(input: &str) -> Result<u8> {
    match input {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(PostpackError::invalid_config(format!(
            "delimiter must be a single ASCII character, got '{other}'"
        ))),
    }
}

/// Configuration for file-backed message sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Skip records that cannot be decoded instead of failing the run (default: true)
    pub skip_invalid: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { skip_invalid: true }
    }
}

impl SourceConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip invalid records.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}
