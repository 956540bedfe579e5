//! Unified error types for postpack.
//!
//! This module provides a single [`PostpackError`] enum that covers every
//! failure the pipeline can surface. Record-level defects (missing text,
//! missing views, malformed reaction entries, naive or unparsable
//! timestamps) are *not* errors: the normalizer resolves them with
//! documented defaults. What remains here are failures of the run itself:
//!
//! - **Source failures** - the input cannot be read or is not a channel dump
//! - **Destination failures** - the CSV file cannot be written
//!
//! An empty dataset is not an error either; see
//! [`ExportOutcome::NoData`](crate::core::output::ExportOutcome::NoData).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for postpack operations.
///
/// # Example
///
/// ```rust
/// use postpack::error::Result;
/// use postpack::RawMessage;
///
/// fn load() -> Result<Vec<RawMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, PostpackError>;

/// The error type for all postpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PostpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input dump doesn't exist or can't be read
    /// - The output directory is not writable
    /// - Disk is full while writing the CSV
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A record or file of the input could not be decoded.
    #[error("Failed to parse {format} input{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The input format being read (e.g., "Telegram JSON", "JSON Lines")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The input doesn't have the structure of a channel dump.
    ///
    /// For example a Telegram export without a `messages` array.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The requested channel is not the one the source holds.
    #[error("Channel '{channel}' not found{}", available.as_ref().map(|a| format!(" (source contains '{a}')")).unwrap_or_default())]
    ChannelNotFound {
        /// The channel that was requested
        channel: String,
        /// The channel the source actually contains, if known
        available: Option<String>,
    },

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding error.
    #[cfg(any(feature = "telegram", feature = "jsonl"))]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON decoding error
    #[cfg(any(feature = "telegram", feature = "jsonl"))]
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Generic parsing error
    #[error("{0}")]
    Other(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl PostpackError {
    /// Creates a parse error for the Telegram export format.
    #[cfg(feature = "telegram")]
    pub fn telegram_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        PostpackError::Parse {
            format: "Telegram JSON",
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates a parse error for the JSON Lines dump format.
    #[cfg(feature = "jsonl")]
    pub fn jsonl_parse(line: usize, source: serde_json::Error, path: Option<PathBuf>) -> Self {
        PostpackError::Parse {
            format: "JSON Lines",
            source: ParseErrorKind::Other(format!("line {line}: {source}")),
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        PostpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a channel-not-found error.
    pub fn channel_not_found(channel: impl Into<String>, available: Option<String>) -> Self {
        PostpackError::ChannelNotFound {
            channel: channel.into(),
            available,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        PostpackError::InvalidConfig(message.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, PostpackError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, PostpackError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, PostpackError::InvalidFormat { .. })
    }

    /// Returns `true` if the requested channel was not found.
    pub fn is_channel_not_found(&self) -> bool {
        matches!(self, PostpackError::ChannelNotFound { .. })
    }
}

impl From<std::string::FromUtf8Error> for PostpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        PostpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

impl From<tempfile::PersistError> for PostpackError {
    fn from(err: tempfile::PersistError) -> Self {
        PostpackError::Io(err.error)
    }
}
