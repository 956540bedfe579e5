//! Message sources: where raw channel history comes from.
//!
//! A [`MessageSource`] hands the pipeline a lazy sequence of
//! [`RawMessage`] values for one channel. The pipeline consumes it with
//! plain iteration, one record at a time.
//!
//! # Available Sources
//!
//! - [`MemorySource`] - records already held in memory
//! - [`TelegramExportSource`] - Telegram Desktop channel export (`result.json`)
//! - [`JsonLinesSource`] - one JSON record per line, as written by API dumpers
//!
//! # Example
//!
//! ```rust
//! use postpack::RawMessage;
//! use postpack::source::{MemorySource, MessageSource};
//!
//! let source = MemorySource::new(vec![RawMessage::new(1).with_text("Hi")]);
//! let messages: Vec<_> = source.fetch(None)?.collect::<Result<_, _>>()?;
//! assert_eq!(messages.len(), 1);
//! # Ok::<(), postpack::PostpackError>(())
//! ```

#[cfg(feature = "jsonl")]
mod jsonl;
#[cfg(feature = "telegram")]
mod telegram;

#[cfg(feature = "jsonl")]
pub use jsonl::JsonLinesSource;
#[cfg(feature = "telegram")]
pub use telegram::TelegramExportSource;

#[cfg(all(feature = "telegram", feature = "jsonl"))]
use std::path::Path;

use serde::{Deserialize, Serialize};

#[cfg(all(feature = "telegram", feature = "jsonl"))]
use crate::config::SourceConfig;
use crate::error::Result;
use crate::message::RawMessage;

/// A lazy, finite stream of raw messages.
pub type MessageStream<'a> = Box<dyn Iterator<Item = Result<RawMessage>> + 'a>;

/// Supplies the message history of a channel.
pub trait MessageSource {
    /// Returns the human-readable name of this source.
    fn name(&self) -> &'static str;

    /// Retrieves all messages of `channel`.
    ///
    /// `None` accepts whatever channel the source holds. Errors that prevent
    /// retrieval altogether (unreadable input, wrong channel) are returned
    /// here; errors met while iterating are yielded by the stream.
    fn fetch(&self, channel: Option<&str>) -> Result<MessageStream<'_>>;
}

/// A source backed by records already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    messages: Vec<RawMessage>,
}

impl MemorySource {
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self { messages }
    }
}

impl From<Vec<RawMessage>> for MemorySource {
    fn from(messages: Vec<RawMessage>) -> Self {
        Self::new(messages)
    }
}

impl MessageSource for MemorySource {
    fn name(&self) -> &'static str {
        "Memory"
    }

    fn fetch(&self, _channel: Option<&str>) -> Result<MessageStream<'_>> {
        Ok(Box::new(self.messages.iter().cloned().map(Ok)))
    }
}

/// Supported file-backed sources.
///
/// # Example
///
/// ```rust
/// use postpack::source::SourceKind;
/// use std::str::FromStr;
///
/// assert_eq!(SourceKind::from_str("tg").unwrap(), SourceKind::Telegram);
/// assert_eq!(SourceKind::from_str("ndjson").unwrap(), SourceKind::Jsonl);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SourceKind {
    /// Telegram Desktop channel export (JSON)
    #[serde(alias = "tg")]
    Telegram,

    /// JSON Lines dump, one message per line
    #[serde(alias = "ndjson")]
    Jsonl,
}

impl SourceKind {
    /// Returns all source names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["telegram", "tg", "jsonl", "ndjson"]
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Telegram => write!(f, "Telegram"),
            SourceKind::Jsonl => write!(f, "JSON Lines"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "telegram" | "tg" => Ok(SourceKind::Telegram),
            "jsonl" | "ndjson" => Ok(SourceKind::Jsonl),
            _ => Err(format!(
                "Unknown source: '{}'. Expected one of: {}",
                s,
                SourceKind::all_names().join(", ")
            )),
        }
    }
}

/// Creates a file-backed source of the given kind.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "telegram", feature = "jsonl"))]
/// # fn main() {
/// use postpack::config::SourceConfig;
/// use postpack::source::{SourceKind, create_source};
///
/// let source = create_source(SourceKind::Telegram, "result.json", SourceConfig::new());
/// assert_eq!(source.name(), "Telegram");
/// # }
/// # #[cfg(not(all(feature = "telegram", feature = "jsonl")))]
/// # fn main() {}
/// ```
#[cfg(all(feature = "telegram", feature = "jsonl"))]
pub fn create_source(
    kind: SourceKind,
    path: impl AsRef<Path>,
    config: SourceConfig,
) -> Box<dyn MessageSource> {
    match kind {
        SourceKind::Telegram => Box::new(TelegramExportSource::with_config(path, config)),
        SourceKind::Jsonl => Box::new(JsonLinesSource::with_config(path, config)),
    }
}

/// Canonical form of a channel reference for comparison.
///
/// Accepts `name`, `@name`, `t.me/name` and `https://t.me/name/`, and
/// lowercases the result.
///
/// ```rust
/// use postpack::source::normalize_channel;
///
/// assert_eq!(normalize_channel("https://t.me/ProfByuro_Channel/"), "profbyuro_channel");
/// assert_eq!(normalize_channel("@durov"), "durov");
/// ```
pub fn normalize_channel(channel: &str) -> String {
    let mut s = channel.trim();
    for prefix in ["https://", "http://"] {
        s = s.strip_prefix(prefix).unwrap_or(s);
    }
    for prefix in ["t.me/", "telegram.me/", "@"] {
        s = s.strip_prefix(prefix).unwrap_or(s);
    }
    s.trim_end_matches('/').to_lowercase()
}

/// Returns `true` if `channel` is a public username rather than a title or id.
///
/// `@name` and `t.me` / `telegram.me` links always count. A bare reference
/// counts when it has the shape of a username: 5 to 32 letters, digits or
/// underscores, starting with a letter.
///
/// ```rust
/// use postpack::source::is_username_reference;
///
/// assert!(is_username_reference("https://t.me/profbyuro_channel"));
/// assert!(is_username_reference("profbyuro_channel"));
/// assert!(!is_username_reference("Prof Byuro"));
/// assert!(!is_username_reference("1234567890"));
/// ```
pub fn is_username_reference(channel: &str) -> bool {
    let trimmed = channel.trim();
    let mut unprefixed = trimmed;
    for prefix in ["https://", "http://"] {
        unprefixed = unprefixed.strip_prefix(prefix).unwrap_or(unprefixed);
    }
    if trimmed.starts_with('@')
        || unprefixed.starts_with("t.me/")
        || unprefixed.starts_with("telegram.me/")
    {
        return true;
    }

    let name = normalize_channel(trimmed);
    (5..=32).contains(&name.len())
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
