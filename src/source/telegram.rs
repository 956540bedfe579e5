//! Telegram Desktop channel export source.
//!
//! Telegram Desktop ("Export chat history" → JSON) writes a `result.json`:
//! ```json
//! {
//!   "name": "Channel Title",
//!   "type": "public_channel",
//!   "id": 1234567890,
//!   "messages": [
//!     {"id": 1, "type": "service", "action": "create_channel", ...},
//!     {
//!       "id": 2,
//!       "type": "message",
//!       "date": "2024-01-15T10:30:00",
//!       "date_unixtime": "1705314600",
//!       "text": "Hello" | ["Hello ", {"type": "bold", "text": "world"}],
//!       "views": 1200,
//!       "reactions": [{"type": "emoji", "count": 5, "emoji": "👍"}]
//!     }
//!   ]
//! }
//! ```
//!
//! `date` is a wall-clock value without offset, so `date_unixtime` is
//! preferred whenever it is usable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{MessageSource, MessageStream, is_username_reference, normalize_channel};
use crate::config::SourceConfig;
use crate::error::{PostpackError, Result};
use crate::message::{RawMessage, RawTimestamp};
use crate::parsing::{extract_text, parse_count, parse_reactions, parse_timestamp};

/// Reads one channel from a Telegram Desktop JSON export.
///
/// A requested channel is checked against the export's title and numeric
/// id. Usernames and `t.me` links can't be checked, since the export
/// doesn't record them; they are accepted with a warning.
///
/// # Example
///
/// ```rust,no_run
/// use postpack::source::{MessageSource, TelegramExportSource};
///
/// let source = TelegramExportSource::new("result.json");
/// for message in source.fetch(Some("@my_channel"))? {
///     let message = message?;
///     println!("{}: {:?}", message.id, message.text);
/// }
/// # Ok::<(), postpack::PostpackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TelegramExportSource {
    path: PathBuf,
    config: SourceConfig,
}

impl TelegramExportSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_config(path, SourceConfig::default())
    }

    pub fn with_config(path: impl AsRef<Path>, config: SourceConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChannelExport {
    name: Option<String>,
    id: Option<i64>,
    messages: Option<Vec<Value>>,
}

/// One entry of the `messages` array.
#[derive(Debug, Deserialize)]
struct ExportPost {
    id: u64,
    /// "message" or "service"
    #[serde(rename = "type")]
    msg_type: Option<String>,
    date: Option<Value>,
    date_unixtime: Option<Value>,
    text: Option<Value>,
    views: Option<Value>,
    reactions: Option<Value>,
}

impl ExportPost {
    fn is_service(&self) -> bool {
        self.msg_type.as_deref().is_some_and(|t| t != "message")
    }

    fn timestamp(&self) -> Option<RawTimestamp> {
        let unix = self.date_unixtime.as_ref().and_then(parse_timestamp);
        match unix {
            Some(RawTimestamp::Unparsable(_)) | None => {
                self.date.as_ref().and_then(parse_timestamp).or(unix)
            }
            usable => usable,
        }
    }

    fn into_raw(self) -> RawMessage {
        RawMessage {
            id: self.id,
            date: self.timestamp(),
            text: self.text.as_ref().and_then(extract_text),
            views: self.views.as_ref().and_then(parse_count),
            reactions: self.reactions.as_ref().and_then(parse_reactions),
        }
    }
}

impl MessageSource for TelegramExportSource {
    fn name(&self) -> &'static str {
        "Telegram"
    }

    fn fetch(&self, channel: Option<&str>) -> Result<MessageStream<'_>> {
        let content = fs::read_to_string(&self.path)?;
        let export: ChannelExport = serde_json::from_str(&content)
            .map_err(|e| PostpackError::telegram_parse(e, Some(self.path.clone())))?;

        if let Some(requested) = channel {
            check_channel(requested, &export)?;
        }

        let messages = export.messages.ok_or_else(|| {
            PostpackError::invalid_format("Telegram JSON", "missing 'messages' array")
        })?;
        debug!(
            path = %self.path.display(),
            channel = export.name.as_deref().unwrap_or_default(),
            entries = messages.len(),
            "loaded Telegram export"
        );

        let skip_invalid = self.config.skip_invalid;
        let path = self.path.clone();
        let stream = messages
            .into_iter()
            .enumerate()
            .filter_map(move |(index, value)| decode_entry(index, value, skip_invalid, &path));

        Ok(Box::new(stream))
    }
}

fn check_channel(requested: &str, export: &ChannelExport) -> Result<()> {
    let wanted = normalize_channel(requested);
    let name_matches = export
        .name
        .as_deref()
        .is_some_and(|name| normalize_channel(name) == wanted);
    let id_matches = export.id.is_some_and(|id| id.to_string() == wanted);

    if name_matches || id_matches {
        return Ok(());
    }

    // Desktop exports record the title and id only, never the username.
    if is_username_reference(requested) {
        warn!(
            channel = requested,
            export = export.name.as_deref().unwrap_or_default(),
            "export does not record usernames, channel not verified"
        );
        return Ok(());
    }

    Err(PostpackError::channel_not_found(
        requested,
        export.name.clone(),
    ))
}

fn decode_entry(
    index: usize,
    value: Value,
    skip_invalid: bool,
    path: &Path,
) -> Option<Result<RawMessage>> {
    match serde_json::from_value::<ExportPost>(value) {
        Ok(post) if post.is_service() => {
            trace!(id = post.id, "skipping service entry");
            None
        }
        Ok(post) => Some(Ok(post.into_raw())),
        Err(e) if skip_invalid => {
            warn!(index, error = %e, "skipping undecodable Telegram entry");
            None
        }
        Err(e) => Some(Err(PostpackError::telegram_parse(
            e,
            Some(path.to_path_buf()),
        ))),
    }
}
