//! JSON Lines source for API message dumps.
//!
//! Each non-blank line holds one message object as an API client serializes
//! it:
//! ```json
//! {"id": 17, "date": "2024-01-15T10:30:00+00:00", "message": "Hello", "views": 100,
//!  "reactions": {"results": [{"reaction": {"_": "ReactionEmoji", "emoticon": "👍"}, "count": 5}]}}
//! ```
//!
//! `text` is accepted in place of `message`. Objects tagged
//! `"_": "MessageService"` are skipped. The file is read lazily.

use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{MessageSource, MessageStream};
use crate::config::SourceConfig;
use crate::error::{PostpackError, Result};
use crate::message::RawMessage;
use crate::parsing::{extract_text, parse_count, parse_reactions, parse_timestamp};

/// Reads a channel dump with one JSON message per line.
///
/// A dump file holds one channel, so the channel argument of
/// [`fetch`](MessageSource::fetch) is not checked.
#[derive(Debug, Clone)]
pub struct JsonLinesSource {
    path: PathBuf,
    config: SourceConfig,
}

impl JsonLinesSource {
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
struct DumpRecord {
    id: u64,
    #[serde(rename = "_")]
    kind: Option<String>,
    message: Option<Value>,
    text: Option<Value>,
    date: Option<Value>,
    views: Option<Value>,
    reactions: Option<Value>,
}

impl DumpRecord {
    fn is_service(&self) -> bool {
        self.kind.as_deref() == Some("MessageService")
    }

    fn into_raw(self) -> RawMessage {
        let text = self
            .message
            .as_ref()
            .and_then(extract_text)
            .or_else(|| self.text.as_ref().and_then(extract_text));
        RawMessage {
            id: self.id,
            text,
            date: self.date.as_ref().and_then(parse_timestamp),
            views: self.views.as_ref().and_then(parse_count),
            reactions: self.reactions.as_ref().and_then(parse_reactions),
        }
    }
}

impl MessageSource for JsonLinesSource {
    fn name(&self) -> &'static str {
        "JSON Lines"
    }

    fn fetch(&self, channel: Option<&str>) -> Result<MessageStream<'_>> {
        let file = File::open(&self.path)?;
        debug!(path = %self.path.display(), channel = ?channel, "reading JSON Lines dump");

        Ok(Box::new(JsonLinesIter {
            lines: BufReader::new(file).split(b'\n'),
            line_no: 0,
            skip_invalid: self.config.skip_invalid,
            path: &self.path,
        }))
    }
}

struct JsonLinesIter<'a> {
    lines: Split<BufReader<File>>,
    line_no: usize,
    skip_invalid: bool,
    path: &'a Path,
}

impl Iterator for JsonLinesIter<'_> {
    type Item = Result<RawMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.lines.next()?;
            self.line_no += 1;
            let mut line = match next {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            // `from_slice` reports invalid UTF-8 as a decode error.
            match serde_json::from_slice::<DumpRecord>(&line) {
                Ok(record) if record.is_service() => {
                    trace!(id = record.id, "skipping service message");
                }
                Ok(record) => return Some(Ok(record.into_raw())),
                Err(e) if self.skip_invalid => {
                    warn!(line = self.line_no, error = %e, "skipping undecodable line");
                }
                Err(e) => {
                    return Some(Err(PostpackError::jsonl_parse(
                        self.line_no,
                        e,
                        Some(self.path.to_path_buf()),
                    )));
                }
            }
        }
    }
}
