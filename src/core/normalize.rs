//! Record normalizer: one [`RawMessage`] in, one [`NormalizedPost`] or nothing out.
//!
//! Every defect of a single record is resolved here with a fixed default:
//!
//! | Input | Result |
//! |-------|--------|
//! | text absent, empty or whitespace-only | record dropped |
//! | views absent | `0` |
//! | reactions absent, entry without count | `0` for that part |
//! | timestamp with offset | same instant, expressed in UTC |
//! | timestamp without offset | same wall-clock value, labeled UTC |
//! | timestamp absent or unparsable | `None` (sorts first) |
//!
//! Media posts without a caption have no text and are therefore dropped.

use chrono::{DateTime, TimeZone, Utc};
use tracing::trace;

use super::metrics::count_reactions;
use super::models::NormalizedPost;
use crate::message::{RawMessage, RawTimestamp};

/// Normalizes one raw message.
///
/// Returns `None` when the text collapses to the empty string.
///
/// # Example
///
/// ```
/// use postpack::RawMessage;
/// use postpack::core::normalize::normalize;
/// use postpack::core::reactions::{ReactionEntry, ReactionSummary};
///
/// let raw = RawMessage::new(1)
///     .with_text("Hello\n\nworld ")
///     .with_views(100)
///     .with_reactions(ReactionSummary::new(vec![ReactionEntry::emoji("👍", Some(7))]));
///
/// let post = normalize(raw).unwrap();
/// assert_eq!(post.text(), "Hello world");
/// assert_eq!(post.text_length(), 11);
/// assert_eq!(post.engagement(), 0.07);
///
/// assert!(normalize(RawMessage::new(2).with_text(" \n\t ")).is_none());
/// ```
pub fn normalize(raw: RawMessage) -> Option<NormalizedPost> {
    let RawMessage {
        id,
        text,
        date,
        views,
        reactions,
    } = raw;

    let text = collapse_whitespace(text.as_deref().unwrap_or_default());
    if text.is_empty() {
        trace!(message_id = id, "dropping message without text");
        return None;
    }

    Some(NormalizedPost::new(
        id,
        normalize_timestamp(date.as_ref()),
        text,
        views.unwrap_or(0),
        count_reactions(reactions.as_ref()),
    ))
}

/// Replaces every whitespace run with a single ASCII space and trims the ends.
///
/// ```
/// use postpack::core::normalize::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  a\t\tb\r\n c  "), "a b c");
/// assert_eq!(collapse_whitespace("\n\n"), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Resolves a raw timestamp to an instant in UTC.
///
/// Naive values are labeled, not converted: `2024-01-15T10:30:00` becomes
/// `2024-01-15T10:30:00Z`.
pub fn normalize_timestamp(raw: Option<&RawTimestamp>) -> Option<DateTime<Utc>> {
    match raw? {
        RawTimestamp::Aware(dt) => Some(dt.with_timezone(&Utc)),
        RawTimestamp::Naive(naive) => Some(Utc.from_utc_datetime(naive)),
        RawTimestamp::Unparsable(value) => {
            trace!(value = %value, "unparsable timestamp");
            None
        }
    }
}
