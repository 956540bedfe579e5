//! Raw message records handed to the pipeline by a message source.
//!
//! A [`RawMessage`] is the input contract of postpack: whatever a source
//! reads (a Telegram Desktop export, an API dump, records built in memory)
//! is turned into this shape before normalization. Every field except the
//! identifier is optional, because channel history is full of posts with no
//! caption, hidden view counters, or reactions disabled.
//!
//! # Examples
//!
//! ```
//! use postpack::RawMessage;
//! use postpack::message::RawTimestamp;
//!
//! let msg = RawMessage::new(42)
//!     .with_text("Hello\n\nworld ")
//!     .with_date(RawTimestamp::parse("2024-01-15T10:30:00"))
//!     .with_views(100);
//!
//! assert_eq!(msg.id, 42);
//! assert!(matches!(msg.date, Some(RawTimestamp::Naive(_))));
//! ```

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::core::reactions::ReactionSummary;

/// Naive timestamp layouts accepted by [`RawTimestamp::parse`].
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts tried after RFC 3339.
const AWARE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// A publication timestamp as the source delivered it.
///
/// Sources differ in what they know about time: the Telegram API returns
/// absolute instants, Telegram Desktop writes wall-clock values with no
/// offset. Keeping the distinction lets the normalizer *label* naive values
/// with UTC instead of guessing a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTimestamp {
    /// A timestamp with an explicit UTC offset.
    Aware(DateTime<FixedOffset>),
    /// A timestamp without timezone information.
    Naive(NaiveDateTime),
    /// A value was present but could not be read as a timestamp.
    Unparsable(String),
}

impl RawTimestamp {
    /// Parses a timestamp string.
    ///
    /// Accepted inputs, tried in order:
    /// - RFC 3339 / ISO-8601 with offset (`2024-01-15T10:30:00+02:00`, `...Z`)
    /// - the same with a space separator (`2024-01-15 10:30:00+00:00`)
    /// - naive ISO-8601 (`2024-01-15T10:30:00`, optional fraction, `T` or space)
    /// - Unix seconds as a string of digits (`1705314600`)
    ///
    /// Anything else becomes [`RawTimestamp::Unparsable`]; this never fails.
    ///
    /// ```
    /// use postpack::message::RawTimestamp;
    ///
    /// assert!(matches!(RawTimestamp::parse("2024-01-15T10:30:00Z"), RawTimestamp::Aware(_)));
    /// assert!(matches!(RawTimestamp::parse("2024-01-15 10:30"), RawTimestamp::Naive(_)));
    /// assert!(matches!(RawTimestamp::parse("yesterday"), RawTimestamp::Unparsable(_)));
    /// ```
    pub fn parse(input: &str) -> Self {
        let s = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return RawTimestamp::Aware(dt);
        }
        for fmt in AWARE_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return RawTimestamp::Aware(dt);
            }
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return RawTimestamp::Naive(dt);
            }
        }
        let unix = (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .then(|| s.parse::<i64>().ok())
            .flatten()
            .and_then(|secs| DateTime::from_timestamp(secs, 0));
        if let Some(dt) = unix {
            return RawTimestamp::Aware(dt.fixed_offset());
        }

        RawTimestamp::Unparsable(input.to_string())
    }

    /// Builds a timestamp from Unix seconds.
    ///
    /// Out-of-range values become [`RawTimestamp::Unparsable`].
    pub fn from_unix(secs: i64) -> Self {
        DateTime::from_timestamp(secs, 0)
            .map(|dt| RawTimestamp::Aware(dt.fixed_offset()))
            .unwrap_or_else(|| RawTimestamp::Unparsable(secs.to_string()))
    }
}

impl From<DateTime<FixedOffset>> for RawTimestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        RawTimestamp::Aware(dt)
    }
}

impl From<NaiveDateTime> for RawTimestamp {
    fn from(dt: NaiveDateTime) -> Self {
        RawTimestamp::Naive(dt)
    }
}

/// One message as delivered by a [`MessageSource`](crate::source::MessageSource).
///
/// Consumed once by the normalizer and never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMessage {
    /// Message identifier, unique within the channel.
    pub id: u64,

    /// Text body or media caption. `None` for media-only posts.
    pub text: Option<String>,

    /// Publication time, possibly without timezone.
    pub date: Option<RawTimestamp>,

    /// View counter, when the platform exposes it.
    pub views: Option<u64>,

    /// Reaction summary, when reactions are enabled on the channel.
    pub reactions: Option<ReactionSummary>,
}

impl RawMessage {
    /// Creates a message with only an identifier.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Builder method to set the text body.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder method to set the publication timestamp.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<RawTimestamp>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Builder method to set the view count.
    #[must_use]
    pub fn with_views(mut self, views: u64) -> Self {
        self.views = Some(views);
        self
    }

    /// Builder method to set the reaction summary.
    #[must_use]
    pub fn with_reactions(mut self, reactions: ReactionSummary) -> Self {
        self.reactions = Some(reactions);
        self
    }
}
