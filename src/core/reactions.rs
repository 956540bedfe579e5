//! Reaction summaries and their entry variants.
//!
//! Platforms report reactions in several shapes (plain emoji, custom emoji
//! packs, paid stars) and the shape changes between API versions. Each known
//! shape is a [`ReactionEntry`] variant; anything else is kept as
//! [`ReactionEntry::Unknown`], which still contributes its count when it
//! has one, so one odd entry never spoils the total.
//!
//! All variants implement [`ReactionCount`], which is the only capability
//! the metric aggregator relies on.
//!
//! # Example
//!
//! ```
//! use postpack::core::reactions::{ReactionEntry, ReactionSummary};
//!
//! let summary = ReactionSummary::new(vec![
//!     ReactionEntry::emoji("👍", Some(5)),
//!     ReactionEntry::paid(Some(2)),
//!     ReactionEntry::unknown("reaction_future"),
//! ]);
//!
//! assert_eq!(summary.total(), 7);
//! ```

use serde::{Deserialize, Serialize};

/// Anything that exposes an integer reaction count.
pub trait ReactionCount {
    /// Returns the count, or `None` when the entry carries no usable count.
    fn count(&self) -> Option<u64>;
}

/// One reaction entry of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReactionEntry {
    /// A standard emoji reaction.
    Emoji {
        /// The emoji itself
        emoji: String,
        /// How many users reacted with it
        count: Option<u64>,
    },
    /// A reaction from a custom emoji pack.
    CustomEmoji {
        /// Platform identifier of the custom emoji document
        document_id: String,
        /// How many users reacted with it
        count: Option<u64>,
    },
    /// Paid reactions (stars).
    Paid {
        /// Number of paid reactions
        count: Option<u64>,
    },
    /// An entry of an unrecognized shape.
    Unknown {
        /// The type tag the source reported, empty if none
        kind: String,
        /// The count, if the entry still carries one
        count: Option<u64>,
    },
}

impl ReactionEntry {
    /// Creates an emoji entry.
    pub fn emoji(emoji: impl Into<String>, count: Option<u64>) -> Self {
        ReactionEntry::Emoji {
            emoji: emoji.into(),
            count,
        }
    }

    /// Creates a custom emoji entry.
    pub fn custom_emoji(document_id: impl Into<String>, count: Option<u64>) -> Self {
        ReactionEntry::CustomEmoji {
            document_id: document_id.into(),
            count,
        }
    }

    /// Creates a paid reaction entry.
    pub fn paid(count: Option<u64>) -> Self {
        ReactionEntry::Paid { count }
    }

    /// Creates an entry of an unrecognized shape without a count.
    pub fn unknown(kind: impl Into<String>) -> Self {
        ReactionEntry::Unknown {
            kind: kind.into(),
            count: None,
        }
    }
}

impl ReactionCount for ReactionEntry {
    fn count(&self) -> Option<u64> {
        match self {
            ReactionEntry::Emoji { count, .. }
            | ReactionEntry::CustomEmoji { count, .. }
            | ReactionEntry::Paid { count }
            | ReactionEntry::Unknown { count, .. } => *count,
        }
    }
}

/// All reactions attached to one message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionSummary {
    /// Reaction entries in source order.
    pub entries: Vec<ReactionEntry>,
}

impl ReactionSummary {
    /// Creates a summary from its entries.
    pub fn new(entries: Vec<ReactionEntry>) -> Self {
        Self { entries }
    }

    /// Sums the counts of all entries.
    ///
    /// Entries without a count contribute 0. Saturates at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| entry.count().unwrap_or(0))
            .fold(0u64, u64::saturating_add)
    }

    /// Returns `true` if the summary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ReactionEntry> for ReactionSummary {
    fn from_iter<I: IntoIterator<Item = ReactionEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_counts() {
        assert_eq!(ReactionEntry::emoji("🔥", Some(3)).count(), Some(3));
        assert_eq!(ReactionEntry::custom_emoji("5368", Some(1)).count(), Some(1));
        assert_eq!(ReactionEntry::paid(None).count(), None);
        assert_eq!(ReactionEntry::unknown("whatever").count(), None);

        let future = ReactionEntry::Unknown {
            kind: "reaction_future".into(),
            count: Some(4),
        };
        assert_eq!(future.count(), Some(4));
    }

    #[test]
    fn test_total_ignores_missing_counts() {
        let summary: ReactionSummary = vec![
            ReactionEntry::emoji("👍", Some(4)),
            ReactionEntry::emoji("❤", None),
            ReactionEntry::unknown(""),
            ReactionEntry::custom_emoji("1", Some(3)),
        ]
        .into_iter()
        .collect();
        assert_eq!(summary.total(), 7);
    }

    #[test]
    fn test_total_empty() {
        assert_eq!(ReactionSummary::default().total(), 0);
        assert!(ReactionSummary::default().is_empty());
    }

    #[test]
    fn test_total_saturates() {
        let summary = ReactionSummary::new(vec![
            ReactionEntry::paid(Some(u64::MAX)),
            ReactionEntry::paid(Some(10)),
        ]);
        assert_eq!(summary.total(), u64::MAX);
    }

    #[test]
    fn test_entry_serialization_tag() {
        let json = serde_json::to_string(&ReactionEntry::paid(Some(2))).unwrap();
        assert_eq!(json, r#"{"type":"paid","count":2}"#);
    }
}
