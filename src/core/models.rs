//! Canonical post rows produced by the normalizer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::metrics::engagement;

/// One normalized channel post.
///
/// Built only by [`normalize`](crate::core::normalize::normalize), so the
/// derived fields always agree with the ones they come from:
/// `text_length` is the character count of `text`, and `engagement` is
/// `reaction_count / views` (0.0 when there are no views).
///
/// | Field | Meaning |
/// |-------|---------|
/// | `message_id` | Identifier within the channel |
/// | `timestamp` | Publication time in UTC, `None` if missing or unparsable |
/// | `text` | Whitespace-collapsed, trimmed, never empty |
/// | `text_length` | Characters (not bytes) of `text` |
/// | `views` | View count, 0 when unknown |
/// | `reaction_count` | Sum of all reaction counts, 0 when unknown |
/// | `engagement` | `reaction_count / views`, 0.0 when `views == 0` |
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPost {
    message_id: u64,
    timestamp: Option<DateTime<Utc>>,
    text: String,
    text_length: usize,
    views: u64,
    reaction_count: u64,
    engagement: f64,
}

impl NormalizedPost {
    /// `text` must already be collapsed and non-empty.
    pub(crate) fn new(
        message_id: u64,
        timestamp: Option<DateTime<Utc>>,
        text: String,
        views: u64,
        reaction_count: u64,
    ) -> Self {
        debug_assert!(!text.is_empty());
        Self {
            message_id,
            timestamp,
            text_length: text.chars().count(),
            text,
            views,
            reaction_count,
            engagement: engagement(reaction_count, views),
        }
    }

    pub fn message_id(&self) -> u64 {
        self.message_id
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_length(&self) -> usize {
        self.text_length
    }

    pub fn views(&self) -> u64 {
        self.views
    }

    pub fn reaction_count(&self) -> u64 {
        self.reaction_count
    }

    pub fn engagement(&self) -> f64 {
        self.engagement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_length_counts_chars() {
        let post = NormalizedPost::new(1, None, "Привет 🎉".to_string(), 10, 1);
        assert_eq!(post.text_length(), 8);
        assert!(post.text().len() > post.text_length());
    }

    #[test]
    fn test_engagement_derived() {
        let post = NormalizedPost::new(1, None, "x".to_string(), 0, 4);
        assert_eq!(post.engagement(), 0.0);

        let post = NormalizedPost::new(2, None, "x".to_string(), 8, 4);
        assert_eq!(post.engagement(), 0.5);
    }
}
