//! Dataset builder: normalizes a message stream and orders the result.
//!
//! # Ordering
//!
//! Posts are sorted ascending by timestamp with a stable sort, so posts with
//! equal timestamps keep the order the source delivered them in. Posts whose
//! timestamp is missing or unparsable are placed **first**, before every
//! dated post; this is a fixed policy, not an error path.
//!
//! # Example
//!
//! ```
//! use postpack::RawMessage;
//! use postpack::core::processor::DatasetBuilder;
//! use postpack::message::RawTimestamp;
//!
//! let dataset = DatasetBuilder::build(vec![
//!     RawMessage::new(2).with_text("second").with_date(RawTimestamp::parse("2024-01-02T00:00:00Z")),
//!     RawMessage::new(1).with_text("first").with_date(RawTimestamp::parse("2024-01-01T00:00:00Z")),
//!     RawMessage::new(3),
//! ]);
//!
//! let ids: Vec<u64> = dataset.iter().map(|p| p.message_id()).collect();
//! assert_eq!(ids, vec![1, 2]);
//! assert_eq!(dataset.stats().dropped_empty, 1);
//! ```

use tracing::debug;

use super::models::NormalizedPost;
use super::normalize::normalize;
use crate::error::Result;
use crate::message::RawMessage;

/// Counters collected while building a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Raw messages consumed from the source
    pub received: usize,
    /// Messages dropped because their text was empty
    pub dropped_empty: usize,
    /// Kept posts without a usable timestamp
    pub missing_timestamp: usize,
    /// Posts in the final dataset
    pub kept: usize,
}

impl BuildStats {
    /// Share of received messages that made it into the dataset, in percent.
    pub fn kept_ratio(&self) -> f64 {
        if self.received == 0 {
            return 0.0;
        }
        (self.kept as f64 / self.received as f64) * 100.0
    }
}

/// Time-ordered posts of one export run.
///
/// Finalized on construction; there are no mutating methods.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    posts: Vec<NormalizedPost>,
    stats: BuildStats,
}

impl Dataset {
    /// Posts in export order.
    pub fn posts(&self) -> &[NormalizedPost] {
        &self.posts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedPost> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// `true` when nothing survived normalization; the exporter writes no file.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// The last `n` posts (the most recent ones).
    pub fn tail(&self, n: usize) -> &[NormalizedPost] {
        let start = self.posts.len().saturating_sub(n);
        &self.posts[start..]
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a NormalizedPost;
    type IntoIter = std::slice::Iter<'a, NormalizedPost>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

/// Accumulates normalized posts, then sorts them into a [`Dataset`].
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    posts: Vec<NormalizedPost>,
    stats: BuildStats,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes one message and keeps it if it has text.
    pub fn push(&mut self, raw: RawMessage) {
        self.stats.received += 1;
        match normalize(raw) {
            Some(post) => {
                if post.timestamp().is_none() {
                    self.stats.missing_timestamp += 1;
                }
                self.posts.push(post);
            }
            None => self.stats.dropped_empty += 1,
        }
    }

    /// Sorts the accumulated posts and finalizes the dataset.
    pub fn finish(self) -> Dataset {
        let Self {
            mut posts,
            mut stats,
        } = self;

        // `None < Some(_)`, so undated posts come first. `sort_by_key` is stable.
        posts.sort_by_key(NormalizedPost::timestamp);
        stats.kept = posts.len();

        debug!(
            received = stats.received,
            kept = stats.kept,
            dropped_empty = stats.dropped_empty,
            missing_timestamp = stats.missing_timestamp,
            "dataset built"
        );

        Dataset { posts, stats }
    }

    /// Builds a dataset from an infallible message sequence.
    pub fn build<I>(messages: I) -> Dataset
    where
        I: IntoIterator<Item = RawMessage>,
    {
        let mut builder = Self::new();
        for raw in messages {
            builder.push(raw);
        }
        builder.finish()
    }

    /// Builds a dataset from a fallible message sequence.
    ///
    /// The first source error stops the build and is returned unchanged.
    pub fn try_build<I>(messages: I) -> Result<Dataset>
    where
        I: IntoIterator<Item = Result<RawMessage>>,
    {
        let mut builder = Self::new();
        for raw in messages {
            builder.push(raw?);
        }
        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PostpackError;
    use crate::message::RawTimestamp;

    fn dated(id: u64, ts: &str) -> RawMessage {
        RawMessage::new(id)
            .with_text(format!("post {id}"))
            .with_date(RawTimestamp::parse(ts))
    }

    fn ids(dataset: &Dataset) -> Vec<u64> {
        dataset.iter().map(NormalizedPost::message_id).collect()
    }

    #[test]
    fn test_sorts_by_timestamp() {
        let dataset = DatasetBuilder::build(vec![
            dated(3, "2024-03-01T00:00:00Z"),
            dated(1, "2024-01-01T00:00:00Z"),
            dated(2, "2024-02-01T00:00:00Z"),
        ]);
        assert_eq!(ids(&dataset), vec![1, 2, 3]);
    }

    #[test]
    fn test_unparsable_timestamps_sort_first() {
        let dataset = DatasetBuilder::build(vec![
            dated(1, "2024-01-01T00:00:00Z"),
            dated(2, "not a date"),
            RawMessage::new(3).with_text("no date at all"),
        ]);
        assert_eq!(ids(&dataset), vec![2, 3, 1]);
        assert_eq!(dataset.stats().missing_timestamp, 2);
    }

    #[test]
    fn test_equal_timestamps_keep_arrival_order() {
        let dataset = DatasetBuilder::build(vec![
            dated(9, "2024-01-01T00:00:00Z"),
            dated(4, "2024-01-01T00:00:00Z"),
            dated(7, "2024-01-01T02:00:00+02:00"),
        ]);
        assert_eq!(ids(&dataset), vec![9, 4, 7]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = DatasetBuilder::build(vec![RawMessage::new(1), RawMessage::new(2).with_text(" ")]);
        assert!(dataset.is_empty());
        assert_eq!(dataset.stats().received, 2);
        assert_eq!(dataset.stats().dropped_empty, 2);
        assert_eq!(dataset.stats().kept_ratio(), 0.0);
    }

    #[test]
    fn test_try_build_propagates_source_error() {
        let items: Vec<Result<RawMessage>> = vec![
            Ok(dated(1, "2024-01-01T00:00:00Z")),
            Err(PostpackError::invalid_format("Test", "broken")),
            Ok(dated(2, "2024-01-02T00:00:00Z")),
        ];
        let err = DatasetBuilder::try_build(items).unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_tail() {
        let dataset = DatasetBuilder::build((1..=8).map(|i| {
            dated(i, &format!("2024-01-0{i}T00:00:00Z"))
        }));
        let tail: Vec<u64> = dataset.tail(5).iter().map(NormalizedPost::message_id).collect();
        assert_eq!(tail, vec![4, 5, 6, 7, 8]);
        assert_eq!(dataset.tail(100).len(), 8);
    }

    #[test]
    fn test_kept_ratio() {
        let stats = BuildStats {
            received: 4,
            dropped_empty: 1,
            missing_timestamp: 0,
            kept: 3,
        };
        assert!((stats.kept_ratio() - 75.0).abs() < f64::EPSILON);
    }
}
