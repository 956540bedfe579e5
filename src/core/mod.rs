//! Core processing logic for postpack.
//!
//! This module contains:
//! - [`reactions`] - Reaction entry variants and summaries
//! - [`metrics`] - Reaction counting and the engagement ratio
//! - [`normalize`] - Raw message to canonical post
//! - [`models`] - The [`NormalizedPost`] row
//! - [`processor`] - Dataset building and ordering
//! - [`output`] - CSV export
//!
//! # Quick Start
//!
//! ```rust
//! use postpack::core::{DatasetBuilder, to_csv};
//! use postpack::RawMessage;
//!
//! let dataset = DatasetBuilder::build(vec![
//!     RawMessage::new(1).with_text("Hello").with_views(10),
//! ]);
//! let csv = to_csv(&dataset, b',').unwrap();
//! assert!(csv.contains("1,,Hello,5,10,0,0"));
//! ```

pub mod metrics;
pub mod models;
pub mod normalize;
pub mod output;
pub mod processor;
pub mod reactions;

// Re-export main types for convenience
pub use metrics::{count_reactions, engagement};
pub use models::NormalizedPost;
pub use normalize::{collapse_whitespace, normalize, normalize_timestamp};
pub use output::{ExportOutcome, to_csv, write_csv};
pub use processor::{BuildStats, Dataset, DatasetBuilder};
pub use reactions::{ReactionCount, ReactionEntry, ReactionSummary};
