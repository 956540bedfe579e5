//! # Postpack
//!
//! Export a messaging channel's post history to CSV, one row per post,
//! enriched with reaction and engagement metrics.
//!
//! ## Overview
//!
//! Postpack turns raw channel history into a tabular dataset:
//! - **Sources** read already-retrieved history, a Telegram Desktop channel
//!   export or a JSON Lines API dump
//! - the **normalizer** collapses whitespace, drops posts without text and
//!   labels naive timestamps as UTC
//! - the **builder** orders posts chronologically
//! - the **exporter** writes the CSV file atomically
//!
//! Every row carries `engagement = reactions / views` (0 when a post has
//! no views).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use postpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let source = TelegramExportSource::new("result.json");
//!     let config = ExportConfig::new().with_output_path("data/posts.csv");
//!
//!     let report = run_export(&source, Some("@my_channel"), &config)?;
//!     println!("{} posts exported", report.outcome.rows());
//!     Ok(())
//! }
//! ```
//!
//! ## In-memory Records
//!
//! The core pipeline does not care where records come from:
//!
//! ```rust
//! use postpack::prelude::*;
//!
//! let dataset = DatasetBuilder::build(vec![
//!     RawMessage::new(2).with_text("second").with_date(RawTimestamp::parse("2024-06-15T12:00:00")),
//!     RawMessage::new(1).with_text("first").with_date(RawTimestamp::parse("2024-06-15T10:00:00")),
//!     RawMessage::new(3),
//! ]);
//!
//! let ids: Vec<u64> = dataset.iter().map(|p| p.message_id()).collect();
//! assert_eq!(ids, vec![1, 2]);
//! ```
//!
//! ## Module Structure
//!
//! - [`message`] - input contract ([`RawMessage`], [`RawTimestamp`](message::RawTimestamp))
//! - [`core`] - the pipeline
//!   - [`core::reactions`], [`core::metrics`] - reaction counting and engagement
//!   - [`core::normalize`] - [`normalize`](core::normalize::normalize)
//!   - [`core::processor`] - [`DatasetBuilder`](core::processor::DatasetBuilder), [`Dataset`](core::processor::Dataset)
//!   - [`core::output`] - [`write_csv`](core::output::write_csv), [`to_csv`](core::output::to_csv)
//! - [`source`] - [`MessageSource`](source::MessageSource) and the file-backed sources
//! - [`pipeline`] - [`run_export`](pipeline::run_export)
//! - [`config`] - [`ExportConfig`](config::ExportConfig), [`SourceConfig`](config::SourceConfig)
//! - [`error`] - [`PostpackError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
#[cfg(any(feature = "telegram", feature = "jsonl"))]
pub mod parsing;
pub mod pipeline;
pub mod source;

// Re-export the main types at the crate root for convenience
pub use error::{PostpackError, Result};
pub use message::RawMessage;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use postpack::prelude::*;
/// ```
pub mod prelude {
    // Input contract
    pub use crate::message::{RawMessage, RawTimestamp};

    // Error types
    pub use crate::error::{PostpackError, Result};

    // Configuration
    pub use crate::config::{ExportConfig, SourceConfig};

    // Reactions and metrics
    pub use crate::core::metrics::{count_reactions, engagement};
    pub use crate::core::reactions::{ReactionCount, ReactionEntry, ReactionSummary};

    // Normalization and dataset building
    pub use crate::core::models::NormalizedPost;
    pub use crate::core::normalize::normalize;
    pub use crate::core::processor::{BuildStats, Dataset, DatasetBuilder};

    // Output
    pub use crate::core::output::{ExportOutcome, to_csv, write_csv};

    // Sources
    #[cfg(feature = "jsonl")]
    pub use crate::source::JsonLinesSource;
    #[cfg(feature = "telegram")]
    pub use crate::source::TelegramExportSource;
    pub use crate::source::{MemorySource, MessageSource, SourceKind};

    // Pipeline
    pub use crate::pipeline::{ExportReport, run_export};
}
