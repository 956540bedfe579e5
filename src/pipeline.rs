//! One-shot export run: source → dataset → CSV file.
//!
//! The dataset is only exported after the source is exhausted, so a run
//! that fails or is interrupted while reading never writes a file.
//!
//! # Example
//!
//! ```rust,no_run
//! use postpack::config::ExportConfig;
//! use postpack::pipeline::run_export;
//! use postpack::source::TelegramExportSource;
//!
//! # fn main() -> postpack::Result<()> {
//! let source = TelegramExportSource::new("result.json");
//! let report = run_export(&source, Some("@my_channel"), &ExportConfig::new())?;
//! println!("{} rows", report.outcome.rows());
//! # Ok(())
//! # }
//! ```

use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::core::models::NormalizedPost;
use crate::core::output::{ExportOutcome, write_csv};
use crate::core::processor::{BuildStats, DatasetBuilder};
use crate::error::Result;
use crate::source::MessageSource;

/// Number of most recent posts kept for the run summary.
pub const PREVIEW_ROWS: usize = 5;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Whether and where the file was written
    pub outcome: ExportOutcome,
    /// Counters from building the dataset
    pub stats: BuildStats,
    /// The most recent posts of the dataset, oldest first
    pub preview: Vec<NormalizedPost>,
}

/// Fetches `channel` from `source`, builds the dataset and writes it.
///
/// Source errors propagate unchanged. An empty dataset is reported as
/// [`ExportOutcome::NoData`] and writes nothing.
pub fn run_export(
    source: &dyn MessageSource,
    channel: Option<&str>,
    config: &ExportConfig,
) -> Result<ExportReport> {
    config.validate()?;

    debug!(source = source.name(), channel = ?channel, "fetching messages");
    let dataset = DatasetBuilder::try_build(source.fetch(channel)?)?;
    let stats = dataset.stats();
    info!(
        received = stats.received,
        kept = stats.kept,
        "messages normalized"
    );

    let outcome = write_csv(&dataset, config)?;

    Ok(ExportReport {
        outcome,
        stats,
        preview: dataset.tail(PREVIEW_ROWS).to_vec(),
    })
}
