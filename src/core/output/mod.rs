//! Dataset exporter.
//!
//! - [`write_csv`] - atomic CSV file export
//! - [`to_csv`] - the same CSV as an in-memory string
//!
//! # Example
//!
//! ```rust,no_run
//! use postpack::RawMessage;
//! use postpack::config::ExportConfig;
//! use postpack::core::output::{ExportOutcome, write_csv};
//! use postpack::core::processor::DatasetBuilder;
//!
//! # fn main() -> postpack::Result<()> {
//! let dataset = DatasetBuilder::build(vec![RawMessage::new(1).with_text("Hello")]);
//!
//! match write_csv(&dataset, &ExportConfig::new())? {
//!     ExportOutcome::Written { path, rows } => println!("{} rows -> {}", rows, path.display()),
//!     ExportOutcome::NoData => println!("nothing to export"),
//! }
//! # Ok(())
//! # }
//! ```

mod csv_writer;

use std::path::{Path, PathBuf};

pub use csv_writer::{COLUMNS, format_date_utc, to_csv, write_csv};

/// Result of an export attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written.
    Written {
        /// Destination path
        path: PathBuf,
        /// Number of data rows (header excluded)
        rows: usize,
    },
    /// The dataset was empty; no file was written.
    NoData,
}

impl ExportOutcome {
    /// Number of data rows written (0 for [`NoData`](Self::NoData)).
    pub fn rows(&self) -> usize {
        match self {
            ExportOutcome::Written { rows, .. } => *rows,
            ExportOutcome::NoData => 0,
        }
    }

    /// Destination path, if a file was written.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportOutcome::Written { path, .. } => Some(path),
            ExportOutcome::NoData => None,
        }
    }
}
