//! CSV output writer.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};

use super::ExportOutcome;
use crate::config::ExportConfig;
use crate::core::models::NormalizedPost;
use crate::core::processor::Dataset;
use crate::error::{PostpackError, Result};

/// Column names of the export, in order.
pub const COLUMNS: [&str; 7] = [
    "message_id",
    "date_utc",
    "text",
    "text_len",
    "views",
    "reactions",
    "engagement",
];

/// Writes the dataset to `config.output_path` as CSV.
///
/// # Format
/// - Delimiter: `config.delimiter` (default `,`)
/// - Columns: see [`COLUMNS`]
/// - `date_utc`: RFC 3339 with `+00:00`, empty when unknown
/// - Quoting: fields with delimiter, quotes or newlines are quoted
/// - Encoding: UTF-8
///
/// The file is first written next to the destination under a temporary name,
/// then renamed over it. A failed run leaves any previous file in place.
/// An empty dataset writes nothing and returns [`ExportOutcome::NoData`].
pub fn write_csv(dataset: &Dataset, config: &ExportConfig) -> Result<ExportOutcome> {
    config.validate()?;

    if dataset.is_empty() {
        info!("no posts to export, skipping write");
        return Ok(ExportOutcome::NoData);
    }

    let path = config.output_path.as_path();
    let dir = parent_dir(path);
    fs::create_dir_all(&dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".postpack-")
        .suffix(".tmp")
        .tempfile_in(&dir)?;
    debug!(tmp = %tmp.path().display(), "writing export to temporary file");

    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .from_writer(tmp.as_file_mut());
        write_rows(&mut writer, dataset)?;
        writer.flush()?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    let rows = dataset.len();
    info!(path = %path.display(), rows, "export written");

    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows,
    })
}

/// Converts the dataset to a CSV string.
///
/// Returns only the header for an empty dataset.
pub fn to_csv(dataset: &Dataset, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    write_rows(&mut writer, dataset)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| PostpackError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn write_rows<W: Write>(writer: &mut csv::Writer<W>, dataset: &Dataset) -> Result<()> {
    writer.write_record(COLUMNS)?;
    for post in dataset {
        writer.write_record(build_record(post))?;
    }
    Ok(())
}

/// Build CSV record for a single post.
fn build_record(post: &NormalizedPost) -> [String; 7] {
    [
        post.message_id().to_string(),
        post.timestamp().map(format_date_utc).unwrap_or_default(),
        post.text().to_string(),
        post.text_length().to_string(),
        post.views().to_string(),
        post.reaction_count().to_string(),
        post.engagement().to_string(),
    ]
}

/// Formats a timestamp for the `date_utc` column: `2024-01-15T10:30:00+00:00`.
pub fn format_date_utc(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawMessage;
    use crate::core::processor::DatasetBuilder;
    use crate::message::RawTimestamp;
    use tempfile::tempdir;

    fn sample() -> Dataset {
        DatasetBuilder::build(vec![
            RawMessage::new(2)
                .with_text("second; \"quoted\"")
                .with_date(RawTimestamp::parse("2024-06-15T12:30:00"))
                .with_views(4),
            RawMessage::new(1)
                .with_text("first")
                .with_date(RawTimestamp::parse("2024-06-15T10:00:00+00:00")),
        ])
    }

    #[test]
    fn test_to_csv_header_and_rows() {
        let csv = to_csv(&sample(), b',').unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "message_id,date_utc,text,text_len,views,reactions,engagement"
        );
        assert_eq!(lines.next().unwrap(), "1,2024-06-15T10:00:00+00:00,first,5,0,0,0");
        assert_eq!(
            lines.next().unwrap(),
            "2,2024-06-15T12:30:00+00:00,\"second; \"\"quoted\"\"\",16,4,0,0"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_to_csv_semicolon_quotes_text() {
        let csv = to_csv(&sample(), b';').unwrap();
        assert!(csv.contains("\"second; \"\"quoted\"\"\""));
        assert!(csv.starts_with("message_id;date_utc;"));
    }

    #[test]
    fn test_missing_timestamp_is_empty_field() {
        let dataset = DatasetBuilder::build(vec![RawMessage::new(5).with_text("undated")]);
        let csv = to_csv(&dataset, b',').unwrap();
        assert!(csv.contains("5,,undated,7,0,0,0"));
    }

    #[test]
    fn test_format_date_utc_fractional() {
        let ts = DateTime::parse_from_rfc3339("2024-01-15T10:30:00.5Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date_utc(ts), "2024-01-15T10:30:00.500+00:00");
    }

    #[test]
    fn test_write_csv_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("posts.csv");
        let config = ExportConfig::new().with_output_path(&path);

        let outcome = write_csv(&sample(), &config).unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: path.clone(),
                rows: 2
            }
        );

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("message_id,date_utc"));
    }

    #[test]
    fn test_write_csv_empty_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.csv");
        let config = ExportConfig::new().with_output_path(&path);

        let outcome = write_csv(&Dataset::default(), &config).unwrap();
        assert_eq!(outcome, ExportOutcome::NoData);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_csv_overwrites_and_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.csv");
        fs::write(&path, "old content").unwrap();

        let config = ExportConfig::new().with_output_path(&path);
        write_csv(&sample(), &config).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("old content"));

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_csv_rejects_bad_config() {
        let config = ExportConfig::new().with_delimiter(b'"');
        assert!(write_csv(&sample(), &config).is_err());
    }
}
