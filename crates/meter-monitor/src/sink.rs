//! Accepted-readings CSV log

use crate::RawReading;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Timestamp format for log rows
const ROW_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Failures while writing the accepted-readings log
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("log I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("log write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only CSV log of accepted readings.
///
/// The header row is written when the file does not exist yet; reopening an
/// existing log keeps appending below the old rows. Every row is flushed as
/// it is written, so an interrupted run loses at most the row in flight.
pub struct AcceptedLog {
    writer: csv::Writer<File>,
}

impl AcceptedLog {
    /// Open the log at `path`, creating it with a header when missing
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let needs_header = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(["timestamp", "meter", "raw_text", "value"])?;
            writer.flush()?;
            info!("created accepted-readings log at {}", path.display());
        }

        Ok(Self { writer })
    }

    /// Append one accepted reading
    pub fn append(&mut self, reading: &RawReading, value: f64) -> Result<(), SinkError> {
        self.writer.write_record([
            reading.timestamp.format(ROW_TIMESTAMP_FORMAT).to_string(),
            reading.meter.clone(),
            reading.text.clone(),
            value.to_string(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use tempfile::tempdir;

    fn reading_at(meter: &str, text: &str, secs: u32) -> RawReading {
        RawReading {
            meter: meter.to_string(),
            text: text.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, secs).unwrap(),
        }
    }

    #[test]
    fn test_header_written_once_across_reopens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");

        {
            let mut log = AcceptedLog::open(&path).unwrap();
            log.append(&reading_at("grand", "1.234,56€", 5), 1234.56).unwrap();
        }
        {
            let mut log = AcceptedLog::open(&path).unwrap();
            log.append(&reading_at("grand", "1.235,06€", 6), 1235.06).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("timestamp,meter,raw_text,value"));
        assert_eq!(content.matches("timestamp,meter").count(), 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_row_carries_raw_text_and_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");

        let mut log = AcceptedLog::open(&path).unwrap();
        log.append(&reading_at("minor", "1.234,56€", 5), 1234.56).unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("20240102_030405"));
        assert!(content.contains("minor"));
        // raw text keeps its separators, quoted by the writer as needed
        assert!(content.contains("1.234,56€"));
        assert!(content.contains("1234.56"));
    }

    #[test]
    fn test_unwritable_path_reported() {
        let err = AcceptedLog::open(Path::new("/nonexistent/dir/log.csv"));
        assert!(matches!(err, Err(SinkError::Io(_))));
    }
}
