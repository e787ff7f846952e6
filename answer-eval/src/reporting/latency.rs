//! Offline latency statistics over a persisted report

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::csv_report::{TIME_COLUMN, TIME_SUFFIX};
use crate::analysis::LatencyStatistics;

/// Why latency statistics could not be produced
#[derive(Debug, thiserror::Error)]
pub enum LatencyError {
    #[error("File {} not found.", .0.display())]
    NotFound(PathBuf),

    #[error("No data found in {}", .0.display())]
    NoData(PathBuf),

    #[error("Report {} has no Time column", .0.display())]
    MissingColumn(PathBuf),

    #[error("Row {row}: invalid time value {value:?}")]
    InvalidTime { row: usize, value: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads the `Time` column of a report and summarizes it
pub struct LatencyReporter;

impl LatencyReporter {
    /// Compute min/max/mean/median over every row of the report
    pub fn report(path: impl AsRef<Path>) -> Result<LatencyStatistics, LatencyError> {
        let path = path.as_ref();
        let times = Self::read_times(path)?;
        LatencyStatistics::from_samples(&times).ok_or_else(|| LatencyError::NoData(path.to_path_buf()))
    }

    /// Parse the `Time` column, in seconds, in row order
    pub fn read_times(path: impl AsRef<Path>) -> Result<Vec<f64>, LatencyError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LatencyError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let time_idx = reader
            .headers()?
            .iter()
            .position(|h| h == TIME_COLUMN)
            .ok_or_else(|| LatencyError::MissingColumn(path.to_path_buf()))?;

        let mut times = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let raw = record.get(time_idx).unwrap_or("");
            let seconds = parse_time(raw).ok_or_else(|| LatencyError::InvalidTime {
                row: idx + 1,
                value: raw.to_string(),
            })?;
            times.push(seconds);
        }

        tracing::debug!("Read {} latency samples from {}", times.len(), path.display());
        Ok(times)
    }
}

/// Parse a `Time` cell such as `2.50s`
pub fn parse_time(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix(TIME_SUFFIX).unwrap_or(trimmed);
    number.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Print latency statistics in the report's time format
pub fn print_latency_report(stats: &LatencyStatistics) {
    println!("Minimum latency: {:.2}{}", stats.min, TIME_SUFFIX);
    println!("Maximum latency: {:.2}{}", stats.max, TIME_SUFFIX);
    println!("Mean latency: {:.2}{}", stats.mean, TIME_SUFFIX);
    println!("Median latency: {:.2}{}", stats.median, TIME_SUFFIX);
}
