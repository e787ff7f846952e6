//! Tabular report of a run, one row per case
//!
//! The header and the `Time` format (`2.50s`) are fixed so that the latency
//! pass and external tooling can read reports from any run.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ReportError;
use crate::tasks::EvaluationRecord;

pub const REPORT_HEADER: [&str; 7] = [
    "ID",
    "Data Type",
    "Question",
    "Expected",
    "Actual Response",
    "Result",
    "Time",
];

pub const TIME_COLUMN: &str = "Time";

/// Time unit suffix used in the `Time` column
pub const TIME_SUFFIX: char = 's';

/// One row of the persisted report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "ID")]
    pub id: usize,
    #[serde(rename = "Data Type")]
    pub data_type: String,
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Expected")]
    pub expected: String,
    #[serde(rename = "Actual Response")]
    pub actual_response: String,
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "Time")]
    pub time: String,
}

impl From<&EvaluationRecord> for ReportRow {
    fn from(record: &EvaluationRecord) -> Self {
        Self {
            id: record.test_case_id,
            data_type: record.category.as_str().to_string(),
            question: record.question.clone(),
            expected: record.expected.as_str().to_string(),
            actual_response: record.raw_response.clone(),
            result: record.result.as_str().to_string(),
            time: record.formatted_time(),
        }
    }
}

/// Writes and reads CSV reports
pub struct ReportWriter;

impl ReportWriter {
    /// Write all records to a CSV file, replacing any existing file
    pub fn write_records(
        path: impl AsRef<Path>,
        records: &[EvaluationRecord],
    ) -> Result<(), ReportError> {
        let file = std::fs::File::create(path.as_ref())?;
        Self::write_to(file, records)
    }

    /// Write records to any writer. The header is always written, even for no rows.
    pub fn write_to<W: io::Write>(
        writer: W,
        records: &[EvaluationRecord],
    ) -> Result<(), ReportError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(REPORT_HEADER)?;
        for record in records {
            csv_writer.serialize(ReportRow::from(record))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Read every row of a report
    pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<ReportRow>, ReportError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<ReportRow>, csv::Error>>()?;
        Ok(rows)
    }
}
