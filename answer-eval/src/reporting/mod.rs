//! Results reporting

pub mod csv_report;
pub mod latency;

pub use csv_report::{ReportRow, ReportWriter, REPORT_HEADER};
pub use latency::{print_latency_report, LatencyError, LatencyReporter};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::{SummaryStatistics, Tally};
use crate::runner::EvaluationRun;
use crate::tasks::{CaseResult, Category, ExpectedBehavior};

/// Errors while persisting a run
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON summary export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub run_id: String,
    pub timestamp: String,
    pub answerer: String,
    pub total_cases: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub query_resolution_score: f64,
    pub positive: Tally,
    pub negative: Tally,
    pub positive_accuracy: Option<f64>,
    pub negative_accuracy: Option<f64>,
    pub report_file: String,
    pub cases: Vec<CaseSummary>,
}

/// Per-case entry of the JSON summary; carries the reason the CSV omits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: usize,
    pub category: Category,
    pub expected: ExpectedBehavior,
    pub result: CaseResult,
    pub reason: String,
    pub elapsed_seconds: f64,
}

impl JsonSummary {
    /// Create from a finished run
    pub fn from_run(
        run_id: impl Into<String>,
        answerer: impl Into<String>,
        run: &EvaluationRun,
        report_file: impl Into<String>,
    ) -> Self {
        let summary = run.summary();
        let cases = run
            .records
            .iter()
            .map(|r| CaseSummary {
                id: r.test_case_id,
                category: r.category,
                expected: r.expected,
                result: r.result,
                reason: r.reason.clone(),
                elapsed_seconds: r.elapsed_seconds,
            })
            .collect();

        Self {
            run_id: run_id.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            answerer: answerer.into(),
            total_cases: summary.total,
            correct: summary.correct,
            accuracy: summary.accuracy,
            query_resolution_score: summary.query_resolution_score,
            positive: summary.positive,
            negative: summary.negative,
            positive_accuracy: summary.positive_accuracy,
            negative_accuracy: summary.negative_accuracy,
            report_file: report_file.into(),
            cases,
        }
    }

    /// Write to JSON file
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Print the end-of-run summary block
pub fn print_console_report(summary: &SummaryStatistics) {
    println!("\n{:=<40}", "");
    println!("EVALUATION SUMMARY");
    println!("{:=<40}", "");
    println!("Total Questions: {}", summary.total);
    println!(
        "Accuracy Metric: {:.1}% ({}/{})",
        summary.accuracy, summary.correct, summary.total
    );
    println!("Query Resolution Score (QRS): {:.1}%", summary.query_resolution_score);

    if let Some(accuracy) = summary.positive_accuracy {
        println!(
            "Positive Data Accuracy: {:.1}% ({}/{})",
            accuracy, summary.positive.correct, summary.positive.total
        );
    }
    if let Some(accuracy) = summary.negative_accuracy {
        println!(
            "Negative Data Accuracy: {:.1}% ({}/{})",
            accuracy, summary.negative.correct, summary.negative.total
        );
    }
}
