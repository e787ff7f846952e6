//! Answer-quality evaluation harness for document-grounded question answering
//!
//! Runs a battery of questions against a system under test and scores each
//! response: answerable questions are checked for required keywords, and
//! unanswerable ones must be declined rather than answered.
//!
//! # Features
//!
//! - Built-in 25-question battery, or JSON/TOML battery files
//! - Text normalization and whole-word abstention detection
//! - ALL and ANY_GROUP keyword matching
//! - Accuracy, QRS and per-category accuracy
//! - CSV report, JSON summary and offline latency statistics
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use answer_eval::{
//!     analysis::CaseScorer,
//!     providers::ScriptedAnswerer,
//!     reporting::{print_console_report, ReportWriter},
//!     runner::{ConsoleProgress, EvaluationRunner},
//!     tasks::standard_battery,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let answerer = ScriptedAnswerer::from_file("answers.json").unwrap();
//!     let runner = EvaluationRunner::new(Arc::new(answerer), CaseScorer::default());
//!
//!     let run = runner.run(&standard_battery(), &ConsoleProgress).await;
//!     print_console_report(&run.summary());
//!     ReportWriter::write_records("evaluation_results.csv", &run.records).unwrap();
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod providers;
pub mod reporting;
pub mod runner;
pub mod tasks;

pub use config::Config;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::analysis::{
        AbstentionDetector, CaseScorer, LatencyStatistics, RunCounters, SummaryStatistics, Verdict,
    };
    pub use crate::config::{AnswererConfig, AnswererKind, Config};
    pub use crate::providers::{create_answerer, AnswerError, Answerer, HttpAnswerer, ScriptedAnswerer};
    pub use crate::reporting::{JsonSummary, LatencyReporter, ReportWriter};
    pub use crate::runner::{ConsoleProgress, EvaluationRun, EvaluationRunner, NoOpProgress, ProgressCallback};
    pub use crate::tasks::{
        standard_battery, CaseResult, Category, EvaluationRecord, Expectation, ExpectedBehavior,
        MatchRule, TestCase,
    };
}
