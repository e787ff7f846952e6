//! Evaluation execution engine

pub mod executor;

pub use executor::{ConsoleProgress, EvaluationRun, EvaluationRunner, NoOpProgress, ProgressCallback};
