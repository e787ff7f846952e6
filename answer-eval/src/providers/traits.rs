//! The boundary between the harness and the system under test

use async_trait::async_trait;

/// Error types for answerer construction and invocation
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No scripted answer for question: {0}")]
    Unscripted(String),
}

pub type AnswerResult<T> = Result<T, AnswerError>;

/// A document-grounded answer generator under evaluation.
///
/// Implementations are called one question at a time and are never
/// cancelled: a call that never returns blocks the run.
#[async_trait]
pub trait Answerer: Send + Sync {
    /// Short name used in logs and summaries (e.g. "http", "scripted")
    fn name(&self) -> &str;

    /// Answer a question
    async fn answer(&self, question: &str) -> AnswerResult<String>;
}
