//! Answerer that replays canned responses
//!
//! Useful for offline runs and for re-scoring a previously captured set of
//! answers. The script is a JSON object mapping question text to answer text.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use super::traits::{AnswerError, AnswerResult, Answerer};

/// Replays answers keyed by exact question text
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswerer {
    answers: HashMap<String, String>,
}

impl ScriptedAnswerer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a script from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> AnswerResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnswerError::Config(format!("cannot read answer script {}: {}", path.display(), e))
        })?;
        let answers: HashMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| AnswerError::Parse(format!("answer script {}: {}", path.display(), e)))?;

        tracing::info!("Loaded {} scripted answers from {}", answers.len(), path.display());
        Ok(Self { answers })
    }

    /// Add or replace the answer for a question
    pub fn with_answer(mut self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        self.answers.insert(question.into(), answer.into());
        self
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[async_trait]
impl Answerer for ScriptedAnswerer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn answer(&self, question: &str) -> AnswerResult<String> {
        self.answers
            .get(question)
            .cloned()
            .ok_or_else(|| AnswerError::Unscripted(question.to_string()))
    }
}
