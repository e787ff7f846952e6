//! System-under-test adapters

pub mod http;
pub mod scripted;
pub mod traits;

pub use http::HttpAnswerer;
pub use scripted::ScriptedAnswerer;
pub use traits::{AnswerError, AnswerResult, Answerer};

use std::sync::Arc;

use crate::config::{AnswererConfig, AnswererKind};

/// Build the configured answerer.
///
/// A failure here means the system under test is unusable and the run must
/// not start.
pub fn create_answerer(config: &AnswererConfig) -> AnswerResult<Arc<dyn Answerer>> {
    match config.kind {
        AnswererKind::Http => {
            let client = HttpAnswerer::from_config(config)?;
            tracing::info!("Using HTTP answerer at {}", client.endpoint());
            Ok(Arc::new(client))
        }
        AnswererKind::Scripted => {
            let path = config.responses_file.as_ref().ok_or_else(|| {
                AnswerError::Config("scripted answerer needs a responses file".to_string())
            })?;
            Ok(Arc::new(ScriptedAnswerer::from_file(path)?))
        }
    }
}
