//! Answerer backed by a question-answering HTTP endpoint
//!
//! The endpoint receives `{"question": "..."}` as JSON and replies with
//! `{"answer": "..."}`. No request timeout is applied.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::traits::{AnswerError, AnswerResult, Answerer};
use crate::config::AnswererConfig;

/// HTTP client for a remote answer service
pub struct HttpAnswerer {
    endpoint: String,
    api_key: Option<String>,
    http_client: Client,
}

impl HttpAnswerer {
    /// Create a client for the given endpoint URL
    pub fn new(endpoint: impl Into<String>) -> AnswerResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(AnswerError::Config("answer endpoint URL is empty".to_string()));
        }

        Ok(Self {
            endpoint,
            api_key: None,
            http_client: Client::builder().build()?,
        })
    }

    /// Create from the `[answerer]` config section.
    ///
    /// When `api_key_env` is set the variable must exist.
    pub fn from_config(config: &AnswererConfig) -> AnswerResult<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| AnswerError::Config("no answer endpoint configured".to_string()))?;

        let mut client = Self::new(endpoint)?;
        if let Some(var) = &config.api_key_env {
            let key = std::env::var(var)
                .map_err(|_| AnswerError::Config(format!("{} not set", var)))?;
            client = client.with_api_key(key);
        }
        Ok(client)
    }

    /// Send `Authorization: Bearer <key>` with every request
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct AnswerRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message { message: String },
    Text(String),
}

impl ErrorDetail {
    fn into_message(self) -> String {
        match self {
            ErrorDetail::Message { message } => message,
            ErrorDetail::Text(text) => text,
        }
    }
}

/// Turn a status code and response body into an answer or an error.
///
/// 401/403 mean the answerer is misconfigured; other non-2xx statuses are
/// API errors carrying the service's message when it sends one.
fn parse_answer(status: u16, body: &str) -> AnswerResult<String> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(error) => error.error.into_message(),
            Err(_) => format!("HTTP {}: {}", status, body),
        };

        if status == 401 || status == 403 {
            return Err(AnswerError::Config(format!("auth error ({}): {}", status, message)));
        }

        return Err(AnswerError::Api { status, message });
    }

    let parsed: AnswerResponse = serde_json::from_str(body)
        .map_err(|e| AnswerError::Parse(format!("invalid answer payload: {}", e)))?;
    Ok(parsed.answer)
}

#[async_trait]
impl Answerer for HttpAnswerer {
    fn name(&self) -> &str {
        "http"
    }

    async fn answer(&self, question: &str) -> AnswerResult<String> {
        let start = Instant::now();

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&AnswerRequest { question });

        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        let answer = parse_answer(status, &body)?;

        tracing::debug!(
            "Answered {:?} in {}ms",
            question,
            start.elapsed().as_millis()
        );

        Ok(answer)
    }
}
