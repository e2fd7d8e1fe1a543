//! Gemini API client
//!
//! Single point of entry for all model calls: every prompt goes through
//! `CompletionClient::complete` and the rest of the pipeline never sees the
//! provider wire format.

use crate::config::sanitize_model;
use crate::error::{JobFitError, Result};
use log::{debug, warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Anything that can turn a prompt into a raw text completion.
pub trait CompletionClient {
    fn complete(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    status: String,
}

/// Client for the Gemini generateContent endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: &str, timeout_secs: u64) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(JobFitError::Authentication(
                "missing Gemini API key".to_string(),
            ));
        }

        let sanitized = sanitize_model(model);
        if sanitized != model {
            warn!("Unknown model '{}', using '{}'", model, sanitized);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| JobFitError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: GEMINI_API_BASE.to_string(),
            model: sanitized.to_string(),
            api_key,
        })
    }

    /// Points the client at a different endpoint; used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature },
        };

        debug!(
            "Calling {} with a {}-char prompt (temperature {})",
            self.model,
            prompt.len(),
            temperature
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    JobFitError::Network(format!("provider call timed out: {}", e))
                } else {
                    JobFitError::Network(format!("provider call failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_api_error(status, &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| JobFitError::Provider(format!("malformed provider response: {}", e)))?;

        let text = completion_text(&parsed);
        if text.is_empty() {
            return Err(JobFitError::Provider(
                "model returned an empty completion".to_string(),
            ));
        }
        Ok(text)
    }
}

/// Joins the text parts across candidates into one completion string.
fn completion_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn map_api_error(status: StatusCode, body: &str) -> JobFitError {
    let (message, api_status) = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.trim().to_string(), String::new()),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => JobFitError::Authentication(message),
        StatusCode::BAD_REQUEST if api_status == "INVALID_ARGUMENT" && message.contains("API key") => {
            JobFitError::Authentication(message)
        }
        StatusCode::TOO_MANY_REQUESTS => JobFitError::RateLimit(message),
        _ => JobFitError::Provider(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}
