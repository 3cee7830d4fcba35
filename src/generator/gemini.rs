//! Minimal Gemini generateContent client.

use serde_json::{Value, json};
use std::time::Duration;

use crate::config;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Classified generation failure. `is_transient` decides retryability.
#[derive(Debug)]
pub enum GenerationError {
  /// Transport-level failure (connect, timeout, body read)
  Request(reqwest::Error),
  /// Non-success HTTP status from the API
  Status { code: u16, body: String },
  /// Response parsed but the candidate text was empty
  EmptyResponse,
  /// Response JSON did not have the expected shape
  InvalidResponse(String),
}

impl GenerationError {
  /// Whether retrying the same request can plausibly succeed.
  pub fn is_transient(&self) -> bool {
    match self {
      Self::Request(_) => true,
      Self::Status { code, .. } => *code == 429 || *code >= 500,
      Self::EmptyResponse => true,
      Self::InvalidResponse(_) => false,
    }
  }
}

impl std::fmt::Display for GenerationError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Request(e) => write!(f, "request failed: {}", e),
      Self::Status { code, body } => write!(f, "API returned status {}: {}", code, body),
      Self::EmptyResponse => write!(f, "API returned empty text"),
      Self::InvalidResponse(detail) => write!(f, "unexpected response shape: {}", detail),
    }
  }
}

impl std::error::Error for GenerationError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Request(e) => Some(e),
      _ => None,
    }
  }
}

/// Client for the generateContent endpoint of one model.
pub struct GeminiClient {
  http: reqwest::Client,
  api_key: String,
  model: String,
}

impl GeminiClient {
  pub fn new(api_key: String) -> Self {
    Self {
      http: reqwest::Client::new(),
      api_key,
      model: config::GEMINI_MODEL.to_string(),
    }
  }

  /// One generateContent round-trip. No retries at this level.
  pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
    let url = format!("{}/{}:generateContent", API_BASE, self.model);

    let payload = json!({
      "contents": [{ "parts": [{ "text": prompt }] }],
      "generationConfig": {
        "temperature": 0.7,
        "topP": 0.8,
        "topK": 40,
        "maxOutputTokens": 1024,
      },
    });

    let res = self
      .http
      .post(&url)
      .header("x-goog-api-key", &self.api_key)
      .json(&payload)
      .timeout(Duration::from_secs(config::GENERATION_TIMEOUT_SECS))
      .send()
      .await
      .map_err(GenerationError::Request)?;

    if !res.status().is_success() {
      let code = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      return Err(GenerationError::Status { code, body });
    }

    let body: Value = res.json().await.map_err(GenerationError::Request)?;

    match extract_text(&body) {
      None => Err(GenerationError::InvalidResponse(
        "no candidates[0].content.parts in response".to_string(),
      )),
      Some(text) if text.trim().is_empty() => Err(GenerationError::EmptyResponse),
      Some(text) => Ok(text),
    }
  }
}

/// Concatenated text of the first candidate's parts.
fn extract_text(body: &Value) -> Option<String> {
  let parts = body
    .get("candidates")?
    .get(0)?
    .get("content")?
    .get("parts")?
    .as_array()?;

  Some(
    parts
      .iter()
      .filter_map(|p| p.get("text").and_then(Value::as_str))
      .collect(),
  )
}
