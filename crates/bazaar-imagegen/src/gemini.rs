//! Gemini image generation client.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use crate::generator::{ImageGenerator, ImageRef, ProviderError};

/// Errors building a [`GeminiClient`].
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("API key not set: environment variable {0} is missing or empty")]
    MissingApiKey(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// [`ImageGenerator`] backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Image-capable model used unless overridden.
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash-image";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    /// Environment variable holding the API key by default.
    pub const DEFAULT_API_KEY_ENV: &'static str = "API_KEY";

    /// Create a client with the default model and a 60 second request timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a client with the API key read from `var`.
    pub fn from_env(var: &str) -> Result<Self, GeminiError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Self::new(key),
            _ => Err(GeminiError::MissingApiKey(var.to_string())),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<ImageRef>, ProviderError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let error = ProviderError::new(e.to_string());
                match e.status() {
                    Some(status) => error.with_status(status.as_u16()),
                    None => error,
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::new(e.to_string()).with_status(status.as_u16()))?;

        if !status.is_success() {
            return Err(error_from_response(status.as_u16(), text));
        }
        parse_generate_response(&text)
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

fn error_from_response(status: u16, body: String) -> ProviderError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(&body).ok();
    let message = parsed
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .unwrap_or_else(|| format!("HTTP {}", status));

    let mut error = ProviderError::new(message).with_status(status);
    if let Some(code) = parsed.and_then(|e| e.error.code) {
        error = error.with_code(code);
    }
    error.with_body(body)
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

/// Extract the first inline image of the first candidate.
///
/// Returns `Ok(None)` when there is no inline image or its payload is not
/// valid base64.
pub fn parse_generate_response(body: &str) -> Result<Option<ImageRef>, ProviderError> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::new(format!("invalid generateContent response: {}", e)).with_body(body)
    })?;

    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().find_map(|p| p.inline_data));

    let Some(inline) = inline else {
        return Ok(None);
    };
    if inline.data.is_empty() || STANDARD.decode(&inline.data).is_err() {
        tracing::warn!("discarding undecodable image payload");
        return Ok(None);
    }

    let mime_type = inline.mime_type.as_deref().unwrap_or("image/png");
    Ok(Some(ImageRef::data_url(mime_type, &inline.data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_inline_image() {
        let body = r#"{"candidates":[{"content":{"parts":[
            {"text":"here you go"},
            {"inlineData":{"mimeType":"image/jpeg","data":"aGVsbG8="}},
            {"inlineData":{"mimeType":"image/png","data":"d29ybGQ="}}
        ]}}]}"#;
        let image = parse_generate_response(body).unwrap().unwrap();
        assert_eq!(image.as_str(), "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn test_no_image_is_empty() {
        assert_eq!(parse_generate_response(r#"{"candidates":[]}"#).unwrap(), None);
        let text_only = r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#;
        assert_eq!(parse_generate_response(text_only).unwrap(), None);
    }

    #[test]
    fn test_bad_base64_is_empty() {
        let body = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"%%%not base64"}}]}}]}"#;
        assert_eq!(parse_generate_response(body).unwrap(), None);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_generate_response("<html>").is_err());
    }

    #[test]
    fn test_quota_response_is_rate_limited() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let error = error_from_response(429, body.to_string());
        assert_eq!(error.code, Some(429));
        assert_eq!(error.message, "Quota exceeded");
        assert!(error.is_rate_limited());

        let server = error_from_response(500, "oops".to_string());
        assert_eq!(server.message, "HTTP 500");
        assert!(!server.is_rate_limited());
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new("key")
            .unwrap()
            .with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }
}
