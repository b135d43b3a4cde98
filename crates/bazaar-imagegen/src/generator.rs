//! The external image generation capability.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reference to a generated image, typically a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Build a `data:<mime>;base64,<data>` reference.
    pub fn data_url(mime_type: &str, base64_data: &str) -> Self {
        Self(format!("data:{};base64,{}", mime_type, base64_data))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ImageRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

impl From<&str> for ImageRef {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

/// Error reported by an image provider.
///
/// Providers report quota exhaustion in several ways, so the status, any
/// embedded error code and the raw body are all kept for classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    /// HTTP status, if the failure came from a response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Error code embedded in the response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    pub message: String,
    /// Raw response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Check whether the provider signalled quota exhaustion.
    ///
    /// Any of: status 429, embedded code 429, "429" in the message, or
    /// `RESOURCE_EXHAUSTED` anywhere in the serialized error.
    pub fn is_rate_limited(&self) -> bool {
        self.status == Some(429)
            || self.code == Some(429)
            || self.message.contains("429")
            || serde_json::to_string(self)
                .map(|json| json.contains("RESOURCE_EXHAUSTED"))
                .unwrap_or(false)
    }
}

/// Generates an image for a prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// `Ok(None)` means the call succeeded without a usable image.
    async fn generate(&self, prompt: &str) -> Result<Option<ImageRef>, ProviderError>;
}

/// Classification of one generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Usable image.
    Image(ImageRef),
    /// Success without a usable payload.
    Empty,
    /// Quota exhausted; retry later.
    RateLimited(ProviderError),
    /// Any other failure.
    Failed(ProviderError),
}

impl Outcome {
    pub fn classify(result: Result<Option<ImageRef>, ProviderError>) -> Self {
        match result {
            Ok(Some(image)) => Outcome::Image(image),
            Ok(None) => Outcome::Empty,
            Err(e) if e.is_rate_limited() => Outcome::RateLimited(e),
            Err(e) => Outcome::Failed(e),
        }
    }
}
