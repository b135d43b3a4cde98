//! Image request errors.

/// Why an image request did not produce an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// The provider answered without a usable image.
    #[error("No image generated for '{key}'")]
    GenerationEmpty { key: String },

    /// The provider failed for a reason other than rate limiting.
    #[error("Image generation failed for '{key}': {message}")]
    GenerationFailed { key: String, message: String },

    /// Rate-limit retries were capped and used up.
    #[error("Rate limited {attempts} times generating '{key}'")]
    RateLimitExhausted { key: String, attempts: u32 },

    /// The queue shut down before the request completed.
    #[error("Image queue closed")]
    QueueClosed,
}
