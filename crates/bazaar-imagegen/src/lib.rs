//! Product image generation behind a serialized work queue.
//!
//! This crate provides:
//! - `ImageQueue` - One-at-a-time generation with caching, throttling and
//!   rate-limit backoff
//! - `ImageGenerator` - The external generation capability
//! - `GeminiClient` - `ImageGenerator` over the Gemini `generateContent` API
//! - `QueueConfig` / `RateLimitPolicy` - Throttle and backoff settings
//! - `ScheduledTask` - Cancellable timer handles driving the queue

mod cache;
mod config;
mod error;
mod gemini;
mod generator;
mod prompt;
mod queue;
mod retry;
mod timer;

pub use cache::ImageCache;
pub use config::QueueConfig;
pub use error::ImageError;
pub use gemini::{parse_generate_response, GeminiClient, GeminiError};
pub use generator::{ImageGenerator, ImageRef, Outcome, ProviderError};
pub use prompt::product_prompt;
pub use queue::{ImageQueue, ImageRequest, QueueSnapshot, QueueStatus};
pub use retry::RateLimitPolicy;
pub use timer::ScheduledTask;
