#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bazaar_imagegen::{ImageGenerator, ImageQueue, ImageRef, ProviderError, QueueConfig};
use tokio::time::Instant;

const PROMPT_PREFIX: &str = "Professional product photography of ";

pub type Scripted = Result<Option<ImageRef>, ProviderError>;

/// Generator that replays scripted responses, then succeeds with `img:<key>`.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(String, Duration)>>,
    start: Instant,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
            start: Instant::now(),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::new(Vec::new())
    }

    /// Keys generated so far with the elapsed time of each call.
    pub fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.calls().into_iter().map(|(key, _)| key).collect()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<Option<ImageRef>, ProviderError> {
        let key = key_of(prompt);
        self.calls
            .lock()
            .unwrap()
            .push((key.clone(), self.start.elapsed()));
        match self.script.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(Some(image_for(&key))),
        }
    }
}

pub fn key_of(prompt: &str) -> String {
    let rest = prompt.strip_prefix(PROMPT_PREFIX).unwrap_or(prompt);
    rest.split(", white background").next().unwrap_or(rest).to_string()
}

pub fn image_for(key: &str) -> ImageRef {
    ImageRef::new(format!("img:{}", key))
}

pub fn rate_limited() -> Scripted {
    Err(ProviderError::new("Resource has been exhausted").with_status(429))
}

pub fn server_error() -> Scripted {
    Err(ProviderError::new("internal error").with_status(500))
}

pub fn queue(generator: &Arc<ScriptedGenerator>, config: QueueConfig) -> ImageQueue {
    ImageQueue::new(generator.clone(), config)
}

/// Assert `actual` is `secs` seconds, allowing for timer granularity.
pub fn assert_at(actual: Duration, secs: u64) {
    let expected = Duration::from_secs(secs);
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(50),
        "expected ~{:?}, got {:?}",
        expected,
        actual
    );
}
