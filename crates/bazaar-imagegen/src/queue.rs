//! Serialized image generation queue.
//!
//! One [`ImageQueue`] owns a FIFO of pending requests, the in-flight request,
//! the image cache and the worker timers. At most one generation call runs at
//! a time. After each call the worker goes idle and schedules another pass
//! after [`QueueConfig::throttle`]; a new request can start it earlier. A
//! rate-limited call puts its request back at the front and pauses the queue
//! for [`RateLimitPolicy::pause`].
//!
//! State lives behind a `std::sync::Mutex` that is never held across an
//! await, so every transition below is atomic:
//!
//! ```text
//! Idle -> Processing -> Idle
//!                    \-> Paused -> Idle
//! ```
//!
//! [`RateLimitPolicy::pause`]: crate::RateLimitPolicy::pause

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::future::join_all;
use tokio::sync::oneshot;

use crate::cache::ImageCache;
use crate::config::QueueConfig;
use crate::error::ImageError;
use crate::generator::{ImageGenerator, ImageRef, Outcome};
use crate::prompt::product_prompt;
use crate::timer::ScheduledTask;

type ImageResult = Result<ImageRef, ImageError>;

/// Worker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueStatus {
    /// Ready to start the next request.
    Idle,
    /// A generation call is in flight.
    Processing,
    /// Waiting out a rate-limit pause.
    Paused,
    /// Shut down; no further work.
    Closed,
}

impl QueueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Idle => "idle",
            QueueStatus::Processing => "processing",
            QueueStatus::Paused => "paused",
            QueueStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub status: QueueStatus,
    /// Key being generated, if any.
    pub in_flight: Option<String>,
    /// Pending keys, front first.
    pub pending: Vec<String>,
    /// Number of cached images.
    pub cached: usize,
}

struct PendingRequest {
    key: String,
    waiters: Vec<oneshot::Sender<ImageResult>>,
    rate_limit_hits: u32,
}

impl PendingRequest {
    fn new(key: String, waiter: oneshot::Sender<ImageResult>) -> Self {
        Self {
            key,
            waiters: vec![waiter],
            rate_limit_hits: 0,
        }
    }

    /// Deliver `result` to every waiter. Dropped receivers are skipped.
    fn resolve(self, result: ImageResult) {
        for waiter in self.waiters {
            let _ = waiter.send(result.clone());
        }
    }
}

struct QueueState {
    status: QueueStatus,
    pending: VecDeque<PendingRequest>,
    in_flight: Option<PendingRequest>,
    cache: ImageCache,
    worker: Option<ScheduledTask>,
    timer: Option<ScheduledTask>,
}

struct Inner {
    generator: Arc<dyn ImageGenerator>,
    config: QueueConfig,
    state: Mutex<QueueState>,
}

/// Serialized, cached, rate-limit aware image generation.
///
/// Cloning shares the queue. Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct ImageQueue {
    inner: Arc<Inner>,
}

impl fmt::Debug for ImageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageQueue")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ImageQueue {
    /// Create an idle queue with an empty cache.
    pub fn new(generator: Arc<dyn ImageGenerator>, config: QueueConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                generator,
                config,
                state: Mutex::new(QueueState {
                    status: QueueStatus::Idle,
                    pending: VecDeque::new(),
                    in_flight: None,
                    cache: ImageCache::new(),
                    worker: None,
                    timer: None,
                }),
            }),
        }
    }

    pub fn config(&self) -> &QueueConfig {
        &self.inner.config
    }

    /// Request an image for `key`.
    ///
    /// A cached key resolves immediately without touching the queue.
    /// Otherwise the request is queued (or, with
    /// [`QueueConfig::dedupe_in_flight`], attached to an existing request for
    /// the same key) and the worker is started if idle. Dropping the returned
    /// future abandons the result but not the generation.
    pub fn request_image(&self, key: impl Into<String>) -> ImageRequest {
        let key = key.into();
        let (tx, rx) = oneshot::channel();
        {
            let mut guard = self.inner.lock();
            let state = &mut *guard;

            if let Some(image) = state.cache.get(&key) {
                tracing::trace!(key = %key, "image cache hit");
                return ImageRequest::ready(Ok(image.clone()));
            }
            if state.status == QueueStatus::Closed {
                return ImageRequest::ready(Err(ImageError::QueueClosed));
            }

            let existing = if self.inner.config.dedupe_in_flight {
                state
                    .in_flight
                    .iter_mut()
                    .chain(state.pending.iter_mut())
                    .find(|request| request.key == key)
            } else {
                None
            };

            match existing {
                Some(request) => {
                    tracing::debug!(key = %key, "attached to queued image request");
                    request.waiters.push(tx);
                }
                None => {
                    tracing::debug!(key = %key, queued = state.pending.len() + 1, "image request queued");
                    state.pending.push_back(PendingRequest::new(key, tx));
                }
            }
        }
        self.inner.kick();
        ImageRequest::waiting(rx)
    }

    /// Request an image, falling back to `fallback` on any failure.
    pub async fn image_or(&self, key: impl Into<String>, fallback: impl Into<ImageRef>) -> ImageRef {
        let key = key.into();
        match self.request_image(key.clone()).await {
            Ok(image) => image,
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "using fallback image");
                fallback.into()
            }
        }
    }

    /// Request several images and wait for all of them, in input order.
    pub async fn request_all<I, K>(&self, keys: I) -> Vec<ImageResult>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let requests: Vec<ImageRequest> = keys.into_iter().map(|k| self.request_image(k)).collect();
        join_all(requests).await
    }

    /// Cached image for `key`, if any.
    pub fn cached(&self, key: &str) -> Option<ImageRef> {
        self.inner.lock().cache.get(key).cloned()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        let state = self.inner.lock();
        QueueSnapshot {
            status: state.status,
            in_flight: state.in_flight.as_ref().map(|r| r.key.clone()),
            pending: state.pending.iter().map(|r| r.key.clone()).collect(),
            cached: state.cache.len(),
        }
    }

    /// Stop the queue: cancel timers and the in-flight call, and fail every
    /// outstanding request with [`ImageError::QueueClosed`].
    pub fn shutdown(&self) {
        let (in_flight, pending) = {
            let mut state = self.inner.lock();
            if state.status == QueueStatus::Closed {
                return;
            }
            state.status = QueueStatus::Closed;
            if let Some(timer) = state.timer.take() {
                timer.cancel();
            }
            if let Some(worker) = state.worker.take() {
                worker.cancel();
            }
            (state.in_flight.take(), std::mem::take(&mut state.pending))
        };

        let outstanding = in_flight.into_iter().chain(pending);
        let mut failed = 0;
        for request in outstanding {
            request.resolve(Err(ImageError::QueueClosed));
            failed += 1;
        }
        tracing::info!(failed, "image queue shut down");
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the next request if the worker is idle.
    fn kick(self: &Arc<Self>) {
        let mut state = self.lock();
        if state.status != QueueStatus::Idle {
            return;
        }
        let Some(request) = state.pending.pop_front() else {
            return;
        };

        let key = request.key.clone();
        state.status = QueueStatus::Processing;
        state.in_flight = Some(request);
        tracing::debug!(key = %key, remaining = state.pending.len(), "processing image request");

        let inner = Arc::clone(self);
        state.worker = Some(ScheduledTask::spawn(async move {
            inner.process(key).await;
        }));
    }

    async fn process(self: Arc<Self>, key: String) {
        let prompt = product_prompt(&key);
        let outcome = Outcome::classify(self.generator.generate(&prompt).await);

        let mut state = self.lock();
        if state.status != QueueStatus::Processing {
            return;
        }
        state.worker = None;
        let Some(mut request) = state.in_flight.take() else {
            return;
        };

        match outcome {
            Outcome::Image(image) => {
                tracing::debug!(key = %key, waiters = request.waiters.len(), "image generated");
                state.cache.insert(key, image.clone());
                request.resolve(Ok(image));
            }
            Outcome::Empty => {
                tracing::warn!(key = %key, "provider returned no image");
                request.resolve(Err(ImageError::GenerationEmpty { key }));
            }
            Outcome::RateLimited(error) => {
                request.rate_limit_hits += 1;
                let attempts = request.rate_limit_hits;
                let policy = self.config.rate_limit;

                if policy.should_retry(attempts) {
                    tracing::warn!(
                        key = %key,
                        attempts,
                        pause_secs = policy.pause.as_secs(),
                        error = %error,
                        "rate limited, requeued at front and pausing"
                    );
                    state.pending.push_front(request);
                } else {
                    tracing::warn!(key = %key, attempts, "rate limited, giving up");
                    request.resolve(Err(ImageError::RateLimitExhausted { key, attempts }));
                }

                state.status = QueueStatus::Paused;
                let inner = Arc::clone(&self);
                state.timer = Some(ScheduledTask::after(policy.pause, async move {
                    inner.resume();
                }));
                return;
            }
            Outcome::Failed(error) => {
                tracing::warn!(key = %key, error = %error, "image generation failed");
                request.resolve(Err(ImageError::GenerationFailed {
                    key,
                    message: error.to_string(),
                }));
            }
        }

        // The delayed pass is a no-op if a new request already started the
        // worker.
        state.status = QueueStatus::Idle;
        let inner = Arc::clone(&self);
        state.timer = Some(ScheduledTask::after(self.config.throttle, async move {
            inner.kick();
        }));
    }

    /// End a rate-limit pause and pick up the next request.
    fn resume(self: &Arc<Self>) {
        {
            let mut state = self.lock();
            if state.status != QueueStatus::Paused {
                return;
            }
            state.status = QueueStatus::Idle;
            state.timer = None;
            tracing::info!(pending = state.pending.len(), "resuming image queue");
        }
        self.kick();
    }
}

/// Future resolving to the outcome of one image request.
#[must_use = "the image is only delivered if the request is awaited"]
pub struct ImageRequest {
    state: RequestState,
}

enum RequestState {
    Ready(Option<ImageResult>),
    Waiting(oneshot::Receiver<ImageResult>),
}

impl ImageRequest {
    fn ready(result: ImageResult) -> Self {
        Self {
            state: RequestState::Ready(Some(result)),
        }
    }

    fn waiting(rx: oneshot::Receiver<ImageResult>) -> Self {
        Self {
            state: RequestState::Waiting(rx),
        }
    }

    /// Whether the request was answered from the cache or refused without
    /// queueing.
    pub fn is_immediate(&self) -> bool {
        matches!(self.state, RequestState::Ready(_))
    }
}

impl Future for ImageRequest {
    type Output = ImageResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            RequestState::Ready(result) => {
                Poll::Ready(result.take().unwrap_or(Err(ImageError::QueueClosed)))
            }
            RequestState::Waiting(rx) => Pin::new(rx)
                .poll(cx)
                .map(|received| received.unwrap_or(Err(ImageError::QueueClosed))),
        }
    }
}
