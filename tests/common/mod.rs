//! Shared test collaborators: queueing mock service and recording surfaces.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use compass::config::CompassConfig;
use compass::controller::ConversationController;
use compass::error::{CompassError, Result};
use compass::render::{
    CrisisPresenter, RenderedEntry, ResourceCard, TranscriptRenderer, TranscriptSurface,
};
use compass::service::GuidanceService;
use compass::types::ServiceResponse;

/// A mock guidance service that returns queued replies in order and
/// captures what it was asked.
pub struct MockGuidanceService {
    replies: Mutex<VecDeque<Result<ServiceResponse>>>,
    captured: Mutex<Vec<String>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl MockGuidanceService {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            captured: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    /// Delay each reply by `delay` (useful with a paused clock).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queue a successful reply.
    pub fn queue_reply(&self, response: ServiceResponse) {
        self.replies.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a plain text reply.
    pub fn queue_text(&self, text: &str) {
        self.queue_reply(ServiceResponse {
            bot_response: text.to_string(),
            ..Default::default()
        });
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: CompassError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// How many times the service was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages the service received, in order.
    pub fn captured(&self) -> Vec<String> {
        self.captured.lock().unwrap().clone()
    }
}

#[async_trait]
impl GuidanceService for MockGuidanceService {
    async fn send_message(&self, message: &str) -> Result<ServiceResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.captured.lock().unwrap().push(message.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ServiceResponse {
                    bot_response: "Thanks for your message!".to_string(),
                    ..Default::default()
                })
            })
    }
}

/// A service whose future never resolves.
pub struct HangingService;

#[async_trait]
impl GuidanceService for HangingService {
    async fn send_message(&self, _message: &str) -> Result<ServiceResponse> {
        futures::future::pending().await
    }
}

/// Records everything the pipeline does to the transcript.
#[derive(Default)]
pub struct RecordingSurface {
    entries: Mutex<Vec<RenderedEntry>>,
    composing: Mutex<Vec<bool>>,
    scrolls: Mutex<Vec<u32>>,
    focus_count: AtomicUsize,
}

impl RecordingSurface {
    pub fn entries(&self) -> Vec<RenderedEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn composing_log(&self) -> Vec<bool> {
        self.composing.lock().unwrap().clone()
    }

    /// Last composing state, defaulting to hidden.
    pub fn is_composing(&self) -> bool {
        self.composing.lock().unwrap().last().copied().unwrap_or(false)
    }

    pub fn scrolls(&self) -> Vec<u32> {
        self.scrolls.lock().unwrap().clone()
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count.load(Ordering::SeqCst)
    }
}

impl TranscriptSurface for RecordingSurface {
    fn append_entry(&self, entry: RenderedEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    fn set_composing(&self, visible: bool) {
        self.composing.lock().unwrap().push(visible);
    }

    fn scroll_extent(&self) -> u32 {
        self.entries.lock().unwrap().len() as u32 * 100
    }

    fn scroll_to(&self, offset: u32) {
        self.scrolls.lock().unwrap().push(offset);
    }

    fn focus_composer(&self) {
        self.focus_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Surface whose `append_entry` panics; everything else is inert.
#[derive(Default)]
pub struct PanickingSurface;

impl TranscriptSurface for PanickingSurface {
    fn append_entry(&self, _entry: RenderedEntry) {
        panic!("surface refused the entry");
    }

    fn set_composing(&self, _visible: bool) {}

    fn scroll_extent(&self) -> u32 {
        0
    }

    fn scroll_to(&self, _offset: u32) {}

    fn focus_composer(&self) {}
}

/// Records crisis presentations.
#[derive(Default)]
pub struct RecordingPresenter {
    presentations: Mutex<Vec<Vec<ResourceCard>>>,
}

impl RecordingPresenter {
    pub fn presentations(&self) -> Vec<Vec<ResourceCard>> {
        self.presentations.lock().unwrap().clone()
    }
}

impl CrisisPresenter for RecordingPresenter {
    fn present(&self, cards: Vec<ResourceCard>) {
        self.presentations.lock().unwrap().push(cards);
    }
}

/// Config with synchronous auto-scroll, so tests can assert immediately.
pub fn quick_config() -> CompassConfig {
    CompassConfig::builder().auto_scroll_defer(Duration::ZERO).build()
}

/// Assemble a full pipeline around the given service.
pub fn pipeline(
    config: CompassConfig,
    service: Arc<dyn GuidanceService>,
) -> (
    Arc<ConversationController>,
    Arc<RecordingSurface>,
    Arc<RecordingPresenter>,
) {
    let surface = Arc::new(RecordingSurface::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let renderer = TranscriptRenderer::new(
        surface.clone(),
        presenter.clone(),
        config.auto_scroll_defer,
    );
    let controller = Arc::new(ConversationController::new(config, service, renderer));
    (controller, surface, presenter)
}

/// Pipeline with a fresh mock service and synchronous scrolling.
pub fn mock_pipeline() -> (
    Arc<ConversationController>,
    Arc<MockGuidanceService>,
    Arc<RecordingSurface>,
    Arc<RecordingPresenter>,
) {
    let service = Arc::new(MockGuidanceService::new());
    let (controller, surface, presenter) = pipeline(quick_config(), service.clone());
    (controller, service, surface, presenter)
}
