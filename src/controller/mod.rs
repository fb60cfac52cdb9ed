//! Conversation state and request orchestration.
//!
//! [`ConversationController`] owns all mutable session state and sequences
//! a single outstanding request to the guidance service. The state lock is
//! never held across an await; strict serialization comes from the
//! `processing` guard, so no response-matching logic exists anywhere.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CompassConfig;
use crate::error::{CompassError, ValidationError};
use crate::render::TranscriptRenderer;
use crate::service::GuidanceService;
use crate::types::{Message, MessageFlags, Role, ServiceResponse};

const APOLOGY: &str =
    "Sorry, something went wrong while processing your message. Please try again.";

/// All mutable conversation state. Mutated only through controller
/// operations.
#[derive(Debug, Default)]
struct ConversationState {
    processing: bool,
    history: Vec<Message>,
    pending_draft: String,
}

/// Metadata for one conversation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl SessionInfo {
    fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
            active: true,
        }
    }
}

/// On-demand counts derived from the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversationStats {
    pub total: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub errors: usize,
}

/// Orchestrates the message pipeline for one session.
///
/// Per-submission state machine: `Idle → Locked(composing) →
/// {RenderedSuccess | RenderedError} → Idle`. A second submit while locked
/// is a no-op; terminal states are transient and always return to idle.
pub struct ConversationController {
    config: CompassConfig,
    service: Arc<dyn GuidanceService>,
    renderer: TranscriptRenderer,
    state: Mutex<ConversationState>,
    session: Mutex<SessionInfo>,
}

impl ConversationController {
    pub fn new(
        config: CompassConfig,
        service: Arc<dyn GuidanceService>,
        renderer: TranscriptRenderer,
    ) -> Self {
        Self {
            config,
            service,
            renderer,
            state: Mutex::new(ConversationState::default()),
            session: Mutex::new(SessionInfo::new()),
        }
    }

    /// Validate raw input without side effects: trim, reject empty, reject
    /// over-length (in characters).
    pub fn validate(&self, raw: &str) -> Result<String, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        let max = self.config.max_message_length;
        if trimmed.chars().count() > max {
            return Err(ValidationError::TooLong { max });
        }
        Ok(trimmed.to_string())
    }

    /// Submit raw input. Side effects only: a busy pipeline or an ended
    /// session ignores the call silently, and validation failures surface
    /// as a rendered assistant entry, never as an error to the caller.
    pub async fn submit(&self, raw: &str) {
        if !self.session_active() {
            warn!("submission ignored: session has ended");
            return;
        }
        // Busy wins over validation: a locked pipeline stays silent even
        // for input that would have been rejected.
        if self.processing() {
            warn!("submission ignored: a request is already in flight");
            return;
        }

        let text = match self.validate(raw) {
            Ok(text) => text,
            Err(err) => {
                debug!(error = %err, "rejected submission");
                self.push_and_render(
                    Message::assistant(err.to_string()).with_flags(MessageFlags {
                        is_error: true,
                        is_urgent: false,
                    }),
                );
                self.renderer.focus_composer();
                return;
            }
        };

        let user_message = Message::user(text.clone());
        {
            let mut state = self.state.lock().unwrap();
            if state.processing {
                warn!("submission ignored: a request is already in flight");
                return;
            }
            state.processing = true;
            state.pending_draft.clear();
            state.history.push(user_message.clone());
        }

        // Releases the lock and restores composer focus on every exit path
        // below, including a panicking collaborator.
        let _guard = ProcessingGuard { controller: self };

        self.renderer.render_message(&user_message);
        self.renderer.set_composing(true);

        debug!(chars = text.chars().count(), "dispatching to guidance service");
        match self.service.send_message(&text).await {
            Ok(response) => self.handle_response(response),
            Err(err) => self.handle_failure(err),
        }
    }

    /// Populate the draft with `text`, then submit it.
    pub async fn submit_quick(&self, text: &str) {
        self.set_draft(text);
        let draft = self.draft();
        self.submit(&draft).await;
    }

    fn handle_response(&self, response: ServiceResponse) {
        self.renderer.set_composing(false);
        let flags = MessageFlags {
            is_error: response.is_error,
            is_urgent: response.is_urgent,
        };
        self.push_and_render(Message::assistant(response.bot_response.clone()).with_flags(flags));

        if response.needs_crisis_presentation() {
            let resources = response.relevant_resources.as_deref().unwrap_or_default();
            info!(count = resources.len(), "presenting crisis resources");
            self.renderer.render_crisis_resources(resources);
        }
    }

    fn handle_failure(&self, err: CompassError) {
        warn!(error = %err, "guidance request failed");
        self.renderer.set_composing(false);
        let text = match err.user_detail() {
            Some(detail) => format!("{APOLOGY} ({detail})"),
            None => APOLOGY.to_string(),
        };
        self.push_and_render(Message::assistant(text).with_flags(MessageFlags {
            is_error: true,
            is_urgent: false,
        }));
    }

    fn push_and_render(&self, message: Message) {
        self.state.lock().unwrap().history.push(message.clone());
        self.renderer.render_message(&message);
    }

    /// Whether a request is currently in flight.
    pub fn processing(&self) -> bool {
        self.state.lock().unwrap().processing
    }

    /// Snapshot of the history so far.
    pub fn history(&self) -> Vec<Message> {
        self.state.lock().unwrap().history.clone()
    }

    pub fn history_len(&self) -> usize {
        self.state.lock().unwrap().history.len()
    }

    pub fn set_draft(&self, text: &str) {
        self.state.lock().unwrap().pending_draft = text.to_string();
    }

    pub fn draft(&self) -> String {
        self.state.lock().unwrap().pending_draft.clone()
    }

    /// Snapshot of the session metadata.
    pub fn session(&self) -> SessionInfo {
        self.session.lock().unwrap().clone()
    }

    fn session_active(&self) -> bool {
        self.session.lock().unwrap().active
    }

    /// End this session. Further submissions are ignored; the history is
    /// kept. Starting over means constructing a new controller.
    pub fn end_session(&self) {
        let mut session = self.session.lock().unwrap();
        if !session.active {
            return;
        }
        session.active = false;
        session.ended_at = Some(Utc::now());
        info!(session_id = %session.session_id, "session ended");
    }

    /// Counts derived from the history.
    pub fn stats(&self) -> ConversationStats {
        let state = self.state.lock().unwrap();
        let mut stats = ConversationStats {
            total: state.history.len(),
            ..Default::default()
        };
        for message in &state.history {
            match message.role {
                Role::User => stats.user_messages += 1,
                Role::Assistant => stats.assistant_messages += 1,
            }
            if message.flags.is_error {
                stats.errors += 1;
            }
        }
        stats
    }

    /// Configuration this controller runs with.
    pub fn config(&self) -> &CompassConfig {
        &self.config
    }
}

/// Clears the processing flag, hides the composing indicator, and restores
/// composer focus when dropped, so every exit path of `submit` unlocks the
/// pipeline.
struct ProcessingGuard<'a> {
    controller: &'a ConversationController,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.controller.state.lock() {
            state.processing = false;
        }
        self.controller.renderer.set_composing(false);
        self.controller.renderer.focus_composer();
    }
}
