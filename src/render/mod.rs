//! Transcript rendering.

pub mod format;
pub mod surface;

pub use surface::{CrisisPresenter, RenderedEntry, ResourceCard, TranscriptSurface};

use std::sync::Arc;
use std::time::Duration;

use crate::types::{Message, Resource};

/// Renders messages and crisis listings onto a [`TranscriptSurface`].
///
/// Stateless per call: rendering the same message twice produces two
/// structurally identical entries, and nothing here mutates the message.
/// Never calls back into the controller.
pub struct TranscriptRenderer {
    surface: Arc<dyn TranscriptSurface>,
    presenter: Arc<dyn CrisisPresenter>,
    auto_scroll_defer: Duration,
}

impl TranscriptRenderer {
    pub fn new(
        surface: Arc<dyn TranscriptSurface>,
        presenter: Arc<dyn CrisisPresenter>,
        auto_scroll_defer: Duration,
    ) -> Self {
        Self {
            surface,
            presenter,
            auto_scroll_defer,
        }
    }

    /// Format a message and append it to the surface, then keep the latest
    /// entry in view.
    pub fn render_message(&self, message: &Message) {
        let entry = RenderedEntry {
            role: message.role,
            html: format::format_message_html(&message.text),
            timestamp_label: format::timestamp_label(&message.timestamp),
        };
        self.surface.append_entry(entry);
        self.schedule_scroll();
    }

    /// Sanitize an urgent-resource listing and hand it to the crisis
    /// presenter. Network-originated fields get the same escaping as
    /// message text.
    pub fn render_crisis_resources(&self, resources: &[Resource]) {
        let cards = resources
            .iter()
            .map(|resource| ResourceCard {
                title_html: format::escape_html(&resource.title),
                description_html: format::escape_html(&resource.description),
                link_html: resource
                    .url
                    .as_deref()
                    .map(|url| format::anchor(&format::escape_html(url), "Open resource")),
            })
            .collect();
        self.presenter.present(cards);
    }

    /// Show or hide the composing indicator.
    pub fn set_composing(&self, visible: bool) {
        self.surface.set_composing(visible);
    }

    /// Signal that the input composer may take focus again.
    pub fn focus_composer(&self) {
        self.surface.focus_composer();
    }

    /// Scroll to the surface's extent, deferred so layout can settle. A
    /// zero defer scrolls synchronously (no task is spawned).
    fn schedule_scroll(&self) {
        if self.auto_scroll_defer.is_zero() {
            self.surface.scroll_to(self.surface.scroll_extent());
            return;
        }
        let surface = Arc::clone(&self.surface);
        let defer = self.auto_scroll_defer;
        tokio::spawn(async move {
            tokio::time::sleep(defer).await;
            surface.scroll_to(surface.scroll_extent());
        });
    }
}
