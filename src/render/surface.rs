//! Surface traits the pipeline renders into.
//!
//! Implementations belong to the embedding UI. The pipeline only appends
//! entries, toggles the composing indicator, drives scrolling, and hands
//! sanitized resource cards to the crisis overlay.

use crate::types::Role;

/// A formatted transcript entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub role: Role,
    /// Sanitized HTML body.
    pub html: String,
    /// Local hour:minute label.
    pub timestamp_label: String,
}

/// Append-only visual transcript.
pub trait TranscriptSurface: Send + Sync {
    /// Append one entry to the transcript.
    fn append_entry(&self, entry: RenderedEntry);

    /// Show or hide the composing indicator.
    fn set_composing(&self, visible: bool);

    /// Current scrollable extent, in surface units.
    fn scroll_extent(&self) -> u32;

    /// Scroll to the given offset.
    fn scroll_to(&self, offset: u32);

    /// Signal that the input composer may take focus again.
    fn focus_composer(&self);
}

/// A crisis resource formatted for display. All fields are sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCard {
    pub title_html: String,
    pub description_html: String,
    /// Action anchor, when the resource carries a URL.
    pub link_html: Option<String>,
}

/// Overlay shown when an urgent response arrives with resources attached.
pub trait CrisisPresenter: Send + Sync {
    fn present(&self, cards: Vec<ResourceCard>);
}
