//! Convenience re-exports for common use.

pub use crate::config::CompassConfig;
pub use crate::controller::{ConversationController, ConversationStats, SessionInfo};
pub use crate::error::{CompassError, Result, ValidationError};
pub use crate::render::{TranscriptRenderer, TranscriptSurface};
pub use crate::service::GuidanceService;
pub use crate::types::{Message, MessageFlags, Resource, Role, ServiceResponse};
