//! Configuration for the conversation pipeline.

use std::time::Duration;

use bon::Builder;

/// Longest accepted message, in characters.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 500;

/// Options recognized by the pipeline.
///
/// Construct with [`CompassConfig::builder`] or load overrides from the
/// environment with [`CompassConfig::from_env`].
#[derive(Debug, Clone, Builder)]
pub struct CompassConfig {
    /// Messages longer than this (in characters) are rejected.
    #[builder(default = DEFAULT_MAX_MESSAGE_LENGTH)]
    pub max_message_length: usize,

    /// Pacing hint for the composing-indicator animation. Cosmetic only:
    /// the controller toggles the indicator immediately and never sleeps
    /// on this value.
    #[builder(default = Duration::from_millis(1000))]
    pub typing_indicator_delay: Duration,

    /// Delay before auto-scrolling the transcript after an append, so the
    /// surface can settle layout. Zero scrolls synchronously.
    #[builder(default = Duration::from_millis(100))]
    pub auto_scroll_defer: Duration,

    /// Declared retry attempt count. Recognized but not applied: the
    /// guidance call is attempted exactly once per submission, since the
    /// endpoint is not known to be idempotent.
    #[builder(default = 3)]
    pub retry_attempts: u32,

    /// Base URL of the guidance service, for the HTTP collaborator.
    pub base_url: Option<String>,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CompassConfig {
    /// Load overrides from environment variables (`COMPASS_BASE_URL`,
    /// `COMPASS_MAX_MESSAGE_LENGTH`), reading a `.env` file if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();

        if let Ok(url) = std::env::var("COMPASS_BASE_URL") {
            config.base_url = Some(url);
        }
        if let Ok(raw) = std::env::var("COMPASS_MAX_MESSAGE_LENGTH") {
            match raw.parse() {
                Ok(max) => config.max_message_length = max,
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparsable COMPASS_MAX_MESSAGE_LENGTH")
                }
            }
        }

        config
    }
}
