//! Guidance service response payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resource offered alongside an urgent response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Response payload from the guidance service.
///
/// Treated as an opaque, immutable value: deserialized once, never
/// persisted beyond the current history. Absent flags default to false and
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceResponse {
    pub bot_response: String,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_resources: Option<Vec<Resource>>,
    #[serde(default)]
    pub is_error: bool,
    /// Service-assessed helpfulness score, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpfulness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
}

impl ServiceResponse {
    /// True when this response must trigger the crisis presentation.
    pub fn needs_crisis_presentation(&self) -> bool {
        self.is_urgent && self.relevant_resources.is_some()
    }
}
