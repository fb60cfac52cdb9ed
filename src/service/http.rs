//! HTTP transport for the guidance service.

use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::auth::TokenChain;
use crate::error::{CompassError, Result};
use crate::types::ServiceResponse;

use super::GuidanceService;

const PROCESS_MESSAGE_PATH: &str = "/process-message/";

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
///
/// The timeout here is transport-level; the pipeline itself enforces none.
fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Guidance service reached over HTTP.
///
/// Posts `{"message": ...}` to `{base_url}/process-message/`, declaring the
/// request as interactive (`X-Requested-With`) and authenticating with a
/// session token resolved from the configured [`TokenChain`].
pub struct HttpGuidanceService {
    base_url: String,
    tokens: TokenChain,
}

impl HttpGuidanceService {
    pub fn new(base_url: impl Into<String>, tokens: TokenChain) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn request_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Requested-With",
            HeaderValue::from_static("XMLHttpRequest"),
        );
        if let Ok(val) = HeaderValue::from_str(token) {
            headers.insert("X-CSRFToken", val);
        }
        headers
    }
}

#[async_trait]
impl GuidanceService for HttpGuidanceService {
    async fn send_message(&self, message: &str) -> Result<ServiceResponse> {
        let token = self.tokens.resolve().ok_or_else(|| {
            CompassError::Authentication("no session token available from any source".into())
        })?;

        let url = format!("{}{}", self.base_url, PROCESS_MESSAGE_PATH);
        let body = serde_json::json!({ "message": message });

        debug!(url = %url, "dispatching guidance request");

        let resp = shared_client()
            .post(&url)
            .headers(self.request_headers(&token))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body_text = resp.text().await.unwrap_or_default();
            warn!(status, "guidance request failed");
            return Err(status_to_error(status, &body_text));
        }

        Ok(resp.json::<ServiceResponse>().await?)
    }
}

/// Map a non-success status to an error, preferring the service's own
/// error detail when the body carries one.
fn status_to_error(status: u16, body: &str) -> CompassError {
    let detail = extract_error_detail(body).unwrap_or_else(|| body.to_string());
    match status {
        401 | 403 => CompassError::Authentication(detail),
        _ => CompassError::api(status, detail),
    }
}

/// Pull the `error` field out of a JSON error body, if there is one.
fn extract_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_extracted_from_json_body() {
        let err = status_to_error(500, r#"{"error": "Internal server error processing message."}"#);
        assert!(matches!(
            &err,
            CompassError::Api { status: 500, message } if message == "Internal server error processing message."
        ));
    }

    #[test]
    fn non_json_body_is_kept_verbatim() {
        let err = status_to_error(502, "Bad Gateway");
        assert!(matches!(
            &err,
            CompassError::Api { status: 502, message } if message == "Bad Gateway"
        ));
    }

    #[test]
    fn auth_statuses_map_to_authentication() {
        assert!(matches!(
            status_to_error(403, r#"{"error": "CSRF verification failed"}"#),
            CompassError::Authentication(msg) if msg == "CSRF verification failed"
        ));
    }

    #[test]
    fn trailing_slash_in_base_url_is_normalized() {
        let service = HttpGuidanceService::new(
            "https://guidance.example/",
            crate::auth::TokenChain::new(vec![]),
        );
        assert_eq!(service.base_url, "https://guidance.example");
    }
}
