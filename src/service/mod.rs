//! Guidance service seam and HTTP implementation.

pub mod http;

pub use http::HttpGuidanceService;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ServiceResponse;

/// The remote component that answers a user message with a response
/// payload.
#[async_trait]
pub trait GuidanceService: Send + Sync {
    /// Send one user message and await the service's reply.
    ///
    /// Called at most once per accepted submission; the pipeline never
    /// retries on its own.
    async fn send_message(&self, message: &str) -> Result<ServiceResponse>;
}
