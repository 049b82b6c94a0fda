//! The seam between the sans-IO core and whatever performs network I/O.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Non-2xx statuses must be returned as `Ok(HttpResponse)`; only failures
/// that produce no response at all are `Err(ApiError::Transport)`. No
/// retries and no caching belong here.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
