use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Type alias for the global governor layer (IP-based rate limiting)
pub type GlobalGovernorLayer = GovernorLayer<
    tower_governor::key_extractor::PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Per-IP token bucket: one token every `rate_limit_per_ms`, holding at most
/// `rate_limit_burst`. Tracking clients poll, so the defaults are generous.
pub fn create_global_governor(config: &Config) -> AppResult<GlobalGovernorLayer> {
    let governor_config = GovernorConfigBuilder::default()
        .per_millisecond(config.rate_limit_per_ms)
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or_else(|| {
            AppError::Config("Rate limit period and burst must be greater than zero".to_string())
        })?;

    Ok(GovernorLayer::new(Arc::new(governor_config)))
}

/// Trace every request; rejections and failures are raised to `warn`.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match failure_reason(status) {
        Some(reason) => tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            status = %status,
            elapsed_ms,
            "{}",
            reason
        ),
        None => tracing::debug!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            status = %status,
            elapsed_ms,
            "Request completed"
        ),
    }

    response
}

fn failure_reason(status: StatusCode) -> Option<&'static str> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        Some("Rate limited")
    } else if status.is_client_error() || status.is_server_error() {
        Some("Request failed")
    } else {
        None
    }
}
