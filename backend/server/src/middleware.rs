//! # Middleware
//!
//! ## Tracing
//! Every request gets a short trace id, carried in a `request` span and echoed
//! back as `X-Trace-Id`. Entry, exit status and elapsed time are logged, and
//! anything slower than `SLOW_REQUEST_MS` is logged as a warning.
//!
//! ## Rate limiting
//! Fixed window per client and route. The client is the first address in
//! `X-Forwarded-For`, then `X-Real-IP`, then the socket peer. Request number
//! `RATE_LIMIT + 1` inside a window is answered with 429 and a `Retry-After`.
//!
//! If the counter itself fails (redis down) the request goes through.
use std::{net::SocketAddr, sync::Arc, time::Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub const TRACE_ID: HeaderName = HeaderName::from_static("x-trace-id");
pub const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";
const UNKNOWN_CLIENT: &str = "unknown";

fn trace_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

pub async fn trace_request(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let trace_id = trace_id();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = info_span!("request", trace_id = %trace_id, %method, %path);

    async move {
        info!("Request started");
        let start = Instant::now();

        let mut response = next.run(request).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        if elapsed > state.config.slow_request {
            warn!(status, elapsed_ms = elapsed.as_millis() as u64, "Slow request");
        } else {
            info!(status, elapsed_ms = elapsed.as_millis() as u64, "Request finished");
        }

        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert(TRACE_ID, value);
        }

        response
    }
    .instrument(span)
    .await
}

fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let real_ip = headers
        .get(REAL_IP)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    forwarded
        .or(real_ip)
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let client = client_key(request.headers(), peer);
    let key = format!("{client}:{}", request.uri().path());
    let limit = state.config.rate_limit;

    let hit = match state.limiter.hit(&key, state.config.rate_limit_window).await {
        Ok(hit) => hit,
        Err(e) => {
            warn!("Rate limiter unavailable, letting {key} through: {e}");
            return Ok(next.run(request).await);
        }
    };

    if hit.count > limit {
        warn!(%client, count = hit.count, limit, "Rate limit exceeded");

        return Err(AppError::RateLimited {
            limit,
            retry_after_secs: hit.resets_in_secs,
        });
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(limit));
    headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(limit - hit.count));

    Ok(response)
}
