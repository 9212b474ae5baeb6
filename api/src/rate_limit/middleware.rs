//! Rate limit middleware

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::{RateLimitDecision, RateLimiter};
use crate::domain::ports::RateLimitStore;
use crate::error::AppError;

const TOO_MANY_REQUESTS_MESSAGE: &str = "Too many requests, please try again later.";

/// Body sent when a client is over its limit
#[derive(Debug, Serialize)]
struct RateLimitedResponse {
    status: u16,
    message: &'static str,
}

/// Identify the client by the peer address of its connection
fn client_key(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests(decision: &RateLimitDecision) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(RateLimitedResponse {
            status: StatusCode::TOO_MANY_REQUESTS.as_u16(),
            message: TOO_MANY_REQUESTS_MESSAGE,
        }),
    )
        .into_response();
    response.headers_mut().insert(
        header::RETRY_AFTER,
        HeaderValue::from(decision.reset_secs()),
    );
    response
}

/// Rate limiting middleware
///
/// Counts every request before routing. Requests over the limit are
/// answered with 429 and never reach a handler. If the counter store is
/// unreachable the request fails with 500 rather than going through
/// uncounted.
pub async fn rate_limit_middleware<RS>(
    State(limiter): State<Arc<RateLimiter<RS>>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError>
where
    RS: RateLimitStore + 'static,
{
    let client = client_key(&request);
    let decision = limiter.check(&client).await?;

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        tracing::warn!(
            client = %client,
            limit = decision.limit,
            reset_secs = decision.reset_secs(),
            "Rate limit exceeded"
        );
        too_many_requests(&decision)
    };

    limiter.write_headers(&decision, response.headers_mut());
    Ok(response)
}
