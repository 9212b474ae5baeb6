//! Request rate limiting
//!
//! A fixed-window limiter over a shared counter store. Every client gets
//! `max_requests` per window; the window starts with the client's first
//! request.

pub mod middleware;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue};

use crate::config::RateLimitConfig;
use crate::domain::ports::RateLimitStore;
use crate::error::RateLimitError;

pub use middleware::rate_limit_middleware;

/// Outcome of counting one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub limit: u64,
    pub remaining: u64,
    pub resets_in: Duration,
    pub allowed: bool,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets, rounded up
    pub fn reset_secs(&self) -> u64 {
        let millis = u64::try_from(self.resets_in.as_millis()).unwrap_or(u64::MAX);
        millis.div_ceil(1000)
    }
}

pub struct RateLimiter<RS>
where
    RS: RateLimitStore,
{
    store: Arc<RS>,
    policy: RateLimitConfig,
}

impl<RS> RateLimiter<RS>
where
    RS: RateLimitStore,
{
    pub fn new(store: Arc<RS>, policy: RateLimitConfig) -> Self {
        Self { store, policy }
    }

    /// Count a request from `client` against its current window
    pub async fn check(&self, client: &str) -> Result<RateLimitDecision, RateLimitError> {
        let hits = self.store.increment(client, self.policy.window).await?;
        let limit = self.policy.max_requests;

        Ok(RateLimitDecision {
            limit,
            remaining: limit.saturating_sub(hits.total),
            resets_in: hits.resets_in,
            allowed: hits.total <= limit,
        })
    }

    /// Write the `RateLimit-*` headers describing `decision`
    pub fn write_headers(&self, decision: &RateLimitDecision, headers: &mut HeaderMap) {
        let policy = format!("{};w={}", decision.limit, self.policy.window.as_secs());
        if let Ok(value) = HeaderValue::from_str(&policy) {
            headers.insert("ratelimit-policy", value);
        }
        headers.insert("ratelimit-limit", HeaderValue::from(decision.limit));
        headers.insert("ratelimit-remaining", HeaderValue::from(decision.remaining));
        headers.insert("ratelimit-reset", HeaderValue::from(decision.reset_secs()));
    }
}
