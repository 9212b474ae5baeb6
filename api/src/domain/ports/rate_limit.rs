//! Rate limit counter store port

use std::time::Duration;

use async_trait::async_trait;

use crate::error::RateLimitError;

/// Counter state for one key after a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHits {
    /// Hits recorded in the current window, including this one
    pub total: u64,
    /// Time until the current window expires
    pub resets_in: Duration,
}

/// Shared counter store backing the rate limiter
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record a hit for `key`.
    ///
    /// The first hit in a window starts a fresh window of length `window`;
    /// later hits only bump the counter.
    async fn increment(&self, key: &str, window: Duration) -> Result<WindowHits, RateLimitError>;
}
