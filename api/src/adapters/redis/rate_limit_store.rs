//! Redis adapter for RateLimitStore
//!
//! Each client key holds a counter with a millisecond TTL. A Lua script
//! bumps the counter and starts the TTL on the first hit, so concurrent
//! API instances see one consistent window.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{RedisError, Script};

use crate::domain::ports::{RateLimitStore, WindowHits};
use crate::error::RateLimitError;

const KEY_PREFIX: &str = "rl:";

/// KEYS[1] = counter key, ARGV[1] = window in milliseconds.
/// Returns { total hits, milliseconds until reset }.
const INCREMENT_SCRIPT: &str = r#"
local total = redis.call("INCR", KEYS[1])
local ttl = redis.call("PTTL", KEYS[1])
if ttl <= 0 then
  redis.call("PEXPIRE", KEYS[1], tonumber(ARGV[1]))
  ttl = tonumber(ARGV[1])
end
return { total, ttl }
"#;

/// Redis implementation of RateLimitStore
pub struct RedisRateLimitStore {
    conn: ConnectionManager,
    script: Script,
}

impl RedisRateLimitStore {
    /// Open a managed connection; it reconnects on its own after failures
    pub async fn connect(url: &str) -> Result<Self, RateLimitError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self {
            conn,
            script: Script::new(INCREMENT_SCRIPT),
        })
    }
}

fn counter_key(key: &str) -> String {
    format!("{}{}", KEY_PREFIX, key)
}

/// Connection-level failures mean the store is down, not misbehaving
fn store_error(e: RedisError) -> RateLimitError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
    {
        RateLimitError::Unavailable(e.to_string())
    } else {
        RateLimitError::Redis(e)
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn increment(&self, key: &str, window: Duration) -> Result<WindowHits, RateLimitError> {
        let mut conn = self.conn.clone();
        let window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);

        let (total, ttl_ms): (i64, i64) = self
            .script
            .key(counter_key(key))
            .arg(window_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(store_error)?;

        let total = u64::try_from(total)
            .ok()
            .filter(|t| *t > 0)
            .ok_or_else(|| RateLimitError::Reply(format!("hit count {}", total)))?;

        Ok(WindowHits {
            total,
            resets_in: Duration::from_millis(ttl_ms.max(0) as u64),
        })
    }
}
