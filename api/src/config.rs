use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u64 = 100;
const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Redis instance holding the rate limit counters
    pub redis_url: String,
    pub port: u16,
    pub rate_limit: RateLimitConfig,
}

/// Fixed-window rate limit policy, applied per client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(DEFAULT_RATE_LIMIT_WINDOW_SECS),
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let window_secs: u64 = parse_or(
            &lookup,
            "RATE_LIMIT_WINDOW_SECS",
            DEFAULT_RATE_LIMIT_WINDOW_SECS,
        )?;
        let max_requests: u64 = parse_or(
            &lookup,
            "RATE_LIMIT_MAX_REQUESTS",
            DEFAULT_RATE_LIMIT_MAX_REQUESTS,
        )?;
        require_positive("RATE_LIMIT_WINDOW_SECS", window_secs)?;
        if window_secs > MAX_RATE_LIMIT_WINDOW_SECS {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_WINDOW_SECS",
                value: window_secs.to_string(),
                reason: format!("must be at most {}", MAX_RATE_LIMIT_WINDOW_SECS),
            });
        }
        require_positive("RATE_LIMIT_MAX_REQUESTS", max_requests)?;

        Ok(Self {
            database_url,
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            rate_limit: RateLimitConfig {
                window: Duration::from_secs(window_secs),
                max_requests,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn require_positive(key: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}
