//! School Locator API Server
//!
//! Stores schools with their coordinates and lists them nearest-first from
//! a caller-supplied point. Uses hexagonal (ports & adapters) architecture
//! for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod rate_limit;
mod response;

#[cfg(test)]
mod test_utils;


use adapters::{PostgresSchoolRepository, RedisRateLimitStore};
use app::{SchoolCommandService, SchoolQueryService};
use config::Config;
use domain::ports::{RateLimitStore, SchoolRepository};
use rate_limit::{rate_limit_middleware, RateLimiter};

/// Application state shared across all handlers
pub struct AppState<R>
where
    R: SchoolRepository,
{
    pub school_commands: Arc<SchoolCommandService<R>>,
    pub school_queries: Arc<SchoolQueryService<R>>,
}

impl<R> AppState<R>
where
    R: SchoolRepository,
{
    pub fn new(schools: Arc<R>) -> Self {
        Self {
            school_commands: Arc::new(SchoolCommandService::new(schools.clone())),
            school_queries: Arc::new(SchoolQueryService::new(schools)),
        }
    }
}

// Derived Clone would require `R: Clone`
impl<R> Clone for AppState<R>
where
    R: SchoolRepository,
{
    fn clone(&self) -> Self {
        Self {
            school_commands: self.school_commands.clone(),
            school_queries: self.school_queries.clone(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router
///
/// The rate limiter wraps everything, the fallback included, so unknown
/// paths count against the client too.
pub fn build_router<R, L>(state: AppState<R>, limiter: Arc<RateLimiter<L>>) -> Router
where
    R: SchoolRepository + 'static,
    L: RateLimitStore + 'static,
{
    Router::new()
        // Health check
        .route("/health", get(health))
        // Schools
        .route(
            "/school",
            post(handlers::create_school::<R>).get(handlers::list_schools::<R>),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(
                    limiter,
                    rate_limit_middleware::<L>,
                ))
                .layer(TraceLayer::new_for_http()),
        )
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,school_locator_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting School Locator API...");

    // Load configuration
    let config = Config::from_env().context("Invalid configuration")?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Connect to Redis
    tracing::info!("Connecting to Redis...");
    let rate_limit_store = Arc::new(
        RedisRateLimitStore::connect(&config.redis_url)
            .await
            .context("Failed to connect to Redis")?,
    );
    tracing::info!("Redis connected");

    // Create adapters and application state
    let school_repo = Arc::new(PostgresSchoolRepository::new(db.clone()));
    let state = AppState::new(school_repo);
    let limiter = Arc::new(RateLimiter::new(rate_limit_store, config.rate_limit));
    tracing::info!(
        window_secs = config.rate_limit.window.as_secs(),
        max_requests = config.rate_limit.max_requests,
        "Rate limiting enabled"
    );

    let app = build_router(state, limiter);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    db.close().await.context("Failed to close database")?;
    tracing::info!("Shutdown complete");

    Ok(())
}
