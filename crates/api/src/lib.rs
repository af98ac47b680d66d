//! # MedSched API
//!
//! Web server for doctor weekly schedules and patient-facing availability.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Parse requests, call the scheduler, shape responses
//! - **Middleware**: Caller identity/role checks and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; persistence is reached through the
//! store traits in `medsched-core`, backed by PostgreSQL in production.

/// Configuration module for API settings
pub mod config;
/// Path, query and body extractors that reject with `AppError`
pub mod extract;
/// Request handlers
pub mod handlers;
/// Middleware for caller identity and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use eyre::Result;
use medsched_core::{localization::LocalizationConfig, scheduler::WeeklyScheduler};
use medsched_db::{DbPool, PgBookingStore, PgTemplateStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber, filter::LevelFilter};

use crate::middleware::auth::{ROLE_HEADER, SUBJECT_ID_HEADER};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Scheduling service over the template and booking stores
    pub scheduler: WeeklyScheduler,
    /// Languages the API answers in
    pub localization: LocalizationConfig,
}

/// Builds the application router with all routes attached to `state`
///
/// Cross-cutting layers (CORS, timeouts, tracing) are added by
/// [`start_server`], so tests can drive this router directly.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Weekly template management endpoints
        .merge(routes::schedule::routes())
        // Availability lookup endpoints
        .merge(routes::availability::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool backing the stores
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging; RUST_LOG directives still apply
    let filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::from_level(config.log_level).into());
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let scheduler = WeeklyScheduler::new(
        Arc::new(PgTemplateStore::new(db_pool.clone())),
        Arc::new(PgBookingStore::new(db_pool)),
    );
    let state = Arc::new(ApiState {
        scheduler,
        localization: config.localization.clone(),
    });

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
            HeaderName::from_static(SUBJECT_ID_HEADER),
            HeaderName::from_static(ROLE_HEADER),
        ])
        .allow_origin(allowed)
        .allow_credentials(true)
}
