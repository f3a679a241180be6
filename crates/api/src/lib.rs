//! # Slotbook API
//!
//! The API crate embeds the booking engine behind an HTTP surface. It
//! defines RESTful endpoints for provider schedules, availability queries,
//! calendar grids, and booking management.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Map engine errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; all engine state is in memory
//! and shared across handlers through [`ApiState`].

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use slotbook_engine::{AvailabilityResolver, BookingLedger, CalendarGridGenerator, ScheduleStore};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers.
///
/// Holds the two owned stores plus the resolver and grid generator composed
/// over them. Everything is `Arc`-shared; the stores do their own locking.
pub struct ApiState {
    pub schedules: Arc<ScheduleStore>,
    pub ledger: Arc<BookingLedger>,
    pub resolver: AvailabilityResolver,
    pub calendar: CalendarGridGenerator,
}

impl ApiState {
    /// Builds a fresh engine: empty schedule store, empty ledger, and the
    /// read-side components wired to them.
    pub fn new() -> Self {
        let schedules = Arc::new(ScheduleStore::new());
        let ledger = Arc::new(BookingLedger::new());
        let resolver = AvailabilityResolver::new(Arc::clone(&schedules), Arc::clone(&ledger));
        let calendar = CalendarGridGenerator::new(Arc::clone(&schedules));

        Self {
            schedules,
            ledger,
            resolver,
            calendar,
        }
    }
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Schedule management endpoints
        .merge(routes::schedule::routes())
        // Availability and calendar endpoints
        .merge(routes::availability::routes())
        // Booking management endpoints
        .merge(routes::booking::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and engine state.
///
/// Initializes logging, configures routes, applies CORS and timeout layers,
/// and serves until the process exits.
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
