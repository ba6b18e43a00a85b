//! deckgen-server - REST API server for deckgen.
//!
//! This crate exposes the deckgen workflows over HTTP: document uploads for
//! job ads and resumes, adaptation requests, and CRUD on every entity kind.
//!
//! # Example
//!
//! ```ignore
//! use deckgen_server::{create_server, AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load(None)?;
//!     let registry = ProviderFactory::registry(&config.providers)?;
//!     let app = create_server(AppState::new(registry, &config.server));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use telemetry::init_tracing;

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;
    routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(axum_middleware::from_fn(middleware::logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::cors_layer())
            .layer(DefaultBodyLimit::max(body_limit)),
    )
}
