//! HTTP front end for text route synthesis

pub mod config;
mod error;
mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{BoxError, Router};
use streetglyph_core::TextRouteSynthesizer;
use streetglyph_core::prelude::{RoadConnector, StreetDataSource};
use tower::ServiceBuilder;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use config::{ServerConfig, ServerSettings};
pub use error::ApiError;
pub use handlers::{RouteBody, RouteResponse};

async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("Request timed out");
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {err}"),
        )
    }
}

/// Builds the API router around `synthesizer`
pub fn build_router<S, C>(
    synthesizer: TextRouteSynthesizer<S, C>,
    settings: &ServerSettings,
) -> Router
where
    S: StreetDataSource + Send + Sync + 'static,
    C: RoadConnector + Send + Sync + 'static,
{
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(Duration::from_secs(
            settings.request_timeout_secs,
        )))
        .layer(ConcurrencyLimitLayer::new(
            settings.max_concurrent_requests.max(1),
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/routes", post(handlers::create_route::<S, C>))
        .route(
            "/routes/geojson",
            post(handlers::create_route_geojson::<S, C>),
        )
        .with_state(Arc::new(synthesizer))
        .layer(middleware)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
