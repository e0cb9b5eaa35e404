use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use streetglyph_core::prelude::*;
use tracing::info;

use crate::error::ApiError;

pub type SharedSynthesizer<S, C> = Arc<TextRouteSynthesizer<S, C>>;

/// Body of the route endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct RouteBody {
    pub text: String,
    pub lat: f64,
    pub lng: f64,
    pub min_distance_km: f64,
    pub max_distance_km: f64,
}

impl From<RouteBody> for RouteRequest {
    fn from(body: RouteBody) -> Self {
        RouteRequest::new(
            body.text,
            body.lat,
            body.lng,
            body.min_distance_km,
            body.max_distance_km,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub coordinates: Vec<GeoPoint>,
    pub distance_km: f64,
    pub segments_used: usize,
    pub estimated_minutes: f64,
}

impl From<TextRoute> for RouteResponse {
    #[allow(clippy::cast_precision_loss)]
    fn from(route: TextRoute) -> Self {
        let duration = route.estimated_duration(default_pace());
        Self {
            estimated_minutes: duration.num_milliseconds() as f64 / 60_000.0,
            distance_km: route.distance_km,
            segments_used: route.segments_used,
            coordinates: route.coordinates,
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn create_route<S, C>(
    State(synthesizer): State<SharedSynthesizer<S, C>>,
    Json(body): Json<RouteBody>,
) -> Result<Json<RouteResponse>, ApiError>
where
    S: StreetDataSource + Send + Sync + 'static,
    C: RoadConnector + Send + Sync + 'static,
{
    let request = RouteRequest::from(body);
    let route = synthesizer.synthesize(&request).await?;
    info!(
        text = %route.text,
        distance_km = route.distance_km,
        points = route.coordinates.len(),
        "Route synthesized"
    );

    Ok(Json(route.into()))
}

pub async fn create_route_geojson<S, C>(
    State(synthesizer): State<SharedSynthesizer<S, C>>,
    Json(body): Json<RouteBody>,
) -> Result<Json<geojson::FeatureCollection>, ApiError>
where
    S: StreetDataSource + Send + Sync + 'static,
    C: RoadConnector + Send + Sync + 'static,
{
    let request = RouteRequest::from(body);
    let route = synthesizer.synthesize(&request).await?;

    Ok(Json(route.to_geojson()))
}
