use std::time::Duration;

use log::warn;
use serde::Deserialize;

use super::RoadConnector;
use crate::config::OsrmConfig;
use crate::error::ConnectorError;
use crate::model::GeoPoint;

/// Road connector backed by the OSRM route service
#[derive(Debug, Clone)]
pub struct OsrmConnector {
    client: reqwest::Client,
    config: OsrmConfig,
}

impl OsrmConnector {
    pub fn new(config: OsrmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to configure OSRM HTTP client ({e}), using defaults");
                reqwest::Client::new()
            });

        Self { client, config }
    }

    /// Route URL between two points, coordinates in `lng,lat` order
    pub fn route_url(&self, from: &GeoPoint, to: &GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.config.url.trim_end_matches('/'),
            self.config.profile,
            from.lng,
            from.lat,
            to.lng,
            to.lat
        )
    }
}

impl RoadConnector for OsrmConnector {
    async fn connect(&self, from: GeoPoint, to: GeoPoint) -> Result<Vec<GeoPoint>, ConnectorError> {
        let url = self.route_url(&from, &to);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ConnectorError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ConnectorError::Transport(e.to_string()))?;
        parse_route(&text)
    }
}

#[derive(Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Extracts the first route's coordinates from an OSRM response body
pub(crate) fn parse_route(body: &str) -> Result<Vec<GeoPoint>, ConnectorError> {
    let response: OsrmRouteResponse =
        serde_json::from_str(body).map_err(|e| ConnectorError::Decode(e.to_string()))?;

    if response.code != "Ok" {
        return Err(ConnectorError::NoRoute);
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(ConnectorError::NoRoute)?;

    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| GeoPoint::new(lat, lng))
        .collect())
}
