use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;

use super::{AreaQuery, StreetDataSource};
use crate::config::OverpassConfig;
use crate::error::FetchError;
use crate::model::{GeoPoint, RawWay, WayId};

/// Street-data source backed by an Overpass API interpreter
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    config: OverpassConfig,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to configure Overpass HTTP client ({e}), using defaults");
                reqwest::Client::new()
            });

        Self { client, config }
    }
}

impl StreetDataSource for OverpassClient {
    async fn fetch_ways(&self, query: &AreaQuery) -> Result<Vec<RawWay>, FetchError> {
        let body = build_query(query, self.config.query_timeout_secs);
        debug!("Overpass query:\n{body}");

        let response = self
            .client
            .post(&self.config.url)
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16()));
        }

        let text = response.text().await.map_err(transport_error)?;
        parse_response(&text)
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::RequestTimeout
    } else {
        FetchError::Transport(err.to_string())
    }
}

/// Builds the Overpass QL query for ways around the query center
pub fn build_query(query: &AreaQuery, timeout_secs: u32) -> String {
    let kinds = query.highway_kinds.join("|");

    format!(
        "[out:json][timeout:{timeout_secs}];\n\
         (\n  way[\"highway\"~\"^({kinds})$\"](around:{radius:.0},{lat},{lng});\n);\n\
         out geom;",
        radius = query.radius_m,
        lat = query.center.lat,
        lng = query.center.lng,
    )
}

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
    /// Set when the interpreter aborted the query, e.g. on its own timeout
    #[serde(default)]
    remark: Option<String>,
}

#[derive(Deserialize)]
struct OverpassElement {
    id: WayId,
    #[serde(default)]
    geometry: Vec<OverpassNode>,
}

#[derive(Deserialize)]
struct OverpassNode {
    lat: f64,
    lon: f64,
}

/// Parses an Overpass JSON document into raw ways
pub fn parse_response(body: &str) -> Result<Vec<RawWay>, FetchError> {
    let response: OverpassResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    // An aborted query still answers 200 with whatever elements it had
    if let Some(remark) = response.remark.as_deref() {
        if remark.starts_with("runtime error") {
            warn!("Overpass aborted the query: {remark}");
            return Err(FetchError::GatewayTimeout);
        }
        debug!("Overpass remark: {remark}");
    }

    Ok(response
        .elements
        .into_iter()
        .map(|element| {
            let geometry = element
                .geometry
                .into_iter()
                .map(|node| GeoPoint::new(node.lat, node.lon))
                .collect();
            RawWay::new(element.id, geometry)
        })
        .collect())
}
