//! End-to-end text route synthesis
//!
//! street query -> classification -> glyph matching -> stitching ->
//! distance regulation

mod request;
mod route;

use log::info;

use crate::classify::classify_segments;
use crate::config::SynthesisConfig;
use crate::error::Error;
use crate::matching::{Skipped, match_text};
use crate::model::path_length_km;
use crate::routing::{
    ConnectorGap, DistanceRegulator, HeadingSource, RandomHeading, RegulationAction,
    stitch_segments,
};
use crate::sources::{
    AreaQuery, OsrmConnector, OverpassClient, RoadConnector, StreetDataSource, fetch_with_retry,
};

pub use request::RouteRequest;
pub use route::{TextRoute, default_pace};

/// Diagnostics of one synthesis run
///
/// Records the soft degradations that the returned route does not show.
#[derive(Debug, Clone)]
pub struct SynthesisReport {
    pub search_radius_m: f64,
    pub ways_fetched: usize,
    pub segments_classified: usize,
    /// Characters and roles that got no street segment
    pub skipped: Vec<Skipped>,
    /// Connector requests that failed while stitching
    pub gaps: Vec<ConnectorGap>,
    pub regulation: RegulationAction,
    /// Whether the final distance lies inside the requested window
    pub within_range: bool,
}

/// Stateless text route service over a street source and a road connector
///
/// Holds no per-request state; one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct TextRouteSynthesizer<S, C> {
    source: S,
    connector: C,
    config: SynthesisConfig,
}

impl TextRouteSynthesizer<OverpassClient, OsrmConnector> {
    /// Synthesizer talking to the Overpass and OSRM endpoints in `config`
    pub fn from_config(config: SynthesisConfig) -> Self {
        let source = OverpassClient::new(config.overpass.clone());
        let connector = OsrmConnector::new(config.osrm.clone());
        Self::new(source, connector, config)
    }
}

impl<S, C> TextRouteSynthesizer<S, C>
where
    S: StreetDataSource + Sync,
    C: RoadConnector + Sync,
{
    pub fn new(source: S, connector: C, config: SynthesisConfig) -> Self {
        Self {
            source,
            connector,
            config,
        }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Synthesizes a route with randomly chosen extension headings
    pub async fn synthesize(&self, request: &RouteRequest) -> Result<TextRoute, Error> {
        let mut headings = RandomHeading::from_os_rng();
        let (route, _) = self.synthesize_with(request, &mut headings).await?;
        Ok(route)
    }

    /// Synthesizes a route, drawing extension headings from `headings`
    ///
    /// # Errors
    ///
    /// Fails on invalid requests, unavailable or empty street data, text
    /// without any matchable stroke, and an empty stitched path. Connector
    /// failures and distance shortfalls only degrade the result.
    pub async fn synthesize_with<H: HeadingSource + Send>(
        &self,
        request: &RouteRequest,
        headings: &mut H,
    ) -> Result<(TextRoute, SynthesisReport), Error> {
        request.validate()?;
        let text = request.glyph_text();

        let radius_m = self
            .config
            .search_radius_m(request.min_distance_km, request.max_distance_km);
        let query = AreaQuery {
            center: request.center,
            radius_m,
            highway_kinds: self.config.highway_kinds.clone(),
        };

        info!(
            "Synthesizing {:?} around ({:.5}, {:.5}) within {radius_m:.0} m",
            text, request.center.lat, request.center.lng
        );
        let ways = fetch_with_retry(&self.source, &query, &self.config.retry).await?;
        info!("Fetched {} ways", ways.len());

        let segments = classify_segments(&ways, &request.center);
        if segments.is_empty() {
            return Err(Error::NoStreetDataFound {
                center: request.center,
                radius_m,
            });
        }
        info!("Classified {} segments", segments.len());

        let matching = match_text(text, &segments, self.config.char_spacing_m);
        if matching.is_empty() {
            return Err(Error::NoGlyphCoverage {
                text: text.to_string(),
            });
        }

        let stitched = stitch_segments(&matching.matched, &self.connector).await;
        if stitched.path.is_empty() {
            return Err(Error::StitchFailure {
                segments: matching.matched.len(),
            });
        }

        let regulator = DistanceRegulator::new(
            &self.connector,
            self.config.extension_tolerance_km,
            self.config.simplification,
        );
        let regulated = regulator
            .regulate(
                stitched.path,
                request.min_distance_km,
                request.max_distance_km,
                headings,
            )
            .await;

        let route = TextRoute {
            text: text.to_string(),
            distance_km: path_length_km(&regulated.path),
            coordinates: regulated.path,
            segments_used: matching.matched.len(),
        };
        info!(
            "Route for {:?}: {:.2} km, {} points, {} segments",
            route.text,
            route.distance_km,
            route.coordinates.len(),
            route.segments_used
        );

        let report = SynthesisReport {
            search_radius_m: radius_m,
            ways_fetched: ways.len(),
            segments_classified: segments.len(),
            skipped: matching.skipped,
            gaps: stitched.gaps,
            regulation: regulated.action,
            within_range: regulated.within_range,
        };

        Ok((route, report))
    }
}

/// Synthesizes a route with the default configuration and public services
pub async fn synthesize_text_route(
    text: &str,
    center_lat: f64,
    center_lng: f64,
    min_distance_km: f64,
    max_distance_km: f64,
) -> Result<TextRoute, Error> {
    let request = RouteRequest::new(text, center_lat, center_lng, min_distance_km, max_distance_km);
    TextRouteSynthesizer::from_config(SynthesisConfig::default())
        .synthesize(&request)
        .await
}
