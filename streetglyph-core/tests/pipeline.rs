use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use streetglyph_core::prelude::*;
use tokio::time::Instant;

const METERS: f64 = 1.0 / METERS_PER_DEGREE;

/// Street source replaying queued outcomes, then a fixed set of ways
struct FixtureStreets {
    queued: Mutex<VecDeque<Result<Vec<RawWay>, FetchError>>>,
    ways: Vec<RawWay>,
    calls: AtomicUsize,
}

impl FixtureStreets {
    fn with_ways(ways: Vec<RawWay>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            ways,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(error: FetchError, times: usize) -> Self {
        let fixture = Self::with_ways(glyph_eight_ways());
        fixture
            .queued
            .lock()
            .unwrap()
            .extend(std::iter::repeat_n(Err(error), times));
        fixture
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StreetDataSource for FixtureStreets {
    async fn fetch_ways(&self, _query: &AreaQuery) -> Result<Vec<RawWay>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let queued = self.queued.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(self.ways.clone()))
    }
}

/// Connector drawing straight lines, or failing every request
struct StraightConnector {
    calls: AtomicUsize,
    fail: bool,
}

impl StraightConnector {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn broken() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RoadConnector for StraightConnector {
    async fn connect(&self, from: GeoPoint, to: GeoPoint) -> Result<Vec<GeoPoint>, ConnectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ConnectorError::Transport("connection refused".to_string()))
        } else {
            Ok(vec![from, to])
        }
    }
}

/// Point at (x, y) meters from the null island origin
fn m(x: f64, y: f64) -> GeoPoint {
    GeoPoint::new(y * METERS, x * METERS)
}

/// One street per seven-segment stroke of a cell at the origin
fn glyph_eight_ways() -> Vec<RawWay> {
    vec![
        RawWay::new(1, vec![m(-50.0, 100.0), m(0.0, 100.0), m(50.0, 100.0)]),
        RawWay::new(2, vec![m(-50.0, 100.0), m(-50.0, 50.0), m(-50.0, 0.0)]),
        RawWay::new(3, vec![m(50.0, 100.0), m(50.0, 50.0), m(50.0, 0.0)]),
        RawWay::new(4, vec![m(-50.0, 0.0), m(0.0, 0.0), m(50.0, 0.0)]),
        RawWay::new(5, vec![m(-50.0, 0.0), m(-50.0, -50.0), m(-50.0, -100.0)]),
        RawWay::new(6, vec![m(50.0, 0.0), m(50.0, -50.0), m(50.0, -100.0)]),
        RawWay::new(7, vec![m(-50.0, -100.0), m(0.0, -100.0), m(50.0, -100.0)]),
    ]
}

fn synthesizer<'a>(
    streets: &'a FixtureStreets,
    connector: &'a StraightConnector,
) -> TextRouteSynthesizer<&'a FixtureStreets, &'a StraightConnector> {
    TextRouteSynthesizer::new(streets, connector, SynthesisConfig::default())
}

#[tokio::test]
async fn eight_uses_all_seven_strokes() {
    let streets = FixtureStreets::with_ways(glyph_eight_ways());
    let connector = StraightConnector::new();
    let request = RouteRequest::new("8", 0.0, 0.0, 1.0, 3.0);

    let (route, report) = synthesizer(&streets, &connector)
        .synthesize_with(&request, &mut Heading::North)
        .await
        .unwrap();

    assert_eq!(route.segments_used, 7);
    assert!(!route.coordinates.is_empty());
    assert!(
        (1.0..=3.0).contains(&route.distance_km),
        "{} km",
        route.distance_km
    );
    assert!(report.within_range);
    assert_eq!(report.regulation, RegulationAction::WithinRange);
    assert!(report.skipped.is_empty());
    // one connector request between each pair of consecutive strokes
    assert_eq!(connector.calls(), 6);
    assert_eq!(streets.calls(), 1);
    assert!((route.distance_km - path_length_km(&route.coordinates)).abs() < 1e-12);
}

#[tokio::test]
async fn every_stroke_geometry_appears_in_the_route() {
    let streets = FixtureStreets::with_ways(glyph_eight_ways());
    let connector = StraightConnector::new();
    let request = RouteRequest::new("8", 0.0, 0.0, 1.0, 3.0);

    let (route, _) = synthesizer(&streets, &connector)
        .synthesize_with(&request, &mut Heading::North)
        .await
        .unwrap();

    for way in glyph_eight_ways() {
        let found = route
            .coordinates
            .windows(way.geometry.len())
            .any(|window| window == way.geometry.as_slice());
        assert!(found, "way {} missing from route", way.id);
    }
}

#[tokio::test]
async fn short_route_is_extended_into_the_window() {
    let streets = FixtureStreets::with_ways(glyph_eight_ways());
    let connector = StraightConnector::new();
    let request = RouteRequest::new("8", 0.0, 0.0, 2.0, 3.0);

    let (route, report) = synthesizer(&streets, &connector)
        .synthesize_with(&request, &mut Heading::North)
        .await
        .unwrap();

    assert!(matches!(
        report.regulation,
        RegulationAction::Extended {
            heading: Heading::North,
            ..
        }
    ));
    assert!(report.within_range, "{} km", route.distance_km);
    // six stitching requests plus the out-and-back pair
    assert_eq!(connector.calls(), 8);
}

#[tokio::test]
async fn surrounding_blanks_do_not_shift_the_glyph() {
    let streets = FixtureStreets::with_ways(glyph_eight_ways());
    let connector = StraightConnector::new();
    let synthesizer = synthesizer(&streets, &connector);

    let (plain, _) = synthesizer
        .synthesize_with(&RouteRequest::new("8", 0.0, 0.0, 1.0, 3.0), &mut Heading::North)
        .await
        .unwrap();
    let (padded, _) = synthesizer
        .synthesize_with(&RouteRequest::new("  8 ", 0.0, 0.0, 1.0, 3.0), &mut Heading::North)
        .await
        .unwrap();

    assert_eq!(padded.text, "8");
    assert_eq!(padded.coordinates, plain.coordinates);
}

#[tokio::test]
async fn unknown_glyph_fails_without_connector_calls() {
    let streets = FixtureStreets::with_ways(glyph_eight_ways());
    let connector = StraightConnector::new();
    let request = RouteRequest::new("Z", 0.0, 0.0, 1.0, 3.0);

    let err = synthesizer(&streets, &connector)
        .synthesize(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoGlyphCoverage { ref text } if text == "Z"));
    assert_eq!(connector.calls(), 0);
}

#[tokio::test]
async fn partially_known_text_skips_unknown_characters() {
    let streets = FixtureStreets::with_ways(glyph_eight_ways());
    let connector = StraightConnector::new();
    let request = RouteRequest::new("Z8", 0.0, 0.0, 1.0, 3.0);

    let (route, report) = synthesizer(&streets, &connector)
        .synthesize_with(&request, &mut Heading::North)
        .await
        .unwrap();

    assert_eq!(route.segments_used, 7);
    assert!(report.skipped.iter().any(|s| s.character == 'Z'
        && s.index == 0
        && s.reason == SkipReason::UnknownGlyph));
}

#[tokio::test(start_paused = true)]
async fn rate_limited_street_data_gives_up_after_three_attempts() {
    let streets = FixtureStreets::failing(FetchError::RateLimited, 3);
    let connector = StraightConnector::new();
    let request = RouteRequest::new("8", 0.0, 0.0, 1.0, 3.0);
    let started = Instant::now();

    let err = synthesizer(&streets, &connector)
        .synthesize(&request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::StreetDataUnavailable {
            attempts: 3,
            last: FetchError::RateLimited
        }
    ));
    assert_eq!(streets.calls(), 3);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(4) && elapsed < Duration::from_secs(5));
    assert_eq!(connector.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn transient_failure_then_success_still_synthesizes() {
    let streets = FixtureStreets::failing(FetchError::GatewayTimeout, 1);
    let connector = StraightConnector::new();
    let request = RouteRequest::new("8", 0.0, 0.0, 1.0, 3.0);

    let route = synthesizer(&streets, &connector)
        .synthesize(&request)
        .await
        .unwrap();

    assert_eq!(streets.calls(), 2);
    assert_eq!(route.segments_used, 7);
}

#[tokio::test]
async fn empty_street_data_is_reported_with_location() {
    let streets = FixtureStreets::with_ways(vec![RawWay::new(9, vec![m(0.0, 0.0)])]);
    let connector = StraightConnector::new();
    let request = RouteRequest::new("8", 0.0, 0.0, 1.0, 3.0);

    let err = synthesizer(&streets, &connector)
        .synthesize(&request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::NoStreetDataFound { radius_m, .. } if radius_m == 500.0
    ));
}

#[tokio::test]
async fn invalid_request_never_reaches_the_network() {
    let streets = FixtureStreets::with_ways(glyph_eight_ways());
    let connector = StraightConnector::new();
    let request = RouteRequest::new("8", 0.0, 0.0, 3.0, 1.0);

    let err = synthesizer(&streets, &connector)
        .synthesize(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidRequest(_)));
    assert_eq!(streets.calls(), 0);
}

#[tokio::test]
async fn broken_connector_degrades_to_direct_jumps() {
    let streets = FixtureStreets::with_ways(glyph_eight_ways());
    let connector = StraightConnector::broken();
    let request = RouteRequest::new("8", 0.0, 0.0, 1.0, 3.0);

    let (route, report) = synthesizer(&streets, &connector)
        .synthesize_with(&request, &mut Heading::North)
        .await
        .unwrap();

    assert_eq!(route.segments_used, 7);
    assert_eq!(report.gaps.len(), 6);
    // only stroke geometry is left, three points per stroke
    assert_eq!(route.coordinates.len(), 21);
}

#[tokio::test]
async fn route_inside_window_is_returned_unchanged() {
    let connector = StraightConnector::new();
    let d_lat = (2.4 / EARTH_RADIUS_KM).to_degrees();
    let path = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(d_lat / 2.0, 0.0),
        GeoPoint::new(d_lat, 0.0),
    ];
    assert!((path_length_km(&path) - 2.4).abs() < 1e-9);

    let regulator = DistanceRegulator::new(&connector, 0.1, SimplificationSchedule::default());
    let regulated = regulator
        .regulate(path.clone(), 2.0, 3.0, &mut Heading::East)
        .await;

    assert_eq!(regulated.path, path);
    assert_eq!(regulated.action, RegulationAction::WithinRange);
    assert_eq!(connector.calls(), 0);
}
