//! Geographic points and great-circle distances

use geo::{Coord, LineString, Point};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::EARTH_RADIUS_KM;

/// WGS84 coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns a point shifted by the given degree offsets
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> GeoPoint {
        GeoPoint::new(self.lat + d_lat, self.lng + d_lng)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Point::new(point.lng, point.lat)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(point: Point<f64>) -> Self {
        GeoPoint::new(point.y(), point.x())
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Coord {
            x: point.lng,
            y: point.lat,
        }
    }
}

/// Haversine distance between two points in kilometers
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Cumulative haversine length of a point sequence in kilometers
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| haversine_km(a, b))
        .sum()
}

/// Builds a `LineString` with (lng, lat) coordinate order
pub fn to_line_string(points: &[GeoPoint]) -> LineString<f64> {
    points.iter().copied().map(Coord::from).collect()
}
