//! Street ways and the directional segments derived from them

use serde::{Deserialize, Serialize};

use super::point::GeoPoint;
use crate::glyph::StrokeRole;

/// Identifier of a street way as reported by the street-data source
pub type WayId = u64;

/// Raw way geometry as returned by the street-data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWay {
    pub id: WayId,
    pub geometry: Vec<GeoPoint>,
}

impl RawWay {
    pub fn new(id: WayId, geometry: Vec<GeoPoint>) -> Self {
        Self { id, geometry }
    }
}

/// Dominant orientation of a segment, judged from its endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Classified street segment
///
/// Built once per street-data query by [`crate::classify::classify_segments`]
/// and immutable afterwards. The direction is always derived from the
/// geometry, so there is no public constructor taking one.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetSegment {
    pub(crate) id: WayId,
    pub(crate) geometry: Vec<GeoPoint>,
    pub(crate) direction: Direction,
    pub(crate) length_km: f64,
    pub(crate) center_point: GeoPoint,
    pub(crate) distance_from_center_km: f64,
}

impl StreetSegment {
    pub fn id(&self) -> WayId {
        self.id
    }

    pub fn geometry(&self) -> &[GeoPoint] {
        &self.geometry
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Sum of haversine distances along the geometry
    pub fn length_km(&self) -> f64 {
        self.length_km
    }

    /// Geometry point at the middle index (not interpolated)
    pub fn center_point(&self) -> GeoPoint {
        self.center_point
    }

    pub fn distance_from_center_km(&self) -> f64 {
        self.distance_from_center_km
    }

    pub fn start_point(&self) -> GeoPoint {
        self.geometry[0]
    }

    pub fn end_point(&self) -> GeoPoint {
        self.geometry[self.geometry.len() - 1]
    }
}

/// Street segment assigned to one stroke of one character
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedSegment {
    pub segment: StreetSegment,
    pub role: StrokeRole,
    pub character: char,
}

impl MatchedSegment {
    pub fn id(&self) -> WayId {
        self.segment.id
    }

    pub fn geometry(&self) -> &[GeoPoint] {
        &self.segment.geometry
    }

    pub fn start_point(&self) -> GeoPoint {
        self.segment.start_point()
    }
}
