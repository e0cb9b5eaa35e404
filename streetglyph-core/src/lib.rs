//! Synthesis of walkable routes that spell text on real street geometry.
//!
//! Street ways around a chosen center are classified into directional
//! segments, matched against seven-segment style glyph strokes, stitched into
//! one continuous traversal and finally regulated into a target distance
//! window.

pub mod classify;
pub mod config;
pub mod error;
pub mod glyph;
pub mod matching;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod routing;
pub mod simplify;
pub mod sources;

pub use config::SynthesisConfig;
pub use error::Error;
pub use model::{Direction, GeoPoint, MatchedSegment, RawWay, StreetSegment, WayId};
pub use pipeline::{RouteRequest, SynthesisReport, TextRoute, TextRouteSynthesizer};

/// Mean earth radius in kilometers used for every great-circle distance
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate number of meters per degree, used to bring coordinates onto a
/// meter-like scale while matching glyph strokes
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Approximate number of kilometers per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.0;
