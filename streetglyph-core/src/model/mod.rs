//! Data model for text route synthesis
//!
//! Contains geographic points, raw street ways and the classified segments
//! derived from them.

pub mod point;
pub mod segment;

pub use point::{GeoPoint, haversine_km, path_length_km};
pub use segment::{Direction, MatchedSegment, RawWay, StreetSegment, WayId};
