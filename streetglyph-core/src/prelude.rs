pub use crate::{EARTH_RADIUS_KM, KM_PER_DEGREE, METERS_PER_DEGREE};

// Re-export key components
pub use crate::classify::{classify_direction, classify_segments};
pub use crate::config::{RetryPolicy, SimplificationSchedule, SynthesisConfig};
pub use crate::error::{ConnectorError, Error, FetchError};
pub use crate::glyph::{StrokeRole, TargetPosition, glyph_pattern};
pub use crate::matching::{MatchReport, SkipReason, Skipped, match_text};
pub use crate::pipeline::{
    RouteRequest, SynthesisReport, TextRoute, TextRouteSynthesizer, default_pace,
    synthesize_text_route,
};
pub use crate::routing::{
    DistanceRegulator, Heading, HeadingSource, LegStatus, RandomHeading, RegulationAction,
    stitch_segments,
};
pub use crate::simplify::douglas_peucker;
pub use crate::sources::{
    AreaQuery, OsrmConnector, OverpassClient, RoadConnector, StreetDataSource, fetch_with_retry,
};

// Core types for the street network
pub use crate::model::{
    Direction, GeoPoint, MatchedSegment, RawWay, StreetSegment, WayId, haversine_km,
    path_length_km,
};
