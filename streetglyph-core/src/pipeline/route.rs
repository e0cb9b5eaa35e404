use chrono::TimeDelta;
use geojson::{Feature, FeatureCollection, Geometry, GeometryValue};
use serde::Serialize;

use crate::error::Error;
use crate::model::GeoPoint;
use crate::model::point::to_line_string;

/// Default running pace, per kilometer
pub fn default_pace() -> TimeDelta {
    TimeDelta::minutes(6)
}

/// Finished route handed to rendering and export layers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRoute {
    pub text: String,
    pub coordinates: Vec<GeoPoint>,
    /// Haversine length of `coordinates`; may lie outside the requested window
    pub distance_km: f64,
    pub segments_used: usize,
}

impl TextRoute {
    /// Time to cover the route at `pace` per kilometer
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn estimated_duration(&self, pace: TimeDelta) -> TimeDelta {
        let millis = (self.distance_km * pace.num_milliseconds() as f64).round();
        TimeDelta::milliseconds(millis as i64)
    }

    /// Converts the route to a `GeoJSON` `FeatureCollection` with one line
    pub fn to_geojson(&self) -> FeatureCollection {
        let line = to_line_string(&self.coordinates);

        let mut feature = Feature::from(Geometry::new(GeometryValue::from(&line)));
        feature.set_property("text", self.text.clone());
        feature.set_property("distance_km", self.distance_km);
        feature.set_property("segments_used", self.segments_used);
        feature.set_property("point_count", self.coordinates.len());

        FeatureCollection {
            features: vec![feature],
            bbox: None,
            foreign_members: None,
        }
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}
