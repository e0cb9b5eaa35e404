use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::GeoPoint;

/// Caller input for one synthesis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub text: String,
    pub center: GeoPoint,
    pub min_distance_km: f64,
    pub max_distance_km: f64,
}

impl RouteRequest {
    pub fn new(
        text: impl Into<String>,
        center_lat: f64,
        center_lng: f64,
        min_distance_km: f64,
        max_distance_km: f64,
    ) -> Self {
        Self {
            text: text.into(),
            center: GeoPoint::new(center_lat, center_lng),
            min_distance_km,
            max_distance_km,
        }
    }

    /// Text to draw, without surrounding whitespace
    ///
    /// Leading blanks would otherwise shift every glyph by one cell.
    pub fn glyph_text(&self) -> &str {
        self.text.trim()
    }

    /// Rejects requests that cannot produce a route before any network call
    pub fn validate(&self) -> Result<(), Error> {
        if self.glyph_text().is_empty() {
            return Err(Error::InvalidRequest("text must not be empty".to_string()));
        }

        let (min, max) = (self.min_distance_km, self.max_distance_km);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 {
            return Err(Error::InvalidRequest(format!(
                "distances must be positive, got {min}-{max} km"
            )));
        }
        if min >= max {
            return Err(Error::InvalidRequest(format!(
                "minimum distance {min} km must be below maximum {max} km"
            )));
        }

        let GeoPoint { lat, lng } = self.center;
        // Poles are excluded: east-west offsets degenerate there
        if !lat.is_finite() || lat.abs() >= 90.0 || !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidRequest(format!(
                "center ({lat}, {lng}) is not a valid coordinate"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_regular_request() {
        assert!(RouteRequest::new("8", 25.03, 121.56, 1.0, 3.0).validate().is_ok());
    }

    #[test]
    fn rejects_blank_text() {
        let err = RouteRequest::new("   ", 25.03, 121.56, 1.0, 3.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn rejects_inverted_or_degenerate_windows() {
        for (min, max) in [(3.0, 1.0), (2.0, 2.0), (0.0, 1.0), (-1.0, 1.0), (1.0, f64::NAN)] {
            let result = RouteRequest::new("8", 0.0, 0.0, min, max).validate();
            assert!(result.is_err(), "{min}-{max} accepted");
        }
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(RouteRequest::new("8", 91.0, 0.0, 1.0, 2.0).validate().is_err());
        assert!(RouteRequest::new("8", 0.0, 181.0, 1.0, 2.0).validate().is_err());
        assert!(RouteRequest::new("8", f64::NAN, 0.0, 1.0, 2.0).validate().is_err());
    }

    #[test]
    fn rejects_the_poles() {
        assert!(RouteRequest::new("8", 90.0, 0.0, 1.0, 2.0).validate().is_err());
        assert!(RouteRequest::new("8", -90.0, 10.0, 1.0, 2.0).validate().is_err());
        assert!(RouteRequest::new("8", 89.9, 10.0, 1.0, 2.0).validate().is_ok());
    }

    #[test]
    fn glyph_text_drops_surrounding_blanks() {
        let request = RouteRequest::new(" 1 ", 0.0, 0.0, 1.0, 2.0);
        assert_eq!(request.glyph_text(), "1");
        assert!(request.validate().is_ok());
    }
}
