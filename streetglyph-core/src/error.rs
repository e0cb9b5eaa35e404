use thiserror::Error;

use crate::model::GeoPoint;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Street data unavailable after {attempts} attempts: {last}")]
    StreetDataUnavailable {
        attempts: u32,
        #[source]
        last: FetchError,
    },
    #[error("Street data request failed: {0}")]
    StreetDataRejected(#[source] FetchError),
    #[error(
        "No usable streets found within {radius_m:.0} m of ({:.5}, {:.5}); try a location in a built-up area",
        .center.lat,
        .center.lng
    )]
    NoStreetDataFound { center: GeoPoint, radius_m: f64 },
    #[error("No street segments could be matched to the strokes of {text:?}")]
    NoGlyphCoverage { text: String },
    #[error("Stitching {segments} matched segments produced an empty path")]
    StitchFailure { segments: usize },
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}

impl Error {
    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidRequest(_) => "invalid_request",
            Error::StreetDataUnavailable { .. } => "street_data_unavailable",
            Error::StreetDataRejected(_) => "street_data_rejected",
            Error::NoStreetDataFound { .. } => "no_street_data_found",
            Error::NoGlyphCoverage { .. } => "no_glyph_coverage",
            Error::StitchFailure { .. } => "stitch_failure",
            Error::GeoJsonError(_) => "geojson_error",
        }
    }
}

/// Failure of a street-data query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("rate limited by street-data service")]
    RateLimited,
    #[error("gateway timeout from street-data service")]
    GatewayTimeout,
    #[error("street-data request timed out")]
    RequestTimeout,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("could not decode street-data response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether another attempt may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::RateLimited
                | FetchError::GatewayTimeout
                | FetchError::RequestTimeout
                | FetchError::Transport(_)
        )
    }

    pub(crate) fn from_status(status: u16) -> Self {
        match status {
            429 => FetchError::RateLimited,
            504 => FetchError::GatewayTimeout,
            408 => FetchError::RequestTimeout,
            other => FetchError::Status(other),
        }
    }
}

/// Failure of a single point-to-point connector request
///
/// Never aborts synthesis; the affected gap or leg is left out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("no route between the requested points")]
    NoRoute,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("could not decode connector response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_fetch_errors() {
        assert_eq!(FetchError::from_status(429), FetchError::RateLimited);
        assert_eq!(FetchError::from_status(504), FetchError::GatewayTimeout);
        assert_eq!(FetchError::from_status(408), FetchError::RequestTimeout);
        assert_eq!(FetchError::from_status(400), FetchError::Status(400));
    }

    #[test]
    fn only_timeout_like_failures_are_transient() {
        assert!(FetchError::RateLimited.is_transient());
        assert!(FetchError::GatewayTimeout.is_transient());
        assert!(FetchError::RequestTimeout.is_transient());
        assert!(FetchError::Transport("reset".into()).is_transient());
        assert!(!FetchError::Status(500).is_transient());
        assert!(!FetchError::Decode("eof".into()).is_transient());
    }

    #[test]
    fn no_street_data_message_hints_location() {
        let err = Error::NoStreetDataFound {
            center: GeoPoint::new(25.0, 121.5),
            radius_m: 500.0,
        };
        let message = err.to_string();

        assert!(message.contains("500 m"));
        assert!(message.contains("25.00000"));
        assert_eq!(err.kind(), "no_street_data_found");
    }
}
