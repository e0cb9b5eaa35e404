use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use streetglyph_core::Error;
use tracing::{error, warn};

/// Synthesis failure rendered as a JSON error response
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidRequest(_) | Error::NoGlyphCoverage { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::NoStreetDataFound { .. } => StatusCode::NOT_FOUND,
            Error::StreetDataUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Error::StreetDataRejected(_) => StatusCode::BAD_GATEWAY,
            Error::StitchFailure { .. } | Error::GeoJsonError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Route synthesis failed: {}", self.0);
        } else {
            warn!("Route request rejected: {}", self.0);
        }

        let body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
