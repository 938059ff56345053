//! Service-wide error type with HTTP status mapping.
//!
//! Two coarse kinds: client input problems map to 400, upstream and internal
//! failures map to 500. Every error renders as a JSON body `{"error": message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Neither a city name nor a full lat/lon pair was supplied.
    #[error("City name or coordinates (lat, lon) are required")]
    MissingLocation,

    /// The requested crop has no entry in the suitability table.
    #[error("No data available for crop: {0}")]
    UnknownCrop(String),

    /// Malformed or incomplete request body.
    #[error("{0}")]
    BadRequest(String),

    /// Weather provider transport failure or non-success status.
    #[error("Weather provider error: {0}")]
    Weather(#[from] reqwest::Error),

    /// Region store failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else that should not leak internals beyond its message.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingLocation | AppError::UnknownCrop(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Weather(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));
        (status, body).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_400() {
        assert_eq!(AppError::MissingLocation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::UnknownCrop("quinoa".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BadRequest("missing field".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_errors_are_500() {
        assert_eq!(
            AppError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unknown_crop_message_names_the_crop() {
        let err = AppError::UnknownCrop("durian".to_string());
        assert_eq!(err.to_string(), "No data available for crop: durian");
    }
}
