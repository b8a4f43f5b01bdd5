use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP callers.
///
/// Upstream failure detail is logged at the handler and never exposed in
/// the response body; callers only see which stage of the pipeline failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The postal code is not exactly 8 characters.
    #[error("invalid zipcode")]
    InvalidZipcode,

    /// The postal lookup failed, whatever the reason.
    #[error("zipcode not found")]
    ZipcodeNotFound,

    /// The weather lookup failed, whatever the reason.
    #[error("weather not found")]
    WeatherNotFound,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidZipcode => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ZipcodeNotFound | ApiError::WeatherNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidZipcode => "Invalid zipcode",
            ApiError::ZipcodeNotFound => "Can not find zipcode",
            ApiError::WeatherNotFound => "Can not find weather",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses() {
        assert_eq!(
            ApiError::InvalidZipcode.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::ZipcodeNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::WeatherNotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn error_messages_match_wire_contract() {
        assert_eq!(ApiError::InvalidZipcode.message(), "Invalid zipcode");
        assert_eq!(ApiError::ZipcodeNotFound.message(), "Can not find zipcode");
        assert_eq!(ApiError::WeatherNotFound.message(), "Can not find weather");
    }
}
