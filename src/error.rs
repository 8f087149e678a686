use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ErrorResponse;
use crate::upstream::UpstreamError;

pub const MISSING_CHAT_INPUT: &str = "Missing chatInput";
pub const UPSTREAM_FAILURE: &str = "Failed to get response from AI";

/// Failures of a single `/api/chat` request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("request has no usable chatInput")]
    Validation,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    /// Status and body sent to the caller. The upstream cause never leaves the
    /// process.
    pub fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        let (status, message) = match self {
            Self::Validation => (StatusCode::BAD_REQUEST, MISSING_CHAT_INPUT),
            Self::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE),
        };
        (
            status,
            ErrorResponse {
                error: message.to_string(),
            },
        )
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let (status, body) = RelayError::Validation.status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Missing chatInput");
    }

    #[test]
    fn upstream_maps_to_generic_server_error() {
        let (status, body) = RelayError::from(UpstreamError::NoChoices).status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to get response from AI");
    }

    #[test]
    fn upstream_cause_is_not_exposed() {
        let decode = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = RelayError::from(UpstreamError::from(decode));
        let (_, body) = err.status_and_body();

        assert!(err.to_string().contains("could not be decoded"));
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Failed to get response from AI"}"#
        );
    }
}
