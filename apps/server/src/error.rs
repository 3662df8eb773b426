//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use monitor_core::MonitorError;
use serde_json::json;

/// Error type for API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Monitor(#[from] MonitorError),

    /// Request body could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Monitor(MonitorError::InvalidConfig(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_CONFIG", msg.clone())
            }
            ApiError::Monitor(MonitorError::FeedUnavailable(msg)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "FEED_UNAVAILABLE", msg.clone())
            }
            ApiError::Monitor(MonitorError::NotifyFailed(msg)) => {
                (StatusCode::BAD_GATEWAY, "NOTIFY_FAILED", msg.clone())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_bad_request() {
        let response =
            ApiError::from(MonitorError::InvalidConfig("bad".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_feed_unavailable_is_service_unavailable() {
        let response =
            ApiError::from(MonitorError::FeedUnavailable("down".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
