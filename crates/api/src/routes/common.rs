use crate::models::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use inference_providers::CompletionError;
use services::feeds::FeedError;

pub fn error_response(
    status: StatusCode,
    message: impl Into<String>,
    error_type: &str,
) -> Response {
    (status, ResponseJson(ErrorResponse::new(message, error_type))).into_response()
}

pub fn invalid_request(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, message, "invalid_request_error")
}

pub fn not_found(message: impl Into<String>) -> Response {
    error_response(StatusCode::NOT_FOUND, message, "not_found_error")
}

/// Error type reported for a failed completion call
pub fn completion_error_type(error: &CompletionError) -> &'static str {
    match error {
        CompletionError::HttpError { .. } => "upstream_http_error",
        CompletionError::InvalidResponse { .. } => "upstream_shape_error",
        CompletionError::RequestFailed(_) => "upstream_unavailable",
    }
}

/// Every completion failure is the upstream's fault, so it maps to 502
pub fn map_completion_error(error: &CompletionError) -> Response {
    error_response(
        StatusCode::BAD_GATEWAY,
        error.to_string(),
        completion_error_type(error),
    )
}

pub fn map_feed_error(error: &FeedError) -> Response {
    match error {
        FeedError::InvalidUrl(_) => invalid_request(error.to_string()),
        FeedError::RequestFailed(_) | FeedError::HttpError { .. } => {
            error_response(StatusCode::BAD_GATEWAY, error.to_string(), "feed_unavailable")
        }
        FeedError::Malformed(_) => {
            error_response(StatusCode::BAD_GATEWAY, error.to_string(), "feed_malformed")
        }
    }
}
