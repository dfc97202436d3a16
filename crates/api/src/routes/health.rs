use axum::{http::StatusCode, response::Json as ResponseJson};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Liveness check; never touches the completion endpoint
pub async fn health_check() -> (StatusCode, ResponseJson<HealthResponse>) {
    (
        StatusCode::OK,
        ResponseJson(HealthResponse {
            status: "ok".to_string(),
            version: option_env!("CARGO_PKG_VERSION").map(|v| v.to_string()),
        }),
    )
}
