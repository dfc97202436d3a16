use crate::{
    models::*,
    routes::{
        api::AppState,
        common::{error_response, invalid_request, map_completion_error, not_found},
    },
};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use services::travel::{
    month_signals, prompts::DEFAULT_EVENT_LIMIT, RecommendationRequest, TravelError,
};
use tracing::debug;

const RECOMMENDATION_PARSE_MESSAGE: &str =
    "Couldn't parse the recommendations from the model. Please try again.";

/// Ask the model for activities at a destination
pub async fn create_recommendations(
    State(app_state): State<AppState>,
    Json(request): Json<RecommendationsRequest>,
) -> Response {
    if let Err(error) = request.validate() {
        return invalid_request(error);
    }

    let request: RecommendationRequest = request.into();
    debug!(?request, "Recommendations request");

    match app_state.travel_service.get_recommendations(&request).await {
        Ok(recommendations) => (
            StatusCode::OK,
            ResponseJson(RecommendationsResponse {
                recommendations: recommendations.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
        Err(TravelError::Completion(e)) => {
            tracing::warn!(error = %e, "Recommendations completion failed");
            map_completion_error(&e)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Recommendations output could not be parsed");
            if let Some(raw) = e.raw_output() {
                *app_state.last_recommendations_raw.write().await = Some(raw.to_string());
            }
            error_response(
                StatusCode::BAD_GATEWAY,
                RECOMMENDATION_PARSE_MESSAGE,
                "recommendation_parse_error",
            )
        }
    }
}

/// Raw model text behind the last recommendation parse failure
pub async fn get_last_recommendations_raw(State(app_state): State<AppState>) -> Response {
    match app_state.last_recommendations_raw.read().await.clone() {
        Some(raw) => (StatusCode::OK, ResponseJson(RawOutputResponse { raw })).into_response(),
        None => not_found("No failed recommendation output recorded"),
    }
}

/// Notable events for a month. Upstream trouble yields an empty list, not an error.
pub async fn list_events(
    State(app_state): State<AppState>,
    Json(request): Json<EventsRequest>,
) -> Response {
    if let Err(error) = request.validate() {
        return invalid_request(error);
    }

    let month = request.month.trim().to_string();
    let limit = request.limit.unwrap_or(DEFAULT_EVENT_LIMIT);
    let events = app_state
        .travel_service
        .get_global_events(&month, limit)
        .await;

    (
        StatusCode::OK,
        ResponseJson(EventsResponse {
            signals: month_signals(&month),
            month,
            events,
        }),
    )
        .into_response()
}
