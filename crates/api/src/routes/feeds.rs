use crate::{
    models::{FeedQuery, FeedResponse, MAX_FEED_LIMIT},
    routes::{
        api::AppState,
        common::{invalid_request, map_feed_error},
    },
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use services::feeds::DEFAULT_FEED_LIMIT;

/// Latest articles from an RSS or Atom feed
pub async fn list_feed_items(
    State(app_state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT);
    if limit == 0 || limit > MAX_FEED_LIMIT {
        return invalid_request(format!("limit must be between 1 and {MAX_FEED_LIMIT}"));
    }

    match app_state.feed_reader.fetch_items(&query.url, limit).await {
        Ok(items) => (StatusCode::OK, ResponseJson(FeedResponse { items })).into_response(),
        Err(e) => {
            tracing::warn!(url = %query.url, error = %e, "Feed fetch failed");
            map_feed_error(&e)
        }
    }
}
