use crate::models::ProfileResponse;
use axum::response::Json as ResponseJson;
use services::profile::{journey_suggestions, Profile};

pub async fn get_profile() -> ResponseJson<ProfileResponse> {
    let profile = Profile::seed();
    ResponseJson(ProfileResponse {
        visited_summary: profile.visited_summary(),
        interests_summary: profile.interests_summary(),
        profile,
        suggestions: journey_suggestions(),
    })
}
