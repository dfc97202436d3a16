use super::models::RecommendationRequest;

pub const RECOMMENDATION_SYSTEM_PROMPT: &str =
    "You are a travel AI assistant. Always return ONLY valid JSON.";
pub const RECOMMENDATION_TEMPERATURE: f32 = 0.7;

pub const EVENTS_SYSTEM_PROMPT: &str =
    "You are a concise travel assistant. Always return ONLY valid JSON.";
pub const EVENTS_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_EVENT_LIMIT: usize = 4;

pub fn recommendation_prompt(request: &RecommendationRequest) -> String {
    format!(
        "Suggest 3-4 unique travel activities for {destination} in {month} with a {budget} budget focused on {experiences}.\n\
         For each suggestion, return JSON with fields:\n\
         - title (string)\n\
         - desc (string, 2-3 sentences)\n\
         - links (array of 2 URLs: mix of blog and YouTube)\n\
         Respond ONLY with a valid JSON array.",
        destination = request.destination,
        month = request.month,
        budget = request.budget,
        experiences = request.experience_summary(),
    )
}

pub fn events_prompt(month: &str, limit: usize) -> String {
    format!(
        "Return a JSON array with {limit} notable global events / festivals / experiences happening in {month}.\n\
         For each item return an object with fields:\n\
         - title (string)\n\
         - date (string)\n\
         - location (string)\n\
         - description (string)\n\
         - hook (string, one short marketing line)\n\
         Respond ONLY with a valid JSON array."
    )
}
