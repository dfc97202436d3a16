use inference_providers::ChatMessage;
use serde::{Deserialize, Serialize};
use services::{
    feeds::FeedItem,
    profile::{JourneySuggestion, Profile},
    travel::{Event, Recommendation, RecommendationRequest},
};
use uuid::Uuid;

pub const MAX_EVENT_LIMIT: usize = 12;
pub const MAX_FEED_LIMIT: usize = 20;
pub const MAX_MESSAGE_LENGTH: usize = 8_000;

// ============================================
// Errors
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                r#type: error_type.into(),
            },
        }
    }
}

// ============================================
// Recommendations
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsRequest {
    pub destination: String,
    pub budget: String,
    #[serde(default)]
    pub experiences: Vec<String>,
    pub month: String,
}

impl RecommendationsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.destination.trim().is_empty() {
            return Err("destination is required".to_string());
        }
        if self.month.trim().is_empty() {
            return Err("month is required".to_string());
        }
        if self.budget.trim().is_empty() {
            return Err("budget is required".to_string());
        }
        Ok(())
    }
}

impl From<RecommendationsRequest> for RecommendationRequest {
    fn from(req: RecommendationsRequest) -> Self {
        Self {
            destination: req.destination.trim().to_string(),
            budget: req.budget.trim().to_string(),
            experiences: req.experiences,
            month: req.month.trim().to_string(),
        }
    }
}

/// A recommendation with its links split for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationObject {
    pub title: String,
    pub desc: String,
    pub links: Vec<String>,
    pub watch: Vec<String>,
    pub read: Vec<String>,
}

impl From<Recommendation> for RecommendationObject {
    fn from(rec: Recommendation) -> Self {
        let watch = rec.video_links().into_iter().map(str::to_string).collect();
        let read = rec.read_links().into_iter().map(str::to_string).collect();
        Self {
            title: rec.title,
            desc: rec.desc,
            links: rec.links,
            watch,
            read,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendationObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOutputResponse {
    pub raw: String,
}

// ============================================
// Events
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsRequest {
    pub month: String,
    pub limit: Option<usize>,
}

impl EventsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.month.trim().is_empty() {
            return Err("month is required".to_string());
        }
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_EVENT_LIMIT {
                return Err(format!("limit must be between 1 and {MAX_EVENT_LIMIT}"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub month: String,
    pub events: Vec<Event>,
    /// Generic planning tips for the month, present even when `events` is empty
    pub signals: Vec<String>,
}

// ============================================
// Profile
// ============================================

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub visited_summary: String,
    pub interests_summary: String,
    pub suggestions: &'static [JourneySuggestion],
}

// ============================================
// Chat
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionObject {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMessages {
    pub id: Uuid,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(default)]
    pub stream: bool,
}

impl SendMessageRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("content must not be empty".to_string());
        }
        if self.content.len() > MAX_MESSAGE_LENGTH {
            return Err(format!(
                "content is too long ({} bytes, max {MAX_MESSAGE_LENGTH})",
                self.content.len()
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub reply: String,
}

/// Payload of one `data:` line on the chat stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaEvent {
    pub delta: String,
}

// ============================================
// Feeds
// ============================================

#[derive(Debug, Clone, Deserialize)]
pub struct FeedQuery {
    pub url: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub items: Vec<FeedItem>,
}
