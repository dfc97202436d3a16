pub mod chat;
pub mod extract;
pub mod feeds;
pub mod profile;
pub mod travel;

pub use chat::{AssistantReply, ChatService, ChatSession};
pub use extract::{extract_json_array, MalformedInput};
pub use feeds::{FeedError, FeedItem, FeedReader, RssFeedClient};
pub use profile::{find_suggestion, journey_suggestions, JourneySuggestion, Profile};
pub use travel::{Event, Recommendation, RecommendationRequest, TravelError, TravelService};
