pub mod errors;
pub mod models;
pub mod prompts;

pub use errors::{ParseFailure, TravelError};
pub use models::{Event, Recommendation, RecommendationRequest};

use crate::extract::extract_json_array;
use inference_providers::{ChatMessage, InferenceProvider};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Parse a model response into records.
///
/// The whole text is tried as a JSON array first, then the first bracketed
/// span inside it. Every element must be an object; one bad element fails
/// the batch.
pub fn parse_records<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ParseFailure> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(text) {
        Ok(values) => values,
        Err(_) => serde_json::from_str(extract_json_array(text)?)?,
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            if !value.is_object() {
                return Err(ParseFailure::NotAnObject { index });
            }
            serde_json::from_value(value)
                .map_err(|source| ParseFailure::InvalidRecord { index, source })
        })
        .collect()
}

/// Planning tips for `month` that hold regardless of destination
pub fn month_signals(month: &str) -> Vec<String> {
    vec![
        format!("{month}: consider regional festivals and public holidays that affect pricing and crowds."),
        "Combine city stays with nearby countryside day trips to avoid weekend surges.".to_string(),
        "Use weekday museum entries, city passes, and early timed tickets to cut queues.".to_string(),
    ]
}

/// Structured queries (recommendations, global events) on top of a completion provider
pub struct TravelService {
    provider: Arc<dyn InferenceProvider>,
}

impl TravelService {
    pub fn new(provider: Arc<dyn InferenceProvider>) -> Self {
        Self { provider }
    }

    /// Ask for 3-4 activities matching the request.
    ///
    /// Upstream failures and unparseable output are both returned; on a parse
    /// failure the raw model text travels with the error.
    pub async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, TravelError> {
        let messages = vec![
            ChatMessage::system(prompts::RECOMMENDATION_SYSTEM_PROMPT),
            ChatMessage::user(prompts::recommendation_prompt(request)),
        ];

        let text = self
            .provider
            .chat_completion(messages, prompts::RECOMMENDATION_TEMPERATURE)
            .await?;

        match parse_records(&text) {
            Ok(recommendations) => {
                tracing::debug!(
                    destination = %request.destination,
                    count = recommendations.len(),
                    "Parsed recommendations"
                );
                Ok(recommendations)
            }
            Err(source) => Err(TravelError::RecommendationParse { source, raw: text }),
        }
    }

    /// Ask for `limit` notable events in `month`, propagating every failure
    pub async fn try_get_global_events(
        &self,
        month: &str,
        limit: usize,
    ) -> Result<Vec<Event>, TravelError> {
        let messages = vec![
            ChatMessage::system(prompts::EVENTS_SYSTEM_PROMPT),
            ChatMessage::user(prompts::events_prompt(month, limit)),
        ];

        let text = self
            .provider
            .chat_completion(messages, prompts::EVENTS_TEMPERATURE)
            .await?;

        parse_records(&text).map_err(|source| TravelError::EventParse { source, raw: text })
    }

    /// Like `try_get_global_events`, but any failure becomes an empty list.
    ///
    /// An empty result means "no data, try again", never a hard error.
    pub async fn get_global_events(&self, month: &str, limit: usize) -> Vec<Event> {
        match self.try_get_global_events(month, limit).await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(
                    month = %month,
                    error = %e,
                    raw_len = e.raw_output().map(str::len),
                    "Global events unavailable, returning none"
                );
                Vec::new()
            }
        }
    }
}
