use crate::extract::MalformedInput;
use inference_providers::CompletionError;

/// Why a model response could not be turned into records
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Malformed(#[from] MalformedInput),
    #[error("invalid JSON array: {0}")]
    Json(#[from] serde_json::Error),
    #[error("element {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("element {index} is not a valid record: {source}")]
    InvalidRecord {
        index: usize,
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TravelError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The raw model output is kept for diagnostics
    #[error("Failed to parse recommendations JSON: {source}")]
    RecommendationParse { source: ParseFailure, raw: String },

    #[error("Failed to parse events JSON: {source}")]
    EventParse { source: ParseFailure, raw: String },
}

impl TravelError {
    /// Raw model output behind a parse failure
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::RecommendationParse { raw, .. } | Self::EventParse { raw, .. } => Some(raw),
            Self::Completion(_) => None,
        }
    }
}
