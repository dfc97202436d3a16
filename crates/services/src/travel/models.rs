use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One suggested activity for a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(deserialize_with = "required_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub desc: String,
    #[serde(default, deserialize_with = "lenient_links")]
    pub links: Vec<String>,
}

impl Recommendation {
    /// Links pointing at YouTube, in their original order
    pub fn video_links(&self) -> Vec<&str> {
        self.links
            .iter()
            .map(String::as_str)
            .filter(|link| is_video_link(link))
            .collect()
    }

    /// Every link that is not a video, in their original order
    pub fn read_links(&self) -> Vec<&str> {
        self.links
            .iter()
            .map(String::as_str)
            .filter(|link| !is_video_link(link))
            .collect()
    }
}

pub fn is_video_link(link: &str) -> bool {
    link.contains("youtube.com") || link.contains("youtu.be")
}

/// A festival or happening worth travelling for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "required_text")]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub hook: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<String>,
}

// Model output is loosely typed: scalars become text, nulls and other shapes
// fall back to the field default. Only a missing or non-scalar title fails.

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn required_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_text(Value::deserialize(deserializer)?)
        .ok_or_else(|| serde::de::Error::custom("expected a string"))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Keeps string entries only. A single string is treated as a one-link list.
fn lenient_links<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let links = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(link) if !link.trim().is_empty() => Some(link),
                _ => None,
            })
            .collect(),
        Value::String(link) if !link.trim().is_empty() => vec![link],
        _ => Vec::new(),
    };
    Ok(links)
}

/// Inputs for a recommendation query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub destination: String,
    /// Free text, e.g. "50000 Rs"
    pub budget: String,
    pub experiences: Vec<String>,
    pub month: String,
}

impl RecommendationRequest {
    /// Experience tags as they appear in the prompt
    pub fn experience_summary(&self) -> String {
        self.experiences.join(", ")
    }
}
