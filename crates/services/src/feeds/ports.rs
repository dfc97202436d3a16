use async_trait::async_trait;
use serde::Serialize;

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

pub const DEFAULT_FEED_LIMIT: usize = 3;

/// One article from an RSS or Atom feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),
    #[error("Feed request failed: {0}")]
    RequestFailed(String),
    #[error("Feed server returned HTTP {status_code}")]
    HttpError { status_code: u16 },
    #[error("Feed is not valid RSS or Atom: {0}")]
    Malformed(String),
}

/// Source of feed articles
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait FeedReader: Send + Sync {
    /// Fetch at most `limit` items from the feed at `url`, in feed order
    async fn fetch_items(&self, url: &str, limit: usize) -> Result<Vec<FeedItem>, FeedError>;
}
