pub mod client;
pub mod ports;

pub use client::RssFeedClient;
pub use ports::{FeedError, FeedItem, FeedReader, DEFAULT_FEED_LIMIT};

#[cfg(any(test, feature = "test-mocks"))]
pub use ports::MockFeedReader;
