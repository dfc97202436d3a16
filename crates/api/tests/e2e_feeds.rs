mod common;

use common::setup_test_server_with_feeds;
use inference_providers::MockProvider;
use services::feeds::{FeedError, FeedItem, MockFeedReader};
use std::sync::Arc;

#[tokio::test]
async fn test_feed_items() {
    let mut reader = MockFeedReader::new();
    reader
        .expect_fetch_items()
        .withf(|url, limit| url == "https://travel.example.com/rss" && *limit == 3)
        .times(1)
        .returning(|_, _| {
            Ok(vec![FeedItem {
                title: "Trekking in Nepal".to_string(),
                link: "https://travel.example.com/nepal".to_string(),
                summary: "Ten days on the Annapurna circuit.".to_string(),
                published: "Mon, 01 Sep 2025 10:00:00 GMT".to_string(),
            }])
        });
    let server = setup_test_server_with_feeds(Arc::new(MockProvider::new()), Arc::new(reader));

    let response = server
        .get("/v1/feeds")
        .add_query_param("url", "https://travel.example.com/rss")
        .await;
    assert_eq!(response.status_code(), 200, "body={}", response.text());

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["items"][0]["title"], "Trekking in Nepal");
    assert_eq!(body["items"][0]["published"], "Mon, 01 Sep 2025 10:00:00 GMT");
}

#[tokio::test]
async fn test_feed_failure_is_bad_gateway() {
    let mut reader = MockFeedReader::new();
    reader
        .expect_fetch_items()
        .returning(|_, _| Err(FeedError::HttpError { status_code: 404 }));
    let server = setup_test_server_with_feeds(Arc::new(MockProvider::new()), Arc::new(reader));

    let response = server
        .get("/v1/feeds")
        .add_query_param("url", "https://travel.example.com/missing")
        .add_query_param("limit", 5)
        .await;
    assert_eq!(response.status_code(), 502);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["type"],
        "feed_unavailable"
    );
}

#[tokio::test]
async fn test_feed_limit_out_of_range() {
    let server = setup_test_server_with_feeds(
        Arc::new(MockProvider::new()),
        Arc::new(MockFeedReader::new()),
    );

    let response = server
        .get("/v1/feeds")
        .add_query_param("url", "https://travel.example.com/rss")
        .add_query_param("limit", 0)
        .await;
    assert_eq!(response.status_code(), 400);
}
