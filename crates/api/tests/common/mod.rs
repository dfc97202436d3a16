#![allow(dead_code)]

use api::{build_app, DomainServices};
use inference_providers::MockProvider;
use services::feeds::{FeedReader, MockFeedReader};
use std::sync::Arc;

/// Test server backed by a scripted completion provider
pub fn setup_test_server(provider: Arc<MockProvider>) -> axum_test::TestServer {
    setup_test_server_with_feeds(provider, Arc::new(MockFeedReader::new()))
}

pub fn setup_test_server_with_feeds(
    provider: Arc<MockProvider>,
    feed_reader: Arc<dyn FeedReader>,
) -> axum_test::TestServer {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::level_filters::LevelFilter::DEBUG)
        .try_init();

    let app = build_app(DomainServices {
        provider,
        feed_reader,
    });
    axum_test::TestServer::new(app).unwrap()
}

pub async fn create_session(server: &axum_test::TestServer) -> String {
    let response = server.post("/v1/chat/sessions").await;
    assert_eq!(
        response.status_code(),
        201,
        "Create session should return 201, got {} body={}",
        response.status_code(),
        response.text()
    );
    response.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// `data:` payloads of an SSE body, in order
pub fn sse_data_lines(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.trim_start().to_string())
        .collect()
}
