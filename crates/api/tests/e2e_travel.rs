mod common;

use common::setup_test_server;
use inference_providers::{CompletionError, MockProvider};
use serde_json::json;
use std::sync::Arc;

fn paris() -> serde_json::Value {
    json!({
        "destination": "Paris",
        "budget": "50000 Rs",
        "experiences": ["Relaxed", "Cultural"],
        "month": "December"
    })
}

#[tokio::test]
async fn test_health() {
    let server = setup_test_server(Arc::new(MockProvider::new()));

    let response = server.get("/v1/health").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<serde_json::Value>()["status"], "ok");
}

#[tokio::test]
async fn test_recommendations_split_links() {
    let provider = Arc::new(MockProvider::new().with_reply(
        r#"Sure! [{"title":"Seine cruise","desc":"Evening lights.","links":["https://youtu.be/abc","https://blog.example.com/seine"]}]"#,
    ));
    let server = setup_test_server(provider.clone());

    let response = server.post("/v1/recommendations").json(&paris()).await;
    assert_eq!(response.status_code(), 200, "body={}", response.text());

    let body = response.json::<serde_json::Value>();
    let rec = &body["recommendations"][0];
    assert_eq!(rec["title"], "Seine cruise");
    assert_eq!(rec["watch"], json!(["https://youtu.be/abc"]));
    assert_eq!(rec["read"], json!(["https://blog.example.com/seine"]));

    let request = provider.last_request().unwrap();
    assert!(request.messages[1]
        .content
        .contains("focused on Relaxed, Cultural."));
}

#[tokio::test]
async fn test_recommendations_parse_failure_keeps_raw_output() {
    let raw = "Paris in December is lovely, but I can't format that as JSON.";
    let server = setup_test_server(Arc::new(MockProvider::new().with_reply(raw)));

    let response = server.get("/v1/debug/recommendations/raw").await;
    assert_eq!(response.status_code(), 404);

    let response = server.post("/v1/recommendations").json(&paris()).await;
    assert_eq!(response.status_code(), 502);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["type"], "recommendation_parse_error");

    let response = server.get("/v1/debug/recommendations/raw").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<serde_json::Value>()["raw"], raw);
}

#[tokio::test]
async fn test_recommendations_raw_output_is_latest_failure() {
    let provider = MockProvider::new()
        .with_reply("first unparseable answer")
        .with_reply("second unparseable answer");
    let server = setup_test_server(Arc::new(provider));

    for _ in 0..2 {
        let response = server.post("/v1/recommendations").json(&paris()).await;
        assert_eq!(response.status_code(), 502);
    }

    let response = server.get("/v1/debug/recommendations/raw").await;
    assert_eq!(
        response.json::<serde_json::Value>()["raw"],
        "second unparseable answer"
    );
}

#[tokio::test]
async fn test_recommendations_upstream_error() {
    let provider = Arc::new(MockProvider::new());
    provider.push_error(CompletionError::HttpError {
        status_code: 401,
        body: r#"{"error":{"message":"Invalid API Key"}}"#.to_string(),
    });
    let server = setup_test_server(provider);

    let response = server.post("/v1/recommendations").json(&paris()).await;
    assert_eq!(response.status_code(), 502);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["type"], "upstream_http_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("401"));
}

#[tokio::test]
async fn test_recommendations_validation() {
    let provider = Arc::new(MockProvider::new());
    let server = setup_test_server(provider.clone());

    let response = server
        .post("/v1/recommendations")
        .json(&json!({"destination": " ", "budget": "1000", "month": "May"}))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_events_listed() {
    let provider = Arc::new(MockProvider::new().with_reply(
        r#"[{"title":"Oktoberfest","date":"Sep 20 - Oct 5","location":"Munich","description":"Beer festival","hook":"Prost!"}]"#,
    ));
    let server = setup_test_server(provider.clone());

    let response = server
        .post("/v1/events")
        .json(&json!({"month": "September", "limit": 2}))
        .await;
    assert_eq!(response.status_code(), 200);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["events"][0]["title"], "Oktoberfest");
    assert_eq!(body["signals"].as_array().unwrap().len(), 3);
    assert!(provider.last_request().unwrap().messages[1]
        .content
        .contains("with 2 notable"));
}

#[tokio::test]
async fn test_events_upstream_failure_is_empty_success() {
    let provider = Arc::new(MockProvider::new());
    provider.push_error(CompletionError::RequestFailed("timed out".to_string()));
    let server = setup_test_server(provider);

    let response = server.post("/v1/events").json(&json!({"month": "May"})).await;
    assert_eq!(response.status_code(), 200);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["events"], json!([]));
    assert!(body["signals"][0].as_str().unwrap().starts_with("May:"));
}

#[tokio::test]
async fn test_events_limit_out_of_range() {
    let server = setup_test_server(Arc::new(MockProvider::new()));

    let response = server
        .post("/v1/events")
        .json(&json!({"month": "May", "limit": 100}))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_profile() {
    let server = setup_test_server(Arc::new(MockProvider::new()));

    let response = server.get("/v1/profile").await;
    assert_eq!(response.status_code(), 200);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["profile"]["name"], "Arpita");
    assert_eq!(body["visited_summary"], "Manali, Goa, Bali");
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
    assert_eq!(body["suggestions"][0]["to"], "Darjeeling");
}
