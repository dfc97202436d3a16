mod common;

use common::{create_session, setup_test_server, sse_data_lines};
use inference_providers::{CompletionError, MockProvider};
use serde_json::json;
use std::sync::Arc;

async fn history(server: &axum_test::TestServer, id: &str) -> Vec<serde_json::Value> {
    let response = server
        .get(format!("/v1/chat/sessions/{id}/messages").as_str())
        .await;
    assert_eq!(response.status_code(), 200, "body={}", response.text());
    response.json::<serde_json::Value>()["messages"]
        .as_array()
        .unwrap()
        .clone()
}

#[tokio::test]
async fn test_send_message_appends_turn() {
    let provider = Arc::new(MockProvider::new().with_reply("Hello!"));
    let server = setup_test_server(provider.clone());
    let id = create_session(&server).await;

    let response = server
        .post(format!("/v1/chat/sessions/{id}/messages").as_str())
        .json(&json!({"content": "Hi"}))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<serde_json::Value>()["reply"], "Hello!");

    assert_eq!(
        history(&server, &id).await,
        vec![
            json!({"role": "user", "content": "Hi"}),
            json!({"role": "assistant", "content": "Hello!"}),
        ]
    );

    let request = provider.last_request().unwrap();
    assert_eq!(request.messages[0].content, services::chat::CHAT_SYSTEM_PROMPT);
}

#[tokio::test]
async fn test_streaming_message() {
    let provider = Arc::new(MockProvider::new());
    provider.push_stream(["Hi", " there"]);
    let server = setup_test_server(provider);
    let id = create_session(&server).await;

    let response = server
        .post(format!("/v1/chat/sessions/{id}/messages").as_str())
        .json(&json!({"content": "Hello", "stream": true}))
        .await;
    assert_eq!(response.status_code(), 200);

    let data = sse_data_lines(&response.text());
    assert_eq!(
        data,
        vec![
            r#"{"delta":"Hi"}"#.to_string(),
            r#"{"delta":" there"}"#.to_string(),
            "[DONE]".to_string(),
        ]
    );

    let messages = history(&server, &id).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1], json!({"role": "assistant", "content": "Hi there"}));
}

#[tokio::test]
async fn test_streaming_rejected_keeps_user_message() {
    let provider = Arc::new(MockProvider::new());
    provider.push_stream_error(CompletionError::HttpError {
        status_code: 503,
        body: "overloaded".to_string(),
    });
    let server = setup_test_server(provider);
    let id = create_session(&server).await;

    let response = server
        .post(format!("/v1/chat/sessions/{id}/messages").as_str())
        .json(&json!({"content": "Hello", "stream": true}))
        .await;

    let data = sse_data_lines(&response.text());
    assert_eq!(data.len(), 2);
    let error: serde_json::Value = serde_json::from_str(&data[0]).unwrap();
    assert_eq!(error["error"]["type"], "upstream_http_error");
    assert_eq!(data[1], "[DONE]");

    assert_eq!(
        history(&server, &id).await,
        vec![json!({"role": "user", "content": "Hello"})]
    );
}

#[tokio::test]
async fn test_upstream_failure_keeps_user_message() {
    let provider = Arc::new(MockProvider::new());
    provider.push_error(CompletionError::InvalidResponse {
        reason: "missing choices[0].message.content".to_string(),
        body: "{}".to_string(),
    });
    let server = setup_test_server(provider);
    let id = create_session(&server).await;

    let response = server
        .post(format!("/v1/chat/sessions/{id}/messages").as_str())
        .json(&json!({"content": "Hi"}))
        .await;
    assert_eq!(response.status_code(), 502);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["type"],
        "upstream_shape_error"
    );

    assert_eq!(history(&server, &id).await.len(), 1);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let provider = Arc::new(MockProvider::new().with_reply("one"));
    let server = setup_test_server(provider);
    let first = create_session(&server).await;
    let second = create_session(&server).await;

    server
        .post(format!("/v1/chat/sessions/{first}/messages").as_str())
        .json(&json!({"content": "Hi"}))
        .await;

    assert_eq!(history(&server, &first).await.len(), 2);
    assert!(history(&server, &second).await.is_empty());
}

#[tokio::test]
async fn test_unknown_session() {
    let server = setup_test_server(Arc::new(MockProvider::new()));

    let response = server
        .post("/v1/chat/sessions/6f1c2d4e-8a1b-4c3d-9e5f-0a1b2c3d4e5f/messages")
        .json(&json!({"content": "Hi"}))
        .await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["type"],
        "not_found_error"
    );
}

#[tokio::test]
async fn test_delete_session() {
    let provider = Arc::new(MockProvider::new().with_reply("Hello!"));
    let server = setup_test_server(provider);
    let id = create_session(&server).await;
    let path = format!("/v1/chat/sessions/{id}");

    server
        .post(format!("{path}/messages").as_str())
        .json(&json!({"content": "Hi"}))
        .await;

    let response = server.delete(path.as_str()).await;
    assert_eq!(response.status_code(), 204);

    let response = server.get(format!("{path}/messages").as_str()).await;
    assert_eq!(response.status_code(), 404);

    let response = server.delete(path.as_str()).await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["type"],
        "not_found_error"
    );
}

#[tokio::test]
async fn test_empty_message_rejected() {
    let provider = Arc::new(MockProvider::new());
    let server = setup_test_server(provider.clone());
    let id = create_session(&server).await;

    let response = server
        .post(format!("/v1/chat/sessions/{id}/messages").as_str())
        .json(&json!({"content": "   "}))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(provider.request_count(), 0);
    assert!(history(&server, &id).await.is_empty());
}

#[tokio::test]
async fn test_send_suggestion() {
    let provider = Arc::new(MockProvider::new().with_reply("Day 1: Tiger Hill sunrise"));
    let server = setup_test_server(provider);
    let id = create_session(&server).await;

    let response = server
        .post(format!("/v1/chat/sessions/{id}/suggestions/phuket").as_str())
        .await;
    assert_eq!(response.status_code(), 200);

    let messages = history(&server, &id).await;
    assert_eq!(
        messages[0]["content"],
        "Suggest top beach activities in Phuket this summer with estimated prices."
    );
    assert_eq!(messages[1]["content"], "Day 1: Tiger Hill sunrise");

    let response = server
        .post(format!("/v1/chat/sessions/{id}/suggestions/atlantis").as_str())
        .await;
    assert_eq!(response.status_code(), 404);
}
