use crate::{
    models::*,
    routes::{
        api::AppState,
        common::{completion_error_type, invalid_request, map_completion_error, not_found},
    },
};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json as ResponseJson, Response,
    },
};
use futures::stream::StreamExt;
use services::{profile::find_suggestion, ChatSession};
use std::{convert::Infallible, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

async fn lookup_session(
    app_state: &AppState,
    session_id: &Uuid,
) -> Result<Arc<Mutex<ChatSession>>, Response> {
    app_state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| not_found(format!("Chat session '{session_id}' not found")))
}

pub async fn create_session(State(app_state): State<AppState>) -> Response {
    let id = app_state.sessions.create().await;
    debug!(session_id = %id, "Chat session created");
    (StatusCode::CREATED, ResponseJson(SessionObject { id })).into_response()
}

/// Forget a session and its history
pub async fn delete_session(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    if app_state.sessions.remove(&session_id).await {
        debug!(session_id = %session_id, "Chat session deleted");
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(format!("Chat session '{session_id}' not found"))
    }
}

pub async fn list_messages(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    let session = match lookup_session(&app_state, &session_id).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let messages = session.lock().await.history().to_vec();
    (
        StatusCode::OK,
        ResponseJson(SessionMessages {
            id: session_id,
            messages,
        }),
    )
        .into_response()
}

/// Append a user message and answer it, either as one JSON reply or as SSE deltas
pub async fn send_message(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Response {
    if let Err(error) = request.validate() {
        return invalid_request(error);
    }

    let session = match lookup_session(&app_state, &session_id).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    debug!(
        session_id = %session_id,
        stream = request.stream,
        "Chat message received"
    );

    if request.stream {
        stream_reply(app_state, session, request.content).await
    } else {
        let mut session = session.lock().await;
        match app_state
            .chat_service
            .send_and_append(&mut session, request.content)
            .await
        {
            Ok(reply) => (StatusCode::OK, ResponseJson(ReplyResponse { reply })).into_response(),
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Chat completion failed");
                map_completion_error(&e)
            }
        }
    }
}

/// Stream the assistant reply as `data: {"delta": ..}` events, then `data: [DONE]`.
///
/// The session lock moves into the response body and is released when the
/// body finishes or the client disconnects.
async fn stream_reply(
    app_state: AppState,
    session: Arc<Mutex<ChatSession>>,
    content: String,
) -> Response {
    let mut guard = session.lock_owned().await;
    guard.append_user(content);

    let chat_service = app_state.chat_service.clone();
    let sse_stream = async_stream::stream! {
        let mut guard = guard;
        match chat_service.stream_assistant_reply(&mut guard).await {
            Ok(mut reply) => {
                while let Some(delta) = reply.next().await {
                    match delta {
                        Ok(delta) => {
                            let data = serde_json::to_string(&DeltaEvent { delta }).unwrap_or_default();
                            yield Ok::<_, Infallible>(Event::default().data(data));
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Chat stream failed mid-reply");
                            yield Ok(error_event(&e));
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat stream was rejected");
                yield Ok(error_event(&e));
            }
        }
        yield Ok(Event::default().data("[DONE]"));
    };

    Sse::new(sse_stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn error_event(error: &inference_providers::CompletionError) -> Event {
    let body = ErrorResponse::new(error.to_string(), completion_error_type(error));
    Event::default().data(serde_json::to_string(&body).unwrap_or_default())
}

/// Send a journey suggestion's ready-made prompt into the session
pub async fn send_suggestion(
    State(app_state): State<AppState>,
    Path((session_id, suggestion_id)): Path<(Uuid, String)>,
) -> Response {
    let Some(suggestion) = find_suggestion(&suggestion_id) else {
        return not_found(format!("Journey suggestion '{suggestion_id}' not found"));
    };

    let session = match lookup_session(&app_state, &session_id).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let mut session = session.lock().await;
    match app_state
        .chat_service
        .send_suggestion(&mut session, suggestion)
        .await
    {
        Ok(reply) => (StatusCode::OK, ResponseJson(ReplyResponse { reply })).into_response(),
        Err(e) => {
            tracing::warn!(suggestion = suggestion.id, error = %e, "Suggestion completion failed");
            map_completion_error(&e)
        }
    }
}
