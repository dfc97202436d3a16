pub mod models;
pub mod routes;

use crate::routes::{
    api::{AppState, SessionStore},
    chat::{create_session, delete_session, list_messages, send_message, send_suggestion},
    feeds::list_feed_items,
    health::health_check,
    profile::get_profile,
    travel::{create_recommendations, get_last_recommendations_raw, list_events},
};
use axum::{
    routing::{delete, get, post},
    Router,
};
use config::ApiConfig;
use inference_providers::{
    CompletionError, InferenceProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use services::{feeds::FeedError, ChatService, FeedReader, RssFeedClient, TravelService};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub const FEED_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to create completion client: {0}")]
    Completion(#[from] CompletionError),
    #[error("Failed to create feed client: {0}")]
    Feeds(#[from] FeedError),
}

/// The outbound clients every route is built on
#[derive(Clone)]
pub struct DomainServices {
    pub provider: Arc<dyn InferenceProvider>,
    pub feed_reader: Arc<dyn FeedReader>,
}

/// Create the HTTP clients for the completion endpoint and for feeds
pub fn init_domain_services(config: &ApiConfig) -> Result<DomainServices, StartupError> {
    let completion = &config.completion;
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
        base_url: completion.base_url.clone(),
        api_key: completion.api_key.clone(),
        model: completion.model.clone(),
        timeout_seconds: completion.timeout_seconds,
        connect_timeout_seconds: completion.connect_timeout_seconds,
    })?;

    Ok(DomainServices {
        provider: Arc::new(provider),
        feed_reader: Arc::new(RssFeedClient::new(FEED_TIMEOUT_SECONDS)?),
    })
}

pub fn build_app_state(domain_services: DomainServices) -> AppState {
    AppState {
        travel_service: Arc::new(TravelService::new(domain_services.provider.clone())),
        chat_service: Arc::new(ChatService::new(domain_services.provider)),
        feed_reader: domain_services.feed_reader,
        sessions: SessionStore::new(),
        last_recommendations_raw: Arc::new(RwLock::new(None)),
    }
}

/// Build the complete application router
pub fn build_app(domain_services: DomainServices) -> Router {
    build_app_with_state(build_app_state(domain_services))
}

pub fn build_app_with_state(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let chat_routes = Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", delete(delete_session))
        .route(
            "/sessions/{id}/messages",
            get(list_messages).post(send_message),
        )
        .route(
            "/sessions/{id}/suggestions/{suggestion_id}",
            post(send_suggestion),
        );

    let v1_routes = Router::new()
        .route("/health", get(health_check))
        .route("/recommendations", post(create_recommendations))
        .route(
            "/debug/recommendations/raw",
            get(get_last_recommendations_raw),
        )
        .route("/events", post(list_events))
        .route("/profile", get(get_profile))
        .route("/feeds", get(list_feed_items))
        .nest("/chat", chat_routes);

    Router::new()
        .nest("/v1", v1_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
