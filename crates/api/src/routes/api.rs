use services::{ChatService, ChatSession, FeedReader, TravelService};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Application state shared by all route handlers
#[derive(Clone)]
pub struct AppState {
    pub travel_service: Arc<TravelService>,
    pub chat_service: Arc<ChatService>,
    pub feed_reader: Arc<dyn FeedReader>,
    pub sessions: SessionStore,
    /// Model output behind the most recent recommendation parse failure.
    ///
    /// Process-wide debug aid: it holds the last failure from any client and
    /// each new failure overwrites it.
    pub last_recommendations_raw: Arc<RwLock<Option<String>>>,
}

/// In-memory chat sessions, one per connected client.
///
/// Each session has its own lock. A turn holds it from the moment the user
/// message is appended until the assistant reply is stored, so two turns on
/// the same session never interleave.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<ChatSession>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(ChatSession::new())));
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<Mutex<ChatSession>>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drop a session. Returns `false` when the id is unknown.
    ///
    /// A turn already holding the session's lock finishes on its own handle.
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
