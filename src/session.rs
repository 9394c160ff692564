//! In-memory session store.
//!
//! Sessions are ephemeral: created on first interaction, mutated on
//! upload/chat/clear, gone when the process exits. No durability guarantee.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::types::ChatTurn;

/// Per-session state: accumulated context, resource metadata, and the
/// append-only conversation history. History is only windowed at send time,
/// never truncated here.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub context: String,
    pub files: Vec<String>,
    pub websites: Vec<String>,
    pub history: Vec<ChatTurn>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a session id, minting a fresh one when the client did not
    /// supply any. The session itself is created lazily on first write.
    pub fn resolve_id(&self, session_id: Option<String>) -> String {
        match session_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                let id = Uuid::new_v4().to_string();
                info!(session_id = %id, "New session id minted");
                id
            }
        }
    }

    pub async fn snapshot(&self, session_id: &str) -> Session {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn append_turn(&self, session_id: &str, turn: ChatTurn) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id.to_string()).or_default();
        session.history.push(turn);
    }

    /// Record extracted context and the resources it came from.
    pub async fn append_resources(
        &self,
        session_id: &str,
        context: &str,
        files: Vec<String>,
        websites: Vec<String>,
    ) {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id.to_string()).or_default();
        session.context.push_str(context);
        session.files.extend(files);
        session.websites.extend(websites);
        debug!(
            session_id,
            context_chars = session.context.len(),
            files = session.files.len(),
            websites = session.websites.len(),
            "Session resources updated"
        );
    }

    /// Drop the conversation history but keep context and resource metadata.
    pub async fn clear_messages(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.history.clear();
                true
            }
            None => false,
        }
    }

    /// Discard the entire session.
    pub async fn reset(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }
}
