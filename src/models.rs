// Application state and API wire types

use std::sync::Arc;

use crate::config::Config;
use crate::extract::ExtractorSet;
use crate::llm::CompletionAdapter;
use crate::session::SessionStore;
use crate::types::ChatTurn;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub extractors: Arc<ExtractorSet>,
    pub completion: Arc<dyn CompletionAdapter>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub query: String,
}

#[derive(Debug, serde::Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, serde::Serialize)]
pub struct UploadResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
    /// Formatted summary of every resource the session has accumulated.
    pub resources: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct SessionRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
