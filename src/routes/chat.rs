use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, warn};

use crate::llm::conversation;
use crate::models::{AppState, ChatRequest, ChatResponse};
use crate::types::{AppError, ChatTurn};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(post_chat))
        .with_state(state)
}

/// Process a user query against the session's accumulated context.
///
/// Completion failures never surface as HTTP errors: they are converted into
/// a user-visible string and recorded in the history like any other reply.
async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let session_id = state.sessions.resolve_id(request.session_id);
    let query = request.query.trim().to_string();
    info!(session_id, query_chars = query.len(), "Received chat query");

    state
        .sessions
        .append_turn(&session_id, ChatTurn::user(&query))
        .await;

    let session = state.sessions.snapshot(&session_id).await;
    let messages = conversation::build_messages(
        &state.config.completion.system_prompt,
        &session.context,
        &session.history,
        &query,
        state.config.completion.history_window,
    );

    let response_text = match state.completion.create_chat_completion(&messages).await {
        Ok(completion) => completion.content,
        Err(AppError::Configuration(message)) => {
            warn!(session_id, "Completion not configured");
            format!("Error: {}", message)
        }
        Err(e) => {
            warn!(session_id, error = %e, "Completion call failed");
            format!(
                "Sorry, I encountered an error when generating a response. Error details: {}",
                e
            )
        }
    };

    state
        .sessions
        .append_turn(&session_id, ChatTurn::assistant(&response_text))
        .await;

    let history = state.sessions.snapshot(&session_id).await.history;
    Json(ChatResponse {
        session_id,
        response: response_text,
        history,
    })
}
