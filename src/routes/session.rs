use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::models::{AppState, SessionRequest, StatusResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/clear-messages", post(clear_messages))
        .route("/api/reset", post(reset))
        .with_state(state)
}

/// Clear chat messages while preserving uploaded resources and context.
async fn clear_messages(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Json<StatusResponse> {
    let Some(session_id) = request.session_id else {
        return Json(StatusResponse {
            status: "error".to_string(),
            message: "No active session found".to_string(),
        });
    };

    info!(session_id, "Clearing chat messages, preserving context");
    if state.sessions.clear_messages(&session_id).await {
        Json(StatusResponse {
            status: "success".to_string(),
            message: "Chat messages cleared while preserving uploaded resources".to_string(),
        })
    } else {
        Json(StatusResponse {
            status: "error".to_string(),
            message: "No active session found".to_string(),
        })
    }
}

/// Reset the entire session including documents and websites.
async fn reset(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Json<StatusResponse> {
    if let Some(session_id) = request.session_id {
        info!(session_id, "Resetting session");
        state.sessions.reset(&session_id).await;
    }
    Json(StatusResponse {
        status: "success".to_string(),
        message: "Session reset complete".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractorSet;
    use crate::llm::provider::{CompletionAdapter, CompletionResponse};
    use crate::session::SessionStore;
    use crate::types::{AppResult, ChatTurn};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct NoopAdapter;

    #[async_trait]
    impl CompletionAdapter for NoopAdapter {
        async fn create_chat_completion(
            &self,
            _messages: &[ChatTurn],
        ) -> AppResult<CompletionResponse> {
            unreachable!("session routes never call the completion endpoint")
        }
    }

    fn test_state() -> AppState {
        let config = crate::config::Config {
            server: crate::config::ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
            },
            completion: crate::config::CompletionConfig {
                endpoint: String::new(),
                api_key: String::new(),
                deployment: String::new(),
                api_version: "2023-05-15".to_string(),
                system_prompt: String::new(),
                history_window: 6,
            },
            extraction: crate::config::ExtractionConfig {
                use_intelligent_processing: false,
                layout_endpoint: String::new(),
                layout_api_key: String::new(),
            },
            app: crate::config::AppConfig {
                title: "t".to_string(),
                welcome_title: "w".to_string(),
                welcome_message: "m".to_string(),
                primary_color: "#000".to_string(),
            },
        };
        AppState {
            extractors: Arc::new(ExtractorSet::new(&config.extraction)),
            completion: Arc::new(NoopAdapter),
            sessions: SessionStore::new(),
            config,
        }
    }

    async fn post_json(state: AppState, uri: &str, body: serde_json::Value) -> serde_json::Value {
        let app = router(state);
        let response = app
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn clear_messages_keeps_context() {
        let state = test_state();
        state
            .sessions
            .append_resources("s1", "ctx", vec!["a.pdf".into()], vec![])
            .await;
        state.sessions.append_turn("s1", ChatTurn::user("q")).await;

        let body = post_json(
            state.clone(),
            "/api/clear-messages",
            serde_json::json!({ "session_id": "s1" }),
        )
        .await;
        assert_eq!(body["status"], "success");

        let session = state.sessions.snapshot("s1").await;
        assert!(session.history.is_empty());
        assert_eq!(session.context, "ctx");
    }

    #[tokio::test]
    async fn clear_messages_without_session_is_an_error_status() {
        let body = post_json(
            test_state(),
            "/api/clear-messages",
            serde_json::json!({ "session_id": null }),
        )
        .await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "No active session found");
    }

    #[tokio::test]
    async fn reset_discards_the_session() {
        let state = test_state();
        state
            .sessions
            .append_resources("s2", "ctx", vec![], vec!["https://example.com".into()])
            .await;

        let body = post_json(
            state.clone(),
            "/api/reset",
            serde_json::json!({ "session_id": "s2" }),
        )
        .await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Session reset complete");

        let session = state.sessions.snapshot("s2").await;
        assert!(session.context.is_empty());
        assert!(session.websites.is_empty());
    }
}
