use async_trait::async_trait;

use crate::types::{AppResult, ChatTurn};

/// One request/response exchange with a hosted completion endpoint.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait CompletionAdapter: Send + Sync {
    async fn create_chat_completion(&self, messages: &[ChatTurn]) -> AppResult<CompletionResponse>;
}
