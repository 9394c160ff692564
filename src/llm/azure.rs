// Azure OpenAI adapter
// Calls a deployed chat model through the deployments REST surface:
// {endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::CompletionConfig;
use crate::llm::provider::{CompletionAdapter, CompletionResponse, TokenUsage};
use crate::types::{AppError, AppResult, ChatTurn};

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

pub struct AzureOpenAiAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
}

#[derive(Serialize)]
struct AzureChatRequest<'a> {
    messages: &'a [ChatTurn],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct AzureChatResponse {
    choices: Vec<AzureChoice>,
    #[serde(default)]
    usage: Option<AzureUsage>,
}

#[derive(Deserialize)]
struct AzureChoice {
    message: AzureResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct AzureResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct AzureUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct AzureErrorResponse {
    error: AzureErrorBody,
}

#[derive(Deserialize)]
struct AzureErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl AzureOpenAiAdapter {
    pub fn new(config: &CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

#[async_trait]
impl CompletionAdapter for AzureOpenAiAdapter {
    async fn create_chat_completion(&self, messages: &[ChatTurn]) -> AppResult<CompletionResponse> {
        if self.endpoint.is_empty() || self.api_key.is_empty() || self.deployment.is_empty() {
            return Err(AppError::Configuration(
                "Azure OpenAI settings are not configured properly. Please check your .env file."
                    .to_string(),
            ));
        }

        let body = AzureChatRequest {
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(messages = messages.len(), "Sending completion request");
        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::CompletionApi(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(error_response) = serde_json::from_str::<AzureErrorResponse>(&error_text) {
                return Err(AppError::CompletionApi(format!(
                    "completion endpoint returned {} ({}): {}",
                    status,
                    error_response.error.code.unwrap_or_default(),
                    error_response.error.message
                )));
            }
            return Err(AppError::CompletionApi(format!(
                "completion endpoint returned {}: {}",
                status, error_text
            )));
        }

        let parsed: AzureChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::CompletionApi(format!("invalid response body: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::CompletionApi("response contained no choices".to_string()))?;

        let usage = parsed
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        info!(
            total_tokens = usage.total_tokens,
            "Completion response received"
        );

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".to_string()),
            usage,
        })
    }
}
