use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub completion: CompletionConfig,
    pub extraction: ExtractionConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Azure OpenAI style completion endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub system_prompt: String,
    /// Number of most recent history turns forwarded with each completion.
    pub history_window: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Route PDF/Word/PowerPoint through the cloud layout service instead of
    /// the local extractors.
    pub use_intelligent_processing: bool,
    pub layout_endpoint: String,
    pub layout_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub title: String,
    pub welcome_title: String,
    pub welcome_message: String,
    pub primary_color: String,
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => matches!(v.to_lowercase().as_str(), "true" | "1" | "t" | "yes" | "y"),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            completion: CompletionConfig {
                endpoint: env::var("AZURE_OPENAI_ENDPOINT").unwrap_or_default(),
                api_key: env::var("AZURE_OPENAI_API_KEY").unwrap_or_default(),
                deployment: env::var("AZURE_OPENAI_DEPLOYMENT_NAME").unwrap_or_default(),
                api_version: env::var("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|_| "2023-05-15".to_string()),
                system_prompt: env::var("SYSTEM_PROMPT").unwrap_or_else(|_| {
                    "You are a helpful assistant answering questions based on provided documents."
                        .to_string()
                }),
                history_window: env::var("HISTORY_WINDOW")
                    .unwrap_or_else(|_| "6".to_string())
                    .parse()?,
            },
            extraction: ExtractionConfig {
                use_intelligent_processing: env_flag("DOC_INTELLIGENT", false),
                layout_endpoint: env::var("AZURE_DOCUMENT_INTELLIGENCE_ENDPOINT")
                    .unwrap_or_default(),
                layout_api_key: env::var("AZURE_DOCUMENT_INTELLIGENCE_API_KEY")
                    .unwrap_or_default(),
            },
            app: AppConfig {
                title: env::var("APP_TITLE").unwrap_or_else(|_| "RAG Chatbot".to_string()),
                welcome_title: env::var("APP_WELCOME_TITLE")
                    .unwrap_or_else(|_| "Welcome to the Virtual Assistant".to_string()),
                welcome_message: env::var("APP_WELCOME_MESSAGE").unwrap_or_else(|_| {
                    "Upload PDFs, CSV files, Word documents, PowerPoint presentations, \
                     or provide website URLs to get relevant answers powered by AI"
                        .to_string()
                }),
                primary_color: env::var("APP_PRIMARY_COLOR")
                    .unwrap_or_else(|_| "#007bff".to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_flag_accepts_common_truthy_spellings() {
        for v in ["true", "1", "t", "yes", "Y"] {
            std::env::set_var("DOCCHAT_TEST_FLAG", v);
            assert!(env_flag("DOCCHAT_TEST_FLAG", false), "{v} should be truthy");
        }
        std::env::set_var("DOCCHAT_TEST_FLAG", "false");
        assert!(!env_flag("DOCCHAT_TEST_FLAG", true));
        std::env::remove_var("DOCCHAT_TEST_FLAG");
        assert!(env_flag("DOCCHAT_TEST_FLAG", true));
    }
}
