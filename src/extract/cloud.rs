//! Cloud layout extractor: drives an Azure Document Intelligence style
//! prebuilt-layout analysis and returns the service's markdown rendition.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{ExtractError, ExtractResult, Extraction};

const ANALYZE_PATH: &str = "documentintelligence/documentModels/prebuilt-layout:analyze";
const API_VERSION: &str = "2024-11-30";
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const MAX_POLLS: usize = 60;

pub struct LayoutClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Deserialize)]
struct AnalyzeOperation {
    status: String,
    #[serde(rename = "analyzeResult")]
    analyze_result: Option<AnalyzeResult>,
}

#[derive(Deserialize)]
struct AnalyzeResult {
    content: String,
}

impl LayoutClient {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Submit document bytes for layout analysis and poll the returned
    /// operation until it completes.
    pub async fn analyze(&self, filename: &str, data: &[u8]) -> ExtractResult {
        if self.endpoint.is_empty() || self.api_key.is_empty() {
            return Err(ExtractError::LayoutService(
                "document intelligence endpoint or API key is not configured".to_string(),
            ));
        }

        let url = format!(
            "{}/{}?api-version={}&outputContentFormat=markdown",
            self.endpoint, ANALYZE_PATH, API_VERSION
        );
        info!(filename, "Submitting document to layout service");

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| ExtractError::LayoutService(format!("analyze request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::LayoutService(format!(
                "analyze request rejected ({}): {}",
                status, body
            )));
        }

        let operation_url = response
            .headers()
            .get("operation-location")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ExtractError::LayoutService("missing operation-location header".to_string())
            })?;

        let result = self.poll_operation(&operation_url).await?;
        debug!(filename, chars = result.len(), "Layout analysis complete");

        if result.trim().is_empty() {
            return Ok(Extraction::Empty);
        }
        Ok(Extraction::from_text(format!(
            "# Document: {}\n\n## Contents\n\n{}\n",
            filename, result
        )))
    }

    async fn poll_operation(&self, operation_url: &str) -> Result<String, ExtractError> {
        for attempt in 0..MAX_POLLS {
            if attempt > 0 {
                tokio::time::sleep(POLL_INTERVAL).await;
            }

            let operation: AnalyzeOperation = self
                .client
                .get(operation_url)
                .header("Ocp-Apim-Subscription-Key", &self.api_key)
                .send()
                .await
                .map_err(|e| ExtractError::LayoutService(format!("poll failed: {}", e)))?
                .json()
                .await
                .map_err(|e| {
                    ExtractError::LayoutService(format!("invalid operation response: {}", e))
                })?;

            match operation.status.as_str() {
                "succeeded" => {
                    return operation
                        .analyze_result
                        .map(|r| r.content)
                        .ok_or_else(|| {
                            ExtractError::LayoutService(
                                "operation succeeded without a result".to_string(),
                            )
                        });
                }
                "failed" => {
                    return Err(ExtractError::LayoutService(
                        "layout analysis failed".to_string(),
                    ));
                }
                _ => debug!(attempt, status = %operation.status, "Layout operation pending"),
            }
        }

        Err(ExtractError::LayoutService(
            "layout analysis timed out".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_client_fails_before_any_network_call() {
        let client = LayoutClient::new("", "");
        let err = client.analyze("doc.pdf", b"%PDF").await.unwrap_err();
        assert!(matches!(err, ExtractError::LayoutService(_)));
    }

    #[tokio::test]
    async fn analyze_follows_operation_location_until_success() {
        let mut server = mockito::Server::new_async().await;
        let operation_url = format!("{}/op/abc123", server.url());

        let submit = server
            .mock(
                "POST",
                "/documentintelligence/documentModels/prebuilt-layout:analyze",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(202)
            .with_header("operation-location", &operation_url)
            .create_async()
            .await;
        let poll = server
            .mock("GET", "/op/abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r###"{"status":"succeeded","analyzeResult":{"content":"## Parsed\n\nBody"}}"###)
            .create_async()
            .await;

        let client = LayoutClient::new(&server.url(), "test-key");
        let text = client
            .analyze("scan.pdf", b"%PDF-1.5")
            .await
            .expect("analyze")
            .into_text()
            .expect("non-empty");

        assert!(text.starts_with("# Document: scan.pdf"));
        assert!(text.contains("## Contents"));
        assert!(text.contains("## Parsed"));
        submit.assert_async().await;
        poll.assert_async().await;
    }

    #[tokio::test]
    async fn failed_operation_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let operation_url = format!("{}/op/bad", server.url());

        server
            .mock(
                "POST",
                "/documentintelligence/documentModels/prebuilt-layout:analyze",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(202)
            .with_header("operation-location", &operation_url)
            .create_async()
            .await;
        server
            .mock("GET", "/op/bad")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"failed"}"#)
            .create_async()
            .await;

        let client = LayoutClient::new(&server.url(), "test-key");
        let err = client.analyze("scan.pdf", b"%PDF-1.5").await.unwrap_err();
        assert!(matches!(err, ExtractError::LayoutService(_)));
    }
}
