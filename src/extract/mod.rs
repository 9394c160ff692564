//! Multi-format document-to-markdown extraction.
//!
//! Each extractor turns one input format into a markdown representation
//! suitable for prompt injection. Extraction returns a tagged outcome:
//! readable-but-contentless inputs are `Extraction::Empty`, real failures are
//! `ExtractError`. Callers decide how to present either to the user.

pub mod cloud;
pub mod csv;
pub mod markdown;
pub mod pdf;
pub mod powerpoint;
pub mod website;
pub mod word;

use tracing::info;

use crate::config::ExtractionConfig;

/// Outcome of a successful extraction pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Markdown text derived from the input.
    Text(String),
    /// The input was readable but produced no usable text.
    Empty,
}

impl Extraction {
    /// Wrap trimmed text, mapping whitespace-only output to `Empty`.
    pub fn from_text(text: String) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Extraction::Empty
        } else if trimmed.len() == text.len() {
            Extraction::Text(text)
        } else {
            Extraction::Text(trimmed.to_string())
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Extraction::Text(text) => Some(text),
            Extraction::Empty => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse {name}: {reason}")]
    Parse { name: String, reason: String },

    #[error("Website request failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Layout service error: {0}")]
    LayoutService(String),
}

impl ExtractError {
    pub fn parse(name: impl Into<String>, reason: impl ToString) -> Self {
        ExtractError::Parse {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type ExtractResult = Result<Extraction, ExtractError>;

/// Supported upload formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Csv,
    Word,
    PowerPoint,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "csv" => Some(DocumentFormat::Csv),
            "docx" | "doc" => Some(DocumentFormat::Word),
            "pptx" | "ppt" => Some(DocumentFormat::PowerPoint),
            _ => None,
        }
    }

    /// Formats the cloud layout service can analyze.
    fn cloud_capable(self) -> bool {
        matches!(
            self,
            DocumentFormat::Pdf | DocumentFormat::Word | DocumentFormat::PowerPoint
        )
    }
}

/// Dispatch table over the format extractors.
///
/// A single configuration flag routes PDF/Word/PowerPoint through the cloud
/// layout service instead of the local extractors; CSV and website extraction
/// have only one implementation.
pub struct ExtractorSet {
    use_intelligent_processing: bool,
    cloud: cloud::LayoutClient,
    website: website::WebsiteExtractor,
}

impl ExtractorSet {
    pub fn new(config: &ExtractionConfig) -> Self {
        info!(
            intelligent = config.use_intelligent_processing,
            "Initializing document extractors"
        );
        Self {
            use_intelligent_processing: config.use_intelligent_processing,
            cloud: cloud::LayoutClient::new(&config.layout_endpoint, &config.layout_api_key),
            website: website::WebsiteExtractor::new(),
        }
    }

    /// Extract markdown from an uploaded file, dispatching on its extension.
    pub async fn extract_file(&self, filename: &str, data: &[u8]) -> ExtractResult {
        let format = DocumentFormat::from_filename(filename)
            .ok_or_else(|| ExtractError::UnsupportedFormat(filename.to_string()))?;

        if self.use_intelligent_processing && format.cloud_capable() {
            return self.cloud.analyze(filename, data).await;
        }

        match format {
            DocumentFormat::Pdf => pdf::extract(filename, data),
            DocumentFormat::Csv => csv::extract(filename, data),
            DocumentFormat::Word => word::extract(filename, data),
            DocumentFormat::PowerPoint => powerpoint::extract(filename, data),
        }
    }

    /// Fetch a website and extract its readable content as markdown.
    pub async fn extract_website(&self, url: &str) -> ExtractResult {
        self.website.extract(url).await
    }
}
