//! Website extractor: fetches a page with a browser-like user agent and emits
//! heading-scoped paragraphs followed by any orphan paragraphs.

use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

use super::{ExtractError, ExtractResult, Extraction};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Paragraphs shorter than this are dropped from the orphan pass.
const MIN_ORPHAN_PARAGRAPH_LEN: usize = 20;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
const EXCLUDED_TAGS: [&str; 5] = ["script", "style", "header", "footer", "nav"];

pub struct WebsiteExtractor {
    client: Client,
}

impl WebsiteExtractor {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    pub async fn extract(&self, url: &str) -> ExtractResult {
        let url = normalize_url(url);
        info!(%url, "Fetching website");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ExtractError::Fetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let body = response.text().await.map_err(|e| ExtractError::Fetch {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        debug!(%url, bytes = body.len(), "Website fetched");

        // `scraper::Html` is not Send; keep all DOM work on this side of the
        // await boundary.
        Ok(render_markdown(&url, &body))
    }
}

impl Default for WebsiteExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Convert fetched HTML into the markdown representation: page title, each
/// heading with its following sibling paragraphs, then paragraphs not claimed
/// by any heading under an `Additional Content` section.
fn render_markdown(url: &str, html: &str) -> Extraction {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").unwrap();
    let heading_selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    let paragraph_selector = Selector::parse("p").unwrap();

    let title = document
        .select(&title_selector)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled Page".to_string());

    let mut content = format!("# Website: {}\n\nURL: {}\n\n", title, url);
    let mut claimed = HashSet::new();

    for heading in document.select(&heading_selector) {
        if in_excluded_subtree(&heading) {
            continue;
        }
        let heading_text = element_text(&heading);
        if heading_text.is_empty() {
            continue;
        }

        let level = heading
            .value()
            .name()
            .strip_prefix('h')
            .and_then(|d| d.parse::<usize>().ok())
            .unwrap_or(2);
        content.push_str(&format!("{} {}\n\n", "#".repeat(level), heading_text));

        // Sibling paragraphs up to the next heading belong to this section.
        for sibling in heading.next_siblings() {
            let Some(element) = ElementRef::wrap(sibling) else {
                continue;
            };
            let name = element.value().name();
            if HEADING_TAGS.contains(&name) {
                break;
            }
            if name == "p" {
                claimed.insert(element.id());
                let text = element_text(&element);
                if !text.is_empty() {
                    content.push_str(&text);
                    content.push_str("\n\n");
                }
            }
        }
    }

    let mut additional = String::new();
    for paragraph in document.select(&paragraph_selector) {
        if claimed.contains(&paragraph.id()) || in_excluded_subtree(&paragraph) {
            continue;
        }
        let text = element_text(&paragraph);
        if text.len() > MIN_ORPHAN_PARAGRAPH_LEN {
            additional.push_str(&text);
            additional.push_str("\n\n");
        }
    }
    if !additional.is_empty() {
        content.push_str("## Additional Content\n\n");
        content.push_str(&additional);
    }

    let squeezed = Regex::new(r"\n{3,}")
        .unwrap()
        .replace_all(&content, "\n\n")
        .into_owned();

    Extraction::from_text(squeezed)
}

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn in_excluded_subtree(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        ElementRef::wrap(node)
            .map(|el| EXCLUDED_TAGS.contains(&el.value().name()))
            .unwrap_or(false)
    })
}
