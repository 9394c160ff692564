use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::{routing::post, Json, Router};
use tracing::{info, warn};

use crate::context;
use crate::extract::Extraction;
use crate::models::{AppState, UploadResponse};

const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Ingest uploaded files and website URLs: extract each into markdown,
/// accumulate the session context, and report a formatted resource summary.
///
/// Per-item failures are reported inline in the status message; they never
/// fail the request as a whole.
async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Json<UploadResponse> {
    let mut session_id_field: Option<String> = None;
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut websites: Vec<String> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Malformed multipart body");
                break;
            }
        };

        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("files") | Some("file") => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "Unnamed Document".to_string());
                match field.bytes().await {
                    Ok(bytes) => files.push((filename, bytes.to_vec())),
                    Err(e) => warn!(filename, error = %e, "Failed to read uploaded file"),
                }
            }
            Some("websites") | Some("urls") => {
                if let Ok(text) = field.text().await {
                    websites.extend(
                        text.lines()
                            .map(str::trim)
                            .filter(|line| !line.is_empty())
                            .map(str::to_string),
                    );
                }
            }
            Some("session_id") => {
                if let Ok(text) = field.text().await {
                    session_id_field = Some(text);
                }
            }
            _ => {}
        }
    }

    let session_id = state.sessions.resolve_id(session_id_field);
    info!(
        session_id,
        files = files.len(),
        websites = websites.len(),
        "Processing upload request"
    );

    let mut new_context = String::new();
    let mut processed_files = Vec::new();
    let mut processed_websites = Vec::new();
    let mut failures = Vec::new();

    for (filename, data) in &files {
        match state.extractors.extract_file(filename, data).await {
            Ok(Extraction::Text(text)) => {
                context::append_document(&mut new_context, filename, &text);
                processed_files.push(filename.clone());
            }
            Ok(Extraction::Empty) => {
                failures.push(format!("{} (no content extracted)", filename));
            }
            Err(e) => {
                warn!(filename, error = %e, "File extraction failed");
                failures.push(format!("{} (Error: {})", filename, e));
            }
        }
    }

    for url in &websites {
        match state.extractors.extract_website(url).await {
            Ok(Extraction::Text(text)) => {
                context::append_document(&mut new_context, url, &text);
                processed_websites.push(url.clone());
            }
            Ok(Extraction::Empty) => {
                failures.push(format!("{} (no content extracted)", url));
            }
            Err(e) => {
                warn!(url, error = %e, "Website extraction failed");
                failures.push(format!("{} (Error: {})", url, e));
            }
        }
    }

    state
        .sessions
        .append_resources(
            &session_id,
            &new_context,
            processed_files,
            processed_websites,
        )
        .await;

    let session = state.sessions.snapshot(&session_id).await;
    let mut message = format!(
        "Processed {} files and {} websites",
        files.len(),
        websites.len()
    );
    if !failures.is_empty() {
        message.push_str(&format!(". Skipped: {}", failures.join(", ")));
    }

    Json(UploadResponse {
        session_id,
        status: "success".to_string(),
        message,
        resources: context::format_resources_message(&session.files, &session.websites),
    })
}
