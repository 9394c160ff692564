use axum::{extract::State, response::Html, routing::get, Router};

use crate::models::AppState;

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

/// Render the chat page with title, welcome copy, and primary color taken
/// from the environment configuration.
async fn index(State(state): State<AppState>) -> Html<String> {
    let app = &state.config.app;
    let page = PAGE_TEMPLATE
        .replace("__TITLE__", &app.title)
        .replace("__WELCOME_TITLE__", &app.welcome_title)
        .replace("__WELCOME_MESSAGE__", &app.welcome_message)
        .replace("__PRIMARY_COLOR__", &app.primary_color);
    Html(page)
}

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>__TITLE__</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem; color: #1d1d1f; }
    h1 { margin-bottom: 0.5rem; color: __PRIMARY_COLOR__; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    textarea, input { width: 100%; padding: 0.5rem; }
    button { margin-top: 0.5rem; padding: 0.6rem 1rem; }
    #messages { background: #f6f8fa; padding: 1rem; min-height: 8rem; white-space: pre-wrap; }
    .muted { color: #666; font-size: 0.9rem; }
  </style>
</head>
<body>
  <h1>__WELCOME_TITLE__</h1>
  <p>__WELCOME_MESSAGE__</p>

  <div class="card">
    <h2>1) Upload documents or websites</h2>
    <input id="fileInput" type="file" multiple />
    <label class="muted">Website URLs (one per line)</label>
    <textarea id="websiteInput" rows="3" placeholder="https://example.com"></textarea>
    <button id="uploadBtn">Upload</button>
    <div id="uploadStatus" class="muted"></div>
  </div>

  <div class="card">
    <h2>2) Chat</h2>
    <div id="messages"></div>
    <input id="queryInput" placeholder="Ask a question about your documents" />
    <button id="sendBtn">Send</button>
    <button id="clearBtn">Clear messages</button>
    <button id="resetBtn">Reset session</button>
  </div>

  <script>
    let sessionId = localStorage.getItem('docchat_session') || null;
    const messages = document.getElementById('messages');
    const uploadStatus = document.getElementById('uploadStatus');

    function remember(id) {
      sessionId = id;
      localStorage.setItem('docchat_session', id);
    }

    function renderHistory(history) {
      messages.textContent = history
        .map(turn => (turn.role === 'user' ? 'You: ' : 'Assistant: ') + turn.content)
        .join('\n\n');
    }

    document.getElementById('uploadBtn').addEventListener('click', async () => {
      const formData = new FormData();
      for (const file of document.getElementById('fileInput').files) {
        formData.append('files', file);
      }
      formData.append('websites', document.getElementById('websiteInput').value);
      if (sessionId) formData.append('session_id', sessionId);
      uploadStatus.textContent = 'Uploading...';
      const res = await fetch('/api/upload', { method: 'POST', body: formData });
      const json = await res.json();
      remember(json.session_id);
      uploadStatus.textContent = json.message + '\n\n' + json.resources;
    });

    document.getElementById('sendBtn').addEventListener('click', async () => {
      const input = document.getElementById('queryInput');
      const query = input.value.trim();
      if (!query) return;
      input.value = '';
      const res = await fetch('/api/chat', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ session_id: sessionId, query })
      });
      const json = await res.json();
      remember(json.session_id);
      renderHistory(json.history);
    });

    document.getElementById('clearBtn').addEventListener('click', async () => {
      await fetch('/api/clear-messages', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ session_id: sessionId })
      });
      messages.textContent = '';
    });

    document.getElementById('resetBtn').addEventListener('click', async () => {
      await fetch('/api/reset', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ session_id: sessionId })
      });
      localStorage.removeItem('docchat_session');
      sessionId = null;
      messages.textContent = '';
      uploadStatus.textContent = '';
    });
  </script>
</body>
</html>"#;
