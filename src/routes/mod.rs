//! API Routes
//!
//! - `/` - chat page render
//! - `/api/chat` - chat submission
//! - `/api/upload` - file and website URL ingestion
//! - `/api/clear-messages` - reset history, keep context
//! - `/api/reset` - discard the whole session
//! - `/api/health` - liveness check

pub mod chat;
pub mod health;
pub mod session;
pub mod ui;
pub mod upload;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(ui::router(state.clone()))
        .merge(chat::router(state.clone()))
        .merge(upload::router(state.clone()))
        .merge(session::router(state))
        .merge(health::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
