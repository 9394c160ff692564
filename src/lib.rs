// Docchat - retrieval-augmented chat backend over uploaded documents and websites

pub mod config;
pub mod context;
pub mod extract;
pub mod llm;
pub mod models;
pub mod routes;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
