use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docchat::extract::ExtractorSet;
use docchat::llm::azure::AzureOpenAiAdapter;
use docchat::session::SessionStore;
use docchat::{config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docchat=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    let state = AppState {
        sessions: SessionStore::new(),
        extractors: Arc::new(ExtractorSet::new(&config.extraction)),
        completion: Arc::new(AzureOpenAiAdapter::new(&config.completion)),
        config: config.clone(),
    };

    let app = docchat::create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
