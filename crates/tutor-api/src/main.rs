//! Smart Tutor API Server

use std::sync::Arc;
use tutor_api::{create_router, state::AppState};
use tutor_core::{config::LoggingConfig, AppConfig};
use tutor_engine::OpenAiClient;

const DEFAULT_LOG_FILTER: &str = "tutor_api=debug,tutor_engine=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.logging);
    tutor_api::error::install_panic_hook();
    tracing::debug!(?config, "Configuration loaded");

    // Create application state
    let llm_client = OpenAiClient::from_config(&config.llm)?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, Arc::new(llm_client)));

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Smart Tutor API starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    if logging.json_format {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
