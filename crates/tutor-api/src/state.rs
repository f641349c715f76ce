//! Application state management

use std::sync::Arc;
use std::time::Duration;
use tutor_core::{AppConfig, LlmClient};
use tutor_engine::{EngineConfig, TutorEngine};

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Query orchestrator
    pub engine: TutorEngine,
}

impl AppState {
    /// Create new application state with config and a completion client
    pub fn new(config: AppConfig, llm_client: Arc<dyn LlmClient>) -> Self {
        let engine = TutorEngine::new(
            llm_client,
            EngineConfig {
                timeout: Duration::from_secs(config.llm.timeout_secs),
            },
        );

        Self { config, engine }
    }

    /// Create state with an explicit engine
    pub fn with_engine(config: AppConfig, engine: TutorEngine) -> Self {
        Self { config, engine }
    }
}
