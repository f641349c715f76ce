//! Tutor Configuration Management
//!
//! Configuration is read once from environment variables at startup and
//! is immutable afterwards. Every value except the OpenAI API key has a
//! default suited to local development.

use std::fmt;

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// `from_env` is this function over the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Server
        if let Some(host) = lookup("API_HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            config.server.port = parse_value("API_PORT", port)?;
        }
        if let Some(environment) = lookup("ENVIRONMENT") {
            config.server.environment = environment;
        }

        // CORS origins (comma-separated)
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            config.server.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // LLM
        config.llm.openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("OPENAI_API_KEY".to_string()))?;

        if let Some(url) = lookup("OPENAI_BASE_URL") {
            config.llm.openai_base_url = Some(url);
        }
        if let Some(model) = lookup("DEFAULT_MODEL") {
            config.llm.model = model;
        }
        if let Some(temperature) = lookup("MODEL_TEMPERATURE") {
            let value: f32 = parse_value("MODEL_TEMPERATURE", temperature.clone())?;
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: "MODEL_TEMPERATURE".to_string(),
                    value: temperature,
                });
            }
            config.llm.temperature = value;
        }
        if let Some(timeout) = lookup("LLM_TIMEOUT_SECS") {
            config.llm.timeout_secs = parse_value("LLM_TIMEOUT_SECS", timeout)?;
        }

        // Logging
        if let Some(format) = lookup("LOG_FORMAT") {
            config.logging.json_format = format.eq_ignore_ascii_case("json");
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,

    /// Deployment label surfaced on the root endpoint
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            environment: "development".to_string(),
        }
    }
}

/// LLM provider configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// OpenAI API key
    pub openai_api_key: String,

    /// OpenAI API base URL (for compatible APIs)
    pub openai_base_url: Option<String>,

    /// Model name to use
    pub model: String,

    /// Temperature for generation
    pub temperature: f32,

    /// Completion timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_base_url: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

// The API key never reaches the logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// JSON format for logs
    pub json_format: bool,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(ref k) if k == "OPENAI_API_KEY"));

        let err = load(&[("OPENAI_API_KEY", "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.timeout_secs, 30);
        assert_eq!(config.server.environment, "development");
        assert_eq!(
            config.server.allowed_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert!(!config.logging.json_format);
    }

    #[test]
    fn test_env_overrides() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("DEFAULT_MODEL", "gpt-4o"),
            ("MODEL_TEMPERATURE", "0.2"),
            ("ALLOWED_ORIGINS", "https://tutor.example.com, ,https://app.example.com"),
            ("ENVIRONMENT", "production"),
            ("API_PORT", "9000"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(
            config.server.allowed_origins,
            vec!["https://tutor.example.com", "https://app.example.com"]
        );
        assert_eq!(config.server.environment, "production");
        assert_eq!(config.server.port, 9000);
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_invalid_temperature() {
        let err = load(&[("OPENAI_API_KEY", "sk-test"), ("MODEL_TEMPERATURE", "warm")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "MODEL_TEMPERATURE"));

        let err = load(&[("OPENAI_API_KEY", "sk-test"), ("MODEL_TEMPERATURE", "3.5")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = load(&[("OPENAI_API_KEY", "sk-very-secret")]).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
