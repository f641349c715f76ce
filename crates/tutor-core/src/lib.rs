//! Tutor Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the tutor service:
//! - Subject and query-type catalogs
//! - Common error types
//! - The completion client trait
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, LlmConfig, LoggingConfig, ServerConfig};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for tutor operations
#[derive(Error, Debug)]
pub enum TutorError {
    /// Malformed or insufficient request, or an unknown query type
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The completion call exceeded its wall-clock bound
    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),

    /// The completion provider failed or returned something unusable
    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, TutorError>;

// ============================================================================
// Subjects
// ============================================================================

/// Academic subject used to steer the tone and context of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Subject {
    #[default]
    Technology,
    Science,
    Mathematics,
    Languages,
    Arts,
    History,
    Business,
    Health,
    Other,
}

impl Subject {
    /// Every subject, in catalog order
    pub const ALL: [Subject; 9] = [
        Subject::Technology,
        Subject::Science,
        Subject::Mathematics,
        Subject::Languages,
        Subject::Arts,
        Subject::History,
        Subject::Business,
        Subject::Health,
        Subject::Other,
    ];

    /// Wire key of the subject
    pub fn key(self) -> &'static str {
        match self {
            Subject::Technology => "technology",
            Subject::Science => "science",
            Subject::Mathematics => "mathematics",
            Subject::Languages => "languages",
            Subject::Arts => "arts",
            Subject::History => "history",
            Subject::Business => "business",
            Subject::Health => "health",
            Subject::Other => "other",
        }
    }

    /// Descriptive phrase embedded in prompt text
    pub fn phrase(self) -> &'static str {
        match self {
            Subject::Technology => "technology and computer science",
            Subject::Science => "science and scientific concepts",
            Subject::Mathematics => "mathematics and mathematical concepts",
            Subject::Languages => "languages and linguistics",
            Subject::Arts => "arts and literature",
            Subject::History => "history and historical events",
            Subject::Business => "business and economics",
            Subject::Health => "health and medicine",
            Subject::Other => "general knowledge",
        }
    }

    /// Look up a subject by its exact key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Resolve a subject key, falling back to [`Subject::Other`] for
    /// anything that is not in the catalog. Never fails.
    pub fn normalize(key: &str) -> Self {
        Self::from_key(key).unwrap_or(Subject::Other)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Query Types
// ============================================================================

/// Pedagogical format requested by the student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Explanation,
    StudyNotes,
    Quiz,
    Examples,
    HandsOn,
    LearningPath,
    Visualization,
    Custom,
}

impl QueryType {
    /// Every query type, in catalog order
    pub const ALL: [QueryType; 8] = [
        QueryType::Explanation,
        QueryType::StudyNotes,
        QueryType::Quiz,
        QueryType::Examples,
        QueryType::HandsOn,
        QueryType::LearningPath,
        QueryType::Visualization,
        QueryType::Custom,
    ];

    /// Wire key of the query type
    pub fn key(self) -> &'static str {
        match self {
            QueryType::Explanation => "explanation",
            QueryType::StudyNotes => "study_notes",
            QueryType::Quiz => "quiz",
            QueryType::Examples => "examples",
            QueryType::HandsOn => "hands_on",
            QueryType::LearningPath => "learning_path",
            QueryType::Visualization => "visualization",
            QueryType::Custom => "custom",
        }
    }

    /// All recognized keys, in catalog order
    pub fn keys() -> Vec<&'static str> {
        Self::ALL.iter().map(|q| q.key()).collect()
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for QueryType {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|q| q.key() == s)
            .ok_or_else(|| {
                TutorError::InvalidInput(format!(
                    "Invalid query type. Available types: {}",
                    Self::keys().join(", ")
                ))
            })
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for text-completion clients
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for a single prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier used for completions
    fn model(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================
