//! Tutor Engine - Query orchestration
//!
//! Runs one tutor query end to end:
//! - normalizes the raw request fields
//! - validates that enough input was supplied
//! - composes the prompt from the static catalogs
//! - calls the completion provider under a fixed timeout
//!
//! Nothing is retained between queries.

use std::sync::Arc;
use std::time::Duration;
use tutor_core::{LlmClient, Result, Subject, TutorError};

pub mod llm;
pub mod prompt;

pub use llm::OpenAiClient;
pub use prompt::{compose, render_template, tutor_prompt, PromptInput};

/// Legacy placeholder clients send for "not provided"
pub const NOT_PROVIDED: &str = "(Optional)";

/// Message returned when neither a question nor a topic/query-type pair is given
pub const MISSING_INPUT_MESSAGE: &str =
    "Please provide either a custom question or select both a topic and a query type.";

/// Raw tutor query as received from a client
#[derive(Debug, Clone, Default)]
pub struct TutorQuery {
    pub topic: Option<String>,
    pub subject: Option<String>,
    pub query_type: Option<String>,
    pub custom_question: Option<String>,
}

impl TutorQuery {
    /// Normalize and validate the query into composer input.
    ///
    /// Empty values and the [`NOT_PROVIDED`] placeholder count as absent.
    /// A missing subject defaults to technology and an unknown one falls
    /// back to general knowledge.
    pub fn normalize(self) -> Result<PromptInput> {
        let topic = provided(self.topic);
        let query_type = provided(self.query_type);
        let subject = self
            .subject
            .as_deref()
            .map(|s| Subject::normalize(s.trim()))
            .unwrap_or_default();
        let custom_question = self
            .custom_question
            .map(|q| q.trim().to_string())
            .unwrap_or_default();

        if custom_question.is_empty() && (topic.is_none() || query_type.is_none()) {
            return Err(TutorError::InvalidInput(MISSING_INPUT_MESSAGE.to_string()));
        }

        Ok(PromptInput {
            topic,
            subject,
            query_type,
            custom_question,
        })
    }
}

fn provided(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != NOT_PROVIDED)
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Wall-clock bound on a single completion call
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Tutor query orchestrator
pub struct TutorEngine {
    /// LLM client
    llm_client: Arc<dyn LlmClient>,

    /// Configuration
    config: EngineConfig,
}

impl TutorEngine {
    /// Create a new engine
    pub fn new(llm_client: Arc<dyn LlmClient>, config: EngineConfig) -> Self {
        Self { llm_client, config }
    }

    /// Build the full provider prompt for a query without calling the provider
    pub fn prepare(&self, query: TutorQuery) -> Result<String> {
        let input = query.normalize()?;
        let composed = compose(&input)?;
        Ok(tutor_prompt(&composed, input.subject))
    }

    /// Answer a tutor query
    pub async fn answer(&self, query: TutorQuery) -> Result<String> {
        let prompt = self.prepare(query)?;

        tracing::info!(
            model = self.llm_client.model(),
            prompt_len = prompt.len(),
            "Calling LLM"
        );

        let answer = tokio::time::timeout(self.config.timeout, self.llm_client.generate(&prompt))
            .await
            .map_err(|_| TutorError::Timeout(self.config.timeout))??;

        tracing::info!(answer_len = answer.len(), "LLM response received");

        Ok(answer)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records prompts and replies with a fixed outcome
    struct MockLlm {
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
        delay: Duration,
        reply: std::result::Result<String, String>,
    }

    impl MockLlm {
        fn replying(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                delay: Duration::ZERO,
                reply: Ok(text.to_string()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                ..Self::replying("")
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::replying("too late")
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmClient for MockLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply.clone().map_err(TutorError::Upstream)
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    fn engine(llm: Arc<MockLlm>, timeout: Duration) -> TutorEngine {
        TutorEngine::new(llm, EngineConfig { timeout })
    }

    fn query(
        topic: Option<&str>,
        subject: Option<&str>,
        query_type: Option<&str>,
        question: Option<&str>,
    ) -> TutorQuery {
        TutorQuery {
            topic: topic.map(String::from),
            subject: subject.map(String::from),
            query_type: query_type.map(String::from),
            custom_question: question.map(String::from),
        }
    }

    #[test]
    fn test_normalize_placeholder_is_absent() {
        let input = query(
            Some(NOT_PROVIDED),
            Some("science"),
            Some(NOT_PROVIDED),
            Some("  Why?  "),
        )
        .normalize()
        .unwrap();

        assert_eq!(input.topic, None);
        assert_eq!(input.query_type, None);
        assert_eq!(input.subject, Subject::Science);
        assert_eq!(input.custom_question, "Why?");
    }

    #[test]
    fn test_normalize_subject_defaults() {
        let missing = query(None, None, None, Some("q")).normalize().unwrap();
        assert_eq!(missing.subject, Subject::Technology);

        let unknown = query(None, Some("astrology"), None, Some("q"))
            .normalize()
            .unwrap();
        assert_eq!(unknown.subject, Subject::Other);
    }

    #[test]
    fn test_normalize_rejects_insufficient_input() {
        let cases = [
            query(None, None, None, None),
            query(Some("cells"), None, None, Some("   ")),
            query(None, None, Some("quiz"), None),
            query(Some(NOT_PROVIDED), None, Some("quiz"), Some("")),
        ];

        for case in cases {
            match case.normalize() {
                Err(TutorError::InvalidInput(msg)) => assert_eq!(msg, MISSING_INPUT_MESSAGE),
                other => panic!("expected invalid input, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_answer_success() {
        let llm = Arc::new(MockLlm::replying("Photosynthesis converts light..."));
        let engine = engine(llm.clone(), Duration::from_secs(5));

        let answer = engine
            .answer(query(Some("photosynthesis"), Some("science"), Some("quiz"), None))
            .await
            .unwrap();

        assert_eq!(answer, "Photosynthesis converts light...");
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);

        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("tutor specializing in science and scientific concepts"));
        assert!(prompt.contains("5-question multiple-choice quiz about 'photosynthesis'"));
    }

    #[tokio::test]
    async fn test_invalid_input_never_calls_llm() {
        let llm = Arc::new(MockLlm::replying("unused"));
        let engine = engine(llm.clone(), Duration::from_secs(5));

        let missing = engine.answer(query(Some("cells"), None, None, None)).await;
        assert!(matches!(missing, Err(TutorError::InvalidInput(_))));

        let unknown = engine
            .answer(query(Some("cells"), None, Some("poem"), None))
            .await;
        assert!(matches!(unknown, Err(TutorError::InvalidInput(_))));

        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_answer_timeout() {
        let llm = Arc::new(MockLlm::slow(Duration::from_millis(500)));
        let engine = engine(llm, Duration::from_millis(20));

        let result = engine
            .answer(query(None, None, None, Some("What is entropy?")))
            .await;
        assert!(matches!(result, Err(TutorError::Timeout(d)) if d == Duration::from_millis(20)));
    }

    #[tokio::test]
    async fn test_answer_upstream_failure_is_not_retried() {
        let llm = Arc::new(MockLlm::failing("Incorrect API key provided"));
        let engine = engine(llm.clone(), Duration::from_secs(5));

        let result = engine
            .answer(query(None, None, None, Some("What is entropy?")))
            .await;
        assert!(matches!(result, Err(TutorError::Upstream(ref m)) if m.contains("Incorrect API key")));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_prepare_is_deterministic() {
        let engine = engine(Arc::new(MockLlm::replying("")), Duration::from_secs(1));
        let make = || {
            query(
                Some("vectors"),
                Some("mathematics"),
                Some("visualization"),
                Some("and matrices?"),
            )
        };

        assert_eq!(engine.prepare(make()).unwrap(), engine.prepare(make()).unwrap());
    }
}
