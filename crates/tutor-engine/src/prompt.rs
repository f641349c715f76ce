//! Prompt composition
//!
//! Turns a normalized tutor query into the text sent to the completion
//! provider. Composition is a pure function of its input and the static
//! subject and query-type catalogs.

use tutor_core::{QueryType, Result, Subject};

/// Normalized, validated input to the composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInput {
    /// Topic the student selected, if any
    pub topic: Option<String>,
    /// Subject after normalization
    pub subject: Subject,
    /// Raw query-type key, if any
    pub query_type: Option<String>,
    /// Free-text question, already trimmed
    pub custom_question: String,
}

/// Compose the prompt for a query.
///
/// Selection order:
/// 1. topic + query type + custom question: template followed by the question
/// 2. topic + query type: template alone
/// 3. otherwise: the `custom` template over the question
///
/// An unrecognized query type is rejected regardless of which branch
/// would have been taken.
pub fn compose(input: &PromptInput) -> Result<String> {
    let query_type = input
        .query_type
        .as_deref()
        .map(str::parse::<QueryType>)
        .transpose()?;

    let question = input.custom_question.as_str();

    let prompt = match (query_type, input.topic.as_deref()) {
        (Some(query_type), Some(topic)) if !question.is_empty() => format!(
            "{}\n\nAlso consider this specific question: '{question}'",
            render_template(query_type, topic, input.subject)
        ),
        (Some(query_type), Some(topic)) => render_template(query_type, topic, input.subject),
        _ => render_template(QueryType::Custom, question, input.subject),
    };

    Ok(prompt)
}

/// Render a single catalog template.
///
/// For [`QueryType::Custom`] the `topic` argument is the student's question.
pub fn render_template(query_type: QueryType, topic: &str, subject: Subject) -> String {
    let subject = subject.phrase();

    match query_type {
        QueryType::Explanation => format!(
            "Provide a detailed explanation of '{topic}' in the context of {subject}.\n\
             Include:\n\
             - Clear definitions\n\
             - Key concepts\n\
             - Real-world applications\n\
             - Common misconceptions\n\
             Use analogies and examples to make the explanation more relatable."
        ),
        QueryType::StudyNotes => format!(
            "Create comprehensive study notes for '{topic}' in {subject}.\n\
             Include:\n\
             - Main concepts and definitions\n\
             - Key points in bullet form\n\
             - Important relationships and connections\n\
             - Summary diagrams or flowcharts (described in text)\n\
             - Review questions"
        ),
        QueryType::Quiz => format!(
            "Generate an engaging 5-question multiple-choice quiz about '{topic}' in {subject}.\n\
             For each question:\n\
             - Make it challenging but fair\n\
             - Provide 4 options (A, B, C, D)\n\
             - Include one correct answer\n\
             - Explain why each answer is correct or incorrect\n\
             Format: Number each question and mark correct answers with **Correct Answer: X**"
        ),
        QueryType::Examples => format!(
            "Provide practical examples and exercises related to '{topic}' in {subject}.\n\
             Include:\n\
             - 3-4 detailed examples with explanations\n\
             - Practice problems with solutions\n\
             - Real-world applications\n\
             - Tips for understanding similar problems"
        ),
        QueryType::HandsOn => format!(
            "Create an interactive exercise about '{topic}' in {subject}.\n\
             Include:\n\
             - Step-by-step instructions\n\
             - Materials or tools needed\n\
             - Expected outcomes\n\
             - Common mistakes to avoid\n\
             - Tips for success"
        ),
        QueryType::LearningPath => format!(
            "Design a structured learning path for mastering '{topic}' in {subject}.\n\
             Include:\n\
             - Prerequisites\n\
             - Learning objectives\n\
             - Step-by-step progression\n\
             - Recommended resources\n\
             - Milestones and checkpoints\n\
             - Estimated time commitments"
        ),
        QueryType::Visualization => format!(
            "Create a detailed text description of visual aids to understand '{topic}' in {subject}.\n\
             Include:\n\
             - Diagrams (described in text)\n\
             - Charts or graphs (described in text)\n\
             - Visual analogies\n\
             - Step-by-step visual breakdowns\n\
             - Color and spatial relationships"
        ),
        QueryType::Custom => format!(
            "Answer this specific question about {subject}:\n\
             '{topic}'\n\
             Provide:\n\
             - Direct answer\n\
             - Supporting explanation\n\
             - Examples if relevant\n\
             - Additional context"
        ),
    }
}

/// Wrap a composed prompt in the tutor persona sent to the provider
pub fn tutor_prompt(composed: &str, subject: Subject) -> String {
    let subject = subject.phrase();

    format!(
        "You are a knowledgeable and engaging tutor specializing in {subject}. \
         Your goal is to help students learn and understand concepts effectively.\n\
         \n\
         When teaching:\n\
         1. Use clear, concise explanations\n\
         2. Provide relevant examples\n\
         3. Break down complex topics into manageable parts\n\
         4. Encourage critical thinking\n\
         5. Adapt your teaching style to the student's needs\n\
         \n\
         Current question:\n\
         {composed}\n\
         \n\
         Please provide a helpful and informative response:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::TutorError;

    fn input(
        topic: Option<&str>,
        subject: Subject,
        query_type: Option<&str>,
        question: &str,
    ) -> PromptInput {
        PromptInput {
            topic: topic.map(String::from),
            subject,
            query_type: query_type.map(String::from),
            custom_question: question.to_string(),
        }
    }

    #[test]
    fn test_quiz_prompt() {
        let prompt = compose(&input(
            Some("photosynthesis"),
            Subject::Science,
            Some("quiz"),
            "",
        ))
        .unwrap();

        assert!(prompt.contains("5-question multiple-choice quiz"));
        assert!(prompt.contains("'photosynthesis'"));
        assert!(prompt.contains("science and scientific concepts"));
        assert!(!prompt.contains("Also consider"));
    }

    #[test]
    fn test_custom_question_only() {
        let prompt = compose(&input(None, Subject::Other, None, "What is entropy?")).unwrap();

        assert!(prompt.starts_with("Answer this specific question about general knowledge:"));
        assert!(prompt.contains("'What is entropy?'"));
    }

    #[test]
    fn test_template_with_custom_question_appends_clause() {
        let prompt = compose(&input(
            Some("derivatives"),
            Subject::Mathematics,
            Some("explanation"),
            "Why is the chain rule true?",
        ))
        .unwrap();

        let template = render_template(QueryType::Explanation, "derivatives", Subject::Mathematics);
        assert_eq!(
            prompt,
            format!("{template}\n\nAlso consider this specific question: 'Why is the chain rule true?'")
        );
    }

    #[test]
    fn test_query_type_without_topic_uses_custom_template() {
        let prompt = compose(&input(None, Subject::History, Some("quiz"), "Who was Caesar?")).unwrap();

        assert!(prompt.starts_with("Answer this specific question about history and historical events:"));
        assert!(!prompt.contains("multiple-choice"));
    }

    #[test]
    fn test_unknown_query_type_rejected() {
        let err = compose(&input(Some("rust"), Subject::Technology, Some("poem"), "")).unwrap_err();
        match err {
            TutorError::InvalidInput(msg) => {
                assert!(msg.contains("Available types"));
                assert!(msg.contains("study_notes"));
                assert!(msg.contains("visualization"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_every_subject_phrase_is_embedded() {
        for subject in Subject::ALL {
            for query_type in QueryType::ALL {
                let prompt = render_template(query_type, "topic", subject);
                assert!(
                    prompt.contains(subject.phrase()),
                    "{query_type} prompt lacks phrase for {subject}"
                );
            }
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let request = input(Some("graphs"), Subject::Mathematics, Some("learning_path"), "");
        assert_eq!(compose(&request).unwrap(), compose(&request).unwrap());
    }

    #[test]
    fn test_tutor_prompt_wraps_composed_text() {
        let wrapped = tutor_prompt("Explain recursion", Subject::Technology);

        assert!(wrapped.starts_with(
            "You are a knowledgeable and engaging tutor specializing in technology and computer science."
        ));
        assert!(wrapped.contains("Current question:\nExplain recursion\n"));
        assert!(wrapped.ends_with("Please provide a helpful and informative response:"));
    }
}
