//! Drives a session and asks the LLM for each pillar's follow-up questions.

use pillarwise_config::AppConfig;
use pillarwise_core::provider::{Provider, ProviderRequest};
use pillarwise_core::{Result, StateError};
use std::sync::Arc;
use tracing::debug;

use crate::prompt;
use crate::session::{Advance, AssessmentSession};

/// What to show the user after an interview step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Questions for the pillar now awaiting an answer
    Question(String),
    /// All pillars answered; a preview of the collected answers
    Complete(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Question(text) | Reply::Complete(text) => text,
        }
    }
}

/// Asks pillar questions on behalf of a session.
pub struct Interviewer {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl Interviewer {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Self {
        Self::new(
            provider,
            &config.model,
            config.assessment.question_temperature,
        )
        .with_max_tokens(config.assessment.max_tokens)
    }

    /// Cap tokens generated per question response.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Start `session` on `idea` and return the first pillar's questions.
    pub async fn start(&self, session: &mut AssessmentSession, idea: &str) -> Result<Reply> {
        session.start(idea)?;
        self.ask_current(session).await.map(Reply::Question)
    }

    /// Record an answer, then return the next questions or the completion preview.
    pub async fn submit(&self, session: &mut AssessmentSession, answer: &str) -> Result<Reply> {
        match session.submit(answer)? {
            Advance::Next { .. } => self.ask_current(session).await.map(Reply::Question),
            Advance::Complete => Ok(Reply::Complete(prompt::completion_preview(
                session.answers(),
            ))),
        }
    }

    /// Generate the questions for the pillar the session is waiting on.
    pub async fn ask_current(&self, session: &AssessmentSession) -> Result<String> {
        let pillar = match session.current_pillar() {
            Some(pillar) => pillar,
            None if session.is_complete() => return Err(StateError::AlreadyComplete.into()),
            None => return Err(StateError::NotStarted.into()),
        };
        let index = session.cursor();

        debug!(pillar, index, "Requesting pillar questions");

        let request = ProviderRequest::instructed(
            &self.model,
            prompt::QUESTION_SYSTEM,
            prompt::question_prompt(session.idea(), pillar, session.answers()),
            self.temperature,
        )
        .with_max_tokens(self.max_tokens);

        let response = self.provider.complete(request).await?;
        Ok(prompt::format_question(
            index,
            pillar,
            &response.message.content,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingProvider, SequentialMockProvider};
    use pillarwise_core::{Error, PILLAR_COUNT, ProviderError};

    #[tokio::test]
    async fn start_returns_first_question() {
        let provider = Arc::new(SequentialMockProvider::texts(&["1. Why you?\n2. Why now?"]));
        let interviewer = Interviewer::new(provider.clone(), "gpt-4", 1.0);
        let mut session = AssessmentSession::new();

        let reply = interviewer.start(&mut session, "Coffee cart").await.unwrap();
        assert_eq!(
            reply,
            Reply::Question("1. Personal Readiness\n1. Why you?\n2. Why now?".into())
        );

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].content, prompt::QUESTION_SYSTEM);
        assert!(requests[0].messages[1].content.contains("\"Personal Readiness\""));
        assert!((requests[0].temperature - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn next_question_sees_previous_answers() {
        let provider = Arc::new(SequentialMockProvider::texts(&["q1", "q2"]));
        let interviewer = Interviewer::new(provider.clone(), "gpt-4", 1.0);
        let mut session = AssessmentSession::new();

        interviewer.start(&mut session, "Coffee cart").await.unwrap();
        let reply = interviewer
            .submit(&mut session, "Savings for a year")
            .await
            .unwrap();

        assert_eq!(reply.text(), "2. Financial Readiness\nq2");
        let second = &provider.requests()[1].messages[1].content;
        assert!(second.contains("Personal Readiness: Savings for a year"));
        assert!(second.contains("\"Financial Readiness\""));
    }

    #[tokio::test]
    async fn last_answer_returns_preview_without_calling_llm() {
        let questions: Vec<String> = (0..PILLAR_COUNT).map(|i| format!("q{i}")).collect();
        let refs: Vec<&str> = questions.iter().map(String::as_str).collect();
        let provider = Arc::new(SequentialMockProvider::texts(&refs));
        let interviewer = Interviewer::new(provider.clone(), "gpt-4", 1.0);
        let mut session = AssessmentSession::new();

        interviewer.start(&mut session, "Coffee cart").await.unwrap();
        let mut last = None;
        for i in 0..PILLAR_COUNT {
            last = Some(interviewer.submit(&mut session, &format!("a{i}")).await.unwrap());
        }

        let Some(Reply::Complete(preview)) = last else {
            panic!("expected completion preview");
        };
        assert!(preview.contains("Field Exposure / Apprenticeship: a18"));
        assert_eq!(provider.call_count(), PILLAR_COUNT);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let interviewer = Interviewer::new(
            Arc::new(FailingProvider::new(ProviderError::AuthenticationFailed(
                "bad key".into(),
            ))),
            "gpt-4",
            1.0,
        );
        let mut session = AssessmentSession::new();

        let err = interviewer.start(&mut session, "idea").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::AuthenticationFailed(_))
        ));
        // The session itself did start; the question can be asked again.
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.current_pillar(), Some("Personal Readiness"));
    }

    #[tokio::test]
    async fn asking_without_session_is_state_error() {
        let interviewer = Interviewer::new(Arc::new(SequentialMockProvider::texts(&[])), "gpt-4", 1.0);
        let err = interviewer
            .ask_current(&AssessmentSession::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::State(StateError::NotStarted)));
    }

    #[test]
    fn from_config_uses_question_settings() {
        let mut config = AppConfig::default();
        config.model = "gpt-4o".into();
        config.assessment.question_temperature = 0.9;
        config.assessment.max_tokens = Some(300);
        let interviewer =
            Interviewer::from_config(Arc::new(SequentialMockProvider::texts(&[])), &config);
        assert_eq!(interviewer.model, "gpt-4o");
        assert!((interviewer.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(interviewer.max_tokens, Some(300));
    }
}
