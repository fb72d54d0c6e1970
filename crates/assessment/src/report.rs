//! Readiness report generation.
//!
//! Answers are split into token-bounded chunks, each chunk is scored with
//! one request, and a final request summarizes all the scores. Requests are
//! issued one at a time in order. Any failure aborts the whole report.

use pillarwise_config::AppConfig;
use pillarwise_core::provider::{Provider, ProviderRequest, Usage};
use pillarwise_core::{AnswerMap, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::chunker::{ChunkBudget, chunk_answers};
use crate::prompt;
use crate::token::{TokenEstimator, estimator_for_model};

/// A finished report and what it took to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Raw scoring output per chunk, in chunk order
    pub evaluations: Vec<String>,
    /// Raw summary output
    pub summary: String,
    /// Tokens reported by the provider across all requests
    pub usage: Usage,
}

impl Report {
    /// Evaluations joined by blank lines, then the summary section.
    pub fn text(&self) -> String {
        prompt::assemble_report(&self.evaluations, &self.summary)
    }
}

/// Scores a set of answers and summarizes the result.
pub struct ReportGenerator {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    budget: ChunkBudget,
    estimator: Option<Arc<dyn TokenEstimator>>,
}

impl ReportGenerator {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.3,
            max_tokens: None,
            budget: ChunkBudget::default(),
            estimator: None,
        }
    }

    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Self {
        Self::new(provider, &config.model)
            .with_temperature(config.assessment.scoring_temperature)
            .with_budget(ChunkBudget::from(&config.assessment))
            .with_max_tokens(config.assessment.max_tokens)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_budget(mut self, budget: ChunkBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Use a specific estimator instead of the one registered for the model.
    pub fn with_estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = Some(estimator);
        self
    }

    fn resolve_estimator(&self) -> Result<Arc<dyn TokenEstimator>> {
        match &self.estimator {
            Some(estimator) => Ok(estimator.clone()),
            None => Ok(Arc::new(estimator_for_model(&self.model)?)),
        }
    }

    /// Produce the report text for `answers` to `idea`.
    pub async fn generate(&self, idea: &str, answers: &AnswerMap) -> Result<String> {
        Ok(self.run(idea, answers).await?.text())
    }

    /// Produce the report with its per-chunk parts.
    pub async fn run(&self, idea: &str, answers: &AnswerMap) -> Result<Report> {
        let estimator = self.resolve_estimator()?;
        let chunks = chunk_answers(answers, idea, &self.budget, estimator.as_ref());
        info!(
            answers = answers.len(),
            chunks = chunks.len(),
            ceiling = self.budget.ceiling,
            "Scoring answers"
        );

        let mut usage = Usage::default();
        let mut evaluations = Vec::with_capacity(chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            debug!(chunk = i + 1, entries = chunk.len(), "Scoring chunk");
            let text = self
                .ask(
                    prompt::SCORING_SYSTEM,
                    prompt::scoring_prompt(idea, chunk),
                    &mut usage,
                )
                .await?;
            evaluations.push(text);
        }

        debug!("Requesting summary");
        let summary = self
            .ask(
                prompt::SUMMARY_SYSTEM,
                prompt::summary_prompt(idea, &evaluations),
                &mut usage,
            )
            .await?;

        info!(total_tokens = usage.total_tokens, "Report generated");

        Ok(Report {
            evaluations,
            summary,
            usage,
        })
    }

    async fn ask(&self, system: &str, prompt: String, usage: &mut Usage) -> Result<String> {
        let request = ProviderRequest::instructed(&self.model, system, prompt, self.temperature)
            .with_max_tokens(self.max_tokens);
        let response = self.provider.complete(request).await?;
        if let Some(u) = &response.usage {
            usage.accumulate(u);
        }
        Ok(response.message.content.trim().to_string())
    }
}
