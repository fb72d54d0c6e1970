//! Greedy token-bounded chunking of pillar answers.
//!
//! Scoring prompts embed the idea plus a batch of `pillar: answer` lines.
//! The chunker packs answers in order into batches whose estimated prompt
//! cost stays at or under the ceiling. It makes a single pass and never
//! backtracks or splits an answer.

use pillarwise_config::AssessmentConfig;
use pillarwise_core::AnswerMap;
use tracing::debug;

use crate::token::TokenEstimator;

/// Size limits for one scoring prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBudget {
    /// Max estimated tokens per chunk prompt
    pub ceiling: usize,
    /// Tokens reserved for the fixed instruction text around the answers
    pub overhead: usize,
}

impl Default for ChunkBudget {
    fn default() -> Self {
        Self {
            ceiling: 7000,
            overhead: 200,
        }
    }
}

impl From<&AssessmentConfig> for ChunkBudget {
    fn from(config: &AssessmentConfig) -> Self {
        Self {
            ceiling: config.ceiling,
            overhead: config.overhead,
        }
    }
}

/// One emitted chunk and its estimated prompt cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChunk {
    pub answers: AnswerMap,
    /// `estimate(context) + overhead + sum(entry costs)`
    pub cost: usize,
}

impl PlannedChunk {
    /// True when a lone answer is too large to fit under the ceiling.
    pub fn is_overflow(&self, budget: &ChunkBudget) -> bool {
        self.cost > budget.ceiling
    }
}

/// The full partition of an answer map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkPlan {
    /// Cost every chunk starts from
    pub base_cost: usize,
    pub chunks: Vec<PlannedChunk>,
}

impl ChunkPlan {
    /// Drop the costs and keep only the answer batches.
    pub fn into_answer_maps(self) -> Vec<AnswerMap> {
        self.chunks.into_iter().map(|c| c.answers).collect()
    }
}

/// The text an answer contributes to a scoring prompt.
pub fn entry_text(pillar: &str, answer: &str) -> String {
    format!("\n{pillar}: {answer}")
}

/// Partition `answers` and report the cost of each chunk.
pub fn plan_chunks(
    answers: &AnswerMap,
    context: &str,
    budget: &ChunkBudget,
    estimator: &dyn TokenEstimator,
) -> ChunkPlan {
    let base_cost = estimator.estimate(context) + budget.overhead;
    let mut chunks = Vec::new();
    let mut current = AnswerMap::new();
    let mut used = base_cost;

    for (pillar, answer) in answers.iter() {
        let entry_cost = estimator.estimate(&entry_text(pillar, answer));

        if used + entry_cost > budget.ceiling && !current.is_empty() {
            debug!(
                entries = current.len(),
                cost = used,
                next = pillar,
                "Chunk full, starting a new one"
            );
            chunks.push(PlannedChunk {
                answers: std::mem::take(&mut current),
                cost: used,
            });
            used = base_cost;
        }

        current.insert(pillar, answer);
        used += entry_cost;
    }

    if !current.is_empty() {
        chunks.push(PlannedChunk {
            answers: current,
            cost: used,
        });
    }

    ChunkPlan { base_cost, chunks }
}

/// Partition `answers` into order-preserving batches under the ceiling.
pub fn chunk_answers(
    answers: &AnswerMap,
    context: &str,
    budget: &ChunkBudget,
    estimator: &dyn TokenEstimator,
) -> Vec<AnswerMap> {
    plan_chunks(answers, context, budget, estimator).into_answer_maps()
}
