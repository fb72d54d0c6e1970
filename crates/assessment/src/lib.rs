//! The readiness assessment: interview, chunking, and scoring.
//!
//! An assessment runs in two phases:
//!
//! 1. **Interview**: the `Interviewer` walks an `AssessmentSession` through
//!    the 19 pillars, asking the LLM for follow-up questions on each one and
//!    recording one consolidated answer per pillar.
//! 2. **Report**: the `ReportGenerator` packs the answers into token-bounded
//!    chunks, scores each chunk, and summarizes the scores.
//!
//! Every LLM call is made sequentially and awaited before the next is built.

pub mod chunker;
pub mod export;
pub mod interviewer;
pub mod prompt;
pub mod report;
pub mod session;
pub mod token;

#[cfg(test)]
mod test_helpers;

pub use chunker::{ChunkBudget, ChunkPlan, PlannedChunk, chunk_answers, plan_chunks};
pub use interviewer::{Interviewer, Reply};
pub use report::{Report, ReportGenerator};
pub use session::{Advance, AssessmentSession, SessionState};
pub use token::{BpeEstimator, Encoding, TokenEstimator, estimator_for_model};
