//! `pillarwise plan`: show how answers would be split for scoring.
//!
//! Uses the configured model's token estimator and budget. Makes no
//! LLM requests.

use pillarwise_assessment::export::read_csv;
use pillarwise_assessment::token::encoding_for_model;
use pillarwise_assessment::{BpeEstimator, ChunkBudget, ChunkPlan, plan_chunks};
use std::fmt::Write;
use std::path::Path;

use super::load_config;

pub async fn run(answers_path: &Path, idea: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let answers = read_csv(answers_path)?;

    let encoding = encoding_for_model(&config.model)?;
    let budget = ChunkBudget::from(&config.assessment);
    let estimator = BpeEstimator::new(encoding)?;
    let plan = plan_chunks(&answers, idea, &budget, &estimator);

    println!();
    println!("  Model:     {} ({})", config.model, encoding.name());
    println!("  Ceiling:   {} tokens", budget.ceiling);
    println!("  Overhead:  {} tokens", budget.overhead);
    println!("  Answers:   {}", answers.len());
    println!();
    print!("{}", render_plan(&plan, &budget));
    println!();
    println!(
        "  {} scoring request(s) + 1 summary request",
        plan.chunks.len()
    );

    Ok(())
}

/// One block per chunk: its cost, then the pillars it holds.
fn render_plan(plan: &ChunkPlan, budget: &ChunkBudget) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Base cost per chunk: {}", plan.base_cost);

    for (i, chunk) in plan.chunks.iter().enumerate() {
        let marker = if chunk.is_overflow(budget) {
            "  (over ceiling: single oversized answer)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  Chunk {}: {} answer(s), ~{} tokens{marker}",
            i + 1,
            chunk.answers.len(),
            chunk.cost
        );
        for pillar in chunk.answers.pillars() {
            let _ = writeln!(out, "    - {pillar}");
        }
    }
    out
}
