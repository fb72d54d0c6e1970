//! `pillarwise report`: score a previously exported answer file.

use pillarwise_assessment::ReportGenerator;
use pillarwise_assessment::export::read_csv;
use pillarwise_core::{AnswerMap, pillar};
use std::path::Path;

use super::{load_config, require_api_key};

pub async fn run(answers_path: &Path, idea: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    require_api_key(&config)?;

    let answers = read_csv(answers_path)?;
    for name in unknown_pillars(&answers) {
        tracing::warn!(pillar = name, "Answer file has an entry for an unknown pillar");
    }

    println!(
        "  Scoring {} answers from {} with {}...",
        answers.len(),
        answers_path.display(),
        config.model
    );

    let provider = pillarwise_providers::build_from_config(&config);
    let generator = ReportGenerator::from_config(provider, &config);
    let report = generator.run(idea, &answers).await?;

    println!();
    println!("{}", report.text());
    println!();
    println!(
        "  Chunks scored: {}  Tokens used: {}",
        report.evaluations.len(),
        report.usage.total_tokens
    );

    Ok(())
}

/// Entries whose key is not one of the 19 pillars.
fn unknown_pillars(answers: &AnswerMap) -> Vec<&str> {
    answers
        .pillars()
        .filter(|name| !pillar::is_pillar(name))
        .collect()
}
