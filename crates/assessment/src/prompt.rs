//! Prompt templates.
//!
//! Every prompt the assessment sends is assembled here from plain data.
//! Nothing in this module performs I/O.

use pillarwise_core::{AnswerMap, PILLAR_COUNT};

use crate::chunker::entry_text;

/// System instruction for follow-up question generation.
pub const QUESTION_SYSTEM: &str = "You are a smart startup readiness coach.";

/// System instruction for per-chunk scoring.
pub const SCORING_SYSTEM: &str = "You are a brutally honest but kind startup evaluator.";

/// System instruction for the final summary.
pub const SUMMARY_SYSTEM: &str = "You are a thoughtful and clear startup coach.";

/// Separator between the pillar evaluations and the summary in a report.
pub const SUMMARY_SEPARATOR: &str = "\n\n=== Summary ===\n";

/// Ask for 3–4 new questions about `pillar`, building on earlier answers.
pub fn question_prompt(idea: &str, pillar: &str, previous: &AnswerMap) -> String {
    format!(
        "\nThe user is starting a business: \"{idea}\"\n\
         You are evaluating this pillar: \"{pillar}\"\n\
         Here are all previous answers they've given:\n\
         {previous}\n\
         Now, ask 3 to 4 smart, specific, and non-redundant questions about this pillar.\n\
         Focus only on what hasn't already been asked or answered. Build on what's already known.\n\
         Each question should be high-leverage: something that reveals practical readiness, \
         mindset clarity, or gaps to fix.\n\
         Format the output as a numbered list, with no extra explanation.\n",
        previous = previous.to_lines(),
    )
}

/// Heading shown above a generated question, e.g. `"3. Business Idea Validation"`.
pub fn format_question(index: usize, pillar: &str, questions: &str) -> String {
    format!("{}. {pillar}\n{questions}", index + 1)
}

/// Ask for a 1–5 score per pillar in `chunk`.
pub fn scoring_prompt(idea: &str, chunk: &AnswerMap) -> String {
    let mut prompt = format!(
        "\nYou are a startup advisor evaluating a business idea across {PILLAR_COUNT} key pillars.\n\
         Each pillar has a user-submitted answer.\n\
         Your job:\n\
         1. Score each pillar from 1 to 5 strictly based on the user's actual answer.\n\
         2. If the answer is vague, missing, or shows little knowledge, give a low score and explain why.\n\
         3. If the answer is strong, clear, and shows preparedness, give a higher score and justify it.\n\
         4. Do NOT guess or be optimistic. Evaluate only what's written.\n\
         Business Idea: {idea}\n\
         Answers:\n"
    );
    for (pillar, answer) in chunk.iter() {
        prompt.push_str(&entry_text(pillar, answer));
    }
    prompt
}

/// Ask for strengths, weaknesses, and next steps over all evaluations.
pub fn summary_prompt(idea: &str, evaluations: &[String]) -> String {
    format!(
        "\nYou are an expert startup advisor.\n\
         Below is a business idea followed by pillar-wise evaluations (scores and explanations).\n\
         Business Idea: {idea}\n\
         Pillar Evaluations:\n\
         {evaluations}\n\
         Now, do the following:\n\
         1. Summarize the top 3 strengths of the business based on the answers and scores.\n\
         2. Summarize the top 3 weaknesses or risks.\n\
         3. Suggest 3 practical action steps to improve the business readiness.\n\
         Do not repeat all pillar evaluations. Just summarize.\n",
        evaluations = evaluations.join("\n\n"),
    )
}

/// Join chunk evaluations and the summary into the final report text.
pub fn assemble_report(evaluations: &[String], summary: &str) -> String {
    format!(
        "{}{SUMMARY_SEPARATOR}{summary}",
        evaluations.join("\n\n")
    )
}

/// Message shown once every pillar has an answer.
pub fn completion_preview(answers: &AnswerMap) -> String {
    format!(
        "All answers collected!\n\n{}\n\nGenerate the final report to score your readiness.",
        answers.to_lines()
    )
}
