//! `pillarwise assess`: the interactive readiness interview.
//!
//! Answers are typed on stdin and end with an empty line. `:restart` starts
//! over with a new idea and `:quit` leaves without a report.

use pillarwise_assessment::export::write_csv;
use pillarwise_assessment::{AssessmentSession, Interviewer, ReportGenerator, Reply};
use pillarwise_config::AppConfig;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use super::{load_config, require_api_key};

/// One unit of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Answer(String),
    Restart,
    Quit,
}

/// How an interview ended.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Completed,
    Quit,
}

pub async fn run(
    idea: Option<String>,
    export: Option<Option<PathBuf>>,
    no_report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    require_api_key(&config)?;

    let provider = pillarwise_providers::build_from_config(&config);
    let interviewer = Interviewer::from_config(provider.clone(), &config);

    println!();
    println!("  Pillarwise: Startup Readiness Interview");
    println!("  =======================================");
    println!();
    println!("  Provider:  {}", config.provider);
    println!("  Model:     {}", config.model);
    println!();
    println!("  Finish each answer with an empty line.");
    println!("  Type ':restart' to start over or ':quit' to leave.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = AssessmentSession::new();

    if interview(&interviewer, &mut session, &mut lines, idea).await? == Outcome::Quit {
        println!("\n  Goodbye!\n");
        return Ok(());
    }

    if let Some(path) = export {
        let path = export_path(path, &config);
        write_csv(&path, session.answers())?;
        println!("  Answers saved to {}", path.display());
    }

    if no_report {
        return Ok(());
    }

    eprintln!("  Scoring your answers...");
    let generator = ReportGenerator::from_config(provider, &config);
    let report = generator.run(session.idea(), session.answers()).await?;

    println!();
    println!("{}", report.text());
    println!();
    println!("  Tokens used: {}", report.usage.total_tokens);

    Ok(())
}

fn export_path(requested: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    requested.unwrap_or_else(|| config.export.path.clone())
}

/// Walk `session` through every pillar, reading answers from `lines`.
async fn interview<R>(
    interviewer: &Interviewer,
    session: &mut AssessmentSession,
    lines: &mut Lines<R>,
    idea: Option<String>,
) -> Result<Outcome, Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
{
    let idea = match idea {
        Some(idea) if !idea.trim().is_empty() => idea,
        _ => match read_idea(lines).await? {
            Some(idea) => idea,
            None => return Ok(Outcome::Quit),
        },
    };

    let mut reply = interviewer.start(session, &idea).await;

    loop {
        let awaiting_retry = match &reply {
            Ok(Reply::Complete(preview)) => {
                println!("\n{preview}\n");
                return Ok(Outcome::Completed);
            }
            Ok(Reply::Question(question)) => {
                println!("\n{question}\n");
                false
            }
            Err(e) => {
                eprintln!("  [Error] {e}");
                eprintln!("  Press Enter to try again, or type ':quit'.");
                true
            }
        };

        prompt("  You > ")?;
        let input = if awaiting_retry {
            read_retry(lines).await?
        } else {
            read_answer(lines).await?
        };

        reply = match input {
            Input::Quit => return Ok(Outcome::Quit),
            Input::Restart => {
                session.restart();
                println!("\n  Starting over.");
                match read_idea(lines).await? {
                    Some(idea) => interviewer.start(session, &idea).await,
                    None => return Ok(Outcome::Quit),
                }
            }
            Input::Answer(_) if awaiting_retry => {
                interviewer.ask_current(session).await.map(Reply::Question)
            }
            Input::Answer(text) => interviewer.submit(session, &text).await,
        };
    }
}

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{text}");
    std::io::stdout().flush()
}

fn command(line: &str) -> Option<Input> {
    match line.trim() {
        ":quit" | ":q" => Some(Input::Quit),
        ":restart" => Some(Input::Restart),
        _ => None,
    }
}

/// Ask for the startup idea. `None` on end of input or `:quit`.
async fn read_idea<R>(lines: &mut Lines<R>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        prompt("  Describe your startup idea: ")?;
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        match command(&line) {
            Some(Input::Quit) => return Ok(None),
            Some(_) => continue,
            None if line.trim().is_empty() => continue,
            None => return Ok(Some(line.trim().to_string())),
        }
    }
}

/// Read one answer: every line up to the next empty line.
///
/// Leading empty lines are skipped. End of input finishes the answer in
/// progress, or quits when nothing was typed.
async fn read_answer<R>(lines: &mut Lines<R>) -> std::io::Result<Input>
where
    R: AsyncBufRead + Unpin,
{
    let mut collected: Vec<String> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        if collected.is_empty() {
            if let Some(cmd) = command(&line) {
                return Ok(cmd);
            }
            if line.trim().is_empty() {
                continue;
            }
        } else if line.trim().is_empty() {
            break;
        }
        collected.push(line);
    }

    if collected.is_empty() {
        Ok(Input::Quit)
    } else {
        Ok(Input::Answer(collected.join("\n")))
    }
}

/// Wait for a single line after a failed request.
async fn read_retry<R>(lines: &mut Lines<R>) -> std::io::Result<Input>
where
    R: AsyncBufRead + Unpin,
{
    match lines.next_line().await? {
        None => Ok(Input::Quit),
        Some(line) => Ok(command(&line).unwrap_or(Input::Answer(line))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pillarwise_core::error::ProviderError;
    use pillarwise_core::message::Message;
    use pillarwise_core::provider::{Provider, ProviderRequest, ProviderResponse};
    use pillarwise_core::{PILLAR_COUNT, PILLARS};
    use std::sync::{Arc, Mutex};

    /// Answers every request with the same text; optionally fails the first N.
    struct CannedProvider {
        failures: Mutex<usize>,
        calls: Mutex<usize>,
    }

    impl CannedProvider {
        fn new() -> Self {
            Self::failing_first(0)
        }

        fn failing_first(failures: usize) -> Self {
            Self {
                failures: Mutex::new(failures),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl Provider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(
            &self,
            _request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            *self.calls.lock().unwrap() += 1;
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(ProviderError::Timeout("slow".into()));
            }
            Ok(ProviderResponse {
                message: Message::assistant("1. Tell me more?"),
                usage: None,
                model: "gpt-4".into(),
            })
        }
    }

    fn lines_of(text: &str) -> Lines<BufReader<&[u8]>> {
        BufReader::new(text.as_bytes()).lines()
    }

    fn all_answers() -> String {
        (1..=PILLAR_COUNT)
            .map(|i| format!("answer {i}\nsecond line {i}\n\n"))
            .collect()
    }

    #[tokio::test]
    async fn reads_multiline_answers_until_blank_line() {
        let mut lines = lines_of("\n\nfirst\nsecond\n\nthird\n");
        assert_eq!(
            read_answer(&mut lines).await.unwrap(),
            Input::Answer("first\nsecond".into())
        );
        assert_eq!(
            read_answer(&mut lines).await.unwrap(),
            Input::Answer("third".into())
        );
        assert_eq!(read_answer(&mut lines).await.unwrap(), Input::Quit);
    }

    #[tokio::test]
    async fn commands_only_count_at_answer_start() {
        let mut lines = lines_of("  :restart  \nnotes\n:quit\n\n");
        assert_eq!(read_answer(&mut lines).await.unwrap(), Input::Restart);
        assert_eq!(
            read_answer(&mut lines).await.unwrap(),
            Input::Answer("notes\n:quit".into())
        );
    }

    #[tokio::test]
    async fn full_interview_collects_every_pillar() {
        let provider = Arc::new(CannedProvider::new());
        let interviewer = Interviewer::new(provider.clone(), "gpt-4", 1.0);
        let mut session = AssessmentSession::new();
        let answers = all_answers();
        let mut lines = lines_of(&answers);

        let outcome = interview(&interviewer, &mut session, &mut lines, Some("Coffee cart".into()))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert!(session.is_complete());
        assert_eq!(session.answers().len(), PILLAR_COUNT);
        assert_eq!(session.answers().get(PILLARS[0]), Some("answer 1\nsecond line 1"));
        assert_eq!(provider.calls(), PILLAR_COUNT);
    }

    #[tokio::test]
    async fn idea_is_read_from_input_when_missing() {
        let provider = Arc::new(CannedProvider::new());
        let interviewer = Interviewer::new(provider, "gpt-4", 1.0);
        let mut session = AssessmentSession::new();
        let mut lines = lines_of("\n  Mobile bakery \nfirst answer\n\n:quit\n");

        let outcome = interview(&interviewer, &mut session, &mut lines, None)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(session.idea(), "Mobile bakery");
        assert_eq!(session.answers().len(), 1);
    }

    #[tokio::test]
    async fn restart_discards_answers_and_takes_new_idea() {
        let provider = Arc::new(CannedProvider::new());
        let interviewer = Interviewer::new(provider, "gpt-4", 1.0);
        let mut session = AssessmentSession::new();
        let mut lines = lines_of("old answer\n\n:restart\nFood truck\n:quit\n");

        let outcome = interview(&interviewer, &mut session, &mut lines, Some("Coffee cart".into()))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(session.idea(), "Food truck");
        assert!(session.answers().is_empty());
        assert_eq!(session.cursor(), 0);
    }

    #[tokio::test]
    async fn failed_question_can_be_retried() {
        let provider = Arc::new(CannedProvider::failing_first(1));
        let interviewer = Interviewer::new(provider.clone(), "gpt-4", 1.0);
        let mut session = AssessmentSession::new();
        let mut lines = lines_of("\nfirst answer\n\n:quit\n");

        let outcome = interview(&interviewer, &mut session, &mut lines, Some("Coffee cart".into()))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(provider.calls(), 3);
        assert_eq!(session.answers().get(PILLARS[0]), Some("first answer"));
    }

    #[test]
    fn export_defaults_to_configured_path() {
        let config = AppConfig::default();
        assert_eq!(export_path(None, &config), config.export.path);
        assert_eq!(
            export_path(Some(PathBuf::from("mine.csv")), &config),
            PathBuf::from("mine.csv")
        );
    }
}
