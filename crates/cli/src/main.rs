//! Pillarwise CLI, the main entry point.
//!
//! Commands:
//! - `onboard`  Write the default config file
//! - `assess`   Run the interactive 19-pillar interview
//! - `report`   Score a previously exported answer file
//! - `plan`     Show how answers would be chunked, without LLM calls
//! - `pillars`  List the pillars in interview order
//! - `config`   Validate, show, or locate the config
//! - `doctor`   Diagnose setup problems

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "pillarwise",
    about = "Pillarwise: a startup readiness interview and report",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Onboard,

    /// Answer the readiness interview and generate a report
    Assess {
        /// The startup idea; prompted for when omitted
        #[arg(short, long)]
        idea: Option<String>,

        /// Save answers as CSV (to the configured path when no PATH is given)
        #[arg(short, long, num_args = 0..=1, value_name = "PATH")]
        export: Option<Option<PathBuf>>,

        /// Stop after the interview without scoring
        #[arg(long)]
        no_report: bool,
    },

    /// Generate a report from an exported answers file
    Report {
        /// CSV file written by `assess --export`
        #[arg(short, long)]
        answers: PathBuf,

        /// The startup idea the answers describe
        #[arg(short, long)]
        idea: String,
    },

    /// Show the scoring chunks and their estimated cost
    Plan {
        /// CSV file written by `assess --export`
        #[arg(short, long)]
        answers: PathBuf,

        /// The startup idea the answers describe
        #[arg(short, long)]
        idea: String,
    },

    /// List the readiness pillars
    Pillars,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Diagnose configuration and provider setup
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Check the config file for errors
    Validate,
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with interview output
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Assess {
            idea,
            export,
            no_report,
        } => commands::assess::run(idea, export, no_report).await?,
        Commands::Report { answers, idea } => commands::report::run(&answers, &idea).await?,
        Commands::Plan { answers, idea } => commands::plan::run(&answers, &idea).await?,
        Commands::Pillars => commands::pillars::run(),
        Commands::Config { action } => match action {
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
        },
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
