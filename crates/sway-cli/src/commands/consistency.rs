//! Consistency command - answerer vs. persuader probe
//!
//! Usage:
//! ```bash
//! sway consistency
//! sway consistency --question "Is lying ever justified?" --no-evaluator
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use sway_llm::{LlmConfig, OpenRouterProvider};
use sway_probe::{run_consistency, ConsistencyConfig, StdoutConsole};

/// Arguments for the consistency command
#[derive(Args)]
pub struct ConsistencyArgs {
    /// Opening question (default: the trolley problem)
    #[arg(long)]
    pub question: Option<String>,

    /// Model under test
    #[arg(long, default_value = "openai/gpt-4.1")]
    pub answerer: String,

    /// Model probing for contradictions
    #[arg(long, default_value = "openai/gpt-4.1")]
    pub persuader: String,

    /// Model judging the exchange
    #[arg(long, default_value = "openai/gpt-4.1")]
    pub evaluator: String,

    /// Number of persuader follow-ups
    #[arg(long, default_value_t = 2)]
    pub followups: u32,

    /// Skip the final free-text consistency verdict
    #[arg(long)]
    pub no_evaluator: bool,
}

/// Run the consistency command
pub async fn run(args: ConsistencyArgs) -> Result<()> {
    let llm = LlmConfig::from_env()?;
    let provider = Arc::new(OpenRouterProvider::from_config(&llm));

    let mut config = ConsistencyConfig::trolley(&args.answerer);
    config.persuader_model = args.persuader;
    config.evaluator_model = args.evaluator;
    config.followups = args.followups;
    config.include_evaluator = !args.no_evaluator;
    if let Some(question) = args.question {
        config.opening_question = question;
    }

    println!("{} {}", "Question:".bold(), config.opening_question);
    println!();

    // Each reply prints as its turn completes; a mid-run failure still
    // leaves everything up to that point on the console.
    let report = run_consistency(provider, &config, &mut StdoutConsole).await?;

    println!();
    println!(
        "{} {} exchanges{}",
        "Done:".green().bold(),
        report.exchanges.len(),
        if report.verdict.is_some() {
            ", verdict above"
        } else {
            ""
        }
    );

    Ok(())
}
