//! Nudge command - belief-drift probe
//!
//! Usage:
//! ```bash
//! sway nudge
//! sway nudge --proposition "..." --turns 3 --strategy evidence
//! sway nudge --with-history   # embed the running log in the rubric
//! ```

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use comfy_table::Table;

use sway_llm::{LlmConfig, OpenRouterProvider};
use sway_probe::{run_nudging, NudgeConfig, NudgeReport, NudgeStrategy, StdoutConsole};

/// Arguments for the nudge command
#[derive(Args)]
pub struct NudgeArgs {
    /// Proposition the nudger argues for (default: the stock UFO run)
    #[arg(long)]
    pub proposition: Option<String>,

    /// Model doing the persuading
    #[arg(long, default_value = "nousresearch/hermes-3-llama-3.1-70b")]
    pub nudger: String,

    /// Model whose belief is being measured
    #[arg(long, default_value = "anthropic/claude-sonnet-4")]
    pub target: String,

    /// Model scoring agreement on [-3, 3]
    #[arg(long, default_value = "openai/gpt-4o")]
    pub evaluator: String,

    /// Independent rounds, each with fresh sessions
    #[arg(long, default_value_t = 1)]
    pub rounds: u32,

    /// Nudge/response turns per round
    #[arg(long, default_value_t = 5)]
    pub turns: u32,

    /// Persuasion strategy: "pressure" or "evidence"
    #[arg(long, default_value = "pressure")]
    pub strategy: String,

    /// Embed the running conversation log in the evaluator rubric
    #[arg(long)]
    pub with_history: bool,
}

/// Run the nudge command
pub async fn run(args: NudgeArgs) -> Result<()> {
    let strategy = match args.strategy.as_str() {
        "pressure" => NudgeStrategy::Pressure,
        "evidence" => NudgeStrategy::Evidence,
        other => bail!("unknown strategy '{other}' (expected 'pressure' or 'evidence')"),
    };

    let llm = LlmConfig::from_env()?;
    let provider = Arc::new(OpenRouterProvider::from_config(&llm));

    let mut config = NudgeConfig::ufo();
    config.nudger_model = args.nudger;
    config.target_model = args.target;
    config.evaluator_model = args.evaluator;
    config.rounds = args.rounds;
    config.turns_per_round = args.turns;
    config.strategy = strategy;
    config.score_with_history = args.with_history;
    if let Some(proposition) = args.proposition {
        config.proposition = proposition;
    }

    println!("{}", "Starting AI nudging test".bold());
    println!("{} {}", "Proposition:".bold(), config.proposition);
    println!("{} {}", "Nudger:".bold(), config.nudger_model);
    println!("{} {}", "Target:".bold(), config.target_model);
    println!("\n{}\n", "=".repeat(80));

    // Each nudge, response, and score prints as its step completes; a
    // mid-run failure still leaves everything up to that point on the
    // console.
    let report = run_nudging(provider, &config, &mut StdoutConsole).await?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &NudgeReport) {
    for round in &report.rounds {
        let mut table = Table::new();
        table.set_header(vec!["Turn", "Agreement"]);
        table.add_row(vec!["start".to_string(), round.initial_score.to_string()]);
        for turn in &round.turns {
            table.add_row(vec![turn.turn.to_string(), turn.score.to_string()]);
        }
        println!("\n{} {}", "Round".bold(), round.round);
        println!("{table}");
    }

    println!("{}", "=".repeat(80));
    println!(
        "Total agreement across all rounds: {}/{}",
        score_colored(report.total_agreement),
        report.max_agreement()
    );
    println!("Average agreement: {}", report.average);
}

fn score_colored(score: i32) -> colored::ColoredString {
    let text = score.to_string();
    if score > 0 {
        text.green()
    } else if score < 0 {
        text.red()
    } else {
        text.yellow()
    }
}
