//! Sway CLI - scripted adversarial conversation probes
//!
//! # Usage
//!
//! ```bash
//! # Probe a model for self-contradiction under follow-up questioning
//! sway consistency
//!
//! # Measure belief drift under persuasion pressure
//! sway nudge
//!
//! # Custom proposition, softer strategy
//! sway nudge --proposition "The sea is rising faster than reported" --strategy evidence
//! ```
//!
//! Both subcommands need `OPENROUTER_API_KEY` in the environment.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{consistency, nudge};

/// Sway - adversarial conversation probes for LLM endpoints
///
/// Drives scripted multi-turn conversations between models to measure
/// self-consistency under questioning and belief drift under persuasion.
#[derive(Parser)]
#[command(
    name = "sway",
    version,
    about = "Sway - adversarial conversation probes for LLM endpoints",
    long_about = "Sway drives scripted multi-turn conversations between LLM endpoints.\n\n\
                  `consistency` pits an answerer against a persuader probing for\n\
                  contradictions; `nudge` measures how far a target model's stated\n\
                  belief in a proposition drifts under persuasion, scored per turn."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe a model for self-contradiction under adversarial follow-ups
    #[command(name = "consistency")]
    Consistency(consistency::ConsistencyArgs),

    /// Measure belief drift under persuasion pressure
    #[command(name = "nudge")]
    Nudge(nudge::NudgeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Consistency(args) => consistency::run(args).await,
        Commands::Nudge(args) => nudge::run(args).await,
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}
