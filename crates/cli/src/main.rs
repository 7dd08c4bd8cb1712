//! Sensai CLI — the main entry point.
//!
//! Commands:
//! - `session` — Run one adaptive tutoring session
//! - `config`  — Show the resolved configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "sensai",
    about = "Sensai — adaptive tutoring agent",
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
    /// Run one tutoring session from an initial student prompt
    Session {
        /// The student's opening message, e.g. "How do I invert a matrix?"
        prompt: String,

        /// Override the iteration budget
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Override the time budget, in minutes
        #[arg(long)]
        time_budget: Option<f64>,

        /// Print the full transcript after the session ends
        #[arg(short, long)]
        transcript: bool,
    },

    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Session {
            prompt,
            max_iterations,
            time_budget,
            transcript,
        } => commands::session::run(prompt, max_iterations, time_budget, transcript).await?,
        Commands::Config => commands::config::run().await?,
    }

    Ok(())
}
