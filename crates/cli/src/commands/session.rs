//! `sensai session` — run one tutoring session end to end.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use sensai_agent::{LoopState, TutorController};
use sensai_config::AppConfig;
use sensai_core::session::SessionContext;
use sensai_providers::WatsonxProvider;
use sensai_tools::StaticRetriever;

pub async fn run(
    prompt: String,
    max_iterations: Option<usize>,
    time_budget: Option<f64>,
    show_transcript: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    SENSAI_API_KEY   (generic)");
        eprintln!("    WATSONX_API_KEY  (watsonx.ai)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }
    let provider = Arc::new(
        WatsonxProvider::from_config(&config.provider)
            .map_err(|e| format!("Failed to build provider: {e}"))?,
    );
    let retriever = Arc::new(StaticRetriever::sample_library());
    let session = Arc::new(Mutex::new(SessionContext::new(format!(
        "The student asks: {prompt}"
    ))));

    let mut controller = TutorController::new(provider, retriever, Arc::clone(&session))
        .with_session_config(&config.session);
    if let Some(limit) = max_iterations {
        controller = controller.with_max_iterations(limit);
    }
    if let Some(minutes) = time_budget {
        controller = controller.with_time_budget(Duration::from_secs_f64(minutes * 60.0));
    }

    eprint!("  Thinking...");
    let result = controller.run().await?;
    eprint!("\r              \r");

    println!("{}", result.reply);
    if result.state != LoopState::FinalAnswer {
        eprintln!();
        eprintln!(
            "  (session ended without a final answer after {} iterations and {} tool calls)",
            result.iterations, result.tool_calls_made
        );
    }

    if show_transcript {
        println!();
        println!("--- Transcript ---");
        println!("{}", session.lock().await.transcript.render());
    }

    Ok(())
}
