//! `sensai config` — show the resolved configuration.

use sensai_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!();
    println!("  Config file:  {}", AppConfig::config_dir().join("config.toml").display());
    println!("  API key:      {}", if config.has_api_key() { "set" } else { "NOT SET" });
    println!("  API URL:      {}", config.provider.api_url);
    println!("  Model:        {}", config.provider.model_id);
    println!(
        "  Project ID:   {}",
        config.provider.project_id.as_deref().unwrap_or("(none)")
    );
    println!("  Temperature:  {}", config.provider.temperature);
    println!("  Max tokens:   {}", config.provider.max_tokens);
    println!();
    println!("  Max iterations:  {}", config.session.max_iterations);
    println!("  Time budget:     {} minutes", config.session.time_budget_minutes);
    println!();

    Ok(())
}
