pub mod assess;
pub mod config_cmd;
pub mod doctor;
pub mod onboard;
pub mod pillars;
pub mod plan;
pub mod report;

use pillarwise_config::AppConfig;

/// Providers that run locally and accept any key.
const KEYLESS_PROVIDERS: &[&str] = &["ollama", "vllm", "llamacpp", "llama.cpp"];

pub(crate) fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

pub(crate) fn needs_api_key(config: &AppConfig) -> bool {
    !config.has_api_key() && !KEYLESS_PROVIDERS.contains(&config.provider.as_str())
}

/// Fail early with setup instructions when no API key is available.
pub(crate) fn require_api_key(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !needs_api_key(config) {
        return Ok(());
    }

    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Set one of these environment variables:");
    eprintln!("    PILLARWISE_API_KEY   (generic)");
    eprintln!("    OPENAI_API_KEY       (for OpenAI direct)");
    eprintln!("    OPENROUTER_API_KEY   (for OpenRouter)");
    eprintln!();
    eprintln!("  Or add api_key to your config file:");
    eprintln!("    {}", AppConfig::config_path().display());
    eprintln!();
    Err("No API key found. See above for setup instructions.".into())
}
