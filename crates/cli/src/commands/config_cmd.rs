//! `pillarwise config`: configuration management commands.

use pillarwise_assessment::token::encoding_for_model;
use pillarwise_config::AppConfig;

use super::{load_config, needs_api_key};

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let warnings = warnings(&config);
            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Provider:  {}", config.provider);
            println!("   Model:     {}", config.model);
            println!(
                "   Budget:    {} tokens per chunk ({} reserved)",
                config.assessment.ceiling, config.assessment.overhead
            );
            println!("   Export:    {}", config.export.path.display());
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

/// Problems that do not stop the config from loading but will stop an assessment.
fn warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if needs_api_key(config) {
        warnings.push(
            "No API key set (set PILLARWISE_API_KEY, OPENAI_API_KEY or OPENROUTER_API_KEY)"
                .to_string(),
        );
    }

    if let Err(e) = encoding_for_model(&config.model) {
        warnings.push(format!("{e}; reports cannot be generated"));
    }

    warnings
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config()?;
    if config.api_key.is_some() {
        config.api_key = Some("[REDACTED]".into());
    }
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
