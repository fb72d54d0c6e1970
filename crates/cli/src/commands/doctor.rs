//! `pillarwise doctor`: diagnose setup problems.

use pillarwise_assessment::token::encoding_for_model;
use pillarwise_config::AppConfig;

use super::needs_api_key;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Pillarwise Doctor: System Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_path();
    if config_path.exists() {
        println!("  ✅ Config file found");
    } else {
        println!("  ⚠️  No config file, using defaults. Run `pillarwise onboard`");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            println!("\n  ⚠️  {} issue(s) found. See above for details.", issues + 1);
            return Ok(());
        }
    };

    if needs_api_key(&config) {
        println!("  ⚠️  No API key configured. Add api_key to config.toml or set PILLARWISE_API_KEY");
        issues += 1;
    } else {
        println!("  ✅ API key configured");
    }

    match encoding_for_model(&config.model) {
        Ok(encoding) => println!(
            "  ✅ Token estimator for {}: {}",
            config.model,
            encoding.name()
        ),
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    let provider = pillarwise_providers::build_from_config(&config);
    match provider.health_check().await {
        Ok(true) => println!("  ✅ Provider '{}' reachable", config.provider),
        Ok(false) => {
            println!("  ⚠️  Provider '{}' responded with an error", config.provider);
            issues += 1;
        }
        Err(e) => {
            println!("  ❌ Provider '{}' unreachable: {e}", config.provider);
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
