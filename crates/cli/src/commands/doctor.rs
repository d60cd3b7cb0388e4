//! `playground doctor` — Diagnose configuration and credentials.

use std::path::Path;

use playground_config::AppConfig;
use playground_documents::is_accepted;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Prompt Playground Doctor");
    println!("==========================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file — run `playground onboard` (defaults in use)");
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  {} issue(s) found. See above for details.", issues + 1);
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ❌ No API key — add api_key to config.toml or export OPENAI_API_KEY");
        issues += 1;
    }

    println!("  ✅ Endpoint: {}", config.api_url);
    println!("  ✅ Default model: {}", config.default_model);

    for file in &config.files {
        let path = Path::new(file);
        if !is_accepted(file) {
            println!("  ⚠️  Attachment {file} has an unsupported extension");
            issues += 1;
        } else if !path.exists() {
            println!("  ❌ Attachment {file} not found");
            issues += 1;
        } else {
            println!("  ✅ Attachment {file}");
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
