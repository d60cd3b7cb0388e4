//! `playground models` — List the models the selector offers.

use playground_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    for model in &config.models {
        if *model == config.default_model {
            println!("{model} (default)");
        } else {
            println!("{model}");
        }
    }

    Ok(())
}
