//! `playground onboard` — First-time setup.

use playground_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("Prompt Playground — First-Time Setup");
    println!("====================================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!(
            "   1. Add api_key to {} (or export OPENAI_API_KEY)",
            config_path.display()
        );
        println!("   2. Optionally set system_prompt and files");
        println!("   3. Run: playground chat\n");
    }

    println!("🎉 Setup complete! Run `playground chat` to start chatting.\n");

    Ok(())
}
