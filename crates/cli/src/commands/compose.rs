//! `playground compose` — Print the system prompt a chat would start with.

use playground_config::AppConfig;
use playground_documents::{compose_system_prompt, should_compose};

use crate::PromptArgs;

pub async fn run(prompt: PromptArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let base = super::resolve_base_prompt(&prompt, &config)?;
    let files = super::load_attachments(&super::attachment_paths(&prompt, &config));

    if !should_compose(&base, &files) {
        eprintln!("Nothing to compose: give --system-prompt or attach a --file.");
        return Ok(());
    }

    println!("{}", compose_system_prompt(&base, &files));
    Ok(())
}
