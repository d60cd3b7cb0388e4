//! `playground chat` — Interactive or single-message chat mode.

use std::io::Write;
use std::path::Path;

use playground_config::AppConfig;
use playground_documents::LoadedFile;
use playground_session::{ApplyOutcome, Session};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::repl::{ReplCommand, HELP};
use crate::PromptArgs;

const MISSING_KEY_WARNING: &str =
    "  ⚠️  No API key. Use /key <key>, --api-key, or set OPENAI_API_KEY.";

/// The base instruction and attachments currently shaping the prompt.
struct PromptInputs {
    base: String,
    files: Vec<LoadedFile>,
}

pub async fn run(
    prompt: PromptArgs,
    model: Option<String>,
    api_key: Option<String>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(model) = &model {
        if !config.is_supported_model(model) {
            return Err(format!(
                "Unknown model '{model}'. Available: {}",
                config.models.join(", ")
            )
            .into());
        }
    }

    let mut inputs = PromptInputs {
        base: super::resolve_base_prompt(&prompt, &config)?,
        files: super::load_attachments(&super::attachment_paths(&prompt, &config)),
    };

    let models = config.models.clone();
    let mut session = Session::new(config);
    if let Some(key) = api_key {
        session.set_api_key(&key);
    }
    if let Some(model) = model {
        session.change_model(&model).await;
    }

    tracing::debug!(
        model = %session.model(),
        files = inputs.files.len(),
        "Chat session starting"
    );
    report(&session.apply_configuration(&inputs.base, &inputs.files).await);

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let result = session.send_message(&msg).await;
        eprint!("\r              \r");
        return match result {
            Ok(reply) => {
                println!("{reply}");
                Ok(())
            }
            Err(e) => Err(e.to_string().into()),
        };
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        Prompt Playground — Interactive       ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:     {}", session.model());
    println!("  Files:     {}", describe_files(&inputs.files));
    println!("  Prompt:    {} chars", session.system_prompt().len());
    println!();
    println!("  Type your message and press Enter. /help lists commands.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        if !session.has_client() {
            println!("{MISSING_KEY_WARNING}");
        }
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF (Ctrl+D)
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Exit => break,
            ReplCommand::Help => println!("{HELP}\n"),
            ReplCommand::Invalid(reason) => println!("  {reason}\n"),
            ReplCommand::Send(text) => send(&mut session, &text).await,
            ReplCommand::Clear => println!("{}\n", clear_notice(session.clear_chat().await)),
            ReplCommand::Model(name) => {
                if !models.contains(&name) {
                    println!("  Unknown model '{name}'. Available: {}\n", models.join(", "));
                    continue;
                }
                report(&session.change_model(&name).await);
                println!("  Model: {}\n", session.model());
            }
            ReplCommand::Models => {
                for name in &models {
                    let marker = if name == session.model() { "*" } else { " " };
                    println!("  {marker} {name}");
                }
                println!();
            }
            ReplCommand::ShowPrompt => {
                println!("  ── Current System Prompt ──");
                println!("{}", session.system_prompt());
                println!("  ───────────────────────────\n");
            }
            ReplCommand::System(text) => {
                inputs.base = text;
                report(&session.apply_configuration(&inputs.base, &inputs.files).await);
            }
            ReplCommand::Attach(path) => {
                if let Some(file) = super::load_attachment(Path::new(&path)) {
                    println!("  Attached {}", file.name);
                    inputs.files.push(file);
                    report(&session.apply_configuration(&inputs.base, &inputs.files).await);
                }
            }
            ReplCommand::Key(key) => {
                session.set_api_key(&key);
                report(&session.apply_configuration(&inputs.base, &inputs.files).await);
            }
        }
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}

async fn send(session: &mut Session, text: &str) {
    eprint!("  ...");
    let result = session.send_message(text).await;
    eprint!("\r     \r");

    match result {
        Ok(reply) => {
            println!();
            for line in reply.lines() {
                println!("  Assistant > {line}");
            }
            println!();
        }
        Err(e) => println!("  [Error] {e}\n"),
    }
}

fn report(outcome: &ApplyOutcome) {
    match outcome {
        ApplyOutcome::Unchanged => {}
        ApplyOutcome::Composed => println!("  System prompt updated."),
        ApplyOutcome::Ready { assistant_id, .. } => {
            println!("  Assistant ready ({assistant_id}).")
        }
        ApplyOutcome::Warning(e) => println!("  ⚠️  Error setting up assistant: {e}"),
    }
}

/// What `/clear` did. History is always gone; the thread only on success.
fn clear_notice<E: std::fmt::Display>(result: Result<(), E>) -> String {
    match result {
        Ok(()) => "  Chat cleared.".into(),
        Err(e) => format!(
            "  ⚠️  Error creating thread: {e}\n  Local history cleared; still using the previous thread."
        ),
    }
}

fn describe_files(files: &[LoadedFile]) -> String {
    if files.is_empty() {
        return "none".into();
    }
    files
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
