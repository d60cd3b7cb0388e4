//! Interactive chat input — one line in, one [`ReplCommand`] out.

/// What a line typed at the chat prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text to send to the assistant.
    Send(String),
    /// Start over with a new thread.
    Clear,
    /// Switch to another model.
    Model(String),
    /// List the selectable models.
    Models,
    /// Show the current system prompt.
    ShowPrompt,
    /// Replace the base instruction.
    System(String),
    /// Attach another file.
    Attach(String),
    /// Provide an API key.
    Key(String),
    Help,
    Exit,
    /// Nothing to do (blank line).
    Empty,
    /// A slash command that is missing its argument or is unknown.
    Invalid(String),
}

pub const HELP: &str = "\
  /clear            Clear the chat and start a new thread
  /model <name>     Switch model (clears the chat)
  /models           List available models
  /prompt           Show the current system prompt
  /system <text>    Replace the base system prompt
  /attach <path>    Attach a file to the context
  /key <api-key>    Enter an API key
  /help             Show this help
  /exit             Quit";

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }

        if matches!(line, "exit" | "quit" | ":q") {
            return ReplCommand::Exit;
        }

        let Some(command) = line.strip_prefix('/') else {
            return ReplCommand::Send(line.to_string());
        };

        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        let required = |build: fn(String) -> ReplCommand| {
            if argument.is_empty() {
                ReplCommand::Invalid(format!("/{name} needs an argument"))
            } else {
                build(argument.to_string())
            }
        };

        match name {
            "clear" => ReplCommand::Clear,
            "models" => ReplCommand::Models,
            "prompt" => ReplCommand::ShowPrompt,
            "help" | "?" => ReplCommand::Help,
            "exit" | "quit" => ReplCommand::Exit,
            "model" => required(ReplCommand::Model),
            "system" => required(ReplCommand::System),
            "attach" => required(ReplCommand::Attach),
            "key" => required(ReplCommand::Key),
            other => ReplCommand::Invalid(format!("Unknown command: /{other}")),
        }
    }
}
