//! Assistant session manager.
//!
//! Keeps local state and remote state consistent:
//!
//! - a new system prompt or a new model always creates a **new** remote
//!   assistant; the old one is abandoned, never mutated or deleted,
//! - the thread is created once and reused, except after `clear_chat` or a
//!   model change,
//! - a failed remote call leaves the identifiers it would have replaced
//!   untouched.

use std::sync::Arc;

use playground_config::AppConfig;
use playground_core::assistant::{AssistantBackend, AssistantId, AssistantSpec, ThreadId, ToolDeclaration};
use playground_core::error::AssistantError;
use playground_core::message::{ChatHistory, Message};
use playground_documents::{compose_system_prompt, should_compose, LoadedFile};
use playground_providers::OpenAiAssistantsClient;
use tracing::{debug, info, warn};

use crate::conversation::{self, PollPolicy};

/// Why a message could not be sent. Nothing reaches the remote service in
/// either case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("Please enter your OpenAI API key.")]
    MissingCredentials,

    #[error("Please set up the system prompt and wait for assistant initialization.")]
    NotReady,
}

/// Result of applying a configuration change.
#[derive(Debug)]
pub enum ApplyOutcome {
    /// No remote resource was touched.
    Unchanged,
    /// Prompt stored locally; no client yet, so nothing remote happened.
    Composed,
    /// Remote assistant (and thread) are ready.
    Ready {
        assistant_id: AssistantId,
        thread_id: ThreadId,
    },
    /// A remote call failed. Identifiers it would have replaced are unchanged.
    Warning(AssistantError),
}

impl ApplyOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ApplyOutcome::Ready { .. })
    }
}

/// Settings a session takes from the app configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub assistant_name: String,
    pub tools: Vec<ToolDeclaration>,
    pub poll: PollPolicy,
}

impl SessionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            assistant_name: config.assistant_name.clone(),
            tools: config.tool_declarations(),
            poll: PollPolicy::every(config.poll_interval()),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// State for one user session.
pub struct Session {
    settings: SessionSettings,
    config: AppConfig,
    messages: ChatHistory,
    system_prompt: String,
    model: String,
    assistant_id: Option<AssistantId>,
    thread_id: Option<ThreadId>,
    client: Option<Arc<dyn AssistantBackend>>,
}

impl Session {
    /// Start a session with the configured default model. If the config
    /// carries an API key the client is built right away.
    pub fn new(config: AppConfig) -> Self {
        let mut session = Self {
            settings: SessionSettings::from_config(&config),
            model: config.default_model.clone(),
            messages: ChatHistory::new(),
            system_prompt: String::new(),
            assistant_id: None,
            thread_id: None,
            client: None,
            config,
        };
        if let Some(key) = session.config.api_key.clone() {
            session.set_api_key(&key);
        }
        session
    }

    /// Use `client` for all remote calls from now on.
    pub fn attach_client(&mut self, client: Arc<dyn AssistantBackend>) {
        debug!(backend = client.name(), "Client attached");
        self.client = Some(client);
    }

    /// Build the HTTP client from an API key. Blank keys are ignored.
    pub fn set_api_key(&mut self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        let client = OpenAiAssistantsClient::from_config(&self.config, key);
        self.attach_client(Arc::new(client));
    }

    pub fn messages(&self) -> &ChatHistory {
        &self.messages
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn assistant_id(&self) -> Option<&AssistantId> {
        self.assistant_id.as_ref()
    }

    pub fn thread_id(&self) -> Option<&ThreadId> {
        self.thread_id.as_ref()
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Both remote resources exist, so messages can be sent.
    pub fn is_ready(&self) -> bool {
        self.client.is_some() && self.assistant_id.is_some() && self.thread_id.is_some()
    }

    fn client(&self) -> Result<Arc<dyn AssistantBackend>, AssistantError> {
        self.client
            .clone()
            .ok_or_else(|| AssistantError::NotConfigured("no API key provided".into()))
    }

    /// Create a new remote assistant for the current prompt and model.
    ///
    /// Always creates; never reuses. On failure the previous identifier stays.
    pub async fn ensure_assistant(&mut self) -> Result<AssistantId, AssistantError> {
        let client = self.client()?;
        let spec = AssistantSpec {
            name: self.settings.assistant_name.clone(),
            instructions: self.system_prompt.clone(),
            model: self.model.clone(),
            tools: self.settings.tools.clone(),
        };

        match client.create_assistant(&spec).await {
            Ok(id) => {
                if let Some(previous) = self.assistant_id.replace(id.clone()) {
                    debug!(previous = %previous, current = %id, "Assistant replaced");
                }
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Error creating assistant");
                Err(e)
            }
        }
    }

    /// Create a thread if there is none yet.
    pub async fn ensure_thread(&mut self) -> Result<ThreadId, AssistantError> {
        if let Some(id) = &self.thread_id {
            return Ok(id.clone());
        }

        let client = self.client()?;
        match client.create_thread().await {
            Ok(id) => {
                self.thread_id = Some(id.clone());
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Error creating thread");
                Err(e)
            }
        }
    }

    /// Assistant, then thread. Stops at the first failure.
    async fn provision(&mut self) -> ApplyOutcome {
        let assistant_id = match self.ensure_assistant().await {
            Ok(id) => id,
            Err(e) => return ApplyOutcome::Warning(e),
        };
        match self.ensure_thread().await {
            Ok(thread_id) => ApplyOutcome::Ready {
                assistant_id,
                thread_id,
            },
            Err(e) => ApplyOutcome::Warning(e),
        }
    }

    /// Recompose the system prompt from `base` and `files` and bring the
    /// remote assistant up to date.
    pub async fn apply_configuration(&mut self, base: &str, files: &[LoadedFile]) -> ApplyOutcome {
        if !should_compose(base, files) {
            return ApplyOutcome::Unchanged;
        }

        self.system_prompt = compose_system_prompt(base, files);
        info!(
            files = files.len(),
            prompt_chars = self.system_prompt.len(),
            "System prompt composed"
        );

        if self.client.is_none() {
            return ApplyOutcome::Composed;
        }
        self.provision().await
    }

    /// Switch models. Clears local history and recreates both the assistant
    /// and the thread so the remote side matches the displayed model.
    ///
    /// Picking the current model again changes nothing. If the new assistant
    /// cannot be created the previous model stays selected, since the
    /// previous assistant is still the one answering.
    pub async fn change_model(&mut self, model: &str) -> ApplyOutcome {
        if model == self.model {
            return ApplyOutcome::Unchanged;
        }

        info!(from = %self.model, to = %model, "Model changed");
        let previous_model = std::mem::replace(&mut self.model, model.to_string());
        self.messages.clear();

        if self.client.is_none() || self.system_prompt.is_empty() {
            self.assistant_id = None;
            self.thread_id = None;
            return ApplyOutcome::Unchanged;
        }

        let assistant_id = match self.ensure_assistant().await {
            Ok(id) => id,
            Err(e) => {
                warn!(model = %previous_model, "Model change reverted");
                self.model = previous_model;
                return ApplyOutcome::Warning(e);
            }
        };

        let stale_thread = self.thread_id.take();
        match self.ensure_thread().await {
            Ok(thread_id) => ApplyOutcome::Ready {
                assistant_id,
                thread_id,
            },
            Err(e) => {
                self.thread_id = stale_thread;
                ApplyOutcome::Warning(e)
            }
        }
    }

    /// Start over with an empty history and, if one exists, a fresh thread.
    ///
    /// Local history is cleared even if the new thread cannot be created.
    pub async fn clear_chat(&mut self) -> Result<(), AssistantError> {
        self.messages.clear();

        if self.thread_id.is_none() {
            return Ok(());
        }
        let Some(client) = self.client.clone() else {
            return Ok(());
        };

        match client.create_thread().await {
            Ok(id) => {
                info!(thread_id = %id, "Chat cleared with new thread");
                self.thread_id = Some(id);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Error creating thread");
                Err(e)
            }
        }
    }

    /// Send one user message and record the reply.
    ///
    /// The reply is the assistant's text or an inline `"Error: ..."` string;
    /// either way it is appended to the history after the user message.
    pub async fn send_message(&mut self, text: &str) -> Result<String, SendError> {
        let client = self.client.clone().ok_or(SendError::MissingCredentials)?;
        let (Some(assistant_id), Some(thread_id)) = (self.assistant_id.clone(), self.thread_id.clone())
        else {
            return Err(SendError::NotReady);
        };

        self.messages.push(Message::user(text));
        let reply = conversation::send(
            client.as_ref(),
            &thread_id,
            &assistant_id,
            text,
            self.settings.poll,
        )
        .await;
        self.messages.push(Message::assistant(reply.clone()));
        Ok(reply)
    }
}
