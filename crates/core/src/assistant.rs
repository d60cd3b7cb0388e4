//! AssistantBackend trait — the abstraction over the remote assistant service.
//!
//! The provider keeps three kinds of resources on its side: an *assistant*
//! (instructions + model + tools), a *thread* (ordered message history) and
//! a *run* (one asynchronous execution of an assistant against a thread).
//! This module names them and defines the six calls the session needs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AssistantError;
use crate::message::Role;

macro_rules! remote_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

remote_id!(
    /// Opaque identifier of a remote assistant resource.
    AssistantId
);
remote_id!(
    /// Opaque identifier of a remote conversation thread.
    ThreadId
);
remote_id!(
    /// Opaque identifier of a remote run.
    RunId
);

/// A tool enabled on a remote assistant, e.g. `{"type": "code_interpreter"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ToolDeclaration {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn code_interpreter() -> Self {
        Self::new("code_interpreter")
    }
}

/// Everything needed to create a remote assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSpec {
    pub name: String,
    pub instructions: String,
    pub model: String,
    #[serde(default)]
    pub tools: Vec<ToolDeclaration>,
}

/// Status of a remote run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// The run finished and its reply can be read from the thread.
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }

    /// The run ended without producing a reply. The provider never moves a
    /// run out of these states.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired | RunStatus::Incomplete
        )
    }

    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }
}

/// A message as stored on a remote thread, reduced to its text parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub role: Role,
    /// Text content parts in order. Non-text parts (images, files) are dropped.
    pub text: Vec<String>,
}

impl ThreadMessage {
    /// The first text part, which is what the chat displays.
    pub fn first_text(&self) -> Option<&str> {
        self.text.first().map(String::as_str)
    }
}

/// The remote assistant service.
///
/// Every method is a single request/response against the provider. Nothing
/// here retries; callers decide how to surface failures.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// A human-readable name for this backend (e.g., "openai").
    fn name(&self) -> &str;

    /// Create a brand-new assistant resource.
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantId, AssistantError>;

    /// Create an empty conversation thread.
    async fn create_thread(&self) -> Result<ThreadId, AssistantError>;

    /// Append a message to a thread.
    async fn add_message(
        &self,
        thread_id: &ThreadId,
        role: Role,
        content: &str,
    ) -> Result<(), AssistantError>;

    /// Start a run of `assistant_id` against the thread's current state.
    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<RunId, AssistantError>;

    /// Fetch the current status of a run.
    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<RunStatus, AssistantError>;

    /// List the thread's messages, newest first.
    async fn list_messages(&self, thread_id: &ThreadId)
    -> Result<Vec<ThreadMessage>, AssistantError>;
}
