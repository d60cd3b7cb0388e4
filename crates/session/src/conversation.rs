//! Conversation loop — one user turn against a remote thread.
//!
//! ```text
//! add_message ──► create_run ──► retrieve_run ─┬─ completed ──► list_messages ──► reply
//!                                    ▲          ├─ failed ─────► RUN_FAILED_REPLY
//!                                    └─ sleep ◄─┘ (anything else)
//! ```
//!
//! There is no retry limit and no timeout: a run the provider never
//! resolves keeps the caller waiting.

use std::time::Duration;

use playground_core::assistant::{AssistantBackend, AssistantId, ThreadId};
use playground_core::error::AssistantError;
use playground_core::message::Role;
use tracing::{debug, warn};

/// Reply shown when the provider reports the run as failed.
pub const RUN_FAILED_REPLY: &str = "Error: Assistant run failed";

/// How often the run status is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
}

impl PollPolicy {
    pub fn every(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::every(Duration::from_secs(1))
    }
}

/// Relay `prompt` to the thread, wait for the run, and return the reply.
///
/// Never fails: every error becomes an inline `"Error: ..."` string.
pub async fn send(
    client: &dyn AssistantBackend,
    thread_id: &ThreadId,
    assistant_id: &AssistantId,
    prompt: &str,
    poll: PollPolicy,
) -> String {
    match run_turn(client, thread_id, assistant_id, prompt, poll).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(thread_id = %thread_id, error = %e, "Conversation turn failed");
            format!("Error: {e}")
        }
    }
}

async fn run_turn(
    client: &dyn AssistantBackend,
    thread_id: &ThreadId,
    assistant_id: &AssistantId,
    prompt: &str,
    poll: PollPolicy,
) -> Result<String, AssistantError> {
    client.add_message(thread_id, Role::User, prompt).await?;
    let run_id = client.create_run(thread_id, assistant_id).await?;

    let mut checks = 0u64;
    loop {
        let status = client.retrieve_run(thread_id, &run_id).await?;
        checks += 1;

        if status.is_success() {
            debug!(run_id = %run_id, checks, "Run completed");
            break;
        }
        if status.is_failure() {
            warn!(run_id = %run_id, status = ?status, "Run did not complete");
            return Ok(RUN_FAILED_REPLY.to_string());
        }

        tokio::time::sleep(poll.interval).await;
    }

    let messages = client.list_messages(thread_id).await?;
    let newest = messages
        .first()
        .ok_or_else(|| AssistantError::InvalidResponse("Thread has no messages".into()))?;

    newest
        .first_text()
        .map(str::to_string)
        .ok_or_else(|| AssistantError::InvalidResponse("Latest message has no text content".into()))
}
