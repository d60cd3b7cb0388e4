//! OpenAI Assistants API client.
//!
//! Talks to the `assistants`, `threads`, `threads/{id}/messages` and
//! `threads/{id}/runs` endpoints of the v2 beta surface. Any server exposing
//! the same routes (a proxy, a local mock) works by changing the base URL.

use async_trait::async_trait;
use playground_config::AppConfig;
use playground_core::assistant::*;
use playground_core::error::AssistantError;
use playground_core::message::Role;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the OpenAI Assistants API.
pub struct OpenAiAssistantsClient {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiAssistantsClient {
    /// Create a client for an Assistants-compatible endpoint.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_timeout(name, base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create an OpenAI client (convenience constructor).
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new("openai", "https://api.openai.com/v1", api_key)
    }

    /// Create a client from the app configuration and an API key.
    pub fn from_config(config: &AppConfig, api_key: impl Into<String>) -> Self {
        Self::with_timeout(
            "openai",
            config.api_url.clone(),
            api_key,
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("OpenAI-Beta", "assistants=v2")
    }

    /// Send a request and decode a successful JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AssistantError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(AssistantError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(AssistantError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Assistant service returned error");
            return Err(AssistantError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AssistantError::InvalidResponse(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl AssistantBackend for OpenAiAssistantsClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantId, AssistantError> {
        debug!(backend = %self.name, model = %spec.model, "Creating assistant");

        let body = serde_json::json!({
            "name": spec.name,
            "instructions": spec.instructions,
            "model": spec.model,
            "tools": spec.tools,
        });

        let created: ApiObject = self
            .execute(self.client.post(self.url("assistants")).json(&body))
            .await?;

        info!(assistant_id = %created.id, model = %spec.model, "Assistant created");
        Ok(AssistantId(created.id))
    }

    async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
        let created: ApiObject = self
            .execute(
                self.client
                    .post(self.url("threads"))
                    .json(&serde_json::json!({})),
            )
            .await?;

        info!(thread_id = %created.id, "Thread created");
        Ok(ThreadId(created.id))
    }

    async fn add_message(
        &self,
        thread_id: &ThreadId,
        role: Role,
        content: &str,
    ) -> Result<(), AssistantError> {
        debug!(thread_id = %thread_id, role = %role, "Adding message to thread");

        let body = serde_json::json!({
            "role": role.as_str(),
            "content": content,
        });

        let _: ApiObject = self
            .execute(
                self.client
                    .post(self.url(&format!("threads/{thread_id}/messages")))
                    .json(&body),
            )
            .await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<RunId, AssistantError> {
        let body = serde_json::json!({ "assistant_id": assistant_id });

        let run: ApiRun = self
            .execute(
                self.client
                    .post(self.url(&format!("threads/{thread_id}/runs")))
                    .json(&body),
            )
            .await?;

        debug!(run_id = %run.id, status = ?run.status, "Run created");
        Ok(RunId(run.id))
    }

    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<RunStatus, AssistantError> {
        let run: ApiRun = self
            .execute(
                self.client
                    .get(self.url(&format!("threads/{thread_id}/runs/{run_id}"))),
            )
            .await?;
        Ok(run.status)
    }

    async fn list_messages(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantError> {
        let list: ApiMessageList = self
            .execute(
                self.client
                    .get(self.url(&format!("threads/{thread_id}/messages")))
                    .query(&[("order", "desc")]),
            )
            .await?;

        Ok(list.data.into_iter().map(ThreadMessage::from).collect())
    }
}

// --- Assistants API types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiRun {
    id: String,
    status: RunStatus,
}

#[derive(Debug, Deserialize)]
struct ApiMessageList {
    data: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    id: String,
    role: Role,
    #[serde(default)]
    content: Vec<ApiContentPart>,
}

#[derive(Debug, Deserialize)]
struct ApiContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<ApiText>,
}

#[derive(Debug, Deserialize)]
struct ApiText {
    value: String,
}

impl From<ApiMessage> for ThreadMessage {
    fn from(message: ApiMessage) -> Self {
        let text = message
            .content
            .into_iter()
            .filter(|part| part.kind == "text")
            .filter_map(|part| part.text.map(|t| t.value))
            .collect();

        ThreadMessage {
            id: message.id,
            role: message.role,
            text,
        }
    }
}
