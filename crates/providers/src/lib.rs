//! Remote assistant service clients for Prompt Playground.
//!
//! All clients implement the `playground_core::AssistantBackend` trait.

pub mod openai_assistants;

pub use openai_assistants::OpenAiAssistantsClient;
