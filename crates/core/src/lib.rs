//! # Prompt Playground Core
//!
//! Domain types, traits, and error definitions for the Prompt Playground
//! chat front-end. This crate has **no transport dependencies**: it defines
//! the model that the loader, the remote client and the session manager all
//! share.
//!
//! ## Design Philosophy
//!
//! The remote assistant service is defined as a trait here
//! ([`AssistantBackend`]). The HTTP implementation lives in
//! `playground-providers`; tests substitute scripted backends.

pub mod assistant;
pub mod error;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use assistant::{
    AssistantBackend, AssistantId, AssistantSpec, RunId, RunStatus, ThreadId, ThreadMessage,
    ToolDeclaration,
};
pub use error::{AssistantError, DocumentError};
pub use message::{ChatHistory, Message, Role};
