//! Document loading and prompt composition for Prompt Playground.
//!
//! - [`loader`] turns an uploaded file (name + bytes) into plain text. It
//!   never fails: unreadable files become visible placeholder text.
//! - [`compose`] joins a base instruction with the extracted texts into the
//!   system prompt sent to the remote assistant.

pub mod compose;
pub mod loader;
mod pdf;
mod table;

pub use compose::{compose_system_prompt, should_compose, LoadedFile};
pub use loader::{
    is_accepted, read_file_content, read_path, DocumentKind, ACCEPTED_EXTENSIONS,
    UNSUPPORTED_FILE_TYPE,
};
