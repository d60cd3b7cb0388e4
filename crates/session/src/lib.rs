//! Session management for Prompt Playground.
//!
//! [`Session`] owns everything one user session needs: the local chat
//! history, the composed system prompt, the selected model, the remote
//! assistant and thread identifiers, and the backend client. Every operation
//! takes the session explicitly; there is no process-wide state.
//!
//! [`conversation::send`] is the request/poll/read loop for a single turn.

pub mod conversation;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use conversation::{send, PollPolicy, RUN_FAILED_REPLY};
pub use session::{ApplyOutcome, SendError, Session, SessionSettings};
