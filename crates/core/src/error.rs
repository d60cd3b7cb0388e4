//! Error types for the Prompt Playground domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type.

use thiserror::Error;

/// Failures talking to the remote assistants/threads/runs service.
#[derive(Debug, Clone, Error)]
pub enum AssistantError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Failures turning an uploaded file into text.
///
/// These never escape the loader; they are rendered into placeholder text.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Csv(String),

    #[error("{0}")]
    Json(String),

    #[error("{0}")]
    Spreadsheet(String),

    #[error("{0}")]
    Pdf(String),
}
