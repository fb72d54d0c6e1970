//! Error types for the Pillarwise domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Pillarwise operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Session state errors ---
    #[error("Session error: {0}")]
    State(#[from] StateError),

    // --- Export errors ---
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

}

impl Error {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// A session operation was attempted from a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("no assessment in progress; start one first")]
    NotStarted,

    #[error("an assessment is already in progress (pillar {cursor} of {total})")]
    AlreadyCollecting { cursor: usize, total: usize },

    #[error("the assessment is complete; restart to begin a new one")]
    AlreadyComplete,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to access {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed answers file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
