//! Error types for the hypergraph CLI.
//!
//! `CliError` is what a single invocation fails with. Its user-facing variants
//! carry a message only; everything else is reported with its full cause chain.

use crate::types::ModuleKey;
use thiserror::Error;

/// Failure of one CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// Expected, user-correctable condition (e.g. missing profile)
    #[error("{0}")]
    User(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid key: {key}. Must be one of: {allowed}")]
    InvalidKey { key: String, allowed: String },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] PromptError),

    #[error("Engine failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        CliError::User(message.into())
    }

    /// User errors are printed without diagnostics.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CliError::User(_) | CliError::UnknownAction(_) | CliError::InvalidKey { .. }
        )
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

/// Prompt adapter failures.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Terminal is not interactive or input was closed
    #[error("input unavailable: {0}")]
    Unavailable(String),

    #[error("expected {expected} answer, got {got}")]
    UnexpectedAnswer {
        expected: &'static str,
        got: &'static str,
    },

    /// Scripted prompt has no answers left
    #[error("no answer left for question: {0}")]
    Exhausted(String),
}

impl From<dialoguer::Error> for PromptError {
    fn from(err: dialoguer::Error) -> Self {
        PromptError::Unavailable(err.to_string())
    }
}

/// Engine client failures.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine is not ready")]
    NotReady,

    #[error("engine has been destroyed")]
    Closed,

    #[error("module not found: {0}")]
    NotFound(ModuleKey),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
