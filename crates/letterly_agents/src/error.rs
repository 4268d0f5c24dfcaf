//! Error types for the agent registry.

use thiserror::Error;

use crate::catalog::ModelKind;

/// Result type alias for registry operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors that can occur while looking up or customizing agents.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Model {model} is a {actual} model and cannot serve the {expected} agent {agent}")]
    IncompatibleModel {
        agent: String,
        model: String,
        expected: ModelKind,
        actual: ModelKind,
    },

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentError {
    /// Create an unknown agent error.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownAgent(id.into())
    }
}
