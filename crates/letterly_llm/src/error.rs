//! Error types for provider calls and resilient invocation.

use std::fmt;
use std::time::Duration;

use letterly_agents::{AgentError, ModelKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a single provider call.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Result of a resilient invocation.
pub type InvokeResult<T> = Result<T, InvokeError>;

/// Whether a failed call justifies moving on to the next model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// Rate limited or server-side failure: advance to the next model
    Transient,
    /// Client-side failure: abort the whole chain
    NonTransient,
}

impl FailureClass {
    /// Classify an HTTP status code. 429 and anything from 500 up are transient.
    pub fn from_status(status: u16) -> Self {
        if status == 429 || status >= 500 {
            FailureClass::Transient
        } else {
            FailureClass::NonTransient
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::Transient => write!(f, "transient"),
            FailureClass::NonTransient => write!(f, "non-transient"),
        }
    }
}

/// A failed call to one model, classified at the provider boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub class: FailureClass,
    /// Model the call was made against
    pub model: String,
    /// HTTP status, when the provider answered
    pub status: Option<u16>,
    /// Provider or transport error code (e.g., "rate_limit_exceeded", "timeout")
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    /// Error for a non-success HTTP status.
    pub fn from_status(model: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self {
            class: FailureClass::from_status(status),
            model: model.into(),
            status: Some(status),
            code: None,
            message: message.into(),
        }
    }

    /// A rate-limit or server error.
    pub fn transient(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: FailureClass::Transient,
            model: model.into(),
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// A client-side error that would fail identically on every model.
    pub fn non_transient(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: FailureClass::NonTransient,
            model: model.into(),
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// The attempt did not complete within the configured bound.
    pub fn timeout(model: impl Into<String>, after: Duration) -> Self {
        Self::transient(model, format!("no response after {}ms", after.as_millis()))
            .with_code("timeout")
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_transient(&self) -> bool {
        self.class == FailureClass::Transient
    }

    /// Short status/code label used in logs (e.g., "429", "timeout").
    pub fn signal(&self) -> String {
        match (&self.status, &self.code) {
            (Some(status), _) => status.to_string(),
            (None, Some(code)) => code.clone(),
            (None, None) => "unknown".to_string(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "Model {} failed with {}: {}", self.model, status, self.message),
            None => write!(f, "Model {} failed: {}", self.model, self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Errors surfaced by [`crate::FallbackInvoker::invoke`].
#[derive(Error, Debug)]
pub enum InvokeError {
    /// A non-transient failure aborted the chain; no further models were tried.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("All models failed (tried {}): {last}", .attempted.join(", "))]
    AllModelsExhausted {
        attempted: Vec<String>,
        #[source]
        last: ProviderError,
    },

    #[error("No models available for agent {0}")]
    NoModelsAvailable(String),

    #[error("Agent {agent} is a {kind} agent and cannot be invoked for chat completions")]
    IncompatibleAgentKind { agent: String, kind: ModelKind },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("LLM not configured. Set OPENROUTER_API_KEY")]
    NotConfigured,

    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl InvokeError {
    /// The provider error behind this failure, if any.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) => Some(err),
            Self::AllModelsExhausted { last, .. } => Some(last),
            _ => None,
        }
    }
}
