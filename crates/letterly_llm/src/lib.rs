//! # letterly_llm
//!
//! Model-call resilience layer for the Letterly writing assistant.
//!
//! Given an ordered list of chat messages and an [`AgentConfig`], the
//! [`FallbackInvoker`] tries the agent's primary model and then its fallback
//! chain, one sequential request at a time:
//!
//! ```text
//! PENDING(m[0]) ──ok──────────────▶ SUCCESS { text, used_model }
//!      │
//!      ├─ transient (429 / 5xx) ──▶ COOLDOWN ──▶ PENDING(m[i+1]) ...
//!      │                                              │
//!      │                                  last model ─┴─▶ EXHAUSTED
//!      └─ non-transient (4xx) ───▶ FAILED (same error, no further models)
//! ```
//!
//! Failures are classified once, where the provider error is first observed
//! ([`ProviderError`] carries an explicit [`FailureClass`]).
//!
//! ## Providers
//!
//! - [`OpenRouterProvider`]: OpenAI-compatible chat completions over HTTP
//! - [`MockProvider`]: scripted replies with captured requests, for tests
//!
//! [`AgentConfig`]: letterly_agents::AgentConfig

pub mod error;
pub mod fallback;
pub mod mock;
pub mod openrouter;
pub mod provider;
pub mod types;

pub use error::{FailureClass, InvokeError, InvokeResult, ProviderError, ProviderResult};
pub use fallback::{attempt_sequence, invoke, FallbackInvoker, InvokerConfig, DEFAULT_COOLDOWN};
pub use mock::{CapturedRequest, MockProvider, MockReply};
pub use openrouter::{LlmSettings, OpenRouterProvider};
pub use provider::CompletionProvider;
pub use types::{
    AttemptOutcome, AttemptRecord, ChatMessage, Completion, CompletionRequest, InvocationResult,
    MessageRole, ResponseFormat,
};
