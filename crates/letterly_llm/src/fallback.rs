//! Ordered model fallback.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use letterly_agents::{AgentConfig, ModelKind};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{InvokeError, InvokeResult, ProviderError, ProviderResult};
use crate::provider::CompletionProvider;
use crate::types::{
    AttemptOutcome, AttemptRecord, ChatMessage, Completion, CompletionRequest, InvocationResult,
    ResponseFormat,
};

/// Pause between a transient failure and the next candidate.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(1);

/// Invoker tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    /// Wait inserted after a transient failure before the next model
    pub cooldown: Duration,
    /// Upper bound for a single attempt. `None` leaves the bound to the
    /// transport; an elapsed bound counts as a transient failure.
    pub attempt_timeout: Option<Duration>,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN,
            attempt_timeout: None,
        }
    }
}

impl InvokerConfig {
    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }
}

/// Models to try for an agent, in strict priority order.
///
/// The primary comes first, followed by the fallbacks in their configured
/// order. Later duplicates and blank identifiers are dropped.
pub fn attempt_sequence(agent: &AgentConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    std::iter::once(&agent.primary_model)
        .chain(agent.fallback_models.iter())
        .map(|model| model.trim())
        .filter(|model| !model.is_empty())
        .filter(|model| seen.insert(*model))
        .map(str::to_string)
        .collect()
}

/// Runs one generation request down an agent's model chain.
///
/// Holds no per-call state, so one invoker can serve concurrent requests.
#[derive(Clone)]
pub struct FallbackInvoker {
    provider: Arc<dyn CompletionProvider>,
    config: InvokerConfig,
}

impl FallbackInvoker {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self::with_config(provider, InvokerConfig::default())
    }

    pub fn with_config(provider: Arc<dyn CompletionProvider>, config: InvokerConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Try each model of `agent` in order and return the first success.
    ///
    /// - success: returned immediately, later models are never called
    /// - transient failure: cooldown, then the next model
    /// - non-transient failure: returned as [`InvokeError::Provider`] at once
    /// - every model failed transiently: [`InvokeError::AllModelsExhausted`]
    pub async fn invoke(
        &self,
        messages: &[ChatMessage],
        agent: &AgentConfig,
        response_format: Option<ResponseFormat>,
    ) -> InvokeResult<InvocationResult> {
        if agent.kind != ModelKind::Chat {
            return Err(InvokeError::IncompatibleAgentKind {
                agent: agent.id.key().to_string(),
                kind: agent.kind,
            });
        }
        if messages.is_empty() {
            return Err(InvokeError::InvalidRequest(
                "at least one message is required".to_string(),
            ));
        }

        let span = info_span!(
            "invoke",
            agent = %agent.id,
            provider = self.provider.name(),
            invocation = %Uuid::new_v4()
        );
        self.run_chain(messages, agent, response_format)
            .instrument(span)
            .await
    }

    async fn run_chain(
        &self,
        messages: &[ChatMessage],
        agent: &AgentConfig,
        response_format: Option<ResponseFormat>,
    ) -> InvokeResult<InvocationResult> {
        let sequence = attempt_sequence(agent);
        let total = sequence.len();
        let mut attempts = Vec::with_capacity(total);
        let mut last_error = None;

        for (index, model) in sequence.iter().enumerate() {
            debug!(attempt = index + 1, total, model = %model, "Attempting model");

            let request = CompletionRequest::new(model.clone(), messages.to_vec())
                .response_format(response_format);
            let started_at = Utc::now();
            let clock = Instant::now();
            let outcome = self.attempt(&request).await;
            let duration_ms = clock.elapsed().as_millis() as u64;

            match outcome {
                Ok(completion) => {
                    attempts.push(AttemptRecord {
                        model: model.clone(),
                        outcome: AttemptOutcome::Succeeded,
                        started_at,
                        duration_ms,
                    });
                    info!(
                        model = %model,
                        attempts = attempts.len(),
                        output_tokens = completion.output_tokens,
                        "Model answered"
                    );
                    return Ok(InvocationResult {
                        text: completion.content,
                        used_model: model.clone(),
                        attempts,
                    });
                }
                Err(err) => {
                    warn!("Model {} failed with {} ({}).", model, err.signal(), err.class);
                    attempts.push(AttemptRecord {
                        model: model.clone(),
                        outcome: AttemptOutcome::Failed {
                            class: err.class,
                            message: err.message.clone(),
                        },
                        started_at,
                        duration_ms,
                    });

                    if !err.is_transient() {
                        return Err(InvokeError::Provider(err));
                    }

                    last_error = Some(err);
                    if index + 1 < total {
                        debug!(cooldown_ms = self.config.cooldown.as_millis() as u64, "Cooling down");
                        tokio::time::sleep(self.config.cooldown).await;
                    }
                }
            }
        }

        match last_error {
            Some(last) => Err(InvokeError::AllModelsExhausted {
                attempted: sequence,
                last,
            }),
            None => Err(InvokeError::NoModelsAvailable(agent.id.key().to_string())),
        }
    }

    async fn attempt(&self, request: &CompletionRequest) -> ProviderResult<Completion> {
        match self.config.attempt_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.provider.complete(request)).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::timeout(&request.model, limit)),
            },
            None => self.provider.complete(request).await,
        }
    }
}

/// Invoke with the default configuration (1s cooldown, no attempt timeout).
pub async fn invoke(
    provider: Arc<dyn CompletionProvider>,
    messages: &[ChatMessage],
    agent: &AgentConfig,
    response_format: Option<ResponseFormat>,
) -> InvokeResult<InvocationResult> {
    FallbackInvoker::new(provider)
        .invoke(messages, agent, response_format)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureClass;
    use crate::provider::MockCompletionProvider;
    use letterly_agents::AgentId;
    use mockall::predicate::function;
    use mockall::Sequence;

    fn agent(primary: &str, fallbacks: &[&str]) -> AgentConfig {
        AgentConfig::new(AgentId::Generate, "Draft Generator", ModelKind::Chat, primary)
            .fallbacks(fallbacks.iter().copied())
            .instruction("Act as an expert writer.")
    }

    fn messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("Act as an expert writer."),
            ChatMessage::user("Thank Sam for the flowers"),
        ]
    }

    fn for_model(model: &'static str) -> impl Fn(&CompletionRequest) -> bool {
        move |request: &CompletionRequest| request.model == model
    }

    #[test]
    fn test_attempt_sequence_primary_first() {
        let config = agent("m1", &["m2", "m3"]);
        assert_eq!(attempt_sequence(&config), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_attempt_sequence_dedupes_primary() {
        let config = agent("m1", &["m2", "m1", "m3"]);
        assert_eq!(attempt_sequence(&config), vec!["m1", "m2", "m3"]);

        let config = agent("m1", &["m1"]);
        assert_eq!(attempt_sequence(&config), vec!["m1"]);
    }

    #[test]
    fn test_attempt_sequence_dedupes_fallbacks_and_skips_blanks() {
        let config = agent("m1", &["m2", "", "m2", " m3 "]);
        assert_eq!(attempt_sequence(&config), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_attempt_sequence_empty_primary() {
        let config = agent("", &[]);
        assert!(attempt_sequence(&config).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_then_success() {
        let mut provider = MockCompletionProvider::new();
        let mut seq = Sequence::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_complete()
            .with(function(for_model("m1")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ProviderError::from_status("m1", 429, "rate limited")));
        provider
            .expect_complete()
            .with(function(for_model("m2")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Completion::text("Dear Sam, ...")));

        let start = tokio::time::Instant::now();
        let result = FallbackInvoker::new(Arc::new(provider))
            .invoke(&messages(), &agent("m1", &["m2"]), None)
            .await
            .unwrap();

        assert_eq!(result.text, "Dear Sam, ...");
        assert_eq!(result.used_model, "m2");
        assert!(result.used_fallback());
        let elapsed = start.elapsed();
        assert!(elapsed >= DEFAULT_COOLDOWN && elapsed < DEFAULT_COOLDOWN * 2);
    }

    #[tokio::test]
    async fn test_non_transient_aborts_chain() {
        let mut provider = MockCompletionProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_complete()
            .with(function(for_model("m1")))
            .times(1)
            .returning(|_| Err(ProviderError::from_status("m1", 401, "invalid api key")));
        provider
            .expect_complete()
            .with(function(for_model("m2")))
            .never();

        let err = FallbackInvoker::new(Arc::new(provider))
            .invoke(&messages(), &agent("m1", &["m2"]), None)
            .await
            .unwrap_err();

        match err {
            InvokeError::Provider(err) => {
                assert_eq!(err.status, Some(401));
                assert_eq!(err.class, FailureClass::NonTransient);
                assert_eq!(err.model, "m1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_response_format_passed_through() {
        let mut provider = MockCompletionProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider
            .expect_complete()
            .withf(|request| request.response_format == Some(ResponseFormat::JsonObject))
            .times(1)
            .returning(|_| Ok(Completion::text("not json at all")));

        let result = FallbackInvoker::new(Arc::new(provider))
            .invoke(&messages(), &agent("m1", &[]), Some(ResponseFormat::JsonObject))
            .await
            .unwrap();

        assert_eq!(result.text, "not json at all");
    }

    #[tokio::test]
    async fn test_rejects_non_chat_agent() {
        let mut provider = MockCompletionProvider::new();
        provider.expect_complete().never();

        let embedding = AgentConfig::new(
            AgentId::Score,
            "Similarity Scorer",
            ModelKind::Embedding,
            "openai/text-embedding-3-large",
        );
        let err = FallbackInvoker::new(Arc::new(provider))
            .invoke(&messages(), &embedding, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InvokeError::IncompatibleAgentKind {
                kind: ModelKind::Embedding,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_sequence() {
        let mut provider = MockCompletionProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider.expect_complete().never();

        let err = FallbackInvoker::new(Arc::new(provider))
            .invoke(&messages(), &agent(" ", &[]), None)
            .await
            .unwrap_err();

        assert!(matches!(err, InvokeError::NoModelsAvailable(ref id) if id == "GENERATE"));
    }

    #[tokio::test]
    async fn test_empty_messages_rejected() {
        let mut provider = MockCompletionProvider::new();
        provider.expect_complete().never();

        let err = FallbackInvoker::new(Arc::new(provider))
            .invoke(&[], &agent("m1", &[]), None)
            .await
            .unwrap_err();

        assert!(matches!(err, InvokeError::InvalidRequest(_)));
    }
}
