//! Mock provider for testing.
//!
//! Provides a scripted implementation of [`CompletionProvider`] for use in
//! tests without network access. Replies are queued per model and every
//! request is captured for later verification.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::CompletionProvider;
use crate::types::{Completion, CompletionRequest};

/// Predefined reply for one call.
#[derive(Debug, Clone)]
pub struct MockReply {
    result: Result<String, MockFailure>,
    delay: Option<Duration>,
}

#[derive(Debug, Clone)]
enum MockFailure {
    Status(u16, String),
    Error(ProviderError),
}

impl MockReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            result: Ok(content.into()),
            delay: None,
        }
    }

    /// Fail with an HTTP status, classified the same way a real provider would.
    pub fn status(status: u16) -> Self {
        Self::status_with_message(status, format!("mock status {}", status))
    }

    pub fn status_with_message(status: u16, message: impl Into<String>) -> Self {
        Self {
            result: Err(MockFailure::Status(status, message.into())),
            delay: None,
        }
    }

    /// Fail with a fully specified error. The model field is replaced by
    /// the model actually requested.
    pub fn error(error: ProviderError) -> Self {
        Self {
            result: Err(MockFailure::Error(error)),
            delay: None,
        }
    }

    /// Wait before answering.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn resolve(self, model: &str) -> ProviderResult<Completion> {
        match self.result {
            Ok(content) => Ok(Completion::text(content)),
            Err(MockFailure::Status(status, message)) => {
                Err(ProviderError::from_status(model, status, message))
            }
            Err(MockFailure::Error(mut error)) => {
                error.model = model.to_string();
                Err(error)
            }
        }
    }
}

/// Captured request information for verification.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub request: CompletionRequest,
    /// Time since the mock was created, as seen by the tokio clock
    pub at: Duration,
}

/// Mock completion provider for testing.
///
/// Cloning shares the script and the captured requests.
#[derive(Clone)]
pub struct MockProvider {
    /// Queued replies per model.
    replies: Arc<RwLock<HashMap<String, VecDeque<MockReply>>>>,
    /// Reply used once a model's queue is empty.
    default_reply: Arc<RwLock<MockReply>>,
    /// Captured requests for verification.
    captured: Arc<RwLock<Vec<CapturedRequest>>>,
    created: tokio::time::Instant,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a mock that answers every model with an empty completion.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(RwLock::new(HashMap::new())),
            default_reply: Arc::new(RwLock::new(MockReply::text(""))),
            captured: Arc::new(RwLock::new(Vec::new())),
            created: tokio::time::Instant::now(),
        }
    }

    /// Queue a reply for the next call against `model`.
    pub fn reply(self, model: impl Into<String>, reply: MockReply) -> Self {
        self.replies
            .write()
            .entry(model.into())
            .or_default()
            .push_back(reply);
        self
    }

    /// Set the reply used when no scripted reply is queued.
    pub fn default_reply(self, reply: MockReply) -> Self {
        *self.default_reply.write() = reply;
        self
    }

    /// Get all captured requests.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.read().clone()
    }

    /// Models requested, in call order.
    pub fn models_called(&self) -> Vec<String> {
        self.captured
            .read()
            .iter()
            .map(|c| c.request.model.clone())
            .collect()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.captured.read().len()
    }

    /// Number of calls made against a specific model.
    pub fn calls_for(&self, model: &str) -> usize {
        self.captured
            .read()
            .iter()
            .filter(|c| c.request.model == model)
            .count()
    }

    /// Clear all captured requests.
    pub fn clear_requests(&self) {
        self.captured.write().clear();
    }

    fn next_reply(&self, model: &str) -> MockReply {
        self.replies
            .write()
            .get_mut(model)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| self.default_reply.read().clone())
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> ProviderResult<Completion> {
        self.captured.write().push(CapturedRequest {
            request: request.clone(),
            at: self.created.elapsed(),
        });

        let reply = self.next_reply(&request.model);
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        reply.resolve(&request.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;

    fn request(model: &str) -> CompletionRequest {
        CompletionRequest::new(model, vec![ChatMessage::user("hello")])
    }

    #[tokio::test]
    async fn test_scripted_replies_per_model() {
        let mock = MockProvider::new()
            .reply("m1", MockReply::status(503))
            .reply("m1", MockReply::text("second"))
            .reply("m2", MockReply::text("other"));

        let first = mock.complete(&request("m1")).await.unwrap_err();
        assert!(first.is_transient());
        assert_eq!(first.model, "m1");

        assert_eq!(mock.complete(&request("m1")).await.unwrap().content, "second");
        assert_eq!(mock.complete(&request("m2")).await.unwrap().content, "other");
        assert_eq!(mock.complete(&request("m1")).await.unwrap().content, "");

        assert_eq!(mock.models_called(), vec!["m1", "m1", "m2", "m1"]);
        assert_eq!(mock.calls_for("m1"), 3);
    }

    #[tokio::test]
    async fn test_default_reply_and_error_model() {
        let mock = MockProvider::new().default_reply(MockReply::error(
            ProviderError::non_transient("placeholder", "bad request").with_code("invalid_request"),
        ));

        let err = mock.complete(&request("m7")).await.unwrap_err();
        assert_eq!(err.model, "m7");
        assert_eq!(err.code.as_deref(), Some("invalid_request"));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_clear_requests() {
        let mock = MockProvider::new();
        let _ = mock.complete(&request("m1")).await;
        assert_eq!(mock.call_count(), 1);

        mock.clear_requests();
        assert_eq!(mock.call_count(), 0);
    }
}
