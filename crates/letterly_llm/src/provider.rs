//! The provider-call primitive.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::{Completion, CompletionRequest};

/// A backend able to run one chat completion against one model.
///
/// Implementations must classify every failure into a [`crate::FailureClass`]
/// before returning it; callers never inspect raw transport errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Issue a single request. No retries happen at this level.
    async fn complete(&self, request: &CompletionRequest) -> ProviderResult<Completion>;
}
