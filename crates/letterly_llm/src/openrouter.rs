//! OpenRouter adapter for chat completions.
//!
//! OpenRouter exposes an OpenAI-compatible API, so requests are plain
//! `POST /chat/completions` calls. Every failure is classified here, at the
//! point the raw HTTP or transport error is first observed.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FailureClass, InvokeError, InvokeResult, ProviderError, ProviderResult};
use crate::provider::CompletionProvider;
use crate::types::{Completion, CompletionRequest};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const APP_TITLE: &str = "Letterly";

/// Connection settings for the OpenRouter API.
#[derive(Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    /// Sent as `HTTP-Referer` for attribution
    pub site_url: String,
    /// Sent as `X-Title`
    pub title: String,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("site_url", &self.site_url)
            .field("title", &self.title)
            .finish()
    }
}

impl LlmSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            title: APP_TITLE.to_string(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    /// Read settings from the process environment.
    ///
    /// - `OPENROUTER_API_KEY` (required)
    /// - `LETTERLY_BASE_URL` (optional)
    /// - `NEXT_PUBLIC_SITE_URL`, else `https://$VERCEL_URL`, else localhost
    pub fn from_env() -> InvokeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmSettings::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> InvokeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENROUTER_API_KEY").ok_or(InvokeError::NotConfigured)?;
        let site_url = get("NEXT_PUBLIC_SITE_URL")
            .or_else(|| get("VERCEL_URL").map(|host| format!("https://{}", host)))
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

        let mut settings = Self::new(api_key).site_url(site_url);
        if let Some(base_url) = get("LETTERLY_BASE_URL") {
            settings = settings.base_url(base_url);
        }
        Ok(settings)
    }
}

/// OpenRouter-backed [`CompletionProvider`].
pub struct OpenRouterProvider {
    settings: LlmSettings,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider from environment variables.
    pub fn from_env() -> InvokeResult<Self> {
        Ok(Self::new(LlmSettings::from_env()?))
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: &CompletionRequest) -> ProviderResult<Completion> {
        let model = request.model.as_str();
        debug!(model, messages = request.messages.len(), "Sending chat completion");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .header("HTTP-Referer", &self.settings.site_url)
            .header("X-Title", &self.settings.title)
            .json(request)
            .send()
            .await
            .map_err(|e| classify_transport(model, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(model, &e))?;

        if !status.is_success() {
            return Err(classify_status(model, status.as_u16(), &body));
        }

        parse_completion(model, &body)
    }
}

/// Classify a failure that happened before an HTTP status was available.
///
/// Without a rate-limit or server status there is nothing that another model
/// would answer differently: an unreachable endpoint or a dead network fails
/// the same way for the whole chain.
fn classify_transport(model: &str, error: &reqwest::Error) -> ProviderError {
    let (label, code) = if error.is_timeout() {
        ("Network timeout", "timeout")
    } else if error.is_connect() {
        ("Network error", "connect")
    } else {
        ("Request error", "request")
    };
    ProviderError::non_transient(model, format!("{}: {}", label, error)).with_code(code)
}

/// Build the error for a non-success response, keeping the provider's own
/// message and code when the body carries them.
fn classify_status(model: &str, status: u16, body: &str) -> ProviderError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);
    let message = detail
        .as_ref()
        .and_then(|d| d.message.clone())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.trim().to_string()
            }
        });

    let mut error = ProviderError::from_status(model, status, message);
    if let Some(code) = detail.and_then(|d| d.code) {
        error = error.with_code(code_label(&code));
    }
    error
}

fn parse_completion(model: &str, body: &str) -> ProviderResult<Completion> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::non_transient(model, format!("Failed to parse response: {}", e))
            .with_code("malformed_response")
    })?;

    // Some providers report failures inside a 200 body.
    if let Some(detail) = response.error {
        let status = detail
            .code
            .as_ref()
            .and_then(|c| c.as_u64())
            .and_then(|c| u16::try_from(c).ok());
        let message = detail
            .message
            .unwrap_or_else(|| "provider returned an error".to_string());
        return Err(match status {
            Some(status) => ProviderError::from_status(model, status, message),
            None => ProviderError {
                class: FailureClass::NonTransient,
                model: model.to_string(),
                status: None,
                code: detail.code.as_ref().map(code_label),
                message,
            },
        });
    }

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    let (input_tokens, output_tokens) = response
        .usage
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or((0, 0));

    Ok(Completion {
        content,
        input_tokens,
        output_tokens,
    })
}

fn code_label(code: &serde_json::Value) -> String {
    match code.as_str() {
        Some(code) => code.to_string(),
        None => code.to_string(),
    }
}

// OpenAI-compatible response types
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    code: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_settings_require_api_key() {
        let err = LlmSettings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, InvokeError::NotConfigured));

        let err = LlmSettings::from_lookup(lookup(&[("OPENROUTER_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, InvokeError::NotConfigured));
    }

    #[test]
    fn test_settings_site_url_precedence() {
        let settings = LlmSettings::from_lookup(lookup(&[("OPENROUTER_API_KEY", "k")])).unwrap();
        assert_eq!(settings.site_url, "http://localhost:3000");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.title, "Letterly");

        let settings = LlmSettings::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "k"),
            ("VERCEL_URL", "letterly.vercel.app"),
        ]))
        .unwrap();
        assert_eq!(settings.site_url, "https://letterly.vercel.app");

        let settings = LlmSettings::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "k"),
            ("VERCEL_URL", "letterly.vercel.app"),
            ("NEXT_PUBLIC_SITE_URL", "https://letterly.app"),
            ("LETTERLY_BASE_URL", "http://localhost:8080/v1/"),
        ]))
        .unwrap();
        assert_eq!(settings.site_url, "https://letterly.app");
        assert_eq!(settings.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_settings_debug_redacts_key() {
        let settings = LlmSettings::new("sk-or-secret");
        assert!(!format!("{:?}", settings).contains("sk-or-secret"));
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{
            "choices": [{ "message": { "role": "assistant", "content": "Dear Sam, ..." } }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 34, "total_tokens": 46 }
        }"#;
        let completion = parse_completion("m1", body).unwrap();
        assert_eq!(completion.content, "Dear Sam, ...");
        assert_eq!(completion.input_tokens, 12);
        assert_eq!(completion.output_tokens, 34);
    }

    #[test]
    fn test_parse_completion_null_content_is_empty() {
        let body = r#"{ "choices": [{ "message": { "role": "assistant", "content": null } }] }"#;
        assert_eq!(parse_completion("m1", body).unwrap().content, "");

        let body = r#"{ "choices": [] }"#;
        assert_eq!(parse_completion("m1", body).unwrap().content, "");
    }

    #[test]
    fn test_parse_completion_malformed_is_non_transient() {
        let err = parse_completion("m1", "<html>oops</html>").unwrap_err();
        assert!(!err.is_transient());
        assert_eq!(err.code.as_deref(), Some("malformed_response"));
    }

    #[test]
    fn test_parse_completion_embedded_error() {
        let body = r#"{ "error": { "message": "Rate limit exceeded", "code": 429 } }"#;
        let err = parse_completion("m1", body).unwrap_err();
        assert!(err.is_transient());
        assert_eq!(err.status, Some(429));

        let body = r#"{ "error": { "message": "No auth credentials found", "code": 401 } }"#;
        let err = parse_completion("m1", body).unwrap_err();
        assert!(!err.is_transient());
    }

    #[test]
    fn test_parse_completion_embedded_error_without_status_aborts() {
        let body = r#"{ "error": { "message": "Provider returned error", "code": "upstream_error" } }"#;
        let err = parse_completion("m1", body).unwrap_err();
        assert!(!err.is_transient());
        assert_eq!(err.status, None);
        assert_eq!(err.code.as_deref(), Some("upstream_error"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_stops_the_chain() {
        use crate::fallback::FallbackInvoker;
        use crate::types::ChatMessage;
        use letterly_agents::{AgentConfig, AgentId, ModelKind};
        use std::sync::Arc;

        let provider = OpenRouterProvider::new(LlmSettings::new("k").base_url("http://127.0.0.1:1"));
        let agent = AgentConfig::new(AgentId::Generate, "Draft Generator", ModelKind::Chat, "m1")
            .fallback("m2")
            .instruction("Act as an expert writer.");
        let messages = vec![
            ChatMessage::system(agent.instruction.clone()),
            ChatMessage::user("- thank Sam"),
        ];

        let err = FallbackInvoker::new(Arc::new(provider))
            .invoke(&messages, &agent, None)
            .await
            .unwrap_err();

        match err {
            InvokeError::Provider(e) => {
                assert_eq!(e.model, "m1");
                assert!(!e.is_transient());
                assert_eq!(e.status, None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_classify_status_uses_error_body() {
        let body = r#"{ "error": { "message": "Provider returned error", "code": "upstream_error" } }"#;
        let err = classify_status("m1", 502, body);
        assert!(err.is_transient());
        assert_eq!(err.message, "Provider returned error");
        assert_eq!(err.code.as_deref(), Some("upstream_error"));

        let err = classify_status("m1", 400, "");
        assert!(!err.is_transient());
        assert_eq!(err.message, "HTTP 400");
    }
}
