//! Model catalog.
//!
//! The catalog lists every model the assistant knows how to present to an
//! operator, tagged with the kind of request it can serve. Invocation never
//! consults it: a caller-resolved model string is trusted as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which invocation path (and which pool of models) an agent or model belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Chat,
    Embedding,
    Image,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Chat => "chat",
            ModelKind::Embedding => "embedding",
            ModelKind::Image => "image",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![ModelKind::Chat, ModelKind::Embedding, ModelKind::Image]
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" => Ok(ModelKind::Chat),
            "embedding" => Ok(ModelKind::Embedding),
            "image" => Ok(ModelKind::Image),
            other => Err(format!("unknown model kind: {}", other)),
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Provider model identifier (e.g., "openai/gpt-oss-120b")
    pub id: &'static str,
    /// Human-friendly display name
    pub display_name: &'static str,
    pub kind: ModelKind,
}

impl ModelDescriptor {
    pub const fn new(id: &'static str, display_name: &'static str, kind: ModelKind) -> Self {
        Self {
            id,
            display_name,
            kind,
        }
    }

    /// Whether the model is served from a free tier.
    pub fn is_free(&self) -> bool {
        self.id.ends_with(":free")
    }
}

/// Every model known to the assistant, in presentation order.
pub const MODELS: &[ModelDescriptor] = &[
    // Chat
    ModelDescriptor::new("openai/gpt-oss-120b", "GPT-OSS 120B", ModelKind::Chat),
    ModelDescriptor::new("openai/gpt-oss-20b", "GPT-OSS 20B", ModelKind::Chat),
    ModelDescriptor::new("openai/gpt-oss-120b:free", "GPT-OSS 120B (Free)", ModelKind::Chat),
    ModelDescriptor::new("openai/gpt-oss-20b:free", "GPT-OSS 20B (Free)", ModelKind::Chat),
    ModelDescriptor::new(
        "google/gemini-2.0-flash-exp:free",
        "Google Gemini 2.0 Flash (Free)",
        ModelKind::Chat,
    ),
    ModelDescriptor::new(
        "meta-llama/llama-3.3-70b-instruct:free",
        "Llama 3.3 70B (Free)",
        ModelKind::Chat,
    ),
    ModelDescriptor::new(
        "nousresearch/hermes-3-llama-3.1-405b:free",
        "Hermes 3 405B (Free)",
        ModelKind::Chat,
    ),
    ModelDescriptor::new(
        "qwen/qwen-2.5-vl-7b-instruct:free",
        "Qwen 2.5 VL 7B (Free)",
        ModelKind::Chat,
    ),
    ModelDescriptor::new(
        "meta-llama/llama-3.2-11b-vision-instruct:free",
        "Llama 3.2 11B (Free)",
        ModelKind::Chat,
    ),
    ModelDescriptor::new(
        "meta-llama/llama-3-8b-instruct:free",
        "Llama 3 8B (Free)",
        ModelKind::Chat,
    ),
    ModelDescriptor::new(
        "microsoft/phi-3-medium-128k-instruct:free",
        "Phi-3 Medium (Free)",
        ModelKind::Chat,
    ),
    ModelDescriptor::new(
        "mistralai/mistral-7b-instruct:free",
        "Mistral 7B (Free)",
        ModelKind::Chat,
    ),
    // Embedding
    ModelDescriptor::new(
        "openai/text-embedding-3-large",
        "OpenAI Embedding 3 Large",
        ModelKind::Embedding,
    ),
    ModelDescriptor::new(
        "openai/text-embedding-3-small",
        "OpenAI Embedding 3 Small",
        ModelKind::Embedding,
    ),
    ModelDescriptor::new(
        "mistralai/mistral-embed-2312",
        "Mistral Embed (2312)",
        ModelKind::Embedding,
    ),
    ModelDescriptor::new(
        "google/gemini-embedding-001",
        "Google Gemini Embed",
        ModelKind::Embedding,
    ),
    // Image
    ModelDescriptor::new("gemini-2.5-flash-image", "Gemini 2.5 Flash Image", ModelKind::Image),
];

/// Find a catalog entry by identifier.
pub fn find_model(id: &str) -> Option<&'static ModelDescriptor> {
    MODELS.iter().find(|m| m.id == id)
}
