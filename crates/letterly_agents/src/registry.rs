//! The agent registry.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::catalog::{ModelDescriptor, ModelKind, MODELS};
use crate::error::{AgentError, AgentResult};
use crate::instructions;
use crate::roles::{AgentConfig, AgentId, AgentOverrides};

/// Read-only table of agent configurations.
///
/// The built-in table is constructed once per process ([`AgentRegistry::builtin`])
/// and then only read, so it can be shared between concurrent requests
/// without locking.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: BTreeMap<AgentId, AgentConfig>,
    models: &'static [ModelDescriptor],
}

impl AgentRegistry {
    /// Create a registry from explicit configurations and a model catalog.
    pub fn new(agents: impl IntoIterator<Item = AgentConfig>, models: &'static [ModelDescriptor]) -> Self {
        let agents = agents
            .into_iter()
            .map(|agent| {
                debug!("Registering agent: {}", agent.id);
                (agent.id, agent)
            })
            .collect();
        Self { agents, models }
    }

    /// The process-wide registry with the product's agents.
    pub fn builtin() -> &'static AgentRegistry {
        static REGISTRY: OnceLock<AgentRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| AgentRegistry::new(builtin_agents(), MODELS))
    }

    /// Get an agent's shared default configuration.
    pub fn get(&self, id: AgentId) -> AgentResult<&AgentConfig> {
        self.agents
            .get(&id)
            .ok_or_else(|| AgentError::unknown(id.key()))
    }

    /// Get an agent by its kebab-case name or wire key.
    pub fn get_by_name(&self, name: &str) -> AgentResult<&AgentConfig> {
        let id: AgentId = name.parse()?;
        self.get(id)
    }

    /// Build a fresh configuration for one request.
    ///
    /// The stored default is left untouched. An override model that the
    /// catalog lists under a different kind is rejected; models the catalog
    /// does not know are passed through.
    pub fn resolve(&self, id: AgentId, overrides: &AgentOverrides) -> AgentResult<AgentConfig> {
        let base = self.get(id)?;

        if let Some(model) = &overrides.model {
            if let Some(descriptor) = self.find_model(model) {
                if descriptor.kind != base.kind {
                    return Err(AgentError::IncompatibleModel {
                        agent: id.key().to_string(),
                        model: model.clone(),
                        expected: base.kind,
                        actual: descriptor.kind,
                    });
                }
            }
        }

        Ok(base.with_overrides(overrides))
    }

    /// List agents in catalog order, optionally including hidden ones.
    pub fn list_agents(&self, include_hidden: bool) -> Vec<&AgentConfig> {
        self.agents
            .values()
            .filter(|a| include_hidden || !a.hidden)
            .collect()
    }

    /// All catalog models of the given kind, in catalog order.
    pub fn list_models(&self, kind: ModelKind) -> Vec<&'static ModelDescriptor> {
        self.models.iter().filter(|m| m.kind == kind).collect()
    }

    /// Find a catalog entry by identifier.
    pub fn find_model(&self, id: &str) -> Option<&'static ModelDescriptor> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

fn builtin_agents() -> Vec<AgentConfig> {
    vec![
        AgentConfig::new(AgentId::Generate, "Draft Generator", ModelKind::Chat, "openai/gpt-oss-120b:free")
            .description("An expert writer and editor ready to help you with your letter writing. Writes a draft letter from your rough notes, tone, language, and length settings.")
            .fallback("openai/gpt-oss-120b")
            .instruction(instructions::GENERATE),
        AgentConfig::new(AgentId::Refine, "Refinement Editor", ModelKind::Chat, "openai/gpt-oss-120b:free")
            .description("Updates your rough notes based on your chat feedback. Tells the Draft Generator to make another pass.")
            .fallback("openai/gpt-oss-120b")
            .instruction(instructions::REFINE),
        AgentConfig::new(AgentId::Suggest, "Suggestions", ModelKind::Chat, "openai/gpt-oss-120b:free")
            .description("Reviews your draft letter to propose actionable improvements based on the draft letter and your rough notes.")
            .fallback("openai/gpt-oss-120b")
            .instruction(instructions::SUGGEST),
        AgentConfig::new(AgentId::RecommendLength, "Length Analyst", ModelKind::Chat, "openai/gpt-oss-20b:free")
            .description("Analyzes your rough notes to recommend the optimal draft letter length.")
            .fallback("openai/gpt-oss-20b")
            .instruction(instructions::RECOMMEND_LENGTH),
        AgentConfig::new(AgentId::SyncNotes, "Notes Sync", ModelKind::Chat, "openai/gpt-oss-120b:free")
            .description("Updates your rough notes to match changes you make when editing the letter.")
            .fallback("openai/gpt-oss-120b")
            .instruction(instructions::SYNC_NOTES),
        AgentConfig::new(AgentId::Score, "Similarity Scorer", ModelKind::Embedding, "openai/text-embedding-3-large")
            .description("Calculates the match score between your rough notes and the draft letter.")
            .instruction(instructions::SCORE)
            .hidden(),
        AgentConfig::new(
            AgentId::MatchSuggestionsScorer,
            "Suggestion Matcher Scorer",
            ModelKind::Embedding,
            "google/gemini-embedding-001",
        )
        .description("Matches chat messages to editor review suggestions using semantic similarity.")
        .fallbacks(["openai/text-embedding-3-small", "mistralai/mistral-embed"])
        .instruction(instructions::MATCH_SUGGESTIONS_SCORER)
        .hidden(),
        AgentConfig::new(AgentId::MatchSuggestions, "Suggestion Matcher", ModelKind::Chat, "openai/gpt-oss-20b")
            .description("Uses AI reasoning to match chat messages to editor review suggestions.")
            .fallback("openai/gpt-oss-20b:free")
            .instruction(instructions::MATCH_SUGGESTIONS),
        AgentConfig::new(AgentId::DetectTone, "Tone Request Detector", ModelKind::Chat, "openai/gpt-oss-20b:free")
            .description("Analyzes chat messages to detect tone change requests and maps them to existing or new tones.")
            .fallback("openai/gpt-oss-20b")
            .instruction(instructions::DETECT_TONE)
            .hidden(),
        AgentConfig::new(AgentId::DetectImage, "Image Request Detector", ModelKind::Chat, "openai/gpt-oss-20b:free")
            .description("Analyzes chat messages to detect requests for background images or illustrations.")
            .fallback("openai/gpt-oss-20b")
            .instruction(instructions::DETECT_IMAGE)
            .hidden(),
        AgentConfig::new(AgentId::Image, "Line Art Generator", ModelKind::Image, "gemini-2.5-flash-image")
            .description("Creates intricate black and white line art illustrations as watermarks for letters.")
            .instruction(instructions::IMAGE),
    ]
}
