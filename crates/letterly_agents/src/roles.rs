//! Agent role definitions and per-request overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ModelKind;
use crate::error::AgentError;

/// Task roles the assistant can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgentId {
    Generate,
    Refine,
    Suggest,
    RecommendLength,
    SyncNotes,
    Score,
    MatchSuggestionsScorer,
    MatchSuggestions,
    DetectTone,
    DetectImage,
    Image,
}

impl AgentId {
    /// Short kebab-case name used on the command line and in settings files.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::Generate => "generate",
            AgentId::Refine => "refine",
            AgentId::Suggest => "suggest",
            AgentId::RecommendLength => "recommend-length",
            AgentId::SyncNotes => "sync-notes",
            AgentId::Score => "score",
            AgentId::MatchSuggestionsScorer => "match-suggestions-scorer",
            AgentId::MatchSuggestions => "match-suggestions",
            AgentId::DetectTone => "detect-tone",
            AgentId::DetectImage => "detect-image",
            AgentId::Image => "image",
        }
    }

    /// Stable wire key (e.g., `GENERATE`, `DETECT_TONE_REQUEST`).
    pub fn key(&self) -> &'static str {
        match self {
            AgentId::Generate => "GENERATE",
            AgentId::Refine => "REFINE",
            AgentId::Suggest => "SUGGEST",
            AgentId::RecommendLength => "RECOMMEND_LENGTH",
            AgentId::SyncNotes => "SYNC_NOTES",
            AgentId::Score => "SCORED",
            AgentId::MatchSuggestionsScorer => "MATCH_SUGGESTIONS_SCORER",
            AgentId::MatchSuggestions => "MATCH_SUGGESTIONS",
            AgentId::DetectTone => "DETECT_TONE_REQUEST",
            AgentId::DetectImage => "DETECT_IMAGE_REQUEST",
            AgentId::Image => "IMAGE",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            AgentId::Generate,
            AgentId::Refine,
            AgentId::Suggest,
            AgentId::RecommendLength,
            AgentId::SyncNotes,
            AgentId::Score,
            AgentId::MatchSuggestionsScorer,
            AgentId::MatchSuggestions,
            AgentId::DetectTone,
            AgentId::DetectImage,
            AgentId::Image,
        ]
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentId {
    type Err = AgentError;

    /// Accepts either the kebab-case name or the wire key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        AgentId::all()
            .into_iter()
            .find(|id| id.as_str() == normalized || id.key().to_lowercase().replace('_', "-") == normalized)
            .ok_or_else(|| AgentError::unknown(s))
    }
}

impl TryFrom<String> for AgentId {
    type Error = AgentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.key().to_string()
    }
}

/// Configuration of a single agent.
///
/// Values held by the registry are shared across concurrent requests and are
/// never mutated. Customization always produces a fresh value through
/// [`AgentConfig::with_overrides`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub id: AgentId,
    pub display_name: String,
    pub description: String,
    pub kind: ModelKind,
    /// Model attempted first
    pub primary_model: String,
    /// Models tried in order after the primary, on transient failure only
    #[serde(default)]
    pub fallback_models: Vec<String>,
    /// Default system instruction
    pub instruction: String,
    /// Excluded from the end-user configuration surface
    #[serde(default)]
    pub hidden: bool,
}

impl AgentConfig {
    pub fn new(
        id: AgentId,
        display_name: impl Into<String>,
        kind: ModelKind,
        primary_model: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            description: String::new(),
            kind,
            primary_model: primary_model.into(),
            fallback_models: Vec::new(),
            instruction: String::new(),
            hidden: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn fallback(mut self, model: impl Into<String>) -> Self {
        self.fallback_models.push(model.into());
        self
    }

    pub fn fallbacks<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_models.extend(models.into_iter().map(Into::into));
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Copy this configuration with the given overrides applied.
    pub fn with_overrides(&self, overrides: &AgentOverrides) -> Self {
        let mut config = self.clone();
        if let Some(model) = &overrides.model {
            config.primary_model = model.clone();
        }
        if let Some(instruction) = &overrides.instruction {
            config.instruction = instruction.clone();
        }
        config
    }
}

/// Per-request customization of an agent.
///
/// Empty strings are treated as "not set", so a form that submits a blank
/// model or instruction field keeps the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

impl AgentOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = non_blank(model.into());
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = non_blank(instruction.into());
        self
    }

    /// Build from optional request fields.
    pub fn from_parts(model: Option<String>, instruction: Option<String>) -> Self {
        Self {
            model: model.and_then(non_blank),
            instruction: instruction.and_then(non_blank),
        }
    }

    /// Fill unset fields from `defaults`. Fields set on `self` win.
    pub fn or(self, defaults: &AgentOverrides) -> Self {
        Self {
            model: self.model.or_else(|| defaults.model.clone()),
            instruction: self.instruction.or_else(|| defaults.instruction.clone()),
        }
    }

    /// Drop the model override, keeping only the instruction.
    pub fn without_model(mut self) -> Self {
        self.model = None;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_none() && self.instruction.is_none()
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_parse() {
        assert_eq!("generate".parse::<AgentId>().unwrap(), AgentId::Generate);
        assert_eq!("GENERATE".parse::<AgentId>().unwrap(), AgentId::Generate);
        assert_eq!("detect-tone".parse::<AgentId>().unwrap(), AgentId::DetectTone);
        assert_eq!(
            "DETECT_TONE_REQUEST".parse::<AgentId>().unwrap(),
            AgentId::DetectTone
        );
        assert_eq!("scored".parse::<AgentId>().unwrap(), AgentId::Score);
        assert!(matches!(
            "translate".parse::<AgentId>(),
            Err(AgentError::UnknownAgent(id)) if id == "translate"
        ));
    }

    #[test]
    fn test_agent_id_serde_uses_wire_key() {
        let json = serde_json::to_string(&AgentId::RecommendLength).unwrap();
        assert_eq!(json, "\"RECOMMEND_LENGTH\"");

        let back: AgentId = serde_json::from_str("\"sync-notes\"").unwrap();
        assert_eq!(back, AgentId::SyncNotes);
    }

    #[test]
    fn test_with_overrides_copies() {
        let base = AgentConfig::new(AgentId::Generate, "Draft Generator", ModelKind::Chat, "m1")
            .fallback("m2")
            .instruction("Be brief.");

        let custom = base.with_overrides(
            &AgentOverrides::new()
                .with_model("m9")
                .with_instruction("Be verbose."),
        );

        assert_eq!(custom.primary_model, "m9");
        assert_eq!(custom.instruction, "Be verbose.");
        assert_eq!(custom.fallback_models, vec!["m2".to_string()]);
        assert_eq!(base.primary_model, "m1");
        assert_eq!(base.instruction, "Be brief.");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let overrides = AgentOverrides::from_parts(Some("  ".into()), Some(String::new()));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_overrides_or_prefers_self() {
        let request = AgentOverrides::new().with_instruction("request");
        let defaults = AgentOverrides::new()
            .with_model("settings-model")
            .with_instruction("settings");

        let merged = request.or(&defaults);
        assert_eq!(merged.model.as_deref(), Some("settings-model"));
        assert_eq!(merged.instruction.as_deref(), Some("request"));
    }
}
