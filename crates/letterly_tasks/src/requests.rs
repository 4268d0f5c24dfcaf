//! Request and response types for each task.
//!
//! Field names serialize in camelCase to match the browser client.

use std::fmt;
use std::str::FromStr;

use letterly_agents::AgentOverrides;
use serde::{Deserialize, Serialize};

/// Tones offered when the caller does not supply its own list.
pub const DEFAULT_TONES: &[&str] = &[
    "Professional",
    "Casual",
    "Persuasive",
    "Apologetic",
    "Warm & Friendly",
    "Firm & Direct",
    "Grateful",
];

/// Requested letter length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterLength {
    Short,
    Medium,
    Long,
}

impl LetterLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterLength::Short => "Short",
            LetterLength::Medium => "Medium",
            LetterLength::Long => "Long",
        }
    }

    pub fn all() -> [Self; 3] {
        [LetterLength::Short, LetterLength::Medium, LetterLength::Long]
    }
}

impl Default for LetterLength {
    fn default() -> Self {
        LetterLength::Medium
    }
}

impl fmt::Display for LetterLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LetterLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LetterLength::all()
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown length: {}", s))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub rough_notes: String,
    pub recipient: Option<String>,
    pub sender: Option<String>,
    pub tone: Option<String>,
    pub length: Option<LetterLength>,
    pub language: Option<String>,
    pub style_example: Option<String>,
    #[serde(flatten)]
    pub overrides: AgentOverrides,
}

impl GenerateRequest {
    pub fn new(rough_notes: impl Into<String>) -> Self {
        Self {
            rough_notes: rough_notes.into(),
            ..Self::default()
        }
    }

    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    pub fn length(mut self, length: LetterLength) -> Self {
        self.length = Some(length);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn style_example(mut self, example: impl Into<String>) -> Self {
        self.style_example = Some(example.into());
        self
    }

    pub fn overrides(mut self, overrides: AgentOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLetter {
    pub text: String,
    pub used_model: String,
    /// Subject of an illustration requested in the notes, if one was detected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_subject: Option<String>,
}

/// One turn of the refinement chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    pub rough_notes: String,
    /// The user's latest feedback
    pub instructions: String,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
    pub current_tone: Option<String>,
    #[serde(default)]
    pub existing_tones: Vec<String>,
    #[serde(flatten)]
    pub overrides: AgentOverrides,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedNotes {
    pub text: String,
    pub used_model: String,
    pub detected_tone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub rough_notes: String,
    pub context: Option<String>,
    pub recipient: Option<String>,
    pub generated_letter: Option<String>,
    pub tone: Option<String>,
    pub length: Option<LetterLength>,
    pub style_example: Option<String>,
    #[serde(flatten)]
    pub overrides: AgentOverrides,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendLengthRequest {
    pub rough_notes: String,
    /// Only the instruction is honored; the agent's own models are always used
    #[serde(flatten)]
    pub overrides: AgentOverrides,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthRecommendation {
    pub recommendation: LetterLength,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncNotesRequest {
    pub edited_letter: String,
    pub rough_notes: String,
    #[serde(flatten)]
    pub overrides: AgentOverrides,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedNotes {
    pub new_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectToneRequest {
    pub message: String,
    #[serde(default)]
    pub existing_tones: Vec<String>,
    #[serde(flatten)]
    pub overrides: AgentOverrides,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneDetection {
    pub tone: Option<String>,
    pub is_new_tone: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_model: Option<String>,
}

impl ToneDetection {
    pub fn none() -> Self {
        Self {
            tone: None,
            is_new_tone: false,
            used_model: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectImageRequest {
    pub message: String,
    #[serde(flatten)]
    pub overrides: AgentOverrides,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetection {
    pub image_subject: Option<String>,
    pub used_model: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSuggestionsRequest {
    /// The chat message to compare against the suggestions
    pub chat_input: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(flatten)]
    pub overrides: AgentOverrides,
}

/// A suggestion the chat message addresses.
///
/// `score` runs from 0.0 (very close) to 1.0 (unrelated).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestionMatch {
    pub index: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedSuggestions {
    pub matched_suggestions: Vec<SuggestionMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_model: Option<String>,
}
