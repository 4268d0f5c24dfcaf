//! The letter-writing assistant.
//!
//! One method per task. Each resolves its agent (registry default, then the
//! workspace settings, then the request's own overrides), builds the prompt
//! and hands the pair of messages to the fallback invoker.

use letterly_agents::{AgentId, AgentOverrides, AgentRegistry, AgentSettings};
use letterly_llm::{ChatMessage, FallbackInvoker, InvocationResult, ResponseFormat};
use tracing::{debug, info, warn};

use crate::error::{TaskError, TaskResult};
use crate::parse;
use crate::prompts;
use crate::requests::{
    DetectImageRequest, DetectToneRequest, GenerateRequest, GeneratedLetter, ImageDetection,
    LengthRecommendation, LetterLength, MatchSuggestionsRequest, MatchedSuggestions,
    RecommendLengthRequest, RefineRequest, RefinedNotes, SuggestRequest, Suggestions,
    SyncNotesRequest, SyncedNotes, ToneDetection,
};

/// Notes shorter than this get no suggestions.
const MIN_SUGGEST_NOTES: usize = 5;
/// Notes shorter than this are recommended a short letter without asking a model.
const MIN_RECOMMEND_NOTES: usize = 10;

/// Runs Letterly's writing tasks against a [`FallbackInvoker`].
#[derive(Clone)]
pub struct LetterAssistant {
    registry: &'static AgentRegistry,
    invoker: FallbackInvoker,
    settings: AgentSettings,
}

impl LetterAssistant {
    /// Assistant over the built-in agents with no stored settings.
    pub fn new(invoker: FallbackInvoker) -> Self {
        Self {
            registry: AgentRegistry::builtin(),
            invoker,
            settings: AgentSettings::default(),
        }
    }

    /// Use per-agent defaults loaded from a workspace.
    pub fn with_settings(mut self, settings: AgentSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_registry(mut self, registry: &'static AgentRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &'static AgentRegistry {
        self.registry
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// Write a letter from rough notes.
    ///
    /// A note line asking for an illustration is sent to the image-request
    /// agent and removed from the notes before the letter is written. A
    /// failure there is logged and does not fail the letter.
    pub async fn generate(&self, request: &GenerateRequest) -> TaskResult<GeneratedLetter> {
        if request.rough_notes.trim().is_empty() {
            return Err(TaskError::invalid_input("Rough notes are required"));
        }

        let mut image_subject = None;
        if let Some(line) = parse::find_image_request(&request.rough_notes) {
            let detection = DetectImageRequest {
                message: line.to_string(),
                overrides: model_only(&request.overrides),
            };
            match self.detect_image(&detection).await {
                Ok(found) => image_subject = found.image_subject,
                Err(e) => warn!("Image request detection failed: {}", e),
            }
        }

        let notes = parse::strip_image_requests(&request.rough_notes);
        let prompt = prompts::generate(request, &notes);
        let result = self
            .run(AgentId::Generate, &request.overrides, prompt, None)
            .await?;

        info!(model = %result.used_model, "Letter generated");
        Ok(GeneratedLetter {
            text: result.text,
            used_model: result.used_model,
            image_subject,
        })
    }

    /// Update rough notes from the user's feedback.
    ///
    /// The feedback is also checked for a tone change request; that check
    /// never fails the refinement.
    pub async fn refine(&self, request: &RefineRequest) -> TaskResult<RefinedNotes> {
        let tone_request = DetectToneRequest {
            message: request.instructions.clone(),
            existing_tones: request.existing_tones.clone(),
            overrides: model_only(&request.overrides),
        };
        let detected_tone = match self.detect_tone(&tone_request).await {
            Ok(detection) => detection.tone,
            Err(e) => {
                warn!("Tone detection failed: {}", e);
                None
            }
        };

        if let (Some(current), Some(detected)) = (&request.current_tone, &detected_tone) {
            debug!(%current, %detected, "Tone change requested");
        }

        let prompt = prompts::refine(
            &request.rough_notes,
            &request.instructions,
            &request.conversation_history,
        );
        let result = self
            .run(AgentId::Refine, &request.overrides, prompt, None)
            .await?;

        Ok(RefinedNotes {
            text: result.text,
            used_model: result.used_model,
            detected_tone,
        })
    }

    /// Suggest improvements to the notes and current draft.
    pub async fn suggest(&self, request: &SuggestRequest) -> TaskResult<Suggestions> {
        if request.rough_notes.trim().chars().count() < MIN_SUGGEST_NOTES {
            return Ok(Suggestions {
                suggestions: Vec::new(),
                used_model: None,
            });
        }

        let prompt = prompts::suggest(request);
        let result = self
            .run(
                AgentId::Suggest,
                &request.overrides,
                prompt,
                Some(ResponseFormat::JsonObject),
            )
            .await?;

        if result.text.trim().is_empty() {
            warn!(model = %result.used_model, "Suggest agent returned empty content");
        }
        let suggestions = parse::parse_suggestions(&result.text);
        debug!(count = suggestions.len(), "Parsed suggestions");

        Ok(Suggestions {
            suggestions,
            used_model: Some(result.used_model),
        })
    }

    /// Recommend a letter length for the notes.
    ///
    /// A model override on the request is ignored; one stored in the
    /// workspace settings still applies.
    pub async fn recommend_length(
        &self,
        request: &RecommendLengthRequest,
    ) -> TaskResult<LengthRecommendation> {
        if request.rough_notes.trim().chars().count() < MIN_RECOMMEND_NOTES {
            return Ok(LengthRecommendation {
                recommendation: LetterLength::Short,
                used_model: None,
            });
        }

        let overrides = request.overrides.clone().without_model();
        let prompt = prompts::recommend_length(&request.rough_notes);
        let result = self
            .run(AgentId::RecommendLength, &overrides, prompt, None)
            .await?;

        Ok(LengthRecommendation {
            recommendation: parse::parse_length(&result.text),
            used_model: Some(result.used_model),
        })
    }

    /// Find points added while editing the letter that the notes lack.
    pub async fn sync_notes(&self, request: &SyncNotesRequest) -> TaskResult<SyncedNotes> {
        if request.edited_letter.trim().is_empty() || request.rough_notes.trim().is_empty() {
            return Ok(SyncedNotes {
                new_points: Vec::new(),
                used_model: None,
            });
        }

        let prompt = prompts::sync_notes(request);
        let result = self
            .run(AgentId::SyncNotes, &request.overrides, prompt, None)
            .await?;

        Ok(SyncedNotes {
            new_points: parse::parse_bullets(&result.text),
            used_model: Some(result.used_model),
        })
    }

    /// Decide whether a message asks for a different tone.
    pub async fn detect_tone(&self, request: &DetectToneRequest) -> TaskResult<ToneDetection> {
        if request.message.trim().is_empty() {
            return Ok(ToneDetection::none());
        }

        let prompt = prompts::detect_tone(request);
        let result = self
            .run(AgentId::DetectTone, &request.overrides, prompt, None)
            .await?;

        let tone = result.text.trim();
        if tone.is_empty() {
            return Ok(ToneDetection {
                used_model: Some(result.used_model),
                ..ToneDetection::none()
            });
        }

        let is_new_tone = !request.existing_tones.iter().any(|t| t == tone);
        Ok(ToneDetection {
            tone: Some(tone.to_string()),
            is_new_tone,
            used_model: Some(result.used_model),
        })
    }

    /// Extract the subject of an illustration requested in a message.
    pub async fn detect_image(&self, request: &DetectImageRequest) -> TaskResult<ImageDetection> {
        if request.message.trim().is_empty() {
            return Err(TaskError::invalid_input("Message is required"));
        }

        let result = self
            .run(
                AgentId::DetectImage,
                &request.overrides,
                request.message.clone(),
                None,
            )
            .await?;

        let subject = result.text.trim();
        Ok(ImageDetection {
            image_subject: (!subject.is_empty()).then(|| subject.to_string()),
            used_model: result.used_model,
        })
    }

    /// Find which review suggestions a chat message is addressing.
    pub async fn match_suggestions(
        &self,
        request: &MatchSuggestionsRequest,
    ) -> TaskResult<MatchedSuggestions> {
        if request.chat_input.trim().is_empty() || request.suggestions.is_empty() {
            return Ok(MatchedSuggestions {
                matched_suggestions: Vec::new(),
                used_model: None,
            });
        }

        let prompt = prompts::match_suggestions(&request.chat_input, &request.suggestions);
        let result = self
            .run(AgentId::MatchSuggestions, &request.overrides, prompt, None)
            .await?;

        let matched_suggestions = parse::parse_matches(&result.text, request.suggestions.len());
        debug!(count = matched_suggestions.len(), "Matched suggestions");

        Ok(MatchedSuggestions {
            matched_suggestions,
            used_model: Some(result.used_model),
        })
    }

    async fn run(
        &self,
        id: AgentId,
        overrides: &AgentOverrides,
        prompt: String,
        response_format: Option<ResponseFormat>,
    ) -> TaskResult<InvocationResult> {
        let overrides = AgentOverrides::from_parts(
            overrides.model.clone(),
            overrides.instruction.clone(),
        )
        .or(&self.settings.overrides_for(id));
        let agent = self.registry.resolve(id, &overrides)?;

        debug!(agent = %id, model = %agent.primary_model, "Running task");
        let messages = vec![
            ChatMessage::system(agent.instruction.as_str()),
            ChatMessage::user(prompt),
        ];
        Ok(self.invoker.invoke(&messages, &agent, response_format).await?)
    }
}

/// Helper calls follow the caller's model choice but keep their own instruction.
fn model_only(overrides: &AgentOverrides) -> AgentOverrides {
    AgentOverrides::from_parts(overrides.model.clone(), None)
}
